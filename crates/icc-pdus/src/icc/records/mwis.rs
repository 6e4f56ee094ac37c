use icc_core::IccErr;

/// EF_MWIS message waiting indication status, 3GPP TS 31.102 clause 4.2.63.
/// Only the voicemail indication is interpreted; the raw record is kept for updates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mwis {
    pub active: bool,
    /// None when active with an unknown count
    pub message_count: Option<u8>,
    raw: Vec<u8>,
}

impl Mwis {
    pub fn from_bytes(record: &[u8]) -> Result<Self, IccErr> {
        if record.len() < 2 {
            return Err(IccErr::OutOfBounds { field: Some("mwis") });
        }
        let active = record[0] & 0x01 != 0;
        let message_count = match (active, record[1]) {
            (false, _) => Some(0),
            (true, 0) => None,
            (true, n) => Some(n),
        };
        Ok(Mwis { active, message_count, raw: record.to_vec() })
    }

    /// Record with the voicemail status replaced, other indications untouched
    pub fn with_voicemail(&self, active: bool, message_count: Option<u8>) -> Vec<u8> {
        let mut record = self.raw.clone();
        if active {
            record[0] |= 0x01;
            record[1] = message_count.unwrap_or(0);
        } else {
            record[0] &= 0xFE;
            record[1] = 0;
        }
        record
    }
}

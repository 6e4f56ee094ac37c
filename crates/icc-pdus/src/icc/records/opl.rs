use core::fmt;

use icc_core::{IccErr, OctetBuffer};

use crate::icc::fields::plmn::Plmn;

/// EF_OPL operator PLMN list entry, 3GPP TS 31.102 clause 4.2.59
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OplEntry {
    /// May hold 'D' wildcard digits
    pub plmn: Plmn,
    pub lac_start: u16,
    pub lac_end: u16,
    /// EF_PNN record, 0 when the name comes from other sources
    pub pnn_record_id: u8,
}

impl OplEntry {
    /// Decode one record. Returns None for an unused PLMN.
    pub fn from_bytes(record: &[u8]) -> Result<Option<Self>, IccErr> {
        let mut buf = OctetBuffer::from_bytes(record);
        let Some(plmn) = Plmn::from_bytes(buf.read_slice(3)?)? else {
            return Ok(None);
        };
        Ok(Some(OplEntry {
            plmn,
            lac_start: buf.read_u16("lac_start")?,
            lac_end: buf.read_u16("lac_end")?,
            pnn_record_id: buf.read_field("pnn_record_id")?,
        }))
    }

    /// Entry applies to the serving cell
    pub fn matches(&self, mcc: &str, mnc: &str, lac: u16) -> bool {
        self.plmn.matches(mcc, mnc) && (self.lac_start..=self.lac_end).contains(&lac)
    }
}

impl fmt::Display for OplEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "OplEntry {{ plmn: {} lac: {:04x}..={:04x} pnn_record_id: {} }}",
            self.plmn, self.lac_start, self.lac_end, self.pnn_record_id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use icc_core::octet_buffer::hex_to_bytes;

    #[test]
    fn test_opl_entry() {
        let entry = OplEntry::from_bytes(&hex_to_bytes("64F0DD0000FFFE02").unwrap()).unwrap().unwrap();
        assert_eq!(entry.plmn, Plmn::new("460", "DD"));
        assert_eq!(entry.lac_end, 0xFFFE);
        assert_eq!(entry.pnn_record_id, 2);
        assert!(entry.matches("460", "07", 0x1234));
        assert!(!entry.matches("461", "07", 0x1234));
        assert!(OplEntry::from_bytes(&hex_to_bytes("FFFFFF0000FFFE02").unwrap()).unwrap().is_none());
    }
}

use icc_core::{IccErr, OctetBuffer};

use crate::icc::fields::dialling_number::{NUMBER_WITH_LENGTH_SIZE, read_number_with_length, write_number_with_length};

/// MSP, indicator status, number with length, CCP and extension record ids
pub const CFIS_RECORD_SIZE: usize = NUMBER_WITH_LENGTH_SIZE + 4;

/// Unconditional forwarding of voice calls
const CFU_VOICE: u8 = 0x01;

/// EF_CFIS call forwarding indication status, 3GPP TS 31.102 clause 4.2.64
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cfis {
    /// Multiple subscriber profile, 1 to 4
    pub msp: u8,
    pub indicator: u8,
    pub number: String,
    pub ccp_record: u8,
    pub ext_record: u8,
}

impl Cfis {
    pub fn from_bytes(record: &[u8]) -> Result<Self, IccErr> {
        if record.len() < CFIS_RECORD_SIZE {
            return Err(IccErr::OutOfBounds { field: Some("cfis") });
        }
        let mut buf = OctetBuffer::from_bytes(record);
        let msp = buf.read_field("cfis_msp")?;
        let indicator = buf.read_field("cfis_indicator")?;
        let number = read_number_with_length(&mut buf)?;
        let ccp_record = buf.read_field("cfis_ccp")?;
        let ext_record = buf.read_field("cfis_ext")?;
        if !(1..=4).contains(&msp) {
            return Err(IccErr::InvalidValue { field: "cfis_msp", value: msp as u64 });
        }
        Ok(Cfis { msp, indicator, number, ccp_record, ext_record })
    }

    pub fn unconditional_voice_active(&self) -> bool {
        self.indicator & CFU_VOICE != 0
    }

    /// Record with the voice indication set or cleared and `number` stored. Other service
    /// classes keep their indication.
    pub fn with_voice_forwarding(&self, active: bool, number: &str) -> Result<(Cfis, Vec<u8>), IccErr> {
        let indicator = if active { self.indicator | CFU_VOICE } else { self.indicator & !CFU_VOICE };
        let mut buf = OctetBuffer::with_capacity(CFIS_RECORD_SIZE);
        buf.write_octet(self.msp);
        buf.write_octet(indicator);
        write_number_with_length(&mut buf, number)?;
        buf.write_octet(self.ccp_record);
        buf.write_octet(self.ext_record);
        let cfis = Cfis { indicator, number: number.to_string(), ..self.clone() };
        Ok((cfis, buf.into_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use icc_core::debug;
    use icc_core::octet_buffer::{bytes_to_hex, hex_to_bytes};

    #[test]
    fn test_cfis() {
        debug::setup_logging_verbose();
        let record = hex_to_bytes("0101069121436587F9FFFFFFFFFFFFFF").unwrap();
        let cfis = Cfis::from_bytes(&record).unwrap();
        assert_eq!(cfis.msp, 1);
        assert!(cfis.unconditional_voice_active());
        assert_eq!(cfis.number, "+123456789");
        assert_eq!((cfis.ccp_record, cfis.ext_record), (0xFF, 0xFF));

        let (cleared, bytes) = cfis.with_voice_forwarding(false, "").unwrap();
        assert!(!cleared.unconditional_voice_active());
        assert_eq!(bytes_to_hex(&bytes), "0100FFFFFFFFFFFFFFFFFFFFFFFFFFFF");
    }

    #[test]
    fn test_cfis_keeps_other_classes() {
        let record = hex_to_bytes("0204FFFFFFFFFFFFFFFFFFFFFFFF01FF").unwrap();
        let cfis = Cfis::from_bytes(&record).unwrap();
        assert!(!cfis.unconditional_voice_active());
        let (set, bytes) = cfis.with_voice_forwarding(true, "0612").unwrap();
        assert_eq!(set.indicator, 0x05);
        assert_eq!(bytes.len(), CFIS_RECORD_SIZE);
        assert_eq!(bytes_to_hex(&bytes), "020503816021FFFFFFFFFFFFFFFF01FF");
    }

    #[test]
    fn test_cfis_invalid_msp() {
        for msp in ["00", "05", "FF"] {
            let record = hex_to_bytes(&format!("{}01FFFFFFFFFFFFFFFFFFFFFFFFFFFF", msp)).unwrap();
            assert!(matches!(Cfis::from_bytes(&record), Err(IccErr::InvalidValue { field: "cfis_msp", .. })));
        }
        assert!(Cfis::from_bytes(&[0x01, 0x01]).is_err());
    }
}

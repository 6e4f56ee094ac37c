use core::fmt;

use icc_core::{IccErr, OctetBuffer};

use crate::icc::fields::alpha_identifier::{read_alpha_identifier, write_alpha_identifier};
use crate::icc::fields::dialling_number::{read_number_with_length, write_number_with_length};

/// Number with length, capability/configuration id and extension record id
pub const ADN_FOOTER_SIZE_BYTES: usize = 14;
/// Extension record id of a record without extension
pub const NO_EXT_RECORD: u8 = 0xFF;

/// EF_ADN, EF_FDN, EF_SDN, EF_MSISDN and EF_MBDN record, 3GPP TS 51.011 clause 10.5.1
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AdnRecord {
    /// Occupies the record size minus the 14 octet footer
    pub alpha_id: String,
    /// '+' prefix for an international TON
    pub number: String,
    /// Capability/configuration identifier, 0xFF when unused
    pub ccp_id: u8,
    /// Record in the associated EF_EXT holding the digits beyond 20
    pub ext_record_id: Option<u8>,
}

impl AdnRecord {
    pub fn new(alpha_id: &str, number: &str) -> Self {
        AdnRecord { alpha_id: alpha_id.to_string(), number: number.to_string(), ccp_id: 0xFF, ext_record_id: None }
    }

    /// Decode a full record. The alpha identifier length is derived from the record size.
    pub fn from_bytes(record: &[u8]) -> Result<Self, IccErr> {
        if record.len() < ADN_FOOTER_SIZE_BYTES {
            return Err(IccErr::OutOfBounds { field: Some("adn_record") });
        }
        let mut buf = OctetBuffer::from_bytes(record);
        let alpha_id = read_alpha_identifier(&mut buf, record.len() - ADN_FOOTER_SIZE_BYTES)?;
        let number = read_number_with_length(&mut buf)?;
        let ccp_id = buf.read_field("ccp_id")?;
        let ext = buf.read_field("ext_record_id")?;
        Ok(AdnRecord { alpha_id, number, ccp_id, ext_record_id: if ext == NO_EXT_RECORD { None } else { Some(ext) } })
    }

    /// A record carries a contact when either the name or the number is set
    pub fn is_contact(&self) -> bool {
        !self.alpha_id.is_empty() || !self.number.is_empty()
    }

    /// Encode into exactly `record_size` octets. Returns the record and the alpha identifier
    /// as it fit in the record.
    pub fn to_bytes(&self, record_size: usize) -> Result<(Vec<u8>, String), IccErr> {
        if record_size < ADN_FOOTER_SIZE_BYTES {
            return Err(IccErr::InvalidValue { field: "record_size", value: record_size as u64 });
        }
        let mut buf = OctetBuffer::with_capacity(record_size);
        let alpha = write_alpha_identifier(&mut buf, record_size - ADN_FOOTER_SIZE_BYTES, &self.alpha_id);
        write_number_with_length(&mut buf, &self.number)?;
        buf.write_octet(self.ccp_id);
        buf.write_octet(self.ext_record_id.unwrap_or(NO_EXT_RECORD));
        Ok((buf.into_bytes(), alpha))
    }
}

impl fmt::Display for AdnRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "AdnRecord {{ alpha_id: {:?} number: {} ext_record_id: {:?} }}", self.alpha_id, self.number, self.ext_record_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use icc_core::debug;
    use icc_core::octet_buffer::{bytes_to_hex, hex_to_bytes};

    #[test]
    fn test_number_only_record() {
        debug::setup_logging_verbose();
        // 6 octet alpha identifier left unused
        let record = hex_to_bytes("FFFFFFFFFFFF06812143658709FFFFFFFFFFFFFF").unwrap();
        let adn = AdnRecord::from_bytes(&record).unwrap();
        tracing::info!("{}", adn);
        assert!(adn.is_contact());
        assert_eq!(adn.alpha_id, "");
        assert_eq!(adn.number, "1234567890");
        assert_eq!(adn.ext_record_id, None);
    }

    #[test]
    fn test_encode_named_contact() {
        let adn = AdnRecord::new("Mom", "+31641600986");
        let (record, alpha) = adn.to_bytes(20).unwrap();
        assert_eq!(alpha, "Mom");
        assert_eq!(bytes_to_hex(&record), "4D6F6DFFFFFF07911346610089F6FFFFFFFFFFFF");
        assert_eq!(AdnRecord::from_bytes(&record).unwrap(), adn);
    }

    #[test]
    fn test_empty_record() {
        let adn = AdnRecord::from_bytes(&[0xFF; 28]).unwrap();
        assert!(!adn.is_contact());
        assert!(AdnRecord::from_bytes(&[0xFF; 13]).is_err());
    }

    #[test]
    fn test_extension_pointer() {
        let mut adn = AdnRecord::new("", "12345678901234567890");
        adn.ext_record_id = Some(3);
        let (record, _) = adn.to_bytes(14).unwrap();
        assert_eq!(record[13], 3);
        assert_eq!(AdnRecord::from_bytes(&record).unwrap().ext_record_id, Some(3));
    }
}

use core::fmt;

use icc_core::gsm_alphabet::NL_IDENTIFIER_DEFAULT;
use icc_core::OctetBuffer;

use crate::icc::fields::alpha_identifier::decode_alpha_identifier;

const CODING_EXTENSION: u8 = 0x80;
const CODING_COUNTRY_INITIALS: u8 = 0x08;

/// Network name information element, 3GPP TS 24.008 clause 10.5.3.5a
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkName {
    pub name: String,
    /// The MS should prepend the country initials and a space
    pub add_country_initials: bool,
}

impl NetworkName {
    /// Decode from the coding octet onwards. Returns None for reserved codings.
    pub fn from_bytes(value: &[u8]) -> Option<Self> {
        let (&coding, text) = value.split_first()?;
        if coding & CODING_EXTENSION == 0 {
            tracing::debug!("network name without extension bit: 0x{:02x}", coding);
            return None;
        }
        let spare_bits = (coding & 0x07) as usize;
        let name = match (coding & 0x70) >> 4 {
            0 => {
                let septets = (text.len() * 8).saturating_sub(spare_bits) / 7;
                let mut buf = OctetBuffer::from_bytes(text);
                buf.read_septets(septets, 0, NL_IDENTIFIER_DEFAULT, NL_IDENTIFIER_DEFAULT).ok()?
            }
            1 => decode_alpha_identifier(text),
            other => {
                tracing::debug!("reserved network name coding {}", other);
                return None;
            }
        };
        Some(NetworkName { name, add_country_initials: coding & CODING_COUNTRY_INITIALS != 0 })
    }
}

impl fmt::Display for NetworkName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use icc_core::octet_buffer::hex_to_bytes;

    #[test]
    fn test_gsm_network_name() {
        // "Test" in 4 septets, 4 spare bits in the last octet
        let value = hex_to_bytes("84D4F29C0E").unwrap();
        let name = NetworkName::from_bytes(&value).unwrap();
        assert_eq!(name.name, "Test");
        assert!(!name.add_country_initials);
    }

    #[test]
    fn test_reserved_coding() {
        assert_eq!(NetworkName::from_bytes(&[0x20, 0x41]), None);
        assert_eq!(NetworkName::from_bytes(&[0xA0, 0x41]), None);
        assert_eq!(NetworkName::from_bytes(&[]), None);
    }

    #[test]
    fn test_ucs2_network_name() {
        let value = hex_to_bytes("98800041004200").unwrap();
        let name = NetworkName::from_bytes(&value).unwrap();
        assert!(name.add_country_initials);
        assert_eq!(name.name, "AB");
    }
}

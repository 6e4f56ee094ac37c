use core::fmt;

use icc_core::{IccErr, OctetBuffer};

use crate::stk::fields::stk_value::StkValue;
use crate::tlv::enums::comprehension_tag::{COMPREHENSION_TLV_FLAG_CR, ComprehensionTag};

/// First octet announcing a three octet tag
const TAG_FORMAT_3_OCTETS: u8 = 0x7F;
/// CR flag of a three octet tag, within the 16 bit tag value
const CR_FLAG_3_OCTETS: u16 = 0x8000;

/// One COMPREHENSION-TLV object, ETSI TS 101.220 clause 7.1.1
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComprehensionTlv {
    /// Tag value with the CR flag stripped. Single octet tags occupy the low 7 bits.
    pub tag: u16,
    /// Comprehension required
    pub cr: bool,
    pub length: usize,
    pub value: StkValue,
}

impl ComprehensionTlv {
    /// Decode one object at the read position
    pub fn from_octetbuf(buf: &mut OctetBuffer) -> Result<Self, IccErr> {
        let first = buf.read_field("ctlv_tag")?;
        let (tag, cr) = match first {
            0x00 | 0xFF | 0x80 => return Err(IccErr::MalformedTlv { reason: "invalid comprehension tag" }),
            TAG_FORMAT_3_OCTETS => {
                let raw = buf.read_u16("ctlv_tag")?;
                (raw & !CR_FLAG_3_OCTETS, raw & CR_FLAG_3_OCTETS != 0)
            }
            _ => ((first & !COMPREHENSION_TLV_FLAG_CR) as u16, first & COMPREHENSION_TLV_FLAG_CR != 0),
        };

        let length = read_length(buf)?;
        let raw = buf.read_slice(length).map_err(|_| IccErr::MalformedTlv { reason: "value exceeds buffer" })?;
        let known = u8::try_from(tag).ok().and_then(|t| ComprehensionTag::try_from(t as u64).ok());
        if known.is_none() {
            tracing::debug!("unknown comprehension tag 0x{:x}", tag);
        }
        let value = StkValue::decode(known, raw)?;
        Ok(ComprehensionTlv { tag, cr, length, value })
    }

    /// Decode objects until exactly `length` octets have been consumed
    pub fn decode_chain(buf: &mut OctetBuffer, length: usize) -> Result<Vec<Self>, IccErr> {
        let start = buf.get_pos();
        let mut chain = Vec::new();
        while buf.get_pos() - start < length {
            chain.push(Self::from_octetbuf(buf)?);
        }
        let consumed = buf.get_pos() - start;
        if consumed != length {
            tracing::warn!("comprehension TLV chain consumed {} of {} octets", consumed, length);
            return Err(IccErr::MalformedTlv { reason: "chain length mismatch" });
        }
        Ok(chain)
    }

    pub fn known_tag(&self) -> Option<ComprehensionTag> {
        u8::try_from(self.tag).ok().and_then(|t| ComprehensionTag::try_from(t as u64).ok())
    }
}

impl fmt::Display for ComprehensionTlv {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.known_tag() {
            Some(tag) => write!(f, "ComprehensionTlv {{ tag: {} cr: {} length: {} value: {:?} }}", tag, self.cr, self.length, self.value),
            None => write!(f, "ComprehensionTlv {{ tag: 0x{:x} cr: {} length: {} value: {:?} }}", self.tag, self.cr, self.length, self.value),
        }
    }
}

/// Length field of a COMPREHENSION-TLV, ETSI TS 101.220 clause 7.1.2.
/// Each long form must hold a value the shorter forms cannot.
fn read_length(buf: &mut OctetBuffer) -> Result<usize, IccErr> {
    let first = buf.read_field("ctlv_length")?;
    let (length, min) = match first {
        0x00..=0x7F => return Ok(first as usize),
        0x81 => (buf.read_field("ctlv_length")? as usize, 0x80),
        0x82 => (buf.read_u16("ctlv_length")? as usize, 0x100),
        0x83 => {
            let hi = buf.read_field("ctlv_length")? as usize;
            let lo = buf.read_u16("ctlv_length")? as usize;
            ((hi << 16) | lo, 0x10000)
        }
        _ => return Err(IccErr::MalformedTlv { reason: "invalid length octet" }),
    };
    if length < min {
        return Err(IccErr::MalformedTlv { reason: "length not in shortest form" });
    }
    Ok(length)
}

/// Search a chain for the last object carrying `tag`, CR flag ignored
pub fn search_for_tag(chain: &[ComprehensionTlv], tag: ComprehensionTag) -> Option<&ComprehensionTlv> {
    chain.iter().rev().find(|c| c.tag == tag.into_raw() as u16)
}

/// All objects carrying `tag`, in chain order
pub fn search_all(chain: &[ComprehensionTlv], tag: ComprehensionTag) -> Vec<&ComprehensionTlv> {
    chain.iter().filter(|c| c.tag == tag.into_raw() as u16).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stk::fields::command_details::CommandDetails;
    use icc_core::debug;

    #[test]
    fn test_decode_chain() {
        debug::setup_logging_verbose();
        // Command details, device identities, text string "Hi" in 8 bit
        let mut buf = OctetBuffer::from_hex("8103012180820281028D03044869").unwrap();
        let chain = ComprehensionTlv::decode_chain(&mut buf, 14).unwrap();
        assert_eq!(chain.len(), 3);
        assert!(chain[0].cr);
        assert_eq!(
            chain[0].value,
            StkValue::CommandDetails(CommandDetails { command_number: 1, type_of_command: 0x21, qualifier: 0x80 })
        );
        let text = search_for_tag(&chain, ComprehensionTag::TextString).unwrap();
        let StkValue::TextString(ts) = &text.value else {
            panic!("expected text string");
        };
        assert_eq!(ts.text.as_deref(), Some("Hi"));
    }

    #[test]
    fn test_chain_length_mismatch() {
        let mut buf = OctetBuffer::from_hex("810301218082028102").unwrap();
        assert_eq!(
            ComprehensionTlv::decode_chain(&mut buf, 6),
            Err(IccErr::MalformedTlv { reason: "chain length mismatch" })
        );
    }

    #[test]
    fn test_invalid_tags_and_lengths() {
        for hex in ["000100", "FF0100", "800100"] {
            let mut buf = OctetBuffer::from_hex(hex).unwrap();
            assert!(ComprehensionTlv::from_octetbuf(&mut buf).is_err());
        }
        // 0x81 form holding a value below 0x80
        let mut buf = OctetBuffer::from_hex("0D817F").unwrap();
        assert!(ComprehensionTlv::from_octetbuf(&mut buf).is_err());
        let mut buf = OctetBuffer::from_hex("0D84").unwrap();
        assert!(ComprehensionTlv::from_octetbuf(&mut buf).is_err());
    }

    #[test]
    fn test_three_octet_tag() {
        let mut buf = OctetBuffer::from_hex("7F80410101").unwrap();
        let tlv = ComprehensionTlv::from_octetbuf(&mut buf).unwrap();
        assert!(tlv.cr);
        assert_eq!(tlv.tag, 0x0041);
        assert_eq!(tlv.value, StkValue::Raw(vec![0x01]));
    }

    #[test]
    fn test_last_match_wins() {
        let mut buf = OctetBuffer::from_hex("050141050142").unwrap();
        let chain = ComprehensionTlv::decode_chain(&mut buf, 6).unwrap();
        assert_eq!(search_for_tag(&chain, ComprehensionTag::AlphaId).unwrap().value, StkValue::AlphaId("B".to_string()));
        assert_eq!(search_all(&chain, ComprehensionTag::AlphaId).len(), 2);
    }
}

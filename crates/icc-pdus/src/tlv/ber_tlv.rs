use core::fmt;

use icc_core::{IccErr, OctetBuffer};

use crate::icc::enums::ef_structure::EfStructure;
use crate::tlv::comprehension_tlv::ComprehensionTlv;
use crate::tlv::enums::ber_tag::BerTag;
use crate::tlv::enums::fcp_tag::FcpTag;

/// File descriptor object of the FCP template, ETSI TS 102.221 clause 11.1.1.4.3
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FcpFileDescriptor {
    pub descriptor: u8,
    /// None for DFs and unknown structures
    pub structure: Option<EfStructure>,
    pub data_coding: Option<u8>,
    /// Present for record based EFs
    pub record_length: Option<u16>,
    pub num_records: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FcpValue {
    FileDescriptor(FcpFileDescriptor),
    FileIdentifier(u16),
    FileSize(u32),
}

/// Decoded object within an FCP template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FcpTlv {
    pub tag: FcpTag,
    pub length: usize,
    pub value: FcpValue,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BerValue {
    Fcp(Vec<FcpTlv>),
    ProactiveCommand(Vec<ComprehensionTlv>),
}

/// A top level BER-TLV object, ETSI TS 101.220 clause 7.2
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BerTlv {
    pub tag: BerTag,
    pub length: usize,
    pub value: BerValue,
}

impl BerTlv {
    /// Decode a complete BER-TLV object. The declared length must cover the remaining data exactly.
    pub fn from_bytes(data: &[u8]) -> Result<Self, IccErr> {
        let mut buf = OctetBuffer::from_bytes(data);
        let raw_tag = buf.read_field("ber_tag")?;
        let length = read_ber_length(&mut buf)?;
        if buf.get_len_remaining() != length {
            tracing::warn!("BER-TLV 0x{:02x} declares {} octets, {} present", raw_tag, length, buf.get_len_remaining());
            return Err(IccErr::MalformedTlv { reason: "length mismatch" });
        }

        let tag = BerTag::try_from(raw_tag as u64).map_err(|_| IccErr::MalformedTlv { reason: "unknown BER tag" })?;
        let value = match tag {
            BerTag::FcpTemplate => BerValue::Fcp(decode_fcp_chunks(&mut buf, length)?),
            BerTag::ProactiveCommand => BerValue::ProactiveCommand(ComprehensionTlv::decode_chain(&mut buf, length)?),
            other => {
                tracing::debug!("no decoder for BER tag {}", other);
                return Err(IccErr::MalformedTlv { reason: "unsupported BER tag" });
            }
        };
        Ok(BerTlv { tag, length, value })
    }

    pub fn from_hex(hex: &str) -> Result<Self, IccErr> {
        Self::from_bytes(&icc_core::octet_buffer::hex_to_bytes(hex)?)
    }

    pub fn fcp(&self) -> Option<&[FcpTlv]> {
        match &self.value {
            BerValue::Fcp(chunks) => Some(chunks),
            _ => None,
        }
    }

    pub fn comprehension_tlvs(&self) -> Option<&[ComprehensionTlv]> {
        match &self.value {
            BerValue::ProactiveCommand(chain) => Some(chain),
            _ => None,
        }
    }
}

impl fmt::Display for BerTlv {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "BerTlv {{ tag: {} length: {} ", self.tag, self.length)?;
        match &self.value {
            BerValue::Fcp(chunks) => write!(f, "fcp: {:?} }}", chunks),
            BerValue::ProactiveCommand(chain) => {
                write!(f, "ctlvs: [")?;
                for ctlv in chain {
                    write!(f, " {}", ctlv)?;
                }
                write!(f, " ] }}")
            }
        }
    }
}

/// Length field of a BER-TLV: short form, or 0x81 followed by a value of at least 0x80
pub fn read_ber_length(buf: &mut OctetBuffer) -> Result<usize, IccErr> {
    let first = buf.read_field("ber_length")?;
    match first {
        0x00..=0x7F => Ok(first as usize),
        0x81 => {
            let length = buf.read_field("ber_length")?;
            if length < 0x80 {
                return Err(IccErr::MalformedTlv { reason: "length not in shortest form" });
            }
            Ok(length as usize)
        }
        _ => Err(IccErr::MalformedTlv { reason: "invalid length octet" }),
    }
}

fn decode_fcp_chunks(buf: &mut OctetBuffer, length: usize) -> Result<Vec<FcpTlv>, IccErr> {
    let end = buf.get_pos() + length;
    let mut chunks = Vec::new();
    while buf.get_pos() < end {
        let raw_tag = buf.read_field("fcp_tag")?;
        let len = buf.read_field("fcp_length")? as usize;
        let value = buf.read_slice(len).map_err(|_| IccErr::MalformedTlv { reason: "FCP object exceeds template" })?;
        let decoded = match FcpTag::try_from(raw_tag as u64) {
            Ok(tag @ FcpTag::FileDescriptor) => Some((tag, FcpValue::FileDescriptor(decode_file_descriptor(value)?))),
            Ok(tag @ FcpTag::FileIdentifier) if len >= 2 => {
                Some((tag, FcpValue::FileIdentifier(u16::from_be_bytes([value[0], value[1]]))))
            }
            Ok(tag @ FcpTag::FileSizeData) => {
                Some((tag, FcpValue::FileSize(value.iter().fold(0u32, |acc, &b| (acc << 8) | b as u32))))
            }
            _ => None,
        };
        match decoded {
            Some((tag, value)) => chunks.push(FcpTlv { tag, length: len, value }),
            None => tracing::trace!("skipping FCP tag 0x{:02x}", raw_tag),
        }
    }
    Ok(chunks)
}

fn decode_file_descriptor(value: &[u8]) -> Result<FcpFileDescriptor, IccErr> {
    let Some(&descriptor) = value.first() else {
        return Err(IccErr::MalformedTlv { reason: "empty file descriptor" });
    };
    let mut fd = FcpFileDescriptor {
        descriptor,
        structure: EfStructure::from_fcp_descriptor(descriptor),
        data_coding: value.get(1).copied(),
        record_length: None,
        num_records: None,
    };
    if value.len() >= 5 {
        fd.record_length = Some(u16::from_be_bytes([value[2], value[3]]));
        fd.num_records = Some(value[4]);
    }
    Ok(fd)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tlv::comprehension_tlv::search_for_tag;
    use crate::tlv::enums::comprehension_tag::ComprehensionTag;
    use crate::stk::fields::stk_value::StkValue;
    use icc_core::debug;

    #[test]
    fn test_fcp_linear_fixed() {
        debug::setup_logging_verbose();
        // Descriptor: linear fixed, record length 0x1A, 10 records; file id 6F3A; 260 octets
        let tlv = BerTlv::from_hex("621282054221001A0A83026F3A8A010580020104").unwrap();
        tracing::info!("{}", tlv);
        let fcp = tlv.fcp().unwrap();
        assert_eq!(fcp.len(), 3);
        let FcpValue::FileDescriptor(fd) = &fcp[0].value else {
            panic!("expected file descriptor");
        };
        assert_eq!(fd.structure, Some(EfStructure::LinearFixed));
        assert_eq!(fd.record_length, Some(26));
        assert_eq!(fd.num_records, Some(10));
        assert_eq!(fcp[1].value, FcpValue::FileIdentifier(0x6F3A));
        assert_eq!(fcp[2].value, FcpValue::FileSize(260));
    }

    #[test]
    fn test_length_mismatch() {
        assert_eq!(
            BerTlv::from_hex("62058202412183026F3A"),
            Err(IccErr::MalformedTlv { reason: "length mismatch" })
        );
    }

    #[test]
    fn test_unknown_top_level_tag() {
        assert!(BerTlv::from_hex("6F0100").is_err());
    }

    #[test]
    fn test_long_form_length() {
        let mut buf = OctetBuffer::from_hex("8180").unwrap();
        assert_eq!(read_ber_length(&mut buf).unwrap(), 0x80);
        let mut buf = OctetBuffer::from_hex("8105").unwrap();
        assert!(read_ber_length(&mut buf).is_err());
        let mut buf = OctetBuffer::from_hex("820100").unwrap();
        assert!(read_ber_length(&mut buf).is_err());
    }

    #[test]
    fn test_proactive_command() {
        // DISPLAY TEXT "Hi", 8 bit
        let tlv = BerTlv::from_hex("D00E8103012180820281028D03044869").unwrap();
        let chain = tlv.comprehension_tlvs().unwrap();
        assert_eq!(chain.len(), 3);
        assert!(matches!(
            search_for_tag(chain, ComprehensionTag::TextString).map(|c| &c.value),
            Some(StkValue::TextString(_))
        ));
    }
}

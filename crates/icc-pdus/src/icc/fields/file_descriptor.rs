use core::fmt;

use icc_core::{FileId, IccErr};

use crate::icc::enums::ef_structure::EfStructure;
use crate::tlv::ber_tlv::{BerTlv, FcpValue};
use crate::tlv::enums::ber_tag::BerTag;

/// Type of file octet of the classic response, EF
const TYPE_EF: u8 = 4;
/// Minimum classic response size, up to and including the record length octet
const CLASSIC_RESPONSE_MIN_LEN: usize = 15;
/// Record numbers and READ RECORD lengths are single octets (P1, P3)
pub const MAX_RECORD_COUNT: usize = 255;
pub const MAX_RECORD_SIZE: usize = 255;

/// Layout of an EF, resolved through GET RESPONSE before any record access
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EfDescriptor {
    pub file_id: FileId,
    pub structure: EfStructure,
    /// Zero for transparent EFs
    pub record_size: usize,
    pub record_count: usize,
    pub file_size: usize,
    pub path: String,
}

fn check_record_layout(descriptor: &EfDescriptor) -> Result<(), IccErr> {
    if descriptor.record_size > MAX_RECORD_SIZE {
        return Err(IccErr::InvalidValue { field: "record_size", value: descriptor.record_size as u64 });
    }
    if descriptor.record_count > MAX_RECORD_COUNT {
        return Err(IccErr::InvalidValue { field: "record_count", value: descriptor.record_count as u64 });
    }
    Ok(())
}

impl EfDescriptor {
    /// Parse a GET RESPONSE, auto detecting the USIM FCP template (0x62) or the SIM format
    pub fn from_get_response(data: &[u8], file_id: FileId, expected: EfStructure, path: &str) -> Result<Self, IccErr> {
        let descriptor = if data.first() == Some(&(BerTag::FcpTemplate.into_raw() as u8)) {
            Self::from_fcp(data, file_id, expected)?
        } else {
            Self::from_classic(data, file_id, expected)?
        };
        tracing::debug!("{}", descriptor);
        Ok(EfDescriptor { path: path.to_string(), ..descriptor })
    }

    /// 3GPP TS 51.011 clause 9.2.1 response to SELECT for an EF
    fn from_classic(data: &[u8], file_id: FileId, expected: EfStructure) -> Result<Self, IccErr> {
        if data.len() < CLASSIC_RESPONSE_MIN_LEN {
            return Err(IccErr::OutOfBounds { field: Some("get_response") });
        }
        let file_size = u16::from_be_bytes([data[2], data[3]]) as usize;
        let read_id = u16::from_be_bytes([data[4], data[5]]);
        icc_core::assert_warn!(read_id == file_id, "expected file id {:04X}, read {:04X}", file_id, read_id);
        icc_core::expect_value!(data[6], TYPE_EF, "file_type")?;
        icc_core::expect_value!(data[13] as u64, expected.into_raw(), "ef_structure")?;

        let mut descriptor =
            EfDescriptor { file_id, structure: expected, record_size: 0, record_count: 0, file_size, path: String::new() };
        if expected.is_record_based() {
            let record_size = data[14] as usize;
            if record_size == 0 {
                return Err(IccErr::InvalidValue { field: "record_size", value: 0 });
            }
            descriptor.record_size = record_size;
            descriptor.record_count = file_size / record_size;
            check_record_layout(&descriptor)?;
        }
        Ok(descriptor)
    }

    /// ETSI TS 102.221 clause 11.1.1.3 FCP template
    fn from_fcp(data: &[u8], file_id: FileId, expected: EfStructure) -> Result<Self, IccErr> {
        let tlv = BerTlv::from_bytes(data)?;
        let chunks = tlv.fcp().unwrap_or_default();

        let mut fd = None;
        let mut read_id = None;
        let mut file_size = None;
        for chunk in chunks {
            match &chunk.value {
                FcpValue::FileDescriptor(d) => fd = Some(*d),
                FcpValue::FileIdentifier(id) => read_id = Some(*id),
                FcpValue::FileSize(size) => file_size = Some(*size as usize),
            }
        }

        let fd = fd.ok_or(IccErr::MalformedTlv { reason: "missing file descriptor" })?;
        if fd.structure != Some(expected) {
            return Err(IccErr::InvalidValue { field: "ef_structure", value: fd.descriptor as u64 });
        }
        match read_id {
            Some(id) if id == file_id => {}
            Some(id) => return Err(IccErr::InvalidValue { field: "file_id", value: id as u64 }),
            None => return Err(IccErr::MalformedTlv { reason: "missing file identifier" }),
        }
        let file_size = file_size.ok_or(IccErr::MalformedTlv { reason: "missing file size" })?;

        let mut descriptor =
            EfDescriptor { file_id, structure: expected, record_size: 0, record_count: 0, file_size, path: String::new() };
        if expected.is_record_based() {
            descriptor.record_size = fd.record_length.unwrap_or(0) as usize;
            descriptor.record_count = fd.num_records.unwrap_or(0) as usize;
            check_record_layout(&descriptor)?;
        }
        Ok(descriptor)
    }

    /// Build the classic response for this EF, as a SIM would answer GET RESPONSE
    pub fn to_classic_response(&self) -> Vec<u8> {
        let size = self.file_size as u16;
        let id = self.file_id;
        vec![
            0x00,
            0x00,
            (size >> 8) as u8,
            size as u8,
            (id >> 8) as u8,
            id as u8,
            TYPE_EF,
            0x00,
            0x00,
            0x00,
            0x00,
            0x01,
            0x02,
            self.structure.into_raw() as u8,
            self.record_size as u8,
        ]
    }
}

impl fmt::Display for EfDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "EfDescriptor {{ file_id: {:04X} structure: {} record_size: {} record_count: {} file_size: {} path: {} }}",
            self.file_id, self.structure, self.record_size, self.record_count, self.file_size, self.path
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use icc_core::debug;
    use icc_core::octet_buffer::hex_to_bytes;

    #[test]
    fn test_classic_linear_fixed() {
        debug::setup_logging_verbose();
        // 10 records of 0x1A octets
        let rsp = hex_to_bytes("000001046F3A04001100220102011A").unwrap();
        let d = EfDescriptor::from_get_response(&rsp, 0x6F3A, EfStructure::LinearFixed, "3F007F10").unwrap();
        assert_eq!(d.record_size, 26);
        assert_eq!(d.record_count, 10);
        assert_eq!(d.path, "3F007F10");
    }

    #[test]
    fn test_classic_wrong_structure() {
        let rsp = hex_to_bytes("0000000A2FE20400110022010200").unwrap();
        assert!(EfDescriptor::from_get_response(&rsp, 0x2FE2, EfStructure::LinearFixed, "3F00").is_err());
        assert!(EfDescriptor::from_get_response(&rsp, 0x2FE2, EfStructure::Transparent, "3F00").is_err());

        let mut rsp = rsp;
        rsp.push(0x00);
        let d = EfDescriptor::from_get_response(&rsp, 0x2FE2, EfStructure::Transparent, "3F00").unwrap();
        assert_eq!(d.file_size, 10);
        assert_eq!(d.record_size, 0);
    }

    #[test]
    fn test_classic_round_trip() {
        let d = EfDescriptor {
            file_id: 0x6F3B,
            structure: EfStructure::LinearFixed,
            record_size: 28,
            record_count: 5,
            file_size: 140,
            path: "3F007F10".to_string(),
        };
        let parsed =
            EfDescriptor::from_get_response(&d.to_classic_response(), 0x6F3B, EfStructure::LinearFixed, "3F007F10").unwrap();
        assert_eq!(parsed, d);
    }

    #[test]
    fn test_fcp() {
        let rsp = hex_to_bytes("621282054221001A0A83026F3A8A010580020104").unwrap();
        let d = EfDescriptor::from_get_response(&rsp, 0x6F3A, EfStructure::LinearFixed, "3F007FFF").unwrap();
        assert_eq!(d.record_size, 26);
        assert_eq!(d.record_count, 10);
        assert_eq!(d.file_size, 260);

        // File id mismatch is fatal in the FCP format
        assert!(EfDescriptor::from_get_response(&rsp, 0x6F3B, EfStructure::LinearFixed, "3F007FFF").is_err());
    }

    #[test]
    fn test_record_count_beyond_p1() {
        debug::setup_logging_verbose();
        // 300 records of 1 octet
        let rsp = hex_to_bytes("0000012C6F3A040011002201020101").unwrap();
        assert_eq!(
            EfDescriptor::from_get_response(&rsp, 0x6F3A, EfStructure::LinearFixed, "3F007F10"),
            Err(IccErr::InvalidValue { field: "record_count", value: 300 })
        );

        // FCP record length of 0x0100 octets
        let rsp = hex_to_bytes("62128205422101000183026F3A8A010580020100").unwrap();
        assert_eq!(
            EfDescriptor::from_get_response(&rsp, 0x6F3A, EfStructure::LinearFixed, "3F007FFF"),
            Err(IccErr::InvalidValue { field: "record_size", value: 256 })
        );
    }
}

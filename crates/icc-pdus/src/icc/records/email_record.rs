use icc_core::text_codec::decode_8bit_unpacked;
use icc_core::{IccErr, OctetBuffer};

use crate::icc::enums::pbr_file_type::PbrFileType;

/// ADN file SFI and ADN record identifier trailing a Type 2 record
const TYPE2_TRAILER_SIZE: usize = 2;

/// Decode an EF_EMAIL record, 3GPP TS 31.102 clause 4.4.2.13
pub fn read_email_record(record: &[u8], file_type: PbrFileType) -> String {
    let len = match file_type {
        PbrFileType::Type2 => record.len().saturating_sub(TYPE2_TRAILER_SIZE),
        _ => record.len(),
    };
    decode_8bit_unpacked(&record[..len])
}

/// Encode an EF_EMAIL record of `record_size` octets. Returns the record and the address as it fit.
pub fn write_email_record(
    record_size: usize,
    email: &str,
    file_type: PbrFileType,
    adn_sfi: Option<u8>,
    adn_record_id: u8,
) -> Result<(Vec<u8>, String), IccErr> {
    let mut buf = OctetBuffer::with_capacity(record_size);
    let written = match file_type {
        PbrFileType::Type1 => buf.write_8bit_unpacked_padded(record_size, email),
        PbrFileType::Type2 => {
            if record_size < TYPE2_TRAILER_SIZE {
                return Err(IccErr::InvalidValue { field: "record_size", value: record_size as u64 });
            }
            let written = buf.write_8bit_unpacked_padded(record_size - TYPE2_TRAILER_SIZE, email);
            buf.write_octet(adn_sfi.unwrap_or(0xFF));
            buf.write_octet(adn_record_id);
            written
        }
        PbrFileType::Type3 => return Err(IccErr::RequestNotSupported),
    };
    Ok((buf.into_bytes(), written))
}

#[cfg(test)]
mod tests {
    use super::*;
    use icc_core::debug;
    use icc_core::octet_buffer::bytes_to_hex;

    #[test]
    fn test_type1() {
        debug::setup_logging_verbose();
        let (record, written) = write_email_record(8, "a@b.c", PbrFileType::Type1, None, 1).unwrap();
        assert_eq!(written, "a@b.c");
        assert_eq!(bytes_to_hex(&record), "6100622E63FFFFFF");
        assert_eq!(read_email_record(&record, PbrFileType::Type1), "a@b.c");
    }

    #[test]
    fn test_type2_trailer() {
        let (record, written) = write_email_record(8, "abcdefgh", PbrFileType::Type2, Some(0x01), 7).unwrap();
        assert_eq!(written, "abcdef");
        assert_eq!(&record[6..], &[0x01, 0x07]);
        assert_eq!(read_email_record(&record, PbrFileType::Type2), "abcdef");
        assert_eq!(write_email_record(8, "x", PbrFileType::Type3, None, 1), Err(IccErr::RequestNotSupported));
    }
}

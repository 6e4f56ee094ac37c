use icc_core::{IccErr, OctetBuffer};

use crate::icc::enums::pbr_file_type::PbrFileType;
use crate::icc::fields::dialling_number::{read_number_with_length, write_number_with_length};

/// Decode an EF_ANR record, 3GPP TS 31.102 clause 4.4.2.9. The EF_AAS record id is skipped.
pub fn read_anr_record(record: &[u8]) -> Result<String, IccErr> {
    let mut buf = OctetBuffer::from_bytes(record);
    buf.skip(1)?;
    read_number_with_length(&mut buf)
}

/// Encode an EF_ANR record. No additional number type, CCP or extension is written.
pub fn write_anr_record(
    record_size: usize,
    number: &str,
    file_type: PbrFileType,
    adn_sfi: Option<u8>,
    adn_record_id: u8,
) -> Result<Vec<u8>, IccErr> {
    if file_type == PbrFileType::Type3 {
        return Err(IccErr::RequestNotSupported);
    }
    let mut buf = OctetBuffer::with_capacity(record_size);
    buf.write_octet(0xFF);
    write_number_with_length(&mut buf, number)?;
    buf.write_octet(0xFF);
    buf.write_octet(0xFF);
    if file_type == PbrFileType::Type2 {
        buf.write_octet(adn_sfi.unwrap_or(0xFF));
        buf.write_octet(adn_record_id);
    }
    let mut record = buf.into_bytes();
    record.resize(record_size, 0xFF);
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use icc_core::debug;

    #[test]
    fn test_anr_round_trip() {
        debug::setup_logging_verbose();
        let record = write_anr_record(15, "+4412345", PbrFileType::Type1, None, 1).unwrap();
        assert_eq!(record.len(), 15);
        assert_eq!(read_anr_record(&record).unwrap(), "+4412345");

        let record = write_anr_record(17, "5551234", PbrFileType::Type2, Some(2), 9).unwrap();
        assert_eq!(&record[15..], &[0x02, 0x09]);
        assert_eq!(read_anr_record(&record).unwrap(), "5551234");
    }

    #[test]
    fn test_unused_record() {
        assert_eq!(read_anr_record(&[0xFF; 15]).unwrap(), "");
    }
}

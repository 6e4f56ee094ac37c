use icc_core::bcd::string_to_extended_bcd;
use icc_core::{IccErr, OctetBuffer};

use crate::icc::fields::dialling_number::{EXT_MAX_BCD_NUMBER_BYTES, EXT_MAX_NUMBER_DIGITS};

/// Record type bit 2: additional data
pub const EXT_TYPE_ADDITIONAL_DATA: u8 = 0x02;
/// Record type, length, ten BCD octets and the chained record identifier
pub const EXT_RECORD_SIZE: usize = 13;

/// Read the overflow digits of an EF_EXT1/2/3 record, 3GPP TS 31.102 clause 4.4.2.4.
/// Called party subaddress records yield no digits.
pub fn read_ext_record(record: &[u8]) -> Result<String, IccErr> {
    let mut buf = OctetBuffer::from_bytes(record);
    let record_type = buf.read_field("ext_record_type")?;
    if record_type & EXT_TYPE_ADDITIONAL_DATA == 0 {
        tracing::debug!("extension record type 0x{:02x} not supported", record_type);
        return Ok(String::new());
    }
    let num_len = buf.read_field("ext_number_length")?;
    if num_len == 0xFF {
        return Ok(String::new());
    }
    if num_len as usize > EXT_MAX_BCD_NUMBER_BYTES {
        tracing::warn!("invalid length of BCD number in extension record: {}", num_len);
        return Err(IccErr::InvalidValue { field: "ext_number_length", value: num_len as u64 });
    }
    let number = buf.read_swapped_nibble_extended_bcd_string(num_len as usize, true)?;
    tracing::debug!("extension number: {}", number);
    Ok(number)
}

/// Encode overflow digits as an additional data record. Chaining is not supported, digits
/// beyond 20 are dropped.
pub fn write_ext_record(number: &str) -> Result<Vec<u8>, IccErr> {
    let digits: String = number.chars().take(EXT_MAX_NUMBER_DIGITS).collect();
    let bcd = string_to_extended_bcd(&digits);
    let num_len = bcd.len().div_ceil(2);

    let mut buf = OctetBuffer::with_capacity(EXT_RECORD_SIZE);
    buf.write_octet(EXT_TYPE_ADDITIONAL_DATA);
    buf.write_octet(num_len as u8);
    buf.write_swapped_nibble_bcd(&bcd)?;
    buf.write_padding(EXT_MAX_BCD_NUMBER_BYTES - num_len);
    // No further record in the chain
    buf.write_octet(0xFF);
    Ok(buf.into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use icc_core::debug;
    use icc_core::octet_buffer::{bytes_to_hex, hex_to_bytes};

    #[test]
    fn test_write_and_read() {
        debug::setup_logging_verbose();
        let record = write_ext_record("12345").unwrap();
        assert_eq!(bytes_to_hex(&record), "02032143F5FFFFFFFFFFFFFFFF");
        assert_eq!(read_ext_record(&record).unwrap(), "12345");
    }

    #[test]
    fn test_unused_and_invalid() {
        assert_eq!(read_ext_record(&[0xFF; EXT_RECORD_SIZE]).unwrap(), "");
        // Called party subaddress
        assert_eq!(read_ext_record(&hex_to_bytes("0103112233FFFFFFFFFFFFFFFF").unwrap()).unwrap(), "");
        assert!(read_ext_record(&hex_to_bytes("020B112233445566778899AABBFF").unwrap()).is_err());
    }
}

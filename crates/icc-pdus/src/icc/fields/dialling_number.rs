//! Dialling numbers of EF_ADN, EF_FDN, EF_MSISDN, EF_ANR and STK Address objects,
//! 3GPP TS 31.102 clause 4.4.2.3

use icc_core::bcd::string_to_extended_bcd;
use icc_core::{IccErr, OctetBuffer};

use crate::sms::fields::sms_address::{TOA_INTERNATIONAL, TOA_ISDN};

/// TON/NPI plus ten BCD octets
pub const ADN_MAX_BCD_NUMBER_BYTES: usize = 11;
pub const ADN_MAX_NUMBER_DIGITS: usize = 20;
pub const EXT_MAX_BCD_NUMBER_BYTES: usize = 10;
pub const EXT_MAX_NUMBER_DIGITS: usize = 20;

/// Octets taken by a length octet followed by the fixed size number field
pub const NUMBER_WITH_LENGTH_SIZE: usize = ADN_MAX_BCD_NUMBER_BYTES + 1;

fn is_international(toa: u8) -> bool {
    toa >> 4 == 0x09
}

/// Keep a leading '+' and the dialable characters
pub fn sanitize_number(number: &str) -> String {
    let mut out = String::with_capacity(number.len());
    if number.starts_with('+') {
        out.push('+');
    }
    out.extend(number.chars().filter(|c| matches!(c, '0'..='9' | '*' | '#' | ',')));
    out
}

/// Split a number into the part stored in the main record and the overflow for an extension record
pub fn split_number(number: &str) -> (String, Option<String>) {
    let number = sanitize_number(number);
    let (prefix, digits) = match number.strip_prefix('+') {
        Some(d) => ("+", d),
        None => ("", number.as_str()),
    };
    if digits.chars().count() <= ADN_MAX_NUMBER_DIGITS {
        return (number.clone(), None);
    }
    let split = digits.char_indices().nth(ADN_MAX_NUMBER_DIGITS).map(|(i, _)| i).unwrap_or(digits.len());
    (format!("{}{}", prefix, &digits[..split]), Some(digits[split..].to_string()))
}

/// Read a TON/NPI octet and `len - 1` octets of BCD digits
pub fn read_dialling_number(buf: &mut OctetBuffer, len: usize) -> Result<String, IccErr> {
    if len == 0 {
        return Ok(String::new());
    }
    let toa = buf.read_field("toa")?;
    let digits = buf.read_swapped_nibble_extended_bcd_string(len - 1, true)?;
    if is_international(toa) && !digits.is_empty() {
        Ok(format!("+{}", digits))
    } else {
        Ok(digits)
    }
}

/// Read the length octet and the 11 octet number field that follows.
/// Always consumes NUMBER_WITH_LENGTH_SIZE octets.
pub fn read_number_with_length(buf: &mut OctetBuffer) -> Result<String, IccErr> {
    let len = buf.read_field("number_length")?;
    let field = buf.read_octets(ADN_MAX_BCD_NUMBER_BYTES)?;
    if len == 0xFF {
        return Ok(String::new());
    }
    let len = len as usize;
    if len > ADN_MAX_BCD_NUMBER_BYTES {
        tracing::debug!("number length {} exceeds {} octets, ignoring number", len, ADN_MAX_BCD_NUMBER_BYTES);
        return Ok(String::new());
    }
    read_dialling_number(&mut OctetBuffer::from_vec(field), len)
}

/// Write the length octet and the 11 octet number field. Digits beyond 20 are dropped.
pub fn write_number_with_length(buf: &mut OctetBuffer, number: &str) -> Result<(), IccErr> {
    if number.is_empty() {
        buf.write_padding(NUMBER_WITH_LENGTH_SIZE);
        return Ok(());
    }
    let international = number.starts_with('+');
    let digits: String = sanitize_number(number).chars().filter(|&c| c != '+').take(ADN_MAX_NUMBER_DIGITS).collect();
    let bcd = string_to_extended_bcd(&digits);
    let num_len = bcd.len().div_ceil(2) + 1;

    buf.write_octet(num_len as u8);
    buf.write_octet(if international { TOA_INTERNATIONAL } else { TOA_ISDN });
    buf.write_swapped_nibble_bcd(&bcd)?;
    buf.write_padding(ADN_MAX_BCD_NUMBER_BYTES - num_len);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use icc_core::debug;
    use icc_core::octet_buffer::bytes_to_hex;

    #[test]
    fn test_number_round_trip() {
        debug::setup_logging_verbose();
        for number in ["1", "+31641600986", "12345678901234567890", "+0"] {
            let mut buf = OctetBuffer::new();
            write_number_with_length(&mut buf, number).unwrap();
            assert_eq!(buf.get_len(), NUMBER_WITH_LENGTH_SIZE);
            assert_eq!(read_number_with_length(&mut buf).unwrap(), number);
        }
    }

    #[test]
    fn test_write_encoding() {
        let mut buf = OctetBuffer::new();
        write_number_with_length(&mut buf, "+1 (234) 5*6#").unwrap();
        assert_eq!(bytes_to_hex(buf.as_bytes()), "05912143A5B6FFFFFFFFFFFF");
    }

    #[test]
    fn test_empty_and_oversized() {
        let mut buf = OctetBuffer::new();
        write_number_with_length(&mut buf, "").unwrap();
        assert_eq!(buf.as_bytes(), &[0xFF; NUMBER_WITH_LENGTH_SIZE]);
        assert_eq!(read_number_with_length(&mut buf).unwrap(), "");

        let mut buf = OctetBuffer::from_hex("0C8121436587092143658709").unwrap();
        assert_eq!(read_number_with_length(&mut buf).unwrap(), "");
        assert_eq!(buf.get_len_remaining(), 0);
    }

    #[test]
    fn test_split_number() {
        assert_eq!(split_number("+123"), ("+123".to_string(), None));
        let (main, ext) = split_number("+1234567890123456789012");
        assert_eq!(main, "+12345678901234567890");
        assert_eq!(ext.as_deref(), Some("12"));
    }
}

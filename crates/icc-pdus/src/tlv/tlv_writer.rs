//! COMPREHENSION-TLV writers for terminal responses and envelopes, ETSI TS 102.223 clause 8

use icc_core::gsm_alphabet::{NL_IDENTIFIER_DEFAULT, index_of, locking_table};
use icc_core::{IccErr, OctetBuffer};

use crate::sms::fields::sms_timestamp::SmsTimestamp;
use crate::stk::fields::text_string::{STK_TEXT_CODING_GSM_7BIT_PACKED, STK_TEXT_CODING_GSM_8BIT, STK_TEXT_CODING_UCS2};
use crate::tlv::enums::comprehension_tag::{COMPREHENSION_TLV_FLAG_CR, ComprehensionTag};

/// Serving cell as reported in a Location Information object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationInfo {
    pub mcc: String,
    pub mnc: String,
    pub lac: u16,
    /// 16 bit GSM cell id, or 28 bit UTRAN cell id
    pub cell_id: u32,
}

/// Octets taken by a length field holding `length`
pub fn size_of_length_octets(length: usize) -> usize {
    match length {
        0..0x80 => 1,
        0x80..0x100 => 2,
        0x100..0x10000 => 3,
        _ => 4,
    }
}

/// ETSI TS 101.220 clause 7.1.2 length encoding
pub fn write_length(buf: &mut OctetBuffer, length: usize) -> Result<(), IccErr> {
    match length {
        0..0x80 => buf.write_octet(length as u8),
        0x80..0x100 => {
            buf.write_octet(0x81);
            buf.write_octet(length as u8);
        }
        0x100..0x10000 => {
            buf.write_octet(0x82);
            buf.write_u16(length as u16);
        }
        0x10000..0x1000000 => {
            buf.write_octet(0x83);
            buf.write_octet((length >> 16) as u8);
            buf.write_u16((length & 0xFFFF) as u16);
        }
        _ => return Err(IccErr::InvalidValue { field: "tlv_length", value: length as u64 }),
    }
    Ok(())
}

/// Tag, length and value of a single object
pub fn write_tlv(buf: &mut OctetBuffer, tag: u8, value: &[u8]) -> Result<(), IccErr> {
    buf.write_octet(tag);
    write_length(buf, value.len())?;
    buf.write_octets(value);
    Ok(())
}

/// TS 24.008 clause 10.5.1.3 MCC/MNC followed by LAC and cell id
pub fn write_location_info(buf: &mut OctetBuffer, loc: &LocationInfo) -> Result<(), IccErr> {
    let utran = loc.cell_id > 0xFFFF;
    buf.write_octet(ComprehensionTag::LocationInfo.with_cr());
    buf.write_octet(if utran { 9 } else { 7 });

    let mnc: String = match loc.mnc.len() {
        2 => format!("F{}", loc.mnc),
        3 => {
            let d: Vec<char> = loc.mnc.chars().collect();
            [d[2], d[0], d[1]].iter().collect()
        }
        _ => return Err(IccErr::InvalidArguments { reason: "mnc must have 2 or 3 digits" }),
    };
    buf.write_swapped_nibble_bcd(&format!("{}{}", loc.mcc, mnc))?;
    buf.write_u16(loc.lac);
    if utran {
        buf.write_u16((loc.cell_id >> 16) as u16);
    }
    buf.write_u16((loc.cell_id & 0xFFFF) as u16);
    Ok(())
}

/// TS 24.008 clause 10.5.4.11 cause, GSM coding standard, user location.
/// Causes above 127 do not fit and are not written.
pub fn write_cause(buf: &mut OctetBuffer, cause: u8) {
    if cause > 127 {
        tracing::debug!("cause {} not representable, omitted", cause);
        return;
    }
    buf.write_octet(ComprehensionTag::Cause.with_cr());
    buf.write_octet(2);
    buf.write_octet(0x60);
    buf.write_octet(0x80 | cause);
}

pub fn write_date_time_zone(buf: &mut OctetBuffer, timestamp: &SmsTimestamp) {
    buf.write_octet(ComprehensionTag::DateTimeZone.into_raw() as u8);
    buf.write_octet(7);
    timestamp.to_octetbuf(buf);
}

/// ISO 639-1 code as two GSM default alphabet characters
pub fn write_language(buf: &mut OctetBuffer, language: &str) -> Result<(), IccErr> {
    let table = locking_table(NL_IDENTIFIER_DEFAULT);
    let mut chars = language.chars();
    let (Some(a), Some(b)) = (chars.next(), chars.next()) else {
        return Err(IccErr::InvalidArguments { reason: "language needs two characters" });
    };
    buf.write_octet(ComprehensionTag::Language.into_raw() as u8);
    buf.write_octet(2);
    for c in [a, b] {
        buf.write_octet(index_of(table, c).ok_or(IccErr::UnencodableChar { ch: c })?);
    }
    Ok(())
}

/// Hours, minutes and seconds in swapped BCD. Hours saturate at 99.
pub fn write_timer_value(buf: &mut OctetBuffer, seconds: u32, cr: bool) {
    let tag = ComprehensionTag::TimerValue.into_raw() as u8;
    buf.write_octet(if cr { tag | COMPREHENSION_TLV_FLAG_CR } else { tag });
    buf.write_octet(3);
    buf.write_swapped_nibble_bcd_num((seconds / 3600).min(99));
    buf.write_swapped_nibble_bcd_num((seconds / 60) % 60);
    buf.write_swapped_nibble_bcd_num(seconds % 60);
}

/// Text string in the given coding (0x00 packed, 0x04 8 bit, 0x08 UCS2)
pub fn write_text_string(buf: &mut OctetBuffer, text: &str, coding: u8) -> Result<(), IccErr> {
    let mut value = OctetBuffer::new();
    value.write_octet(coding);
    match coding {
        STK_TEXT_CODING_UCS2 => value.write_ucs2(text),
        STK_TEXT_CODING_GSM_7BIT_PACKED => value.write_septets(text, 0, NL_IDENTIFIER_DEFAULT, NL_IDENTIFIER_DEFAULT)?,
        STK_TEXT_CODING_GSM_8BIT => value.write_8bit_unpacked(text),
        other => return Err(IccErr::InvalidValue { field: "text_coding", value: other as u64 }),
    }
    write_tlv(buf, ComprehensionTag::TextString.with_cr(), value.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use icc_core::debug;
    use icc_core::octet_buffer::bytes_to_hex;

    fn hex_of(f: impl FnOnce(&mut OctetBuffer)) -> String {
        let mut buf = OctetBuffer::new();
        f(&mut buf);
        bytes_to_hex(buf.as_bytes())
    }

    #[test]
    fn test_write_length() {
        debug::setup_logging_verbose();
        assert_eq!(hex_of(|b| write_length(b, 0x7F).unwrap()), "7F");
        assert_eq!(hex_of(|b| write_length(b, 0x80).unwrap()), "8180");
        assert_eq!(hex_of(|b| write_length(b, 0x1234).unwrap()), "821234");
        assert_eq!(hex_of(|b| write_length(b, 0x10000).unwrap()), "83010000");
        assert!(write_length(&mut OctetBuffer::new(), 0x1000000).is_err());
        assert_eq!(size_of_length_octets(0x100), 3);
    }

    #[test]
    fn test_location_info() {
        let gsm = LocationInfo { mcc: "466".to_string(), mnc: "92".to_string(), lac: 0x2710, cell_id: 0xC351 };
        assert_eq!(hex_of(|b| write_location_info(b, &gsm).unwrap()), "930764F6292710C351");

        let utran = LocationInfo { mcc: "310".to_string(), mnc: "410".to_string(), lac: 0x0001, cell_id: 0x0ABCDEF };
        assert_eq!(hex_of(|b| write_location_info(b, &utran).unwrap()), "9309130014000100ABCDEF");
    }

    #[test]
    fn test_cause_and_timer() {
        assert_eq!(hex_of(|b| write_cause(b, 16)), "9A026090");
        assert_eq!(hex_of(|b| write_cause(b, 200)), "");
        // 01:02:03
        assert_eq!(hex_of(|b| write_timer_value(b, 3723, true)), "A503102030");
    }

    #[test]
    fn test_language_and_text() {
        assert_eq!(hex_of(|b| write_language(b, "zh").unwrap()), "2D027A68");
        assert_eq!(hex_of(|b| write_text_string(b, "Hi", STK_TEXT_CODING_GSM_8BIT).unwrap()), "8D03044869");
        assert_eq!(hex_of(|b| write_text_string(b, "", STK_TEXT_CODING_UCS2).unwrap()), "8D0108");
    }
}

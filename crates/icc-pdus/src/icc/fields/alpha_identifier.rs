//! Alpha identifiers of EF_ADN and friends, ETSI TS 102.221 Annex A.
//! Either GSM default alphabet, one character per octet, or one of three UCS2 schemes.

use icc_core::gsm_alphabet::{NL_IDENTIFIER_DEFAULT, index_of, is_gsm_default_alphabet, locking_table};
use icc_core::text_codec::{decode_8bit_unpacked, decode_utf16_lossy};
use icc_core::{IccErr, OctetBuffer};

/// Plain UCS2, two octets per character
pub const ALPHA_UCS2_80: u8 = 0x80;
/// Length, 8 bit base pointer (bits 15..7), then one octet per character
pub const ALPHA_UCS2_81: u8 = 0x81;
/// Length, 16 bit base pointer, then one octet per character
pub const ALPHA_UCS2_82: u8 = 0x82;

/// Read an alpha identifier occupying exactly `num_octets` octets
pub fn read_alpha_identifier(buf: &mut OctetBuffer, num_octets: usize) -> Result<String, IccErr> {
    if num_octets == 0 {
        return Ok(String::new());
    }
    let data = buf.read_slice(num_octets)?;
    Ok(decode_alpha_identifier(data))
}

/// Decode an alpha identifier from its raw octets
pub fn decode_alpha_identifier(data: &[u8]) -> String {
    match data.first() {
        Some(&ALPHA_UCS2_80) => {
            let units: Vec<u16> = data[1..]
                .chunks_exact(2)
                .map(|c| u16::from_be_bytes([c[0], c[1]]))
                .take_while(|&u| u != 0xFFFF)
                .collect();
            decode_utf16_lossy(&units)
        }
        Some(&ALPHA_UCS2_81) if data.len() >= 3 => {
            let len = data[1] as usize;
            let base = (data[2] as u16) << 7;
            decode_ucs2_with_base(&data[3..], len, base)
        }
        Some(&ALPHA_UCS2_82) if data.len() >= 4 => {
            let len = data[1] as usize;
            let base = u16::from_be_bytes([data[2], data[3]]);
            decode_ucs2_with_base(&data[4..], len, base)
        }
        Some(&ALPHA_UCS2_81) | Some(&ALPHA_UCS2_82) => {
            tracing::debug!("truncated UCS2 alpha identifier {:02x?}", data);
            String::new()
        }
        _ => decode_8bit_unpacked(data),
    }
}

/// Characters with bit 8 set are `base + (ch & 0x7f)`, runs without it are GSM default alphabet
fn decode_ucs2_with_base(chars: &[u8], len: usize, base: u16) -> String {
    let chars = &chars[..len.min(chars.len())];
    let mut out = String::with_capacity(chars.len());
    let mut i = 0;
    while i < chars.len() {
        let ch = chars[i];
        if ch & 0x80 != 0 {
            let unit = base.wrapping_add((ch & 0x7F) as u16);
            out.push_str(&decode_utf16_lossy(&[unit]));
            i += 1;
        } else {
            let start = i;
            while i < chars.len() && chars[i] & 0x80 == 0 {
                i += 1;
            }
            out.push_str(&decode_8bit_unpacked(&chars[start..i]));
        }
    }
    out
}

/// Write `text` into exactly `num_octets` octets, padding with 0xFF.
/// GSM default alphabet text is written unpacked, anything else in the most compact UCS2 scheme.
/// Returns the prefix of `text` that fit.
pub fn write_alpha_identifier(buf: &mut OctetBuffer, num_octets: usize, text: &str) -> String {
    if num_octets == 0 {
        return String::new();
    }
    if text.is_empty() || is_gsm_default_alphabet(text) {
        return buf.write_8bit_unpacked_padded(num_octets, text);
    }
    write_ucs2_alpha_identifier(buf, num_octets, text)
}

fn write_ucs2_alpha_identifier(buf: &mut OctetBuffer, num_octets: usize, text: &str) -> String {
    let units: Vec<u16> = text.encode_utf16().collect();

    let mut scheme = ALPHA_UCS2_80;
    let mut base: u16 = 0;
    if units.len() > 2 {
        let wide = units.iter().copied().filter(|u| u & 0xFF80 != 0);
        let range = wide.clone().min().zip(wide.max());
        if let Some((min, max)) = range {
            // Both compact schemes address a half page of 128 characters
            if max - min < 128 {
                if (min & 0x7F80) == (max & 0x7F80) && (max & 0x8000) == 0 {
                    scheme = ALPHA_UCS2_81;
                    base = min & 0x7F80;
                } else {
                    scheme = ALPHA_UCS2_82;
                    base = min;
                }
            }
        }
    }
    tracing::trace!("alpha identifier scheme 0x{:02x} base 0x{:04x}", scheme, base);

    buf.write_octet(scheme);
    let (taken, room) = match scheme {
        ALPHA_UCS2_80 => {
            let room = num_octets - 1;
            let taken = &units[..units.len().min(room / 2)];
            for &u in taken {
                buf.write_u16(u);
            }
            buf.write_padding(room - taken.len() * 2);
            return decode_utf16_lossy(taken);
        }
        ALPHA_UCS2_81 => {
            let room = num_octets.saturating_sub(3);
            let taken = &units[..units.len().min(room)];
            buf.write_octet(taken.len() as u8);
            buf.write_octet(((base >> 7) & 0xFF) as u8);
            (taken, room)
        }
        _ => {
            let room = num_octets.saturating_sub(4);
            let taken = &units[..units.len().min(room)];
            buf.write_octet(taken.len() as u8);
            buf.write_u16(base);
            (taken, room)
        }
    };

    let locking = locking_table(NL_IDENTIFIER_DEFAULT);
    for &u in taken {
        if u & 0xFF80 != 0 {
            buf.write_octet(((u - base) as u8) | 0x80);
        } else {
            let gsm = char::from_u32(u as u32).and_then(|c| index_of(locking, c));
            buf.write_octet(gsm.unwrap_or((u & 0x7F) as u8));
        }
    }
    buf.write_padding(room - taken.len());
    decode_utf16_lossy(taken)
}

#[cfg(test)]
mod tests {
    use super::*;
    use icc_core::debug;
    use icc_core::octet_buffer::bytes_to_hex;

    #[test]
    fn test_gsm_alpha_identifier() {
        debug::setup_logging_verbose();
        let mut buf = OctetBuffer::new();
        let written = write_alpha_identifier(&mut buf, 8, "Mom");
        assert_eq!(written, "Mom");
        assert_eq!(bytes_to_hex(buf.as_bytes()), "4D6F6DFFFFFFFFFF");
        assert_eq!(read_alpha_identifier(&mut buf, 8).unwrap(), "Mom");
    }

    #[test]
    fn test_ucs2_80() {
        let mut buf = OctetBuffer::from_hex("80004E004DFFFFFFFF").unwrap();
        assert_eq!(read_alpha_identifier(&mut buf, 9).unwrap(), "NM");

        // Two characters never take a compact scheme
        let mut buf = OctetBuffer::new();
        assert_eq!(write_alpha_identifier(&mut buf, 6, "中文"), "中文");
        assert_eq!(bytes_to_hex(buf.as_bytes()), "804E2D6587FF");
    }

    #[test]
    fn test_ucs2_81() {
        // Base pointer 0x0B << 7 = 0x0580, Hebrew letters with a GSM space in between
        let mut buf = OctetBuffer::from_hex("81050BD8D9DA20DBFFFF").unwrap();
        let text = read_alpha_identifier(&mut buf, 10).unwrap();
        assert_eq!(text, "\u{05D8}\u{05D9}\u{05DA} \u{05DB}");

        let mut out = OctetBuffer::new();
        assert_eq!(write_alpha_identifier(&mut out, 10, &text), text);
        assert_eq!(bytes_to_hex(out.as_bytes()), "81050BD8D9DA20DBFFFF");
        assert_eq!(decode_alpha_identifier(out.as_bytes()), text);
    }

    #[test]
    fn test_ucs2_82() {
        let text = "\u{8000}\u{8001}\u{8010}";
        let mut out = OctetBuffer::new();
        write_alpha_identifier(&mut out, 9, text);
        assert_eq!(bytes_to_hex(out.as_bytes()), "82038000808190FFFF");
        assert_eq!(decode_alpha_identifier(out.as_bytes()), text);
    }

    #[test]
    fn test_ucs2_truncation() {
        let mut buf = OctetBuffer::new();
        // Too far apart for a half page, plain UCS2 fits two characters
        let written = write_alpha_identifier(&mut buf, 5, "中文字");
        assert_eq!(written, "中文");
        assert_eq!(buf.get_len(), 5);
    }
}

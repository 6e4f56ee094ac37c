//! GSM 7-bit packed, 8-bit unpacked and UCS2 string codecs on top of OctetBuffer

use crate::gsm_alphabet::{
    self, EXTENDED_ESCAPE, NL_IDENTIFIER_DEFAULT, RESERVED_CONTROL, UNUSED, index_of, locking_table,
    single_shift_table,
};
use crate::{IccErr, OctetBuffer};

/// Resolve a septet following an escape. Escape and the reserved control code show as a space.
/// Entries the shift table leaves unused fall back to the locking table character.
fn shifted_char(septet: u8, locking: &[char; 128], shift: &[char; 128]) -> char {
    if septet == EXTENDED_ESCAPE || septet == RESERVED_CONTROL {
        return ' ';
    }
    match shift[septet as usize] {
        UNUSED => locking[septet as usize],
        c => c,
    }
}

impl OctetBuffer {
    /// Read `length` septets packed into octets, skipping `padding_bits` leading bits.
    /// Each escape septet shortens the resulting string by one.
    pub fn read_septets(&mut self, length: usize, padding_bits: u8, lang: u8, lang_shift: u8) -> Result<String, IccErr> {
        let locking = locking_table(lang);
        let shift = single_shift_table(lang_shift);

        let mut remaining_chars = length;
        let mut byte_len = (length * 7 + padding_bits as usize).div_ceil(8);
        let mut out = String::with_capacity(length);

        let mut data: u64 = 0;
        let mut data_bits: u32 = 0;
        if padding_bits > 0 && byte_len > 0 {
            data = (self.read_field("septets")? >> padding_bits) as u64;
            data_bits = 8 - padding_bits as u32;
            byte_len -= 1;
        }

        let mut escape_found = false;
        loop {
            let to_read = byte_len.min(if data_bits > 0 { 3 } else { 4 });
            for _ in 0..to_read {
                data |= (self.read_field("septets")? as u64) << data_bits;
                data_bits += 8;
                byte_len -= 1;
            }

            while data_bits >= 7 {
                let septet = (data & 0x7F) as u8;
                data >>= 7;
                data_bits -= 7;

                if escape_found {
                    escape_found = false;
                    out.push(shifted_char(septet, locking, shift));
                } else if septet == EXTENDED_ESCAPE {
                    escape_found = true;
                    remaining_chars = remaining_chars.saturating_sub(1);
                } else {
                    out.push(locking[septet as usize]);
                }
            }

            if byte_len == 0 {
                break;
            }
        }

        if out.chars().count() != remaining_chars {
            out = out.chars().take(remaining_chars).collect();
        }
        Ok(out)
    }

    /// Pack `text` into septets after `padding_bits` zero bits.
    /// Characters outside both tables yield UnencodableChar.
    pub fn write_septets(&mut self, text: &str, padding_bits: u8, lang: u8, lang_shift: u8) -> Result<(), IccErr> {
        let locking = locking_table(lang);
        let shift = single_shift_table(lang_shift);

        let mut data: u64 = 0;
        let mut data_bits: u32 = padding_bits as u32;
        for c in text.chars() {
            if c == UNUSED {
                continue;
            }
            if let Some(septet) = index_of(locking, c) {
                data |= (septet as u64) << data_bits;
                data_bits += 7;
            } else {
                let Some(septet) = index_of(shift, c) else {
                    return Err(IccErr::UnencodableChar { ch: c });
                };
                if septet == RESERVED_CONTROL {
                    continue;
                }
                data |= (EXTENDED_ESCAPE as u64) << data_bits;
                data_bits += 7;
                data |= (septet as u64) << data_bits;
                data_bits += 7;
            }

            while data_bits >= 8 {
                self.write_octet((data & 0xFF) as u8);
                data >>= 8;
                data_bits -= 8;
            }
        }

        if data_bits != 0 {
            self.write_octet((data & 0xFF) as u8);
        }
        Ok(())
    }

    /// Read `num_octets` octets of GSM default alphabet, one character per octet.
    /// Decoding stops at the first 0xFF; all `num_octets` octets are consumed.
    pub fn read_8bit_unpacked(&mut self, num_octets: usize) -> Result<String, IccErr> {
        let data = self.read_slice(num_octets)?;
        Ok(decode_8bit_unpacked(data))
    }

    /// Write `text` one octet per character, shift table characters prefixed with escape.
    /// Characters outside the default tables are written as a space.
    pub fn write_8bit_unpacked(&mut self, text: &str) {
        let locking = locking_table(NL_IDENTIFIER_DEFAULT);
        let shift = single_shift_table(NL_IDENTIFIER_DEFAULT);
        for c in text.chars() {
            let octet = match index_of(locking, c) {
                Some(o) => o,
                None => match index_of(shift, c) {
                    Some(o) => {
                        self.write_octet(EXTENDED_ESCAPE);
                        o
                    }
                    None => 0x20,
                },
            };
            self.write_octet(octet);
        }
    }

    /// Write `text` into exactly `num_octets` octets, padding with 0xFF.
    /// Returns the prefix of `text` that fit.
    pub fn write_8bit_unpacked_padded(&mut self, num_octets: usize, text: &str) -> String {
        let locking = locking_table(NL_IDENTIFIER_DEFAULT);
        let shift = single_shift_table(NL_IDENTIFIER_DEFAULT);

        let mut written = 0;
        let mut taken = String::new();
        for c in text.chars() {
            if written >= num_octets {
                break;
            }
            let octet = match index_of(locking, c) {
                Some(o) => o,
                None => {
                    if written + 2 > num_octets {
                        break;
                    }
                    match index_of(shift, c) {
                        Some(o) => {
                            self.write_octet(EXTENDED_ESCAPE);
                            written += 1;
                            o
                        }
                        None => 0x20,
                    }
                }
            };
            self.write_octet(octet);
            written += 1;
            taken.push(c);
        }
        self.write_padding(num_octets - written);
        taken
    }

    /// Read `num_octets` octets as big-endian UTF-16 code units
    pub fn read_ucs2(&mut self, num_octets: usize) -> Result<String, IccErr> {
        let mut units = Vec::with_capacity(num_octets / 2);
        for _ in 0..num_octets / 2 {
            units.push(self.read_u16("ucs2")?);
        }
        Ok(decode_utf16_lossy(&units))
    }

    pub fn write_ucs2(&mut self, text: &str) {
        for unit in text.encode_utf16() {
            self.write_u16(unit);
        }
    }
}

/// Decode GSM default alphabet octets, stopping at 0xFF
pub fn decode_8bit_unpacked(data: &[u8]) -> String {
    let locking = locking_table(NL_IDENTIFIER_DEFAULT);
    let shift = single_shift_table(NL_IDENTIFIER_DEFAULT);

    let mut out = String::with_capacity(data.len());
    let mut escape_found = false;
    for &octet in data {
        if octet == 0xFF {
            break;
        }
        let septet = octet & 0x7F;
        if escape_found {
            escape_found = false;
            out.push(shifted_char(septet, locking, shift));
        } else if septet == EXTENDED_ESCAPE {
            escape_found = true;
        } else {
            out.push(locking[septet as usize]);
        }
    }
    out
}

pub fn decode_utf16_lossy(units: &[u16]) -> String {
    char::decode_utf16(units.iter().copied())
        .map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect()
}

/// Amount of septets `text` occupies, counting shift table characters twice.
/// Returns None when a character needs UCS2.
pub fn septet_count(text: &str, lang: u8, lang_shift: u8) -> Option<usize> {
    let locking = gsm_alphabet::locking_table(lang);
    let shift = gsm_alphabet::single_shift_table(lang_shift);
    let mut count = 0;
    for c in text.chars() {
        if index_of(locking, c).is_some() {
            count += 1;
        } else if index_of(shift, c).is_some() {
            count += 2;
        } else {
            return None;
        }
    }
    Some(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gsm_alphabet::NL_IDENTIFIER_TURKISH;

    #[test]
    fn test_septets_hello() {
        // "hellohello" from 3GPP TS 23.040 examples
        let mut buf = OctetBuffer::new();
        buf.write_septets("hellohello", 0, 0, 0).unwrap();
        assert_eq!(buf.dump_hex(), "E8329BFD4697D9EC37");
        assert_eq!(buf.read_septets(10, 0, 0, 0).unwrap(), "hellohello");
    }

    #[test]
    fn test_septets_with_escape_and_padding() {
        let text = "[1€]";
        let mut buf = OctetBuffer::new();
        buf.write_octet(0x00);
        buf.write_septets(text, 1, 0, 0).unwrap();
        buf.skip(1).unwrap();
        // 7 septets on the wire: three escapes plus four characters
        assert_eq!(buf.read_septets(7, 1, 0, 0).unwrap(), text);
    }

    #[test]
    fn test_double_escape_reads_space() {
        let mut raw = OctetBuffer::new();
        // ESC ESC 'A' packed: 0x1B | 0x1B<<7 | 0x41<<14
        let data: u32 = 0x1B | (0x1B << 7) | (0x41 << 14);
        raw.write_octet(data as u8);
        raw.write_octet((data >> 8) as u8);
        raw.write_octet((data >> 16) as u8);
        assert_eq!(raw.read_septets(3, 0, 0, 0).unwrap(), " A");
    }

    #[test]
    fn test_unencodable_char() {
        let mut buf = OctetBuffer::new();
        assert_eq!(buf.write_septets("中", 0, 0, 0), Err(IccErr::UnencodableChar { ch: '中' }));
    }

    #[test]
    fn test_turkish_locking_table() {
        let mut buf = OctetBuffer::new();
        buf.write_septets("ığ", 0, NL_IDENTIFIER_TURKISH, NL_IDENTIFIER_TURKISH).unwrap();
        assert_eq!(buf.read_septets(2, 0, NL_IDENTIFIER_TURKISH, NL_IDENTIFIER_TURKISH).unwrap(), "ığ");
    }

    #[test]
    fn test_8bit_unpacked_padded() {
        let mut buf = OctetBuffer::new();
        let written = buf.write_8bit_unpacked_padded(6, "Mum{x}");
        // '{' needs two octets, so only "Mum{x" fits partially: M u m ESC { x
        assert_eq!(written, "Mum{x");
        assert_eq!(buf.get_len(), 6);
        assert_eq!(buf.read_8bit_unpacked(6).unwrap(), "Mum{x");

        let mut buf = OctetBuffer::new();
        buf.write_8bit_unpacked_padded(4, "Jo");
        assert_eq!(buf.dump_hex(), "4A6FFFFF");
    }

    #[test]
    fn test_ucs2() {
        let mut buf = OctetBuffer::new();
        buf.write_ucs2("中文");
        assert_eq!(buf.dump_hex(), "4E2D6587");
        assert_eq!(buf.read_ucs2(4).unwrap(), "中文");
    }

    #[test]
    fn test_septet_count() {
        assert_eq!(septet_count("a{b", 0, 0), Some(4));
        assert_eq!(septet_count("ä中", 0, 0), None);
    }
}

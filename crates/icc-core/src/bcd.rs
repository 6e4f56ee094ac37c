//! Semi-octet BCD helpers. On the wire, the first digit of each pair is held in the low nibble.

use crate::{IccErr, OctetBuffer};

const BCD_CHARS: &[u8] = b"0123456789";
/// Nibbles 0xA..=0xD map to '*', '#', ',' (DTMF pause) and ';' (wild)
const EXTENDED_BCD_CHARS: &[u8] = b"0123456789*#,;";

/// Convert a swapped-nibble octet to its decimal value. Non-decimal nibbles count as 0.
pub fn octet_to_bcd(octet: u8) -> u8 {
    let hi = octet >> 4;
    let lo = octet & 0x0F;
    let ones = if hi <= 9 { hi } else { 0 };
    let tens = if lo <= 9 { lo * 10 } else { 0 };
    tens + ones
}

/// Convert a decimal value (0..=99) to a swapped-nibble octet
pub fn bcd_to_octet(bcd: u8) -> u8 {
    ((bcd % 10) << 4) + ((bcd / 10) % 10)
}

/// Strip everything but dialable characters and map '*', '#', ',' to nibbles a, b, c
pub fn string_to_extended_bcd(number: &str) -> String {
    number
        .chars()
        .filter_map(|c| match c {
            '0'..='9' => Some(c),
            '*' => Some('a'),
            '#' => Some('b'),
            ',' => Some('c'),
            _ => None,
        })
        .collect()
}

fn semi_octet_to_char(nibble: u8, charset: &[u8], suppress: bool) -> Result<Option<char>, IccErr> {
    match charset.get(nibble as usize) {
        Some(&c) => Ok(Some(c as char)),
        None if suppress => Ok(None),
        None => Err(IccErr::InvalidDigit { digit: nibble }),
    }
}

pub fn semi_octet_to_bcd_char(nibble: u8, suppress: bool) -> Result<Option<char>, IccErr> {
    semi_octet_to_char(nibble, BCD_CHARS, suppress)
}

pub fn semi_octet_to_extended_bcd_char(nibble: u8, suppress: bool) -> Result<Option<char>, IccErr> {
    semi_octet_to_char(nibble, EXTENDED_BCD_CHARS, suppress)
}

fn nibble_from_char(c: char) -> Result<u8, IccErr> {
    match c.to_digit(16) {
        Some(d) => Ok(d as u8),
        None => Err(IccErr::InvalidDigit { digit: c as u32 as u8 }),
    }
}

impl OctetBuffer {
    /// Read `pairs` swapped-nibble octets as a decimal number.
    /// 0xFF octets are filler and skipped; an octet with high nibble F contributes one digit.
    pub fn read_swapped_nibble_bcd_num(&mut self, pairs: usize) -> Result<u32, IccErr> {
        let mut number: u32 = 0;
        for _ in 0..pairs {
            let octet = self.read_field("bcd_num")?;
            if octet == 0xFF {
                continue;
            }
            if octet & 0xF0 == 0xF0 {
                number = number * 10 + (octet & 0x0F) as u32;
                continue;
            }
            number = number * 100 + octet_to_bcd(octet) as u32;
        }
        Ok(number)
    }

    /// Read `pairs` swapped-nibble octets as a digit string. A low nibble of 0xF ends the string.
    pub fn read_swapped_nibble_bcd_string(&mut self, pairs: usize, suppress: bool) -> Result<String, IccErr> {
        self.read_bcd_digits(pairs, BCD_CHARS, suppress)
    }

    /// Same as read_swapped_nibble_bcd_string, with the extended '*#,;' charset
    pub fn read_swapped_nibble_extended_bcd_string(&mut self, pairs: usize, suppress: bool) -> Result<String, IccErr> {
        self.read_bcd_digits(pairs, EXTENDED_BCD_CHARS, suppress)
    }

    fn read_bcd_digits(&mut self, pairs: usize, charset: &[u8], suppress: bool) -> Result<String, IccErr> {
        let mut s = String::with_capacity(pairs * 2);
        for _ in 0..pairs {
            let octet = self.read_field("bcd_string")?;
            let first = octet & 0x0F;
            let second = octet >> 4;
            if first == 0x0F {
                break;
            }
            if let Some(c) = semi_octet_to_char(first, charset, suppress)? {
                s.push(c);
            }
            if second != 0x0F {
                if let Some(c) = semi_octet_to_char(second, charset, suppress)? {
                    s.push(c);
                }
            }
        }
        Ok(s)
    }

    /// Write a string of hex digits as swapped nibbles, padding an odd length with F
    pub fn write_swapped_nibble_bcd(&mut self, digits: &str) -> Result<(), IccErr> {
        let mut nibbles = digits.chars().map(nibble_from_char).collect::<Result<Vec<u8>, IccErr>>()?;
        if nibbles.len() % 2 != 0 {
            nibbles.push(0x0F);
        }
        for pair in nibbles.chunks(2) {
            self.write_octet((pair[1] << 4) | pair[0]);
        }
        Ok(())
    }

    /// Write a decimal number as swapped nibbles, left padding an odd digit count with 0
    pub fn write_swapped_nibble_bcd_num(&mut self, value: u32) {
        let mut digits: Vec<u8> = value.to_string().bytes().map(|b| b - b'0').collect();
        if digits.len() % 2 != 0 {
            digits.insert(0, 0);
        }
        for pair in digits.chunks(2) {
            self.write_octet((pair[1] << 4) | pair[0]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_octet_bcd_conversion() {
        assert_eq!(octet_to_bcd(0x21), 12);
        assert_eq!(octet_to_bcd(0x90), 9);
        assert_eq!(octet_to_bcd(0xA1), 10);
        assert_eq!(bcd_to_octet(12), 0x21);
        assert_eq!(bcd_to_octet(5), 0x50);
    }

    #[test]
    fn test_bcd_string_odd_length() {
        let mut buf = OctetBuffer::new();
        buf.write_swapped_nibble_bcd("12345").unwrap();
        assert_eq!(buf.dump_hex(), "2143F5");
        assert_eq!(buf.read_swapped_nibble_bcd_string(3, false).unwrap(), "12345");
    }

    #[test]
    fn test_extended_bcd() {
        let digits = string_to_extended_bcd("*31#,9");
        assert_eq!(digits, "a31bc9");
        let mut buf = OctetBuffer::new();
        buf.write_swapped_nibble_bcd(&digits).unwrap();
        assert_eq!(buf.read_swapped_nibble_extended_bcd_string(3, false).unwrap(), "*31#,9");
    }

    #[test]
    fn test_invalid_digit() {
        let mut buf = OctetBuffer::from_hex("A1").unwrap();
        assert_eq!(buf.read_swapped_nibble_bcd_string(1, false), Err(IccErr::InvalidDigit { digit: 0x0A }));
        let mut buf = OctetBuffer::from_hex("A1").unwrap();
        assert_eq!(buf.read_swapped_nibble_bcd_string(1, true).unwrap(), "1");
    }

    #[test]
    fn test_bcd_num() {
        let mut buf = OctetBuffer::from_hex("02F5FF").unwrap();
        assert_eq!(buf.read_swapped_nibble_bcd_num(3).unwrap(), 205);
        let mut buf = OctetBuffer::new();
        buf.write_swapped_nibble_bcd_num(7);
        assert_eq!(buf.dump_hex(), "70");
    }
}

use core::fmt;

use crate::IccErr;

/// Codec cursor over an octet stream.
/// Invariant: `rpos <= wpos <= buffer.len()`. Octets in `[0, wpos)` are valid data;
/// reads never go past `wpos`. Writes append at `wpos`, growing the buffer when needed.
pub struct OctetBuffer {
    buffer: Vec<u8>,
    /// Read position
    rpos: usize,
    /// Write position, also the amount of valid octets
    wpos: usize,
}

impl OctetBuffer {
    /// Create an empty buffer. Writes grow it as needed.
    pub fn new() -> Self {
        Self::with_capacity(32)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
            rpos: 0,
            wpos: 0,
        }
    }

    /// Wrap an existing byte-vector. All octets are readable.
    pub fn from_vec(data: Vec<u8>) -> Self {
        let wpos = data.len();
        Self { buffer: data, rpos: 0, wpos }
    }

    pub fn from_bytes(data: &[u8]) -> Self {
        Self::from_vec(data.to_vec())
    }

    /// Construct a buffer from a string of hex nibble pairs, e.g. "07911326".
    /// Upper and lower case digits are accepted.
    pub fn from_hex(hex: &str) -> Result<Self, IccErr> {
        Ok(Self::from_vec(hex_to_bytes(hex)?))
    }

    /// Read one octet, advancing on success
    pub fn read_octet(&mut self) -> Result<u8, IccErr> {
        if self.rpos >= self.wpos {
            return Err(IccErr::OutOfBounds { field: None });
        }
        let v = self.buffer[self.rpos];
        self.rpos += 1;
        Ok(v)
    }

    /// Similar to read_octet, but names the field in the OutOfBounds error
    pub fn read_field(&mut self, field: &'static str) -> Result<u8, IccErr> {
        self.read_octet().map_err(|_| IccErr::OutOfBounds { field: Some(field) })
    }

    /// Big-endian 16 bit value
    pub fn read_u16(&mut self, field: &'static str) -> Result<u16, IccErr> {
        let hi = self.read_field(field)? as u16;
        let lo = self.read_field(field)? as u16;
        Ok((hi << 8) | lo)
    }

    /// Read `len` octets as a slice, advancing on success
    pub fn read_slice(&mut self, len: usize) -> Result<&[u8], IccErr> {
        if self.get_len_remaining() < len {
            return Err(IccErr::OutOfBounds { field: None });
        }
        let start = self.rpos;
        self.rpos += len;
        Ok(&self.buffer[start..self.rpos])
    }

    pub fn read_octets(&mut self, len: usize) -> Result<Vec<u8>, IccErr> {
        self.read_slice(len).map(|s| s.to_vec())
    }

    /// Peek the octet at the read position, without advancing
    pub fn peek_octet(&self) -> Option<u8> {
        self.peek_octet_at(0)
    }

    /// Peek the octet at `offset` from the read position, without advancing
    pub fn peek_octet_at(&self, offset: usize) -> Option<u8> {
        let pos = self.rpos + offset;
        if pos < self.wpos { Some(self.buffer[pos]) } else { None }
    }

    /// Move the read position by `len` octets
    pub fn skip(&mut self, len: usize) -> Result<(), IccErr> {
        if self.get_len_remaining() < len {
            return Err(IccErr::OutOfBounds { field: None });
        }
        self.rpos += len;
        Ok(())
    }

    /// Seek the read position to an absolute offset. Fails when past the write index.
    pub fn seek(&mut self, pos: usize) -> Result<(), IccErr> {
        if pos > self.wpos {
            return Err(IccErr::OutOfBounds { field: None });
        }
        self.rpos = pos;
        Ok(())
    }

    pub fn write_octet(&mut self, value: u8) {
        if self.wpos < self.buffer.len() {
            self.buffer[self.wpos] = value;
        } else {
            self.buffer.push(value);
        }
        self.wpos += 1;
    }

    pub fn write_octets(&mut self, data: &[u8]) {
        for &b in data {
            self.write_octet(b);
        }
    }

    pub fn write_u16(&mut self, value: u16) {
        self.write_octet((value >> 8) as u8);
        self.write_octet(value as u8);
    }

    /// Write `count` 0xFF filler octets
    pub fn write_padding(&mut self, count: usize) {
        for _ in 0..count {
            self.write_octet(0xFF);
        }
    }

    /// Overwrite a previously written octet, e.g. a length field that is only known afterwards
    pub fn patch_octet(&mut self, pos: usize, value: u8) -> Result<(), IccErr> {
        if pos >= self.wpos {
            return Err(IccErr::OutOfBounds { field: Some("patch") });
        }
        self.buffer[pos] = value;
        Ok(())
    }

    /// Amount of valid octets (the write index)
    pub fn get_len(&self) -> usize {
        self.wpos
    }

    /// Octets left to read
    pub fn get_len_remaining(&self) -> usize {
        self.wpos - self.rpos
    }

    /// Current read position
    pub fn get_pos(&self) -> usize {
        self.rpos
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer[..self.wpos]
    }

    /// Unread octets
    pub fn remaining(&self) -> &[u8] {
        &self.buffer[self.rpos..self.wpos]
    }

    pub fn into_bytes(mut self) -> Vec<u8> {
        self.buffer.truncate(self.wpos);
        self.buffer
    }

    /// Dump all valid octets as an uppercase hex string without separators
    pub fn dump_hex(&self) -> String {
        bytes_to_hex(self.as_bytes())
    }
}

impl Default for OctetBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for OctetBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OctetBuffer {{ rpos: {} wpos: {} data: {} }}", self.rpos, self.wpos, self.dump_hex())
    }
}

/// Convert hex nibble pairs to bytes. Odd length or non-hex characters yield IccErr::InvalidHex
pub fn hex_to_bytes(hex: &str) -> Result<Vec<u8>, IccErr> {
    let hex = hex.trim();
    if hex.len() % 2 != 0 {
        return Err(IccErr::InvalidHex);
    }
    let digits = hex.as_bytes();
    let mut out = Vec::with_capacity(digits.len() / 2);
    for pair in digits.chunks(2) {
        let hi = hex_nibble(pair[0]).ok_or(IccErr::InvalidHex)?;
        let lo = hex_nibble(pair[1]).ok_or(IccErr::InvalidHex)?;
        out.push((hi << 4) | lo);
    }
    Ok(out)
}

pub fn bytes_to_hex(data: &[u8]) -> String {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";
    let mut s = String::with_capacity(data.len() * 2);
    for &b in data {
        s.push(HEX[(b >> 4) as usize] as char);
        s.push(HEX[(b & 0x0F) as usize] as char);
    }
    s
}

fn hex_nibble(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'A'..=b'F' => Some(c - b'A' + 10),
        b'a'..=b'f' => Some(c - b'a' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_write() {
        let mut buf = OctetBuffer::new();
        buf.write_octet(0xAB);
        buf.write_u16(0x1234);
        assert_eq!(buf.get_len(), 3);
        assert_eq!(buf.read_octet().unwrap(), 0xAB);
        assert_eq!(buf.read_u16("val").unwrap(), 0x1234);
        assert_eq!(buf.get_len_remaining(), 0);
    }

    #[test]
    fn test_read_past_write_index() {
        let mut buf = OctetBuffer::from_hex("01").unwrap();
        buf.read_octet().unwrap();
        assert_eq!(buf.read_octet(), Err(IccErr::OutOfBounds { field: None }));
        assert_eq!(buf.read_field("numlen"), Err(IccErr::OutOfBounds { field: Some("numlen") }));
        assert!(buf.skip(1).is_err());
    }

    #[test]
    fn test_hex_conversion() {
        let buf = OctetBuffer::from_hex("0791a2Ff").unwrap();
        assert_eq!(buf.as_bytes(), &[0x07, 0x91, 0xA2, 0xFF]);
        assert_eq!(buf.dump_hex(), "0791A2FF");
        assert_eq!(hex_to_bytes("123"), Err(IccErr::InvalidHex));
        assert_eq!(hex_to_bytes("zz"), Err(IccErr::InvalidHex));
    }

    #[test]
    fn test_patch_length_octet() {
        let mut buf = OctetBuffer::new();
        buf.write_octet(0);
        buf.write_octets(&[1, 2, 3]);
        buf.patch_octet(0, 3).unwrap();
        assert_eq!(buf.into_bytes(), vec![3, 1, 2, 3]);
    }
}

//! EF_CBMI, EF_CBMID and EF_CBMIR cell broadcast message identifier selection,
//! 3GPP TS 31.102 clauses 4.2.14, 4.2.20 and 4.2.22

use std::ops::Range;

const UNUSED_ID: u16 = 0xFFFF;

/// List of single message identifiers, each as a one element range
pub fn read_cb_identifiers(data: &[u8]) -> Vec<Range<u32>> {
    data.chunks_exact(2)
        .map(|c| u16::from_be_bytes([c[0], c[1]]))
        .filter(|&id| id != UNUSED_ID)
        .map(|id| id as u32..id as u32 + 1)
        .collect()
}

/// List of inclusive identifier ranges, returned as half open ranges
pub fn read_cb_identifier_ranges(data: &[u8]) -> Vec<Range<u32>> {
    data.chunks_exact(4)
        .map(|c| (u16::from_be_bytes([c[0], c[1]]), u16::from_be_bytes([c[2], c[3]])))
        .filter(|&(from, to)| from != UNUSED_ID && to != UNUSED_ID)
        .map(|(from, to)| from as u32..to as u32 + 1)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifiers() {
        assert_eq!(read_cb_identifiers(&[0x11, 0x12, 0xFF, 0xFF, 0x00, 0x32]), vec![0x1112..0x1113, 0x32..0x33]);
        assert!(read_cb_identifiers(&[]).is_empty());
    }

    #[test]
    fn test_ranges() {
        let ranges = read_cb_identifier_ranges(&[0x11, 0x12, 0x11, 0x1A, 0xFF, 0xFF, 0x00, 0x10]);
        assert_eq!(ranges, vec![0x1112..0x111B]);
    }
}

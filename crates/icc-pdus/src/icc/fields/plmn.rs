use core::fmt;

use icc_core::IccErr;

/// Nibble value matching any digit in EF_OPL
pub const PLMN_WILDCARD_NIBBLE: u8 = 0x0D;

/// MCC and MNC as stored on the card, 3GPP TS 24.008 clause 10.5.1.3.
/// Octet 1: MCC2 | MCC1, octet 2: MNC3 | MCC3, octet 3: MNC2 | MNC1.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Plmn {
    pub mcc: String,
    /// Two or three digits
    pub mnc: String,
}

fn nibble_char(nibble: u8) -> Option<char> {
    match nibble {
        0..=9 => Some((b'0' + nibble) as char),
        PLMN_WILDCARD_NIBBLE => Some('D'),
        _ => None,
    }
}

impl Plmn {
    pub fn new(mcc: &str, mnc: &str) -> Self {
        Plmn { mcc: mcc.to_string(), mnc: mnc.to_string() }
    }

    /// Decode three PLMN octets. Returns None for an unused (all 0xFF) entry.
    pub fn from_bytes(bytes: &[u8]) -> Result<Option<Self>, IccErr> {
        if bytes.len() < 3 {
            return Err(IccErr::OutOfBounds { field: Some("plmn") });
        }
        if bytes[..3].iter().all(|&b| b == 0xFF) {
            return Ok(None);
        }
        let mcc_nibbles = [bytes[0] & 0x0F, bytes[0] >> 4, bytes[1] & 0x0F];
        let mnc_nibbles = [bytes[2] & 0x0F, bytes[2] >> 4, bytes[1] >> 4];
        let mcc: String = mcc_nibbles.iter().filter_map(|&n| nibble_char(n)).collect();
        let mnc: String = mnc_nibbles.iter().filter_map(|&n| nibble_char(n)).collect();
        Ok(Some(Plmn { mcc, mnc }))
    }

    pub fn to_bytes(&self) -> Result<[u8; 3], IccErr> {
        let nibble = |c: Option<char>| -> Result<u8, IccErr> {
            match c {
                None => Ok(0x0F),
                Some('D') | Some('d') => Ok(PLMN_WILDCARD_NIBBLE),
                Some(c) => c.to_digit(10).map(|d| d as u8).ok_or(IccErr::InvalidDigit { digit: c as u32 as u8 }),
            }
        };
        let mcc: Vec<char> = self.mcc.chars().collect();
        let mnc: Vec<char> = self.mnc.chars().collect();
        if mcc.len() != 3 || !(2..=3).contains(&mnc.len()) {
            return Err(IccErr::InvalidArguments { reason: "plmn digit count" });
        }
        Ok([
            (nibble(Some(mcc[1]))? << 4) | nibble(Some(mcc[0]))?,
            (nibble(mnc.get(2).copied())? << 4) | nibble(Some(mcc[2]))?,
            (nibble(Some(mnc[1]))? << 4) | nibble(Some(mnc[0]))?,
        ])
    }

    /// Compare against a serving network, treating 'D' digits as wildcards
    pub fn matches(&self, mcc: &str, mnc: &str) -> bool {
        fn digits_match(pattern: &str, value: &str) -> bool {
            pattern.len() == value.len() && pattern.chars().zip(value.chars()).all(|(p, v)| p == 'D' || p == v)
        }
        digits_match(&self.mcc, mcc) && digits_match(&self.mnc, mnc)
    }
}

impl fmt::Display for Plmn {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}-{}", self.mcc, self.mnc)
    }
}

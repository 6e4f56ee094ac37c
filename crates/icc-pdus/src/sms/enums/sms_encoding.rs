/// 3GPP TS 23.038 clause 4, character set bits of the data coding scheme
/// Bits: 2 (at bit offset 2)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SmsEncoding {
    SevenBit = 0x00,
    EightBit = 0x04,
    Ucs2 = 0x08,
}

impl std::convert::TryFrom<u64> for SmsEncoding {
    type Error = ();
    fn try_from(x: u64) -> Result<Self, Self::Error> {
        match x {
            0x00 => Ok(SmsEncoding::SevenBit),
            0x04 => Ok(SmsEncoding::EightBit),
            0x08 => Ok(SmsEncoding::Ucs2),
            _ => Err(()),
        }
    }
}

impl SmsEncoding {
    /// Convert this enum back into the raw integer value
    pub fn into_raw(self) -> u64 {
        match self {
            SmsEncoding::SevenBit => 0x00,
            SmsEncoding::EightBit => 0x04,
            SmsEncoding::Ucs2 => 0x08,
        }
    }
}

impl From<SmsEncoding> for u64 {
    fn from(e: SmsEncoding) -> Self {
        e.into_raw()
    }
}

impl core::fmt::Display for SmsEncoding {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SmsEncoding::SevenBit => write!(f, "SevenBit"),
            SmsEncoding::EightBit => write!(f, "EightBit"),
            SmsEncoding::Ucs2 => write!(f, "Ucs2"),
        }
    }
}

/// 3GPP TS 23.040 clause 9.1.2.5 Type of number, bits 4..6 of the type-of-address octet
/// Bits: 3
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum TypeOfNumber {
    Unknown = 0,
    International = 1,
    National = 2,
    NetworkSpecific = 3,
    Subscriber = 4,
    Alphanumeric = 5,
    Abbreviated = 6,
    Reserved = 7,
}

impl std::convert::TryFrom<u64> for TypeOfNumber {
    type Error = ();
    fn try_from(x: u64) -> Result<Self, Self::Error> {
        match x {
            0 => Ok(TypeOfNumber::Unknown),
            1 => Ok(TypeOfNumber::International),
            2 => Ok(TypeOfNumber::National),
            3 => Ok(TypeOfNumber::NetworkSpecific),
            4 => Ok(TypeOfNumber::Subscriber),
            5 => Ok(TypeOfNumber::Alphanumeric),
            6 => Ok(TypeOfNumber::Abbreviated),
            7 => Ok(TypeOfNumber::Reserved),
            _ => Err(()),
        }
    }
}

impl TypeOfNumber {
    /// Convert this enum back into the raw integer value
    pub fn into_raw(self) -> u64 {
        self as u64
    }

    /// Extract from a full type-of-address octet
    pub fn from_toa(toa: u8) -> Self {
        match (toa >> 4) & 0x07 {
            0 => TypeOfNumber::Unknown,
            1 => TypeOfNumber::International,
            2 => TypeOfNumber::National,
            3 => TypeOfNumber::NetworkSpecific,
            4 => TypeOfNumber::Subscriber,
            5 => TypeOfNumber::Alphanumeric,
            6 => TypeOfNumber::Abbreviated,
            _ => TypeOfNumber::Reserved,
        }
    }
}

impl From<TypeOfNumber> for u64 {
    fn from(e: TypeOfNumber) -> Self {
        e.into_raw()
    }
}

impl core::fmt::Display for TypeOfNumber {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            TypeOfNumber::Unknown => write!(f, "Unknown"),
            TypeOfNumber::International => write!(f, "International"),
            TypeOfNumber::National => write!(f, "National"),
            TypeOfNumber::NetworkSpecific => write!(f, "NetworkSpecific"),
            TypeOfNumber::Subscriber => write!(f, "Subscriber"),
            TypeOfNumber::Alphanumeric => write!(f, "Alphanumeric"),
            TypeOfNumber::Abbreviated => write!(f, "Abbreviated"),
            TypeOfNumber::Reserved => write!(f, "Reserved"),
        }
    }
}

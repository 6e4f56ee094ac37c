/// 3GPP TS 51.011 clause 9.3 structure of file, as found in the classic GET RESPONSE
/// Bits: 8
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum EfStructure {
    Transparent = 0,
    LinearFixed = 1,
    Cyclic = 3,
}

impl std::convert::TryFrom<u64> for EfStructure {
    type Error = ();
    fn try_from(x: u64) -> Result<Self, Self::Error> {
        match x {
            0 => Ok(EfStructure::Transparent),
            1 => Ok(EfStructure::LinearFixed),
            3 => Ok(EfStructure::Cyclic),
            _ => Err(()),
        }
    }
}

impl EfStructure {
    /// Convert this enum back into the raw integer value
    pub fn into_raw(self) -> u64 {
        match self {
            EfStructure::Transparent => 0,
            EfStructure::LinearFixed => 1,
            EfStructure::Cyclic => 3,
        }
    }

    /// ETSI TS 102.221 clause 11.1.1.4.3 file descriptor byte, bits b3..b1
    pub fn from_fcp_descriptor(descriptor: u8) -> Option<Self> {
        match descriptor & 0x07 {
            1 => Some(EfStructure::Transparent),
            2 => Some(EfStructure::LinearFixed),
            6 => Some(EfStructure::Cyclic),
            _ => None,
        }
    }

    /// Record oriented EFs carry a record length and count
    pub fn is_record_based(self) -> bool {
        self != EfStructure::Transparent
    }
}

impl From<EfStructure> for u64 {
    fn from(e: EfStructure) -> Self {
        e.into_raw()
    }
}

impl core::fmt::Display for EfStructure {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            EfStructure::Transparent => write!(f, "Transparent"),
            EfStructure::LinearFixed => write!(f, "LinearFixed"),
            EfStructure::Cyclic => write!(f, "Cyclic"),
        }
    }
}

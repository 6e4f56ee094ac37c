/// 3GPP TS 23.041 clause 9.3.24 Warning-Type
/// Bits: 7
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum EtwsWarningType {
    Earthquake = 0,
    Tsunami = 1,
    EarthquakeAndTsunami = 2,
    Test = 3,
    Other = 4,
}

impl std::convert::TryFrom<u64> for EtwsWarningType {
    type Error = ();
    fn try_from(x: u64) -> Result<Self, Self::Error> {
        match x {
            0 => Ok(EtwsWarningType::Earthquake),
            1 => Ok(EtwsWarningType::Tsunami),
            2 => Ok(EtwsWarningType::EarthquakeAndTsunami),
            3 => Ok(EtwsWarningType::Test),
            4 => Ok(EtwsWarningType::Other),
            _ => Err(()),
        }
    }
}

impl EtwsWarningType {
    /// Convert this enum back into the raw integer value
    pub fn into_raw(self) -> u64 {
        match self {
            EtwsWarningType::Earthquake => 0,
            EtwsWarningType::Tsunami => 1,
            EtwsWarningType::EarthquakeAndTsunami => 2,
            EtwsWarningType::Test => 3,
            EtwsWarningType::Other => 4,
        }
    }
}

impl From<EtwsWarningType> for u64 {
    fn from(e: EtwsWarningType) -> Self {
        e.into_raw()
    }
}

impl core::fmt::Display for EtwsWarningType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            EtwsWarningType::Earthquake => write!(f, "Earthquake"),
            EtwsWarningType::Tsunami => write!(f, "Tsunami"),
            EtwsWarningType::EarthquakeAndTsunami => write!(f, "EarthquakeAndTsunami"),
            EtwsWarningType::Test => write!(f, "Test"),
            EtwsWarningType::Other => write!(f, "Other"),
        }
    }
}

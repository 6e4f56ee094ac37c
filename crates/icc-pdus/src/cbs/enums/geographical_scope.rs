/// 3GPP TS 23.041 clause 9.4.1.2.1 Serial Number, Geographical Scope
/// Bits: 2
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum GeographicalScope {
    /// Cell wide, immediate display
    CellImmediate = 0,
    PlmnWide = 1,
    LocationAreaWide = 2,
    /// Cell wide, normal display
    CellNormal = 3,
}

impl std::convert::TryFrom<u64> for GeographicalScope {
    type Error = ();
    fn try_from(x: u64) -> Result<Self, Self::Error> {
        match x {
            0 => Ok(GeographicalScope::CellImmediate),
            1 => Ok(GeographicalScope::PlmnWide),
            2 => Ok(GeographicalScope::LocationAreaWide),
            3 => Ok(GeographicalScope::CellNormal),
            _ => Err(()),
        }
    }
}

impl GeographicalScope {
    /// Convert this enum back into the raw integer value
    pub fn into_raw(self) -> u64 {
        match self {
            GeographicalScope::CellImmediate => 0,
            GeographicalScope::PlmnWide => 1,
            GeographicalScope::LocationAreaWide => 2,
            GeographicalScope::CellNormal => 3,
        }
    }
}

impl From<GeographicalScope> for u64 {
    fn from(e: GeographicalScope) -> Self {
        e.into_raw()
    }
}

impl core::fmt::Display for GeographicalScope {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            GeographicalScope::CellImmediate => write!(f, "CellImmediate"),
            GeographicalScope::PlmnWide => write!(f, "PlmnWide"),
            GeographicalScope::LocationAreaWide => write!(f, "LocationAreaWide"),
            GeographicalScope::CellNormal => write!(f, "CellNormal"),
        }
    }
}

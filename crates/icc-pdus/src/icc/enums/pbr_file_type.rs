/// 3GPP TS 31.102 clause 4.4.2.1 constructed tags of EF_PBR
/// Bits: 8
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PbrFileType {
    /// One record per ADN record, same record number
    Type1 = 0xA8,
    /// Record number found in EF_IAP
    Type2 = 0xA9,
    /// Linked through EF_EXT or EF_AAS/EF_GAS
    Type3 = 0xAA,
}

impl std::convert::TryFrom<u64> for PbrFileType {
    type Error = ();
    fn try_from(x: u64) -> Result<Self, Self::Error> {
        match x {
            0xA8 => Ok(PbrFileType::Type1),
            0xA9 => Ok(PbrFileType::Type2),
            0xAA => Ok(PbrFileType::Type3),
            _ => Err(()),
        }
    }
}

impl PbrFileType {
    /// Convert this enum back into the raw integer value
    pub fn into_raw(self) -> u64 {
        match self {
            PbrFileType::Type1 => 0xA8,
            PbrFileType::Type2 => 0xA9,
            PbrFileType::Type3 => 0xAA,
        }
    }
}

impl From<PbrFileType> for u64 {
    fn from(e: PbrFileType) -> Self {
        e.into_raw()
    }
}

impl core::fmt::Display for PbrFileType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PbrFileType::Type1 => write!(f, "Type1"),
            PbrFileType::Type2 => write!(f, "Type2"),
            PbrFileType::Type3 => write!(f, "Type3"),
        }
    }
}

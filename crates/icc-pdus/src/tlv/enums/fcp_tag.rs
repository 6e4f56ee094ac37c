/// ETSI TS 102.221 clause 11.1.1.4 tags inside the FCP template
/// Bits: 8
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum FcpTag {
    /// Data bytes of the EF, big endian
    FileSizeData = 0x80,
    TotalFileSize = 0x81,
    FileDescriptor = 0x82,
    FileIdentifier = 0x83,
    DfName = 0x84,
    ShortFileId = 0x88,
    LifeCycleStatus = 0x8A,
    SecurityAttributesReferenced = 0x8B,
    ProprietaryInformation = 0xA5,
}

impl std::convert::TryFrom<u64> for FcpTag {
    type Error = ();
    fn try_from(x: u64) -> Result<Self, Self::Error> {
        match x {
            0x80 => Ok(FcpTag::FileSizeData),
            0x81 => Ok(FcpTag::TotalFileSize),
            0x82 => Ok(FcpTag::FileDescriptor),
            0x83 => Ok(FcpTag::FileIdentifier),
            0x84 => Ok(FcpTag::DfName),
            0x88 => Ok(FcpTag::ShortFileId),
            0x8A => Ok(FcpTag::LifeCycleStatus),
            0x8B => Ok(FcpTag::SecurityAttributesReferenced),
            0xA5 => Ok(FcpTag::ProprietaryInformation),
            _ => Err(()),
        }
    }
}

impl FcpTag {
    /// Convert this enum back into the raw integer value
    pub fn into_raw(self) -> u64 {
        match self {
            FcpTag::FileSizeData => 0x80,
            FcpTag::TotalFileSize => 0x81,
            FcpTag::FileDescriptor => 0x82,
            FcpTag::FileIdentifier => 0x83,
            FcpTag::DfName => 0x84,
            FcpTag::ShortFileId => 0x88,
            FcpTag::LifeCycleStatus => 0x8A,
            FcpTag::SecurityAttributesReferenced => 0x8B,
            FcpTag::ProprietaryInformation => 0xA5,
        }
    }
}

impl From<FcpTag> for u64 {
    fn from(e: FcpTag) -> Self {
        e.into_raw()
    }
}

impl core::fmt::Display for FcpTag {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FcpTag::FileSizeData => write!(f, "FileSizeData"),
            FcpTag::TotalFileSize => write!(f, "TotalFileSize"),
            FcpTag::FileDescriptor => write!(f, "FileDescriptor"),
            FcpTag::FileIdentifier => write!(f, "FileIdentifier"),
            FcpTag::DfName => write!(f, "DfName"),
            FcpTag::ShortFileId => write!(f, "ShortFileId"),
            FcpTag::LifeCycleStatus => write!(f, "LifeCycleStatus"),
            FcpTag::SecurityAttributesReferenced => write!(f, "SecurityAttributesReferenced"),
            FcpTag::ProprietaryInformation => write!(f, "ProprietaryInformation"),
        }
    }
}

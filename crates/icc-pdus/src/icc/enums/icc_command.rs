/// ETSI TS 102.221 clause 10.1.2 instruction codes used for EF access
/// Bits: 8
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum IccCommand {
    ReadBinary = 0xB0,
    ReadRecord = 0xB2,
    GetResponse = 0xC0,
    UpdateBinary = 0xD6,
    UpdateRecord = 0xDC,
}

/// P2 of READ/UPDATE RECORD: absolute record number in P1
pub const P2_RECORD_ABSOLUTE: u8 = 0x04;
/// P3 of GET RESPONSE
pub const GET_RESPONSE_LENGTH: u8 = 15;

impl std::convert::TryFrom<u64> for IccCommand {
    type Error = ();
    fn try_from(x: u64) -> Result<Self, Self::Error> {
        match x {
            0xB0 => Ok(IccCommand::ReadBinary),
            0xB2 => Ok(IccCommand::ReadRecord),
            0xC0 => Ok(IccCommand::GetResponse),
            0xD6 => Ok(IccCommand::UpdateBinary),
            0xDC => Ok(IccCommand::UpdateRecord),
            _ => Err(()),
        }
    }
}

impl IccCommand {
    /// Convert this enum back into the raw integer value
    pub fn into_raw(self) -> u64 {
        match self {
            IccCommand::ReadBinary => 0xB0,
            IccCommand::ReadRecord => 0xB2,
            IccCommand::GetResponse => 0xC0,
            IccCommand::UpdateBinary => 0xD6,
            IccCommand::UpdateRecord => 0xDC,
        }
    }

    pub fn is_update(self) -> bool {
        matches!(self, IccCommand::UpdateBinary | IccCommand::UpdateRecord)
    }
}

impl From<IccCommand> for u64 {
    fn from(e: IccCommand) -> Self {
        e.into_raw()
    }
}

impl core::fmt::Display for IccCommand {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            IccCommand::ReadBinary => write!(f, "ReadBinary"),
            IccCommand::ReadRecord => write!(f, "ReadRecord"),
            IccCommand::GetResponse => write!(f, "GetResponse"),
            IccCommand::UpdateBinary => write!(f, "UpdateBinary"),
            IccCommand::UpdateRecord => write!(f, "UpdateRecord"),
        }
    }
}

/// 3GPP TS 23.038 clause 4 message class. User1 / User2 only occur in Cell Broadcast coding group 1111.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum MessageClass {
    Class0 = 0,
    Class1 = 1,
    Class2 = 2,
    Class3 = 3,
    User1 = 4,
    User2 = 5,
    Normal = 6,
}

impl std::convert::TryFrom<u64> for MessageClass {
    type Error = ();
    fn try_from(x: u64) -> Result<Self, Self::Error> {
        match x {
            0 => Ok(MessageClass::Class0),
            1 => Ok(MessageClass::Class1),
            2 => Ok(MessageClass::Class2),
            3 => Ok(MessageClass::Class3),
            4 => Ok(MessageClass::User1),
            5 => Ok(MessageClass::User2),
            6 => Ok(MessageClass::Normal),
            _ => Err(()),
        }
    }
}

impl MessageClass {
    /// Convert this enum back into the raw integer value
    pub fn into_raw(self) -> u64 {
        match self {
            MessageClass::Class0 => 0,
            MessageClass::Class1 => 1,
            MessageClass::Class2 => 2,
            MessageClass::Class3 => 3,
            MessageClass::User1 => 4,
            MessageClass::User2 => 5,
            MessageClass::Normal => 6,
        }
    }

    /// Class from the two class bits of a DCS octet
    pub fn from_dcs_bits(dcs: u8) -> Self {
        match dcs & 0x03 {
            0 => MessageClass::Class0,
            1 => MessageClass::Class1,
            2 => MessageClass::Class2,
            _ => MessageClass::Class3,
        }
    }
}

impl From<MessageClass> for u64 {
    fn from(e: MessageClass) -> Self {
        e.into_raw()
    }
}

impl core::fmt::Display for MessageClass {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MessageClass::Class0 => write!(f, "class-0"),
            MessageClass::Class1 => write!(f, "class-1"),
            MessageClass::Class2 => write!(f, "class-2"),
            MessageClass::Class3 => write!(f, "class-3"),
            MessageClass::User1 => write!(f, "user-1"),
            MessageClass::User2 => write!(f, "user-2"),
            MessageClass::Normal => write!(f, "normal"),
        }
    }
}

/// ETSI TS 102.223 clause 8.7 device identities
/// Bits: 8
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum StkDeviceId {
    Keypad = 0x01,
    Display = 0x02,
    Earpiece = 0x03,
    /// UICC
    Sim = 0x81,
    Terminal = 0x82,
    Network = 0x83,
}

impl std::convert::TryFrom<u64> for StkDeviceId {
    type Error = ();
    fn try_from(x: u64) -> Result<Self, Self::Error> {
        match x {
            0x01 => Ok(StkDeviceId::Keypad),
            0x02 => Ok(StkDeviceId::Display),
            0x03 => Ok(StkDeviceId::Earpiece),
            0x81 => Ok(StkDeviceId::Sim),
            0x82 => Ok(StkDeviceId::Terminal),
            0x83 => Ok(StkDeviceId::Network),
            _ => Err(()),
        }
    }
}

impl StkDeviceId {
    /// Convert this enum back into the raw integer value
    pub fn into_raw(self) -> u64 {
        match self {
            StkDeviceId::Keypad => 0x01,
            StkDeviceId::Display => 0x02,
            StkDeviceId::Earpiece => 0x03,
            StkDeviceId::Sim => 0x81,
            StkDeviceId::Terminal => 0x82,
            StkDeviceId::Network => 0x83,
        }
    }
}

impl From<StkDeviceId> for u64 {
    fn from(e: StkDeviceId) -> Self {
        e.into_raw()
    }
}

impl core::fmt::Display for StkDeviceId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            StkDeviceId::Keypad => write!(f, "Keypad"),
            StkDeviceId::Display => write!(f, "Display"),
            StkDeviceId::Earpiece => write!(f, "Earpiece"),
            StkDeviceId::Sim => write!(f, "Sim"),
            StkDeviceId::Terminal => write!(f, "Terminal"),
            StkDeviceId::Network => write!(f, "Network"),
        }
    }
}

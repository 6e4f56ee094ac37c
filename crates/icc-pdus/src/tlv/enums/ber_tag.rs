/// ETSI TS 101.220 clause 7.2 BER-TLV tags handled by the stack
/// Bits: 8
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum BerTag {
    /// ETSI TS 102.221 clause 11.1.1.3, response to SELECT / GET RESPONSE
    FcpTemplate = 0x62,
    ProactiveCommand = 0xD0,
    SmsPpDownload = 0xD1,
    CellBroadcastDownload = 0xD2,
    MenuSelection = 0xD3,
    CallControl = 0xD4,
    EventDownload = 0xD6,
    TimerExpiration = 0xD7,
}

impl std::convert::TryFrom<u64> for BerTag {
    type Error = ();
    fn try_from(x: u64) -> Result<Self, Self::Error> {
        match x {
            0x62 => Ok(BerTag::FcpTemplate),
            0xD0 => Ok(BerTag::ProactiveCommand),
            0xD1 => Ok(BerTag::SmsPpDownload),
            0xD2 => Ok(BerTag::CellBroadcastDownload),
            0xD3 => Ok(BerTag::MenuSelection),
            0xD4 => Ok(BerTag::CallControl),
            0xD6 => Ok(BerTag::EventDownload),
            0xD7 => Ok(BerTag::TimerExpiration),
            _ => Err(()),
        }
    }
}

impl BerTag {
    /// Convert this enum back into the raw integer value
    pub fn into_raw(self) -> u64 {
        match self {
            BerTag::FcpTemplate => 0x62,
            BerTag::ProactiveCommand => 0xD0,
            BerTag::SmsPpDownload => 0xD1,
            BerTag::CellBroadcastDownload => 0xD2,
            BerTag::MenuSelection => 0xD3,
            BerTag::CallControl => 0xD4,
            BerTag::EventDownload => 0xD6,
            BerTag::TimerExpiration => 0xD7,
        }
    }
}

impl From<BerTag> for u64 {
    fn from(e: BerTag) -> Self {
        e.into_raw()
    }
}

impl core::fmt::Display for BerTag {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BerTag::FcpTemplate => write!(f, "FcpTemplate"),
            BerTag::ProactiveCommand => write!(f, "ProactiveCommand"),
            BerTag::SmsPpDownload => write!(f, "SmsPpDownload"),
            BerTag::CellBroadcastDownload => write!(f, "CellBroadcastDownload"),
            BerTag::MenuSelection => write!(f, "MenuSelection"),
            BerTag::CallControl => write!(f, "CallControl"),
            BerTag::EventDownload => write!(f, "EventDownload"),
            BerTag::TimerExpiration => write!(f, "TimerExpiration"),
        }
    }
}

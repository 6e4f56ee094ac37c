/// ETSI TS 102.223 clause 9.4 type of command
/// Bits: 8
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum StkCommandType {
    Refresh = 0x01,
    MoreTime = 0x02,
    PollInterval = 0x03,
    PollingOff = 0x04,
    SetUpEventList = 0x05,
    SetUpCall = 0x10,
    SendSs = 0x11,
    SendUssd = 0x12,
    SendSms = 0x13,
    SendDtmf = 0x14,
    LaunchBrowser = 0x15,
    PlayTone = 0x20,
    DisplayText = 0x21,
    GetInkey = 0x22,
    GetInput = 0x23,
    SelectItem = 0x24,
    SetUpMenu = 0x25,
    ProvideLocalInfo = 0x26,
    TimerManagement = 0x27,
    SetUpIdleModeText = 0x28,
    OpenChannel = 0x40,
    CloseChannel = 0x41,
    ReceiveData = 0x42,
    SendData = 0x43,
}

impl std::convert::TryFrom<u64> for StkCommandType {
    type Error = ();
    fn try_from(x: u64) -> Result<Self, Self::Error> {
        match x {
            0x01 => Ok(StkCommandType::Refresh),
            0x02 => Ok(StkCommandType::MoreTime),
            0x03 => Ok(StkCommandType::PollInterval),
            0x04 => Ok(StkCommandType::PollingOff),
            0x05 => Ok(StkCommandType::SetUpEventList),
            0x10 => Ok(StkCommandType::SetUpCall),
            0x11 => Ok(StkCommandType::SendSs),
            0x12 => Ok(StkCommandType::SendUssd),
            0x13 => Ok(StkCommandType::SendSms),
            0x14 => Ok(StkCommandType::SendDtmf),
            0x15 => Ok(StkCommandType::LaunchBrowser),
            0x20 => Ok(StkCommandType::PlayTone),
            0x21 => Ok(StkCommandType::DisplayText),
            0x22 => Ok(StkCommandType::GetInkey),
            0x23 => Ok(StkCommandType::GetInput),
            0x24 => Ok(StkCommandType::SelectItem),
            0x25 => Ok(StkCommandType::SetUpMenu),
            0x26 => Ok(StkCommandType::ProvideLocalInfo),
            0x27 => Ok(StkCommandType::TimerManagement),
            0x28 => Ok(StkCommandType::SetUpIdleModeText),
            0x40 => Ok(StkCommandType::OpenChannel),
            0x41 => Ok(StkCommandType::CloseChannel),
            0x42 => Ok(StkCommandType::ReceiveData),
            0x43 => Ok(StkCommandType::SendData),
            _ => Err(()),
        }
    }
}

impl StkCommandType {
    /// Convert this enum back into the raw integer value
    pub fn into_raw(self) -> u64 {
        match self {
            StkCommandType::Refresh => 0x01,
            StkCommandType::MoreTime => 0x02,
            StkCommandType::PollInterval => 0x03,
            StkCommandType::PollingOff => 0x04,
            StkCommandType::SetUpEventList => 0x05,
            StkCommandType::SetUpCall => 0x10,
            StkCommandType::SendSs => 0x11,
            StkCommandType::SendUssd => 0x12,
            StkCommandType::SendSms => 0x13,
            StkCommandType::SendDtmf => 0x14,
            StkCommandType::LaunchBrowser => 0x15,
            StkCommandType::PlayTone => 0x20,
            StkCommandType::DisplayText => 0x21,
            StkCommandType::GetInkey => 0x22,
            StkCommandType::GetInput => 0x23,
            StkCommandType::SelectItem => 0x24,
            StkCommandType::SetUpMenu => 0x25,
            StkCommandType::ProvideLocalInfo => 0x26,
            StkCommandType::TimerManagement => 0x27,
            StkCommandType::SetUpIdleModeText => 0x28,
            StkCommandType::OpenChannel => 0x40,
            StkCommandType::CloseChannel => 0x41,
            StkCommandType::ReceiveData => 0x42,
            StkCommandType::SendData => 0x43,
        }
    }
}

impl From<StkCommandType> for u64 {
    fn from(e: StkCommandType) -> Self {
        e.into_raw()
    }
}

impl core::fmt::Display for StkCommandType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            StkCommandType::Refresh => write!(f, "Refresh"),
            StkCommandType::MoreTime => write!(f, "MoreTime"),
            StkCommandType::PollInterval => write!(f, "PollInterval"),
            StkCommandType::PollingOff => write!(f, "PollingOff"),
            StkCommandType::SetUpEventList => write!(f, "SetUpEventList"),
            StkCommandType::SetUpCall => write!(f, "SetUpCall"),
            StkCommandType::SendSs => write!(f, "SendSs"),
            StkCommandType::SendUssd => write!(f, "SendUssd"),
            StkCommandType::SendSms => write!(f, "SendSms"),
            StkCommandType::SendDtmf => write!(f, "SendDtmf"),
            StkCommandType::LaunchBrowser => write!(f, "LaunchBrowser"),
            StkCommandType::PlayTone => write!(f, "PlayTone"),
            StkCommandType::DisplayText => write!(f, "DisplayText"),
            StkCommandType::GetInkey => write!(f, "GetInkey"),
            StkCommandType::GetInput => write!(f, "GetInput"),
            StkCommandType::SelectItem => write!(f, "SelectItem"),
            StkCommandType::SetUpMenu => write!(f, "SetUpMenu"),
            StkCommandType::ProvideLocalInfo => write!(f, "ProvideLocalInfo"),
            StkCommandType::TimerManagement => write!(f, "TimerManagement"),
            StkCommandType::SetUpIdleModeText => write!(f, "SetUpIdleModeText"),
            StkCommandType::OpenChannel => write!(f, "OpenChannel"),
            StkCommandType::CloseChannel => write!(f, "CloseChannel"),
            StkCommandType::ReceiveData => write!(f, "ReceiveData"),
            StkCommandType::SendData => write!(f, "SendData"),
        }
    }
}

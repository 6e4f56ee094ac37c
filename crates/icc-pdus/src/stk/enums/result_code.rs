/// ETSI TS 102.223 clause 8.12 general result
/// Bits: 8
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum StkResultCode {
    /// Command performed successfully
    Ok = 0x00,
    PartialOk = 0x01,
    OkMissingInfo = 0x02,
    RefreshAdditionalEfRead = 0x03,
    OkIconNotDisplayed = 0x04,
    OkModified = 0x05,
    OkLimitedService = 0x06,
    OkWithModification = 0x07,
    RefreshNaaNotActive = 0x08,
    /// Proactive UICC session terminated by the user
    UiccSessionEndedByUser = 0x10,
    BackwardMove = 0x11,
    NoResponseFromUser = 0x12,
    HelpInfoRequired = 0x13,
    UssdTransactionTerminatedByUser = 0x14,
    TerminalCrntlyUnableToProcess = 0x20,
    NetworkCrntlyUnableToProcess = 0x21,
    UserNotAcceptProactiveCommand = 0x22,
    UserClearDownCall = 0x23,
    ActionContradictionTimerState = 0x24,
    BeyondTerminalCapability = 0x30,
    CommandTypeNotUnderstood = 0x31,
    CommandDataNotUnderstood = 0x32,
    CommandNumberNotKnown = 0x33,
    SsReturnError = 0x34,
    SmsRpError = 0x35,
    /// Error, required values are missing
    RequiredValuesMissing = 0x36,
    UssdReturnError = 0x37,
    MultipleCardCommandsError = 0x38,
    UsimCallControlPermanent = 0x39,
    BipError = 0x3A,
}

impl std::convert::TryFrom<u64> for StkResultCode {
    type Error = ();
    fn try_from(x: u64) -> Result<Self, Self::Error> {
        match x {
            0x00 => Ok(StkResultCode::Ok),
            0x01 => Ok(StkResultCode::PartialOk),
            0x02 => Ok(StkResultCode::OkMissingInfo),
            0x03 => Ok(StkResultCode::RefreshAdditionalEfRead),
            0x04 => Ok(StkResultCode::OkIconNotDisplayed),
            0x05 => Ok(StkResultCode::OkModified),
            0x06 => Ok(StkResultCode::OkLimitedService),
            0x07 => Ok(StkResultCode::OkWithModification),
            0x08 => Ok(StkResultCode::RefreshNaaNotActive),
            0x10 => Ok(StkResultCode::UiccSessionEndedByUser),
            0x11 => Ok(StkResultCode::BackwardMove),
            0x12 => Ok(StkResultCode::NoResponseFromUser),
            0x13 => Ok(StkResultCode::HelpInfoRequired),
            0x14 => Ok(StkResultCode::UssdTransactionTerminatedByUser),
            0x20 => Ok(StkResultCode::TerminalCrntlyUnableToProcess),
            0x21 => Ok(StkResultCode::NetworkCrntlyUnableToProcess),
            0x22 => Ok(StkResultCode::UserNotAcceptProactiveCommand),
            0x23 => Ok(StkResultCode::UserClearDownCall),
            0x24 => Ok(StkResultCode::ActionContradictionTimerState),
            0x30 => Ok(StkResultCode::BeyondTerminalCapability),
            0x31 => Ok(StkResultCode::CommandTypeNotUnderstood),
            0x32 => Ok(StkResultCode::CommandDataNotUnderstood),
            0x33 => Ok(StkResultCode::CommandNumberNotKnown),
            0x34 => Ok(StkResultCode::SsReturnError),
            0x35 => Ok(StkResultCode::SmsRpError),
            0x36 => Ok(StkResultCode::RequiredValuesMissing),
            0x37 => Ok(StkResultCode::UssdReturnError),
            0x38 => Ok(StkResultCode::MultipleCardCommandsError),
            0x39 => Ok(StkResultCode::UsimCallControlPermanent),
            0x3A => Ok(StkResultCode::BipError),
            _ => Err(()),
        }
    }
}

impl StkResultCode {
    /// Convert this enum back into the raw integer value
    pub fn into_raw(self) -> u64 {
        match self {
            StkResultCode::Ok => 0x00,
            StkResultCode::PartialOk => 0x01,
            StkResultCode::OkMissingInfo => 0x02,
            StkResultCode::RefreshAdditionalEfRead => 0x03,
            StkResultCode::OkIconNotDisplayed => 0x04,
            StkResultCode::OkModified => 0x05,
            StkResultCode::OkLimitedService => 0x06,
            StkResultCode::OkWithModification => 0x07,
            StkResultCode::RefreshNaaNotActive => 0x08,
            StkResultCode::UiccSessionEndedByUser => 0x10,
            StkResultCode::BackwardMove => 0x11,
            StkResultCode::NoResponseFromUser => 0x12,
            StkResultCode::HelpInfoRequired => 0x13,
            StkResultCode::UssdTransactionTerminatedByUser => 0x14,
            StkResultCode::TerminalCrntlyUnableToProcess => 0x20,
            StkResultCode::NetworkCrntlyUnableToProcess => 0x21,
            StkResultCode::UserNotAcceptProactiveCommand => 0x22,
            StkResultCode::UserClearDownCall => 0x23,
            StkResultCode::ActionContradictionTimerState => 0x24,
            StkResultCode::BeyondTerminalCapability => 0x30,
            StkResultCode::CommandTypeNotUnderstood => 0x31,
            StkResultCode::CommandDataNotUnderstood => 0x32,
            StkResultCode::CommandNumberNotKnown => 0x33,
            StkResultCode::SsReturnError => 0x34,
            StkResultCode::SmsRpError => 0x35,
            StkResultCode::RequiredValuesMissing => 0x36,
            StkResultCode::UssdReturnError => 0x37,
            StkResultCode::MultipleCardCommandsError => 0x38,
            StkResultCode::UsimCallControlPermanent => 0x39,
            StkResultCode::BipError => 0x3A,
        }
    }
}

impl From<StkResultCode> for u64 {
    fn from(e: StkResultCode) -> Self {
        e.into_raw()
    }
}

impl core::fmt::Display for StkResultCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            StkResultCode::Ok => write!(f, "Ok"),
            StkResultCode::PartialOk => write!(f, "PartialOk"),
            StkResultCode::OkMissingInfo => write!(f, "OkMissingInfo"),
            StkResultCode::RefreshAdditionalEfRead => write!(f, "RefreshAdditionalEfRead"),
            StkResultCode::OkIconNotDisplayed => write!(f, "OkIconNotDisplayed"),
            StkResultCode::OkModified => write!(f, "OkModified"),
            StkResultCode::OkLimitedService => write!(f, "OkLimitedService"),
            StkResultCode::OkWithModification => write!(f, "OkWithModification"),
            StkResultCode::RefreshNaaNotActive => write!(f, "RefreshNaaNotActive"),
            StkResultCode::UiccSessionEndedByUser => write!(f, "UiccSessionEndedByUser"),
            StkResultCode::BackwardMove => write!(f, "BackwardMove"),
            StkResultCode::NoResponseFromUser => write!(f, "NoResponseFromUser"),
            StkResultCode::HelpInfoRequired => write!(f, "HelpInfoRequired"),
            StkResultCode::UssdTransactionTerminatedByUser => write!(f, "UssdTransactionTerminatedByUser"),
            StkResultCode::TerminalCrntlyUnableToProcess => write!(f, "TerminalCrntlyUnableToProcess"),
            StkResultCode::NetworkCrntlyUnableToProcess => write!(f, "NetworkCrntlyUnableToProcess"),
            StkResultCode::UserNotAcceptProactiveCommand => write!(f, "UserNotAcceptProactiveCommand"),
            StkResultCode::UserClearDownCall => write!(f, "UserClearDownCall"),
            StkResultCode::ActionContradictionTimerState => write!(f, "ActionContradictionTimerState"),
            StkResultCode::BeyondTerminalCapability => write!(f, "BeyondTerminalCapability"),
            StkResultCode::CommandTypeNotUnderstood => write!(f, "CommandTypeNotUnderstood"),
            StkResultCode::CommandDataNotUnderstood => write!(f, "CommandDataNotUnderstood"),
            StkResultCode::CommandNumberNotKnown => write!(f, "CommandNumberNotKnown"),
            StkResultCode::SsReturnError => write!(f, "SsReturnError"),
            StkResultCode::SmsRpError => write!(f, "SmsRpError"),
            StkResultCode::RequiredValuesMissing => write!(f, "RequiredValuesMissing"),
            StkResultCode::UssdReturnError => write!(f, "UssdReturnError"),
            StkResultCode::MultipleCardCommandsError => write!(f, "MultipleCardCommandsError"),
            StkResultCode::UsimCallControlPermanent => write!(f, "UsimCallControlPermanent"),
            StkResultCode::BipError => write!(f, "BipError"),
        }
    }
}

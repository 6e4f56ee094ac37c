/// 3GPP TS 23.040 clause 9.2.3.1 TP-Message-Type-Indicator, mobile terminated direction
/// Bits: 2
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum MessageTypeIndicator {
    Deliver = 0,
    Submit = 1,
    StatusReport = 2,
    /// Processed as SMS-DELIVER
    Reserved = 3,
}

impl std::convert::TryFrom<u64> for MessageTypeIndicator {
    type Error = ();
    fn try_from(x: u64) -> Result<Self, Self::Error> {
        match x {
            0 => Ok(MessageTypeIndicator::Deliver),
            1 => Ok(MessageTypeIndicator::Submit),
            2 => Ok(MessageTypeIndicator::StatusReport),
            3 => Ok(MessageTypeIndicator::Reserved),
            _ => Err(()),
        }
    }
}

impl MessageTypeIndicator {
    /// Convert this enum back into the raw integer value
    pub fn into_raw(self) -> u64 {
        match self {
            MessageTypeIndicator::Deliver => 0,
            MessageTypeIndicator::Submit => 1,
            MessageTypeIndicator::StatusReport => 2,
            MessageTypeIndicator::Reserved => 3,
        }
    }
}

impl From<MessageTypeIndicator> for u64 {
    fn from(e: MessageTypeIndicator) -> Self {
        e.into_raw()
    }
}

impl core::fmt::Display for MessageTypeIndicator {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MessageTypeIndicator::Deliver => write!(f, "Deliver"),
            MessageTypeIndicator::Submit => write!(f, "Submit"),
            MessageTypeIndicator::StatusReport => write!(f, "StatusReport"),
            MessageTypeIndicator::Reserved => write!(f, "Reserved"),
        }
    }
}

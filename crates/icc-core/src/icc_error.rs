use core::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IccErr {
    /// Read past the write index of a codec cursor
    OutOfBounds { field: Option<&'static str> },
    InvalidDigit { digit: u8 },
    InvalidHex,
    InvalidValue { field: &'static str, value: u64 },
    InconsistentLength { expected: usize, found: usize },
    MalformedPdu { field: &'static str, reason: &'static str },
    MalformedTlv { reason: &'static str },
    UnencodableChar { ch: char },
    UnknownFile { file_id: u16 },
    CannotAccessPhonebook,
    ContactTypeNotSupported,
    RequestNotSupported,
    Pin2Required,
    InvalidArguments { reason: &'static str },
    NoFreeRecord { file_id: u16 },
    /// STK proactive command lacks a mandatory COMPREHENSION-TLV
    RequiredValueMissing { command: u8 },
    CommandDataNotUnderstood,
    /// The ICC IO collaborator reported a failure for this file
    ChannelError { file_id: u16, sw1: u8, sw2: u8 },
    /// Another operation for the same (file, record) is still in flight
    OperationPending { file_id: u16, record: u8 },
    NotImplemented { field: Option<&'static str> },
}

impl fmt::Display for IccErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IccErr::OutOfBounds { field: Some(field) } => write!(f, "buffer ended while reading {}", field),
            IccErr::OutOfBounds { field: None } => write!(f, "buffer ended"),
            IccErr::InvalidDigit { digit } => write!(f, "invalid BCD digit 0x{:x}", digit),
            IccErr::InvalidHex => write!(f, "invalid hex string"),
            IccErr::InvalidValue { field, value } => write!(f, "invalid value {} for {}", value, field),
            IccErr::InconsistentLength { expected, found } => {
                write!(f, "inconsistent length: expected {}, found {}", expected, found)
            }
            IccErr::MalformedPdu { field, reason } => write!(f, "malformed PDU at {}: {}", field, reason),
            IccErr::MalformedTlv { reason } => write!(f, "malformed TLV: {}", reason),
            IccErr::UnencodableChar { ch } => write!(f, "'{}' is not in the 7 bit alphabet", ch),
            IccErr::UnknownFile { file_id } => write!(f, "unknown EF 0x{:04X}", file_id),
            IccErr::CannotAccessPhonebook => write!(f, "cannot access phonebook"),
            IccErr::ContactTypeNotSupported => write!(f, "contact type not supported"),
            IccErr::RequestNotSupported => write!(f, "request not supported"),
            IccErr::Pin2Required => write!(f, "SIM PIN2 required"),
            IccErr::InvalidArguments { reason } => write!(f, "invalid arguments: {}", reason),
            IccErr::NoFreeRecord { file_id } => write!(f, "no free record in EF 0x{:04X}", file_id),
            IccErr::RequiredValueMissing { command } => {
                write!(f, "required value missing for STK command 0x{:02X}", command)
            }
            IccErr::CommandDataNotUnderstood => write!(f, "command data not understood"),
            IccErr::ChannelError { file_id, sw1, sw2 } => {
                write!(f, "ICC IO error on EF 0x{:04X}: sw {:02X}{:02X}", file_id, sw1, sw2)
            }
            IccErr::OperationPending { file_id, record } => {
                write!(f, "operation already pending for EF 0x{:04X} record {}", file_id, record)
            }
            IccErr::NotImplemented { field: Some(field) } => write!(f, "not implemented: {}", field),
            IccErr::NotImplemented { field: None } => write!(f, "not implemented"),
        }
    }
}

impl std::error::Error for IccErr {}

/// Checks whether a value matches an expected value. If not, returns IccErr::InvalidValue
#[macro_export]
macro_rules! expect_value {
    ($value:ident, $expected:expr) => {
        $crate::expect_value!(@inner $value, $expected, stringify!($value))
    };
    ($value:expr, $expected:expr, $field:expr) => {
        $crate::expect_value!(@inner $value, $expected, $field)
    };

    (@inner $value:expr, $expected:expr, $field:expr) => {{
        let val = $value;
        if val == $expected {
            Ok(())
        } else {
            Err($crate::IccErr::InvalidValue {
                field: $field,
                value: val.into(),
            })
        }
    }};
}

/// Use when an assertion has already failed. Generates an IccErr::InvalidValue
#[macro_export]
macro_rules! expect_failed {
    ($value:ident) => {
        $crate::expect_failed!(@inner $value, stringify!($value))
    };
    ($value:expr, $field:expr) => {
        $crate::expect_failed!(@inner $value, $field)
    };

    (@inner $value:expr, $field:expr) => {{
        Err($crate::IccErr::InvalidValue {
            field: $field,
            value: $value as u64,
        })
    }};
}

/// Reads one octet into a binding of the same name, propagating OutOfBounds with the field name
#[macro_export]
macro_rules! let_field {
    ($buf:expr, $ident:ident) => {
        let $ident = $buf.read_field(stringify!($ident))?;
    };
}

use core::fmt;

use icc_core::{IccErr, OctetBuffer};

use crate::stk::enums::command_type::StkCommandType;

/// Command details, ETSI TS 102.223 clause 8.6
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandDetails {
    pub command_number: u8,
    /// Raw type of command, see StkCommandType
    pub type_of_command: u8,
    pub qualifier: u8,
}

impl CommandDetails {
    pub fn from_octetbuf(buf: &mut OctetBuffer) -> Result<Self, IccErr> {
        Ok(CommandDetails {
            command_number: buf.read_field("command_number")?,
            type_of_command: buf.read_field("type_of_command")?,
            qualifier: buf.read_field("command_qualifier")?,
        })
    }

    pub fn to_octetbuf(&self, buf: &mut OctetBuffer) {
        buf.write_octet(self.command_number);
        buf.write_octet(self.type_of_command);
        buf.write_octet(self.qualifier);
    }

    pub fn command_type(&self) -> Option<StkCommandType> {
        StkCommandType::try_from(self.type_of_command as u64).ok()
    }
}

impl fmt::Display for CommandDetails {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "CommandDetails {{ command_number: {} type_of_command: 0x{:02x} qualifier: 0x{:02x} }}",
            self.command_number, self.type_of_command, self.qualifier
        )
    }
}

/// Device identities, ETSI TS 102.223 clause 8.7
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceIdentities {
    pub source: u8,
    pub destination: u8,
}

impl DeviceIdentities {
    pub fn from_octetbuf(buf: &mut OctetBuffer) -> Result<Self, IccErr> {
        Ok(DeviceIdentities { source: buf.read_field("source_device")?, destination: buf.read_field("destination_device")? })
    }
}

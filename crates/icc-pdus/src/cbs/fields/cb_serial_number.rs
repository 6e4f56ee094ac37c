use core::fmt;

use icc_core::{IccErr, OctetBuffer};

use crate::cbs::enums::geographical_scope::GeographicalScope;

/// 3GPP TS 23.041 clause 9.4.1.2.1 Serial Number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CbSerialNumber {
    pub raw: u16,
}

impl CbSerialNumber {
    pub fn from_octetbuf(buf: &mut OctetBuffer) -> Result<Self, IccErr> {
        Ok(CbSerialNumber { raw: buf.read_u16("serial_number")? })
    }

    /// 2 bits
    pub fn geographical_scope(&self) -> GeographicalScope {
        match self.raw >> 14 {
            0 => GeographicalScope::CellImmediate,
            1 => GeographicalScope::PlmnWide,
            2 => GeographicalScope::LocationAreaWide,
            _ => GeographicalScope::CellNormal,
        }
    }

    /// 10 bits
    pub fn message_code(&self) -> u16 {
        (self.raw >> 4) & 0x03FF
    }

    /// 4 bits
    pub fn update_number(&self) -> u8 {
        (self.raw & 0x0F) as u8
    }
}

impl fmt::Display for CbSerialNumber {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "CbSerialNumber {{ geographical_scope: {} message_code: {} update_number: {} }}",
            self.geographical_scope(),
            self.message_code(),
            self.update_number()
        )
    }
}

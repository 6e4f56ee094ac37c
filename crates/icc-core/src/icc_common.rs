use serde::Deserialize;

// SAPs between the entities of the ICC stack
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Sap {
    /// IccIo/Ril, raw SIM IO commands
    SimIoSap,
    /// User/IccIo, logical EF read and update
    EfSap,
    /// Ril/Stk/User, proactive commands and terminal responses
    StkSap,
    /// Ril/Cbs/User
    CbsSap,
    /// Ril/Sms/User
    SmsSap,

    /// Custom SAP for inter-entity control messages
    Control,
}

/// Card application selecting EF paths and phonebook capabilities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum CardAppType {
    Sim,
    Usim,
    Ruim,
    Isim,
}

impl core::fmt::Display for CardAppType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CardAppType::Sim => write!(f, "SIM"),
            CardAppType::Usim => write!(f, "USIM"),
            CardAppType::Ruim => write!(f, "RUIM"),
            CardAppType::Isim => write!(f, "ISIM"),
        }
    }
}

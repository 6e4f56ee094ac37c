// SIM-IO SAP, between the ICC IO entity and the radio interface layer
use icc_core::{FileId, IoKey};
use icc_pdus::icc::enums::icc_command::IccCommand;

/// One APDU toward the card. ETSI TS 102.221 clause 10.1
#[derive(Debug, Clone)]
pub struct SimIoReq {
    /// Echoed in the matching SimIoRsp
    pub key: IoKey,
    pub command: IccCommand,
    pub file_id: FileId,
    /// Hex path of the parent DF, e.g. "3F007F10"
    pub path: String,
    pub p1: u8,
    pub p2: u8,
    pub p3: u8,
    pub data: Option<Vec<u8>>,
    pub pin2: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SimIoRsp {
    pub key: IoKey,
    pub sw1: u8,
    pub sw2: u8,
    pub data: Vec<u8>,
    /// Set by the radio interface layer when the transaction failed
    pub error: bool,
}

impl SimIoRsp {
    pub fn ok(key: IoKey, data: Vec<u8>) -> Self {
        Self { key, sw1: 0x90, sw2: 0x00, data, error: false }
    }

    pub fn failed(key: IoKey, sw1: u8, sw2: u8) -> Self {
        Self { key, sw1, sw2, data: Vec::new(), error: true }
    }
}

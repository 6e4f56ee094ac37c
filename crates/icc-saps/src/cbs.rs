// CBS SAP
use icc_pdus::cbs::pdus::cb_message::CbMessage;

/// One received cell broadcast page, as delivered by the modem
#[derive(Debug, Clone)]
pub struct CbsPageInd {
    pub pdu: Vec<u8>,
}

/// A complete message, all pages joined
#[derive(Debug, Clone)]
pub struct CbsMessageInd {
    pub message: CbMessage,
}

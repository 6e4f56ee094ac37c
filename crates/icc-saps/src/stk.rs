// STK SAP, proactive commands from the card and terminal responses toward it
use icc_pdus::stk::pdus::stk_command::StkCommand;
use icc_pdus::stk::pdus::terminal_response::TerminalResponse;

/// Raw proactive command, BER-TLV tag 0xD0
#[derive(Debug, Clone)]
pub struct StkProactiveCmdInd {
    pub pdu: Vec<u8>,
}

/// Typed command for the user layer
#[derive(Debug, Clone)]
pub struct StkCommandInd {
    pub command: StkCommand,
}

/// The user answers a command
#[derive(Debug, Clone)]
pub struct StkTerminalRspReq {
    pub response: TerminalResponse,
}

/// Encoded terminal response for the card
#[derive(Debug, Clone)]
pub struct StkTerminalRsp {
    pub response: TerminalResponse,
    pub pdu: Vec<u8>,
}

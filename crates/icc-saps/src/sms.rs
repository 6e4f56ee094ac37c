// SMS SAP
use icc_pdus::sms::pdus::sms_message::SmsMessage;

/// Incoming SMS: SMSC address followed by the TPDU
#[derive(Debug, Clone)]
pub struct SmsPduInd {
    pub pdu: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct SmsDeliverInd {
    pub message: SmsMessage,
}

#[derive(Debug, Clone)]
pub struct SmsStatusReportInd {
    pub message: SmsMessage,
}

/// Text to send. Long texts are segmented.
#[derive(Debug, Clone)]
pub struct SmsSubmitReq {
    pub handle: u32,
    pub number: String,
    pub text: String,
}

/// One encoded SMS-SUBMIT TPDU for the radio interface layer
#[derive(Debug, Clone)]
pub struct SmsSendReq {
    pub handle: u32,
    /// 1-based
    pub segment_seq: u8,
    pub segment_count: u8,
    pub tpdu: Vec<u8>,
}

/// Outcome of an SmsSubmitReq, number of segments handed to the radio interface layer
#[derive(Debug, Clone)]
pub struct SmsSubmitConf {
    pub handle: u32,
    pub result: Result<u8, icc_core::IccErr>,
}

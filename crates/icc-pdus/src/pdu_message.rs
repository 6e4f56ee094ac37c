use core::fmt;

use icc_core::IccErr;

use crate::cbs::pdus::cb_message::CbMessage;
use crate::sms::pdus::sms_message::SmsMessage;

/// Any PDU the codec decodes from the network or the card
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PduMessage {
    Sms(SmsMessage),
    CellBroadcast(CbMessage),
}

impl PduMessage {
    /// Decode an SMS with leading SMSC address. Truncated input is reported as malformed.
    pub fn decode_sms(pdu: &[u8]) -> Result<Self, IccErr> {
        SmsMessage::from_bytes(pdu).map(PduMessage::Sms).map_err(|e| as_malformed(e, "sms"))
    }

    /// Decode a GSM, ETWS primary notification or UMTS cell broadcast PDU
    pub fn decode_cell_broadcast(pdu: &[u8]) -> Result<Self, IccErr> {
        CbMessage::from_bytes(pdu).map(PduMessage::CellBroadcast).map_err(|e| as_malformed(e, "cell_broadcast"))
    }
}

fn as_malformed(err: IccErr, field: &'static str) -> IccErr {
    match err {
        IccErr::OutOfBounds { field: f } => {
            tracing::debug!("{} truncated at {:?}", field, f);
            IccErr::MalformedPdu { field, reason: "truncated" }
        }
        other => other,
    }
}

impl fmt::Display for PduMessage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PduMessage::Sms(m) => m.fmt(f),
            PduMessage::CellBroadcast(m) => m.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use icc_core::octet_buffer::hex_to_bytes;

    #[test]
    fn test_truncated_sms() {
        let pdu = hex_to_bytes("07917283010010F5040BC872").unwrap();
        assert_eq!(PduMessage::decode_sms(&pdu), Err(IccErr::MalformedPdu { field: "sms", reason: "truncated" }));
    }

    #[test]
    fn test_short_cell_broadcast() {
        assert!(PduMessage::decode_cell_broadcast(&[0x00, 0x01, 0x02]).is_err());
    }
}

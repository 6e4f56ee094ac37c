use core::fmt;

use icc_core::{IccErr, OctetBuffer};

use crate::sms::enums::message_type_indicator::MessageTypeIndicator;
use crate::sms::fields::sms_address::SmsAddress;
use crate::sms::pdus::sms_deliver::SmsDeliver;
use crate::sms::pdus::sms_status_report::SmsStatusReport;
use crate::sms::pdus::sms_submit::SmsSubmit;

/// Any of the TPDUs an ICC stores or the network delivers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SmsTpdu {
    Deliver(SmsDeliver),
    Submit(SmsSubmit),
    StatusReport(SmsStatusReport),
}

impl SmsTpdu {
    /// Parse a TPDU, dispatching on TP-MTI of the first octet
    pub fn from_octetbuf(buffer: &mut OctetBuffer) -> Result<Self, IccErr> {
        let first_octet = buffer.read_field("first_octet")?;
        let mti = MessageTypeIndicator::try_from((first_octet & 0x03) as u64)
            .map_err(|_| IccErr::InvalidValue { field: "mti", value: first_octet as u64 })?;
        tracing::trace!("tpdu mti {}", mti);

        match mti {
            MessageTypeIndicator::Deliver | MessageTypeIndicator::Reserved => {
                Ok(SmsTpdu::Deliver(SmsDeliver::from_octetbuf(buffer, first_octet)?))
            }
            MessageTypeIndicator::Submit => Ok(SmsTpdu::Submit(SmsSubmit::from_octetbuf(buffer, first_octet)?)),
            MessageTypeIndicator::StatusReport => {
                Ok(SmsTpdu::StatusReport(SmsStatusReport::from_octetbuf(buffer, first_octet)?))
            }
        }
    }

    pub fn to_octetbuf(&self, buffer: &mut OctetBuffer) -> Result<(), IccErr> {
        match self {
            SmsTpdu::Deliver(d) => d.to_octetbuf(buffer),
            SmsTpdu::Submit(s) => s.to_octetbuf(buffer),
            SmsTpdu::StatusReport(_) => {
                icc_core::unimplemented_log!("SMS-STATUS-REPORT encoding");
                Err(IccErr::NotImplemented { field: Some("status report encoding") })
            }
        }
    }

    /// Message body for text messages
    pub fn body(&self) -> Option<&str> {
        match self {
            SmsTpdu::Deliver(d) => d.user_data.body.as_deref(),
            SmsTpdu::Submit(s) => s.user_data.body.as_deref(),
            SmsTpdu::StatusReport(r) => r.user_data.as_ref().and_then(|u| u.body.as_deref()),
        }
    }
}

impl fmt::Display for SmsTpdu {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SmsTpdu::Deliver(d) => d.fmt(f),
            SmsTpdu::Submit(s) => s.fmt(f),
            SmsTpdu::StatusReport(r) => r.fmt(f),
        }
    }
}

/// A complete SMS as stored in EF_SMS or received from the network: SMSC address, then TPDU
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmsMessage {
    pub smsc: Option<SmsAddress>,
    pub tpdu: SmsTpdu,
}

impl SmsMessage {
    pub fn from_octetbuf(buffer: &mut OctetBuffer) -> Result<Self, IccErr> {
        let smsc = SmsAddress::from_octetbuf_smsc(buffer)?;
        let tpdu = SmsTpdu::from_octetbuf(buffer)?;
        if buffer.get_len_remaining() > 0 {
            tracing::debug!("{} trailing octets after tpdu", buffer.get_len_remaining());
        }
        Ok(SmsMessage { smsc, tpdu })
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, IccErr> {
        Self::from_octetbuf(&mut OctetBuffer::from_bytes(bytes))
    }

    pub fn from_hex(hex: &str) -> Result<Self, IccErr> {
        Self::from_octetbuf(&mut OctetBuffer::from_hex(hex)?)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, IccErr> {
        let mut buf = OctetBuffer::new();
        SmsAddress::to_octetbuf_smsc(self.smsc.as_ref(), &mut buf)?;
        self.tpdu.to_octetbuf(&mut buf)?;
        Ok(buf.into_bytes())
    }
}

impl fmt::Display for SmsMessage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.smsc {
            Some(smsc) => write!(f, "SmsMessage {{ smsc: {} tpdu: {} }}", smsc, self.tpdu),
            None => write!(f, "SmsMessage {{ smsc: None tpdu: {} }}", self.tpdu),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sms::enums::sms_encoding::SmsEncoding;
    use crate::sms::pdus::sms_status_report::DeliveryStatus;
    use icc_core::debug;

    const DELIVER_HELLO: &str = "07917283010010F5040BC87238880900F10000993092516195800AE8329BFD4697D9EC37";

    #[test]
    fn test_deliver_7bit() {
        debug::setup_logging_verbose();
        let msg = SmsMessage::from_hex(DELIVER_HELLO).unwrap();
        tracing::info!("{}", msg);

        assert_eq!(msg.smsc.as_ref().map(|s| s.address.as_str()), Some("+27381000015"));
        let SmsTpdu::Deliver(deliver) = &msg.tpdu else {
            panic!("expected deliver");
        };
        assert_eq!(deliver.originating_address.address, "27838890001");
        assert_eq!(deliver.dcs.encoding, SmsEncoding::SevenBit);
        assert!(!deliver.more_messages_to_send);
        assert_eq!(deliver.service_centre_timestamp.tz_quarters, 8);
        assert_eq!(msg.tpdu.body(), Some("hellohello"));

        let encoded = msg.to_bytes().unwrap();
        assert_eq!(icc_core::octet_buffer::bytes_to_hex(&encoded), DELIVER_HELLO);
    }

    #[test]
    fn test_reserved_mti_is_deliver() {
        // First octet 0x07: MTI 3 with TP-MMS
        let hex = "00070B914121436587F900002180124190752000";
        let msg = SmsMessage::from_hex(hex).unwrap();
        let SmsTpdu::Deliver(deliver) = &msg.tpdu else {
            panic!("expected deliver");
        };
        assert_eq!(deliver.mti, MessageTypeIndicator::Reserved);
        assert_eq!(deliver.user_data.body, None);
    }

    #[test]
    fn test_status_report() {
        debug::setup_logging_verbose();
        let hex = "0006050B914121436587F921801241907520218012419075200000";
        let msg = SmsMessage::from_hex(hex).unwrap();
        assert_eq!(msg.smsc, None);
        let SmsTpdu::StatusReport(report) = &msg.tpdu else {
            panic!("expected status report");
        };
        assert_eq!(report.message_reference, 5);
        assert_eq!(report.recipient_address.address, "+14123456789");
        assert_eq!(report.delivery_status(), DeliveryStatus::Success);
        assert_eq!(report.pid, None);
    }

    #[test]
    fn test_status_report_with_parameters() {
        // TP-PI 0x06 (DCS and UDL), DCS 8 bit, 2 octets of data
        let hex = "0006050B914121436587F92180124190752021801241907520400604020102";
        let msg = SmsMessage::from_hex(hex).unwrap();
        let SmsTpdu::StatusReport(report) = &msg.tpdu else {
            panic!("expected status report");
        };
        assert_eq!(report.delivery_status(), DeliveryStatus::Error);
        assert_eq!(report.dcs.map(|d| d.encoding), Some(SmsEncoding::EightBit));
        assert_eq!(report.user_data.as_ref().and_then(|u| u.data.clone()), Some(vec![0x01, 0x02]));
    }

    #[test]
    fn test_truncated() {
        let hex = &DELIVER_HELLO[..30];
        assert!(SmsMessage::from_hex(hex).is_err());
    }
}

use core::fmt;

use icc_core::{IccErr, OctetBuffer};

use crate::sms::pdus::sms_message::SmsMessage;

/// Size of an EF_SMS record: status octet and 175 octets of message
pub const SMS_RECORD_SIZE: usize = 176;

/// Status octet of EF_SMS, 3GPP TS 51.011 clause 10.5.3, bits b3..b1
pub const SMS_STATUS_FREE: u8 = 0x00;
pub const SMS_STATUS_READ: u8 = 0x01;
pub const SMS_STATUS_TO_BE_READ: u8 = 0x03;
pub const SMS_STATUS_SENT: u8 = 0x05;
pub const SMS_STATUS_TO_BE_SENT: u8 = 0x07;

/// A short message stored on the card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmsRecord {
    pub status: u8,
    /// None for a free record
    pub message: Option<SmsMessage>,
}

impl SmsRecord {
    pub fn from_bytes(record: &[u8]) -> Result<Self, IccErr> {
        let mut buf = OctetBuffer::from_bytes(record);
        let status = buf.read_field("sms_status")?;
        if status & 0x01 == SMS_STATUS_FREE {
            return Ok(SmsRecord { status, message: None });
        }
        let message = SmsMessage::from_octetbuf(&mut buf)?;
        Ok(SmsRecord { status, message: Some(message) })
    }

    /// Encode with 0xFF padding to the record size
    pub fn to_bytes(&self) -> Result<Vec<u8>, IccErr> {
        let mut record = vec![self.status];
        if let Some(message) = &self.message {
            record.extend(message.to_bytes()?);
        }
        if record.len() > SMS_RECORD_SIZE {
            return Err(IccErr::InconsistentLength { expected: SMS_RECORD_SIZE, found: record.len() });
        }
        record.resize(SMS_RECORD_SIZE, 0xFF);
        Ok(record)
    }
}

impl fmt::Display for SmsRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.message {
            Some(m) => write!(f, "SmsRecord {{ status: {:02x} message: {} }}", self.status, m),
            None => write!(f, "SmsRecord {{ status: {:02x} message: None }}", self.status),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use icc_core::debug;
    use icc_core::octet_buffer::hex_to_bytes;

    #[test]
    fn test_stored_deliver() {
        debug::setup_logging_verbose();
        let mut record =
            hex_to_bytes("0107917283010010F5040BC87238880900F10000993092516195800AE8329BFD4697D9EC37").unwrap();
        record.resize(SMS_RECORD_SIZE, 0xFF);
        let sms = SmsRecord::from_bytes(&record).unwrap();
        tracing::info!("{}", sms);
        assert_eq!(sms.status, SMS_STATUS_READ);
        assert_eq!(sms.message.as_ref().and_then(|m| m.tpdu.body()), Some("hellohello"));
        assert_eq!(sms.to_bytes().unwrap(), record);
    }

    #[test]
    fn test_free_record() {
        let mut record = vec![0x00];
        record.resize(SMS_RECORD_SIZE, 0xFF);
        assert_eq!(SmsRecord::from_bytes(&record).unwrap().message, None);
    }
}

use core::fmt;

use icc_core::{IccErr, OctetBuffer};

use crate::sms::fields::data_coding_scheme::DataCodingScheme;
use crate::sms::fields::sms_address::SmsAddress;
use crate::sms::fields::sms_timestamp::SmsTimestamp;
use crate::sms::fields::user_data::UserData;
use crate::sms::pdus::sms_deliver::FO_UDHI;

/// TP-PI bits, 3GPP TS 23.040 clause 9.2.3.27
const PI_PROTOCOL_IDENTIFIER: u8 = 0x01;
const PI_DATA_CODING_SCHEME: u8 = 0x02;
const PI_USER_DATA_LENGTH: u8 = 0x04;
const PI_EXTENSION: u8 = 0x80;

/// Coarse classification of TP-ST (clause 9.2.3.15)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryStatus {
    /// Short message transaction completed
    Success,
    /// Temporary error, SC still trying to transfer
    Pending,
    /// Permanent error, or temporary error with the SC no longer trying
    Error,
}

impl DeliveryStatus {
    pub fn from_status(status: u8) -> Self {
        match status {
            0x00..=0x1F => DeliveryStatus::Success,
            0x20..=0x3F => DeliveryStatus::Pending,
            _ => DeliveryStatus::Error,
        }
    }
}

/// Representation of the SMS-STATUS-REPORT TPDU (3GPP TS 23.040 clause 9.2.2.3).
/// Reports the delivery state of a previously submitted message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmsStatusReport {
    /// 1 octet, TP-MR of the SUBMIT this report refers to
    pub message_reference: u8,
    /// 2-12 octets, TP-RA
    pub recipient_address: SmsAddress,
    /// 7 octets, TP-SCTS
    pub service_centre_timestamp: SmsTimestamp,
    /// 7 octets, TP-DT
    pub discharge_time: SmsTimestamp,
    /// 1 octet, TP-ST
    pub status: u8,
    /// Optional, present when TP-PI announces it
    pub pid: Option<u8>,
    /// Optional. 0x00 is assumed when TP-PI announces user data but no DCS.
    pub dcs: Option<DataCodingScheme>,
    pub user_data: Option<UserData>,
}

impl SmsStatusReport {
    /// Parse from OctetBuffer, positioned after the first octet
    pub fn from_octetbuf(buffer: &mut OctetBuffer, first_octet: u8) -> Result<Self, IccErr> {
        let message_reference = buffer.read_field("mr")?;
        let ra_len = buffer.read_field("ra_length")?;
        let recipient_address = SmsAddress::from_octetbuf(buffer, ra_len)?;
        let service_centre_timestamp = SmsTimestamp::from_octetbuf(buffer)?;
        let discharge_time = SmsTimestamp::from_octetbuf(buffer)?;
        let status = buffer.read_field("status")?;

        let mut report = SmsStatusReport {
            message_reference,
            recipient_address,
            service_centre_timestamp,
            discharge_time,
            status,
            pid: None,
            dcs: None,
            user_data: None,
        };

        if buffer.get_len_remaining() == 0 {
            return Ok(report);
        }

        // TP-PI, extension bit chains further indicator octets
        let mut pi;
        loop {
            pi = buffer.read_field("pi")?;
            if pi & PI_EXTENSION == 0 {
                break;
            }
        }

        if pi & PI_PROTOCOL_IDENTIFIER != 0 {
            report.pid = Some(buffer.read_field("pid")?);
        }
        if pi & PI_DATA_CODING_SCHEME != 0 {
            report.dcs = Some(DataCodingScheme::from_octet(buffer.read_field("dcs")?));
        }
        if pi & PI_USER_DATA_LENGTH != 0 {
            let dcs = *report.dcs.get_or_insert(DataCodingScheme::from_octet(0));
            let udl = buffer.read_field("udl")? as usize;
            report.user_data = Some(UserData::from_octetbuf(buffer, first_octet & FO_UDHI != 0, dcs.encoding, udl)?);
        }
        Ok(report)
    }

    pub fn delivery_status(&self) -> DeliveryStatus {
        DeliveryStatus::from_status(self.status)
    }
}

impl fmt::Display for SmsStatusReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "SmsStatusReport {{ message_reference: {} recipient_address: {} service_centre_timestamp: {} discharge_time: {} status: 0x{:02x} pid: {:?} dcs: {:?} user_data: {:?} }}",
            self.message_reference,
            self.recipient_address,
            self.service_centre_timestamp,
            self.discharge_time,
            self.status,
            self.pid,
            self.dcs,
            self.user_data,
        )
    }
}

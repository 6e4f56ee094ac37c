use core::fmt;

use icc_core::{IccErr, OctetBuffer};

use crate::sms::enums::message_type_indicator::MessageTypeIndicator;
use crate::sms::fields::data_coding_scheme::{DataCodingScheme, MessageWaiting};
use crate::sms::fields::protocol_identifier::effective_pid;
use crate::sms::fields::sms_address::SmsAddress;
use crate::sms::fields::sms_timestamp::SmsTimestamp;
use crate::sms::fields::user_data::UserData;

pub(crate) const FO_MMS: u8 = 0x04;
pub(crate) const FO_SRI_SRR: u8 = 0x20;
pub(crate) const FO_UDHI: u8 = 0x40;
pub(crate) const FO_RP: u8 = 0x80;

/// Representation of the SMS-DELIVER TPDU (3GPP TS 23.040 clause 9.2.2.1).
/// Conveys a short message from the SC to the MS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmsDeliver {
    /// 2 bits, Deliver or Reserved (processed as Deliver)
    pub mti: MessageTypeIndicator,
    /// TP-MMS cleared: more messages are waiting in the SC
    pub more_messages_to_send: bool,
    /// 1 bit, TP-SRI
    pub status_report_indication: bool,
    /// 1 bit, TP-RP
    pub reply_path: bool,
    /// 2-12 octets, TP-OA
    pub originating_address: SmsAddress,
    /// 1 octet, TP-PID as received
    pub pid: u8,
    /// 1 octet, TP-DCS
    pub dcs: DataCodingScheme,
    /// 7 octets, TP-SCTS
    pub service_centre_timestamp: SmsTimestamp,
    /// TP-UD, with header when TP-UDHI was set
    pub user_data: UserData,
}

impl SmsDeliver {
    /// Parse from OctetBuffer, positioned after the first octet
    pub fn from_octetbuf(buffer: &mut OctetBuffer, first_octet: u8) -> Result<Self, IccErr> {
        let mti = MessageTypeIndicator::try_from((first_octet & 0x03) as u64)
            .map_err(|_| IccErr::InvalidValue { field: "mti", value: first_octet as u64 })?;
        let udhi = first_octet & FO_UDHI != 0;

        let oa_len = buffer.read_field("oa_length")?;
        let originating_address = SmsAddress::from_octetbuf(buffer, oa_len)?;
        let pid = buffer.read_field("pid")?;
        let dcs = DataCodingScheme::from_octet(buffer.read_field("dcs")?);
        let service_centre_timestamp = SmsTimestamp::from_octetbuf(buffer)?;

        let udl = buffer.read_field("udl")? as usize;
        let user_data = if udl > 0 {
            UserData::from_octetbuf(buffer, udhi, dcs.encoding, udl)?
        } else {
            UserData::default()
        };

        Ok(SmsDeliver {
            mti,
            more_messages_to_send: first_octet & FO_MMS == 0,
            status_report_indication: first_octet & FO_SRI_SRR != 0,
            reply_path: first_octet & FO_RP != 0,
            originating_address,
            pid,
            dcs,
            service_centre_timestamp,
            user_data,
        })
    }

    pub fn first_octet(&self) -> u8 {
        let mut fo = self.mti.into_raw() as u8;
        if !self.more_messages_to_send {
            fo |= FO_MMS;
        }
        if self.status_report_indication {
            fo |= FO_SRI_SRR;
        }
        if self.user_data.header.is_some() {
            fo |= FO_UDHI;
        }
        if self.reply_path {
            fo |= FO_RP;
        }
        fo
    }

    /// Serialize this TPDU, first octet included
    pub fn to_octetbuf(&self, buffer: &mut OctetBuffer) -> Result<(), IccErr> {
        buffer.write_octet(self.first_octet());
        self.originating_address.to_octetbuf(buffer)?;
        buffer.write_octet(self.pid);
        buffer.write_octet(self.dcs.raw);
        self.service_centre_timestamp.to_octetbuf(buffer);
        self.user_data.to_octetbuf(buffer, self.dcs.encoding)
    }

    /// TP-PID as interpreted by the ME
    pub fn effective_pid(&self) -> u8 {
        effective_pid(self.pid)
    }

    /// Voicemail indication from the DCS, overridden by a special SMS message indication in the UDH
    pub fn message_waiting(&self) -> Option<MessageWaiting> {
        match self.user_data.header.as_ref().and_then(|h| h.special_message) {
            Some(ind) => Some(ind.apply(self.dcs.mwi)),
            None => self.dcs.mwi,
        }
    }
}

impl fmt::Display for SmsDeliver {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "SmsDeliver {{ mti: {} more_messages_to_send: {} status_report_indication: {} reply_path: {} originating_address: {} pid: 0x{:02x} dcs: {} service_centre_timestamp: {} user_data: {} }}",
            self.mti,
            self.more_messages_to_send,
            self.status_report_indication,
            self.reply_path,
            self.originating_address,
            self.pid,
            self.dcs,
            self.service_centre_timestamp,
            self.user_data,
        )
    }
}

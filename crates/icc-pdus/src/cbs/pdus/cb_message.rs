use core::fmt;

use icc_core::gsm_alphabet::NL_IDENTIFIER_DEFAULT;
use icc_core::{IccErr, OctetBuffer};

use crate::cbs::fields::cb_data_coding_scheme::CbDataCodingScheme;
use crate::cbs::fields::cb_serial_number::CbSerialNumber;
use crate::cbs::fields::etws_info::{EtwsInfo, is_etws_message_id};
use crate::cbs::fields::wac_data::{GeoFencingTrigger, WarningAreaCoordinates};
use crate::sms::enums::message_class::MessageClass;
use crate::sms::enums::sms_encoding::SmsEncoding;

/// Serial number, message identifier, DCS and page parameter
pub const CB_MESSAGE_HEADER_SIZE: usize = 6;
pub const CB_MESSAGE_SIZE_GSM: usize = 88;
pub const CB_MESSAGE_SIZE_ETWS: usize = 56;
pub const CB_MESSAGE_SIZE_UMTS_MIN: usize = 90;
pub const CB_MESSAGE_SIZE_UMTS_MAX: usize = 1252;
/// CBS-Message-Information-Page, 3GPP TS 23.041 clause 9.3.19
pub const CB_PAGE_INFO_SIZE: usize = 82;

/// Padding character of CB information pages
const CB_PADDING: char = '\r';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CbFormat {
    Gsm,
    /// ETWS primary notification
    Etws,
    Umts,
}

impl fmt::Display for CbFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CbFormat::Gsm => write!(f, "Gsm"),
            CbFormat::Etws => write!(f, "Etws"),
            CbFormat::Umts => write!(f, "Umts"),
        }
    }
}

/// A Cell Broadcast message or, for multi page GSM messages, one page of it.
/// UMTS messages always arrive complete; `num_pages` counts the pages they carried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CbMessage {
    pub format: CbFormat,
    pub serial: CbSerialNumber,
    pub message_id: u16,
    /// Absent for ETWS primary notifications
    pub dcs: Option<CbDataCodingScheme>,
    /// 1-based
    pub page_index: u8,
    pub num_pages: u8,
    pub language: Option<String>,
    pub body: Option<String>,
    pub data: Option<Vec<u8>>,
    pub etws: Option<EtwsInfo>,
    /// UMTS CMAS only
    pub warning_area: Option<WarningAreaCoordinates>,
    /// UMTS CMAS geo-fencing trigger, carries no pages
    pub geo_fencing_trigger: Option<GeoFencingTrigger>,
}

impl CbMessage {
    /// Decode a CB PDU, the format is chosen by the total PDU length
    pub fn from_octetbuf(buf: &mut OctetBuffer) -> Result<Self, IccErr> {
        let pdu_len = buf.get_len_remaining();
        tracing::debug!("cb pdu of {} octets", pdu_len);

        if pdu_len < CB_MESSAGE_HEADER_SIZE {
            return Err(IccErr::MalformedPdu { field: "cb_length", reason: "shorter than cb header" });
        }

        if pdu_len <= CB_MESSAGE_SIZE_GSM {
            let serial = CbSerialNumber::from_octetbuf(buf)?;
            let message_id = buf.read_u16("cb_message_id")?;
            if is_etws_message_id(message_id) && pdu_len <= CB_MESSAGE_SIZE_ETWS {
                return Self::read_etws_primary(buf, serial, message_id);
            }
            return Self::read_gsm(buf, serial, message_id, pdu_len);
        }

        if (CB_MESSAGE_SIZE_UMTS_MIN..=CB_MESSAGE_SIZE_UMTS_MAX).contains(&pdu_len) {
            return Self::read_umts(buf);
        }

        Err(IccErr::MalformedPdu { field: "cb_length", reason: "no cb format of this length" })
    }

    pub fn from_bytes(pdu: &[u8]) -> Result<Self, IccErr> {
        Self::from_octetbuf(&mut OctetBuffer::from_bytes(pdu))
    }

    pub fn from_hex(hex: &str) -> Result<Self, IccErr> {
        Self::from_octetbuf(&mut OctetBuffer::from_hex(hex)?)
    }

    pub fn is_etws(&self) -> bool {
        is_etws_message_id(self.message_id)
    }

    pub fn message_class(&self) -> MessageClass {
        self.dcs.as_ref().map(|d| d.message_class).unwrap_or(MessageClass::Normal)
    }

    pub fn is_multi_page(&self) -> bool {
        self.format == CbFormat::Gsm && self.num_pages > 1
    }
}

/// Decode one information page of `length` octets. The language carried in the body
/// is stored in `language` when it is not known yet.
pub(crate) fn read_page_text(
    buf: &mut OctetBuffer,
    dcs: &CbDataCodingScheme,
    length: usize,
    language: &mut Option<String>,
) -> Result<(Option<String>, Option<Vec<u8>>), IccErr> {
    match dcs.encoding {
        SmsEncoding::SevenBit => {
            let text = buf.read_septets(length * 8 / 7, 0, NL_IDENTIFIER_DEFAULT, NL_IDENTIFIER_DEFAULT)?;
            let text = if dcs.has_language_indicator {
                if language.is_none() {
                    *language = Some(text.chars().take(2).collect());
                }
                text.chars().skip(3).collect()
            } else {
                text
            };
            Ok((Some(strip_padding(&text)), None))
        }
        SmsEncoding::EightBit => Ok((None, Some(buf.read_octets(length)?))),
        SmsEncoding::Ucs2 => {
            let mut length = length;
            if dcs.has_language_indicator {
                let lang = buf.read_septets(2, 0, NL_IDENTIFIER_DEFAULT, NL_IDENTIFIER_DEFAULT)?;
                if language.is_none() {
                    *language = Some(lang);
                }
                length = length.saturating_sub(2);
            }
            let text = buf.read_ucs2(length)?;
            Ok((Some(strip_padding(&text)), None))
        }
    }
}

fn strip_padding(text: &str) -> String {
    text.trim_end_matches(CB_PADDING).to_string()
}

impl fmt::Display for CbMessage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "CbMessage {{ format: {} serial: {} message_id: 0x{:04x} page: {}/{} language: {:?} body: {:?} data: {:?} etws: {:?} warning_area: {:?} geo_fencing_trigger: {:?} }}",
            self.format,
            self.serial,
            self.message_id,
            self.page_index,
            self.num_pages,
            self.language,
            self.body,
            self.data,
            self.etws,
            self.warning_area,
            self.geo_fencing_trigger,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_too_short() {
        assert!(matches!(CbMessage::from_hex("0011003201"), Err(IccErr::MalformedPdu { .. })));
    }

    #[test]
    fn test_length_gap() {
        // 89 octets is neither GSM nor UMTS
        let pdu = vec![0u8; 89];
        assert!(CbMessage::from_bytes(&pdu).is_err());
        let pdu = vec![0u8; CB_MESSAGE_SIZE_UMTS_MAX + 1];
        assert!(CbMessage::from_bytes(&pdu).is_err());
    }
}

use icc_core::{IccErr, OctetBuffer};

use crate::cbs::fields::cb_data_coding_scheme::CbDataCodingScheme;
use crate::cbs::fields::cb_serial_number::CbSerialNumber;
use crate::cbs::fields::etws_info::EtwsInfo;
use crate::cbs::pdus::cb_message::{CB_MESSAGE_HEADER_SIZE, CbFormat, CbMessage, read_page_text};

impl CbMessage {
    /// GSM CB page, 3GPP TS 23.041 clause 9.4.1.2. Positioned after serial number and message id.
    pub(crate) fn read_gsm(
        buf: &mut OctetBuffer,
        serial: CbSerialNumber,
        message_id: u16,
        pdu_len: usize,
    ) -> Result<Self, IccErr> {
        let etws = EtwsInfo::from_message_code(message_id, serial.message_code());
        let dcs = CbDataCodingScheme::from_octet(buf.read_field("cb_dcs")?)?;

        // Code 0000 in either nibble means a single page message
        let page = buf.read_field("cb_page_parameter")?;
        let (mut page_index, mut num_pages) = (page >> 4, page & 0x0F);
        if page_index == 0 || num_pages == 0 {
            page_index = 1;
            num_pages = 1;
        }

        let mut language = dcs.language.map(str::to_string);
        let (body, data) = read_page_text(buf, &dcs, pdu_len - CB_MESSAGE_HEADER_SIZE, &mut language)?;

        Ok(CbMessage {
            format: CbFormat::Gsm,
            serial,
            message_id,
            dcs: Some(dcs),
            page_index,
            num_pages,
            language,
            body,
            data,
            etws,
            warning_area: None,
            geo_fencing_trigger: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cbs::enums::geographical_scope::GeographicalScope;
    use crate::cbs::pdus::cb_message::{CB_MESSAGE_SIZE_GSM, CB_PAGE_INFO_SIZE};
    use icc_core::debug;
    use icc_core::gsm_alphabet::NL_IDENTIFIER_DEFAULT;

    /// Header followed by `text` padded with CR to a full 82 octet page
    fn gsm_page(header: &[u8], text: &str) -> Vec<u8> {
        let mut buf = OctetBuffer::new();
        buf.write_octets(header);
        let septets = CB_PAGE_INFO_SIZE * 8 / 7;
        let padded = format!("{}{}", text, "\r".repeat(septets - text.chars().count()));
        buf.write_septets(&padded, 0, NL_IDENTIFIER_DEFAULT, NL_IDENTIFIER_DEFAULT).unwrap();
        buf.into_bytes()
    }

    #[test]
    fn test_gsm_page_7bit() {
        debug::setup_logging_verbose();
        let pdu = gsm_page(&[0x40, 0x11, 0x00, 0x32, 0x01, 0x23], "Traffic jam on A1");
        assert_eq!(pdu.len(), CB_MESSAGE_SIZE_GSM);

        let msg = CbMessage::from_bytes(&pdu).unwrap();
        tracing::info!("{}", msg);
        assert_eq!(msg.format, CbFormat::Gsm);
        assert_eq!(msg.serial.geographical_scope(), GeographicalScope::PlmnWide);
        assert_eq!(msg.serial.message_code(), 1);
        assert_eq!(msg.serial.update_number(), 1);
        assert_eq!(msg.message_id, 0x0032);
        assert_eq!(msg.language.as_deref(), Some("en"));
        assert_eq!((msg.page_index, msg.num_pages), (2, 3));
        assert!(msg.is_multi_page());
        assert_eq!(msg.body.as_deref(), Some("Traffic jam on A1"));
        assert_eq!(msg.etws, None);
    }

    #[test]
    fn test_gsm_language_indicator() {
        // DCS 0x10: language in the first three characters of the body
        let pdu = gsm_page(&[0x00, 0x01, 0x00, 0x32, 0x10, 0x00], "fr\nBonjour");
        let msg = CbMessage::from_bytes(&pdu).unwrap();
        assert_eq!(msg.language.as_deref(), Some("fr"));
        assert_eq!(msg.body.as_deref(), Some("Bonjour"));
        assert_eq!((msg.page_index, msg.num_pages), (1, 1));
    }

    #[test]
    fn test_etws_secondary_notification() {
        // Message id 0x1102, message code with alert and popup set, full GSM page
        let pdu = gsm_page(&[0x33, 0x00, 0x11, 0x02, 0x01, 0x11], "Evacuate");
        let msg = CbMessage::from_bytes(&pdu).unwrap();
        assert_eq!(msg.format, CbFormat::Gsm);
        let etws = msg.etws.unwrap();
        assert!(etws.emergency_user_alert);
        assert!(etws.popup);
        assert_eq!(msg.body.as_deref(), Some("Evacuate"));
    }

    #[test]
    fn test_gsm_ucs2_with_language() {
        let mut buf = OctetBuffer::new();
        buf.write_octets(&[0x00, 0x01, 0x00, 0x32, 0x11, 0x11]);
        buf.write_septets("en", 0, NL_IDENTIFIER_DEFAULT, NL_IDENTIFIER_DEFAULT).unwrap();
        buf.write_ucs2("Hi");
        while buf.get_len() < CB_MESSAGE_SIZE_GSM {
            buf.write_u16(0x000D);
        }
        let msg = CbMessage::from_bytes(buf.as_bytes()).unwrap();
        assert_eq!(msg.language.as_deref(), Some("en"));
        assert_eq!(msg.body.as_deref(), Some("Hi"));
    }
}

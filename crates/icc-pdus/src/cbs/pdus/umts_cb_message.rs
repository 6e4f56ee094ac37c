use icc_core::{IccErr, OctetBuffer};

use crate::cbs::fields::cb_data_coding_scheme::CbDataCodingScheme;
use crate::cbs::fields::cb_serial_number::CbSerialNumber;
use crate::cbs::fields::etws_info::EtwsInfo;
use crate::cbs::fields::wac_data::{CB_CMAS_MESSAGE_ID_GEO_FENCING_TRIGGER, GeoFencingTrigger, WarningAreaCoordinates};
use crate::cbs::pdus::cb_message::{CB_PAGE_INFO_SIZE, CbFormat, CbMessage, read_page_text};

/// 3GPP TS 25.324 clause 11.1 Message Type CBS
const CB_UMTS_MESSAGE_TYPE_CBS: u8 = 1;
const CB_UMTS_MAX_PAGES: u8 = 15;

impl CbMessage {
    /// UMTS CB message, 3GPP TS 23.041 clause 9.4.2.
    /// Pages are concatenated after their padding is stripped. Octets after the last page
    /// carry the warning area coordinates.
    pub(crate) fn read_umts(buf: &mut OctetBuffer) -> Result<Self, IccErr> {
        let message_type = buf.read_field("cb_message_type")?;
        if message_type != CB_UMTS_MESSAGE_TYPE_CBS {
            return Err(IccErr::InvalidValue { field: "cb_message_type", value: message_type as u64 });
        }

        let message_id = buf.read_u16("cb_message_id")?;
        let serial = CbSerialNumber::from_octetbuf(buf)?;
        let etws = EtwsInfo::from_message_code(message_id, serial.message_code());
        let dcs = CbDataCodingScheme::from_octet(buf.read_field("cb_dcs")?)?;

        let num_pages = buf.read_field("cb_num_pages")?;
        if num_pages == 0 || num_pages > CB_UMTS_MAX_PAGES {
            return Err(IccErr::InvalidValue { field: "cb_num_pages", value: num_pages as u64 });
        }

        let mut message = CbMessage {
            format: CbFormat::Umts,
            serial,
            message_id,
            dcs: None,
            page_index: 1,
            num_pages,
            language: dcs.language.map(str::to_string),
            body: None,
            data: None,
            etws,
            warning_area: None,
            geo_fencing_trigger: None,
        };

        if message_id == CB_CMAS_MESSAGE_ID_GEO_FENCING_TRIGGER {
            message.geo_fencing_trigger = Some(GeoFencingTrigger::from_octetbuf(buf)?);
            message.dcs = Some(dcs);
            return Ok(message);
        }

        for page in 0..num_pages {
            let info = buf.read_octets(CB_PAGE_INFO_SIZE)?;
            let length = buf.read_field("cb_page_length")? as usize;
            if length > CB_PAGE_INFO_SIZE {
                tracing::warn!("page {} claims {} octets of information", page + 1, length);
                return Err(IccErr::InvalidValue { field: "cb_page_length", value: length as u64 });
            }

            let mut page_buf = OctetBuffer::from_bytes(&info[..length]);
            let (page_body, page_data) = read_page_text(&mut page_buf, &dcs, length, &mut message.language)?;
            if let Some(text) = page_body {
                message.body.get_or_insert_with(String::new).push_str(&text);
            }
            if let Some(octets) = page_data {
                message.data.get_or_insert_with(Vec::new).extend_from_slice(&octets);
            }
        }

        if buf.get_len_remaining() > 0 {
            message.warning_area = Some(WarningAreaCoordinates::from_octetbuf(buf)?);
        }

        message.dcs = Some(dcs);
        Ok(message)
    }
}

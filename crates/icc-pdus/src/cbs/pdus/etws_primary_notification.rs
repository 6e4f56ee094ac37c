use icc_core::{IccErr, OctetBuffer};

use crate::cbs::fields::cb_serial_number::CbSerialNumber;
use crate::cbs::fields::etws_info::EtwsInfo;
use crate::cbs::pdus::cb_message::{CbFormat, CbMessage};

impl CbMessage {
    /// ETWS primary notification, 3GPP TS 23.041 clause 9.4.1.3.
    /// The warning security information that follows the warning type is ignored.
    pub(crate) fn read_etws_primary(buf: &mut OctetBuffer, serial: CbSerialNumber, message_id: u16) -> Result<Self, IccErr> {
        let word = buf.read_u16("etws_warning_type")?;
        Ok(CbMessage {
            format: CbFormat::Etws,
            serial,
            message_id,
            dcs: None,
            page_index: 1,
            num_pages: 1,
            language: None,
            body: None,
            data: None,
            etws: Some(EtwsInfo::from_warning_type_word(word)),
            warning_area: None,
            geo_fencing_trigger: None,
        })
    }
}

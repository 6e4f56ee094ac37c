use core::fmt;

use icc_core::{IccErr, OctetBuffer};

use crate::sms::fields::sms_timestamp::SmsTimestamp;
use crate::stk::enums::device_id::StkDeviceId;
use crate::stk::enums::result_code::StkResultCode;
use crate::stk::fields::command_details::CommandDetails;
use crate::tlv::enums::comprehension_tag::ComprehensionTag;
use crate::tlv::tlv_writer::{
    LocationInfo, write_date_time_zone, write_language, write_location_info, write_text_string, write_timer_value,
    write_tlv,
};

/// Command specific data following the result object
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalResponseData {
    /// GET INKEY and GET INPUT
    Text { text: String, coding: u8 },
    /// SELECT ITEM
    ItemId(u8),
    /// PROVIDE LOCAL INFORMATION
    LocationInfo(LocationInfo),
    Imei(Vec<u8>),
    DateTimeZone(SmsTimestamp),
    Language(String),
    /// TIMER MANAGEMENT, timer value in seconds
    Timer { timer_id: u8, seconds: Option<u32> },
}

/// TERMINAL RESPONSE, ETSI TS 102.223 clause 6.8
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalResponse {
    /// Copied from the proactive command being answered
    pub command_details: CommandDetails,
    pub result: StkResultCode,
    /// Additional information on the result, e.g. the cause of TerminalCrntlyUnableToProcess
    pub additional_info: Option<u8>,
    pub data: Option<TerminalResponseData>,
}

impl TerminalResponse {
    pub fn new(command_details: CommandDetails, result: StkResultCode) -> Self {
        TerminalResponse { command_details, result, additional_info: None, data: None }
    }

    pub fn to_octetbuf(&self, buf: &mut OctetBuffer) -> Result<(), IccErr> {
        buf.write_octet(ComprehensionTag::CommandDetails.with_cr());
        buf.write_octet(3);
        self.command_details.to_octetbuf(buf);

        buf.write_octet(ComprehensionTag::DeviceId.with_cr());
        buf.write_octet(2);
        buf.write_octet(StkDeviceId::Terminal.into_raw() as u8);
        buf.write_octet(StkDeviceId::Sim.into_raw() as u8);

        let mut result = vec![self.result.into_raw() as u8];
        result.extend(self.additional_info);
        write_tlv(buf, ComprehensionTag::Result.with_cr(), &result)?;

        match &self.data {
            None => {}
            Some(TerminalResponseData::Text { text, coding }) => write_text_string(buf, text, *coding)?,
            Some(TerminalResponseData::ItemId(id)) => write_tlv(buf, ComprehensionTag::ItemId.with_cr(), &[*id])?,
            Some(TerminalResponseData::LocationInfo(loc)) => write_location_info(buf, loc)?,
            Some(TerminalResponseData::Imei(imei)) => write_tlv(buf, ComprehensionTag::Imei.with_cr(), imei)?,
            Some(TerminalResponseData::DateTimeZone(ts)) => write_date_time_zone(buf, ts),
            Some(TerminalResponseData::Language(lang)) => write_language(buf, lang)?,
            Some(TerminalResponseData::Timer { timer_id, seconds }) => {
                write_tlv(buf, ComprehensionTag::TimerIdentifier.with_cr(), &[*timer_id])?;
                if let Some(seconds) = seconds {
                    write_timer_value(buf, *seconds, true);
                }
            }
        }
        Ok(())
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, IccErr> {
        let mut buf = OctetBuffer::new();
        self.to_octetbuf(&mut buf)?;
        Ok(buf.into_bytes())
    }
}

impl fmt::Display for TerminalResponse {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "TerminalResponse {{ command_details: {} result: {} additional_info: {:?} data: {:?} }}",
            self.command_details, self.result, self.additional_info, self.data
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stk::fields::text_string::STK_TEXT_CODING_GSM_8BIT;
    use icc_core::debug;
    use icc_core::octet_buffer::bytes_to_hex;

    fn display_text() -> CommandDetails {
        CommandDetails { command_number: 1, type_of_command: 0x21, qualifier: 0x80 }
    }

    #[test]
    fn test_required_values_missing() {
        debug::setup_logging_verbose();
        let rsp = TerminalResponse::new(display_text(), StkResultCode::RequiredValuesMissing);
        tracing::info!("{}", rsp);
        assert_eq!(bytes_to_hex(&rsp.to_bytes().unwrap()), "810301218082028281830136");
    }

    #[test]
    fn test_get_input_text() {
        let details = CommandDetails { command_number: 2, type_of_command: 0x23, qualifier: 0x00 };
        let mut rsp = TerminalResponse::new(details, StkResultCode::Ok);
        rsp.data = Some(TerminalResponseData::Text { text: "Hi".to_string(), coding: STK_TEXT_CODING_GSM_8BIT });
        assert_eq!(bytes_to_hex(&rsp.to_bytes().unwrap()), "8103022300820282818301008D03044869");
    }

    #[test]
    fn test_unable_to_process_with_cause() {
        let mut rsp = TerminalResponse::new(display_text(), StkResultCode::TerminalCrntlyUnableToProcess);
        rsp.additional_info = Some(0x01);
        rsp.data = Some(TerminalResponseData::Timer { timer_id: 1, seconds: Some(61) });
        assert_eq!(bytes_to_hex(&rsp.to_bytes().unwrap()), "81030121808202828183022001A40101A503001010");
    }
}

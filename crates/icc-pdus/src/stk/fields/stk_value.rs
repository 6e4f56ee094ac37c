use icc_core::{IccErr, OctetBuffer};

use crate::icc::fields::alpha_identifier::decode_alpha_identifier;
use crate::icc::fields::dialling_number::read_dialling_number;
use crate::stk::fields::command_details::{CommandDetails, DeviceIdentities};
use crate::stk::fields::text_string::TextString;
use crate::tlv::enums::comprehension_tag::ComprehensionTag;

/// Duration, ETSI TS 102.223 clause 8.8
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StkDuration {
    /// 0 minutes, 1 seconds, 2 tenths of seconds
    pub time_unit: u8,
    pub time_interval: u8,
}

/// Item, ETSI TS 102.223 clause 8.9
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StkItem {
    pub identifier: u8,
    pub text: String,
}

/// Icon identifier, ETSI TS 102.223 clause 8.31
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StkIconId {
    /// Bit 1 cleared: icon is self-explanatory
    pub qualifier: u8,
    /// Record number in EF_IMG
    pub identifier: u8,
}

/// Item icon identifier list, ETSI TS 102.223 clause 8.32
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StkIconIdList {
    pub qualifier: u8,
    pub identifiers: Vec<u8>,
}

/// File list, ETSI TS 102.223 clause 8.18
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StkFileList {
    pub num_files: u8,
    /// Concatenated full paths, each starting with 3F00
    pub files: Vec<u8>,
}

/// Decoded value part of a COMPREHENSION-TLV
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StkValue {
    CommandDetails(CommandDetails),
    DeviceIdentities(DeviceIdentities),
    AlphaId(String),
    Duration(StkDuration),
    Address(String),
    /// Text String and Default Text
    TextString(TextString),
    Tone(u8),
    /// None for the null item that removes a menu
    Item(Option<StkItem>),
    ItemId(u8),
    ResponseLength { min: u8, max: u8 },
    FileList(StkFileList),
    /// None is an instruction to remove the current list
    EventList(Option<Vec<u8>>),
    IconId(Option<StkIconId>),
    IconIdList(Option<StkIconIdList>),
    TimerId(u8),
    /// Seconds
    TimerValue(u32),
    ImmediateResponse,
    Url(String),
    NextActionList(Vec<u8>),
    /// Tags without a decoder keep their raw value
    Raw(Vec<u8>),
}

impl StkValue {
    /// Decode the value of a tag. Unknown tags and tags without a decoder yield Raw.
    pub fn decode(tag: Option<ComprehensionTag>, value: &[u8]) -> Result<Self, IccErr> {
        let mut buf = OctetBuffer::from_bytes(value);
        let length = value.len();
        let Some(tag) = tag else {
            return Ok(StkValue::Raw(value.to_vec()));
        };

        let decoded = match tag {
            ComprehensionTag::CommandDetails => StkValue::CommandDetails(CommandDetails::from_octetbuf(&mut buf)?),
            ComprehensionTag::DeviceId => StkValue::DeviceIdentities(DeviceIdentities::from_octetbuf(&mut buf)?),
            ComprehensionTag::AlphaId => StkValue::AlphaId(decode_alpha_identifier(value)),
            ComprehensionTag::Duration => StkValue::Duration(StkDuration {
                time_unit: buf.read_field("time_unit")?,
                time_interval: buf.read_field("time_interval")?,
            }),
            ComprehensionTag::Address => StkValue::Address(read_dialling_number(&mut buf, length)?),
            ComprehensionTag::TextString | ComprehensionTag::DefaultText => {
                StkValue::TextString(TextString::from_bytes(value)?)
            }
            ComprehensionTag::Tone => StkValue::Tone(buf.read_field("tone")?),
            ComprehensionTag::Item => match value.split_first() {
                None => StkValue::Item(None),
                Some((&identifier, text)) => {
                    StkValue::Item(Some(StkItem { identifier, text: decode_alpha_identifier(text) }))
                }
            },
            ComprehensionTag::ItemId => StkValue::ItemId(buf.read_field("item_id")?),
            ComprehensionTag::ResponseLength => StkValue::ResponseLength {
                min: buf.read_field("min_length")?,
                max: buf.read_field("max_length")?,
            },
            ComprehensionTag::FileList => {
                let num_files = buf.read_field("num_files")?;
                StkValue::FileList(StkFileList { num_files, files: buf.remaining().to_vec() })
            }
            ComprehensionTag::EventList => {
                StkValue::EventList(if value.is_empty() { None } else { Some(value.to_vec()) })
            }
            ComprehensionTag::IconId => StkValue::IconId(if value.is_empty() {
                None
            } else {
                Some(StkIconId { qualifier: buf.read_field("icon_qualifier")?, identifier: buf.read_field("icon_id")? })
            }),
            ComprehensionTag::IconIdList => match value.split_first() {
                None => StkValue::IconIdList(None),
                Some((&qualifier, ids)) => StkValue::IconIdList(Some(StkIconIdList { qualifier, identifiers: ids.to_vec() })),
            },
            ComprehensionTag::TimerIdentifier => StkValue::TimerId(buf.read_field("timer_id")?),
            ComprehensionTag::TimerValue => {
                let hours = buf.read_swapped_nibble_bcd_num(1)?;
                let minutes = buf.read_swapped_nibble_bcd_num(1)?;
                let seconds = buf.read_swapped_nibble_bcd_num(1)?;
                tracing::trace!("timer value {:02}:{:02}:{:02}", hours, minutes, seconds);
                StkValue::TimerValue(hours * 3600 + minutes * 60 + seconds)
            }
            ComprehensionTag::ImmediateResponse => StkValue::ImmediateResponse,
            ComprehensionTag::Url => StkValue::Url(value.iter().map(|&b| b as char).collect()),
            ComprehensionTag::NextActionIndicator => StkValue::NextActionList(value.to_vec()),
            other => {
                tracing::trace!("no decoder for comprehension tag {}", other);
                StkValue::Raw(value.to_vec())
            }
        };
        Ok(decoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use icc_core::octet_buffer::hex_to_bytes;

    #[test]
    fn test_timer_value() {
        // 01:30:15 in swapped BCD
        let value = StkValue::decode(Some(ComprehensionTag::TimerValue), &[0x10, 0x03, 0x51]).unwrap();
        assert_eq!(value, StkValue::TimerValue(5415));
    }

    #[test]
    fn test_address() {
        let value = StkValue::decode(Some(ComprehensionTag::Address), &hex_to_bytes("911032547698").unwrap()).unwrap();
        assert_eq!(value, StkValue::Address("+0123456789".to_string()));
    }

    #[test]
    fn test_null_values() {
        assert_eq!(StkValue::decode(Some(ComprehensionTag::Item), &[]).unwrap(), StkValue::Item(None));
        assert_eq!(StkValue::decode(Some(ComprehensionTag::EventList), &[]).unwrap(), StkValue::EventList(None));
        assert_eq!(StkValue::decode(Some(ComprehensionTag::IconId), &[]).unwrap(), StkValue::IconId(None));
        assert_eq!(StkValue::decode(None, &[0x01]).unwrap(), StkValue::Raw(vec![0x01]));
    }

    #[test]
    fn test_item() {
        let value = StkValue::decode(Some(ComprehensionTag::Item), &hex_to_bytes("024E657773").unwrap()).unwrap();
        assert_eq!(value, StkValue::Item(Some(StkItem { identifier: 2, text: "News".to_string() })));
    }
}

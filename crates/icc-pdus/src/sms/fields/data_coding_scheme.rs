use core::fmt;

use crate::sms::enums::message_class::MessageClass;
use crate::sms::enums::sms_encoding::SmsEncoding;

/// Message count reported when a DCS only flags "messages waiting"
pub const VOICEMAIL_MESSAGE_COUNT_UNKNOWN: i32 = -1;

const CODING_GROUP_BITS: u8 = 0xF0;
const MWI_ACTIVE_BIT: u8 = 0x08;
const MWI_TYPE_BITS: u8 = 0x03;
const MWI_TYPE_VOICEMAIL: u8 = 0x00;

/// Voicemail waiting indication, from the DCS message waiting groups or UDH IE 0x01
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageWaiting {
    pub active: bool,
    /// The message itself may be discarded after the indication is processed
    pub discard: bool,
    /// Amount of waiting messages, or VOICEMAIL_MESSAGE_COUNT_UNKNOWN
    pub msg_count: i32,
}

/// 3GPP TS 23.038 clause 4, SMS Data Coding Scheme.
/// The encoding and class are derived once from the raw octet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataCodingScheme {
    pub raw: u8,
    pub encoding: SmsEncoding,
    pub message_class: MessageClass,
    pub mwi: Option<MessageWaiting>,
}

impl DataCodingScheme {
    pub fn from_octet(dcs: u8) -> Self {
        let mut message_class = MessageClass::Normal;
        let mut encoding = SmsEncoding::SevenBit;
        let mut mwi = None;

        match dcs & CODING_GROUP_BITS {
            // General data coding and automatic deletion groups share the lower bits layout
            0x00 | 0x10 | 0x20 | 0x30 | 0x40 | 0x50 | 0x60 | 0x70 => {
                if dcs & 0x10 != 0 {
                    message_class = MessageClass::from_dcs_bits(dcs);
                }
                match dcs & 0x0C {
                    0x04 => encoding = SmsEncoding::EightBit,
                    0x08 => encoding = SmsEncoding::Ucs2,
                    _ => {}
                }
            }
            group @ (0xC0 | 0xD0 | 0xE0) => {
                if group == 0xE0 {
                    encoding = SmsEncoding::Ucs2;
                }
                let active = dcs & MWI_ACTIVE_BIT == MWI_ACTIVE_BIT;
                match dcs & MWI_TYPE_BITS {
                    MWI_TYPE_VOICEMAIL => {
                        mwi = Some(MessageWaiting {
                            active,
                            discard: group == 0xC0,
                            msg_count: if active { VOICEMAIL_MESSAGE_COUNT_UNKNOWN } else { 0 },
                        });
                    }
                    other => tracing::debug!("MWI in DCS for indication type {}, ignored", other),
                }
            }
            0xF0 => {
                if dcs & 0x04 != 0 {
                    encoding = SmsEncoding::EightBit;
                }
                message_class = MessageClass::from_dcs_bits(dcs);
            }
            _ => {
                // Reserved groups fall back to the 7 bit default alphabet
            }
        }

        DataCodingScheme { raw: dcs, encoding, message_class, mwi }
    }

    /// Plain DCS for the given encoding, no class
    pub fn for_encoding(encoding: SmsEncoding) -> Self {
        Self::from_octet(encoding.into_raw() as u8)
    }
}

impl fmt::Display for DataCodingScheme {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "DataCodingScheme {{ raw: 0x{:02x} encoding: {} message_class: {} mwi: {:?} }}",
            self.raw, self.encoding, self.message_class, self.mwi
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_general_groups() {
        let dcs = DataCodingScheme::from_octet(0x00);
        assert_eq!(dcs.encoding, SmsEncoding::SevenBit);
        assert_eq!(dcs.message_class, MessageClass::Normal);

        let dcs = DataCodingScheme::from_octet(0x18);
        assert_eq!(dcs.encoding, SmsEncoding::Ucs2);
        assert_eq!(dcs.message_class, MessageClass::Class0);

        let dcs = DataCodingScheme::from_octet(0xF6);
        assert_eq!(dcs.encoding, SmsEncoding::EightBit);
        assert_eq!(dcs.message_class, MessageClass::Class2);
    }

    #[test]
    fn test_message_waiting_groups() {
        // Discard group, voicemail active
        let dcs = DataCodingScheme::from_octet(0xC8);
        assert_eq!(
            dcs.mwi,
            Some(MessageWaiting { active: true, discard: true, msg_count: VOICEMAIL_MESSAGE_COUNT_UNKNOWN })
        );

        // Store group with UCS2, voicemail cleared
        let dcs = DataCodingScheme::from_octet(0xE0);
        assert_eq!(dcs.encoding, SmsEncoding::Ucs2);
        assert_eq!(dcs.mwi, Some(MessageWaiting { active: false, discard: false, msg_count: 0 }));

        // Fax indications carry no voicemail state
        assert_eq!(DataCodingScheme::from_octet(0xD9).mwi, None);
    }
}

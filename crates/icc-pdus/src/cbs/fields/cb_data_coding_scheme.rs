use core::fmt;

use icc_core::IccErr;

use crate::sms::enums::message_class::MessageClass;
use crate::sms::enums::sms_encoding::SmsEncoding;

/// 3GPP TS 23.038 clause 5, language group 0000
const LANG_GROUP_1: [Option<&str>; 16] = [
    Some("de"),
    Some("en"),
    Some("it"),
    Some("fr"),
    Some("es"),
    Some("nl"),
    Some("sv"),
    Some("da"),
    Some("pt"),
    Some("fi"),
    Some("no"),
    Some("el"),
    Some("tr"),
    Some("hu"),
    Some("pl"),
    None,
];

/// Language group 0010
const LANG_GROUP_2: [Option<&str>; 16] = [
    Some("cs"),
    Some("he"),
    Some("ar"),
    Some("ru"),
    Some("is"),
    None,
    None,
    None,
    None,
    None,
    None,
    None,
    None,
    None,
    None,
    None,
];

/// 3GPP TS 23.038 clause 5, CBS Data Coding Scheme.
/// Reserved codings are treated as the 7 bit default alphabet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CbDataCodingScheme {
    pub raw: u8,
    pub encoding: SmsEncoding,
    pub message_class: MessageClass,
    /// ISO 639 language from the DCS itself
    pub language: Option<&'static str>,
    /// The language is carried in the first characters of the body
    pub has_language_indicator: bool,
}

impl CbDataCodingScheme {
    pub fn from_octet(dcs: u8) -> Result<Self, IccErr> {
        let mut encoding = SmsEncoding::SevenBit;
        let mut message_class = MessageClass::Normal;
        let mut language = None;
        let mut has_language_indicator = false;

        match dcs & 0xF0 {
            0x00 => language = LANG_GROUP_1[(dcs & 0x0F) as usize],
            0x10 => match dcs & 0x0F {
                0x00 => has_language_indicator = true,
                0x01 => {
                    encoding = SmsEncoding::Ucs2;
                    has_language_indicator = true;
                }
                _ => {}
            },
            0x20 => language = LANG_GROUP_2[(dcs & 0x0F) as usize],
            // 0x60 and 0x70 are compressed, not supported
            0x40 | 0x50 | 0x90 => {
                encoding = match dcs & 0x0C {
                    0x04 => SmsEncoding::EightBit,
                    0x08 => SmsEncoding::Ucs2,
                    _ => SmsEncoding::SevenBit,
                };
                message_class = MessageClass::from_dcs_bits(dcs);
            }
            0xF0 => {
                if dcs & 0x04 != 0 {
                    encoding = SmsEncoding::EightBit;
                }
                message_class = match dcs & 0x03 {
                    0x01 => MessageClass::User1,
                    0x02 => MessageClass::User2,
                    0x03 => MessageClass::Class3,
                    _ => MessageClass::Normal,
                };
            }
            0x30 | 0x80 | 0xA0 | 0xB0 | 0xC0 => {}
            _ => {
                return Err(IccErr::InvalidValue { field: "cb_dcs", value: dcs as u64 });
            }
        }

        Ok(CbDataCodingScheme { raw: dcs, encoding, message_class, language, has_language_indicator })
    }
}

impl fmt::Display for CbDataCodingScheme {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "CbDataCodingScheme {{ raw: 0x{:02x} encoding: {} message_class: {} language: {:?} has_language_indicator: {} }}",
            self.raw, self.encoding, self.message_class, self.language, self.has_language_indicator
        )
    }
}

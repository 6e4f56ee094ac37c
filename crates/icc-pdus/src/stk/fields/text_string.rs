use icc_core::gsm_alphabet::NL_IDENTIFIER_DEFAULT;
use icc_core::text_codec::decode_8bit_unpacked;
use icc_core::{IccErr, OctetBuffer};

/// Data coding scheme values of a Text String object, masked with 0x0C
pub const STK_TEXT_CODING_GSM_7BIT_PACKED: u8 = 0x00;
pub const STK_TEXT_CODING_GSM_8BIT: u8 = 0x04;
pub const STK_TEXT_CODING_UCS2: u8 = 0x08;

/// Text string, ETSI TS 102.223 clause 8.15. Also used for Default Text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextString {
    /// Absent for a null text string
    pub coding: Option<u8>,
    pub text: Option<String>,
}

impl TextString {
    /// Decode the value part of a Text String object
    pub fn from_bytes(value: &[u8]) -> Result<Self, IccErr> {
        let Some((&coding, text)) = value.split_first() else {
            return Ok(TextString::default());
        };
        let decoded = match coding & 0x0C {
            STK_TEXT_CODING_GSM_7BIT_PACKED => {
                let mut buf = OctetBuffer::from_bytes(text);
                Some(buf.read_septets(text.len() * 8 / 7, 0, NL_IDENTIFIER_DEFAULT, NL_IDENTIFIER_DEFAULT)?)
            }
            STK_TEXT_CODING_GSM_8BIT => Some(decode_8bit_unpacked(text)),
            STK_TEXT_CODING_UCS2 => Some(OctetBuffer::from_bytes(text).read_ucs2(text.len())?),
            _ => {
                tracing::debug!("reserved text string coding 0x{:02x}", coding);
                None
            }
        };
        Ok(TextString { coding: Some(coding), text: decoded })
    }

    /// Empty or null text strings carry no usable text
    pub fn is_empty(&self) -> bool {
        self.text.as_deref().is_none_or(str::is_empty)
    }
}

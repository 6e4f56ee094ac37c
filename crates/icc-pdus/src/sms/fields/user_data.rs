use core::fmt;

use icc_core::gsm_alphabet::NL_IDENTIFIER_DEFAULT;
use icc_core::text_codec::septet_count;
use icc_core::{IccErr, OctetBuffer};

use crate::sms::enums::sms_encoding::SmsEncoding;
use crate::sms::fields::user_data_header::UserDataHeader;

/// Maximum septets in a single 7 bit user data field
pub const MAX_USER_DATA_7BIT: usize = 160;
/// Maximum octets in a single 8 bit or UCS2 user data field
pub const MAX_USER_DATA_OCTETS: usize = 140;

/// Septets occupied by a header of `header_octets` octets (UDHL included), and the fill bits after it
pub fn header_septets_and_padding(header_octets: usize) -> (usize, u8) {
    let header_bits = header_octets * 8;
    let header_septets = header_bits.div_ceil(7);
    (header_septets, (header_septets * 7 - header_bits) as u8)
}

/// TP-User-Data: optional header, then text (7 bit, UCS2) or raw octets (8 bit)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserData {
    pub header: Option<UserDataHeader>,
    pub body: Option<String>,
    pub data: Option<Vec<u8>>,
}

impl UserData {
    pub fn text(body: &str) -> Self {
        UserData { header: None, body: Some(body.to_string()), data: None }
    }

    /// Parse user data. `length` is TP-UDL: septets for 7 bit, octets otherwise.
    pub fn from_octetbuf(buf: &mut OctetBuffer, udhi: bool, encoding: SmsEncoding, length: usize) -> Result<Self, IccErr> {
        let mut ud = UserData::default();
        let mut length = length as i64;
        let mut padding_bits = 0;

        if udhi {
            let header = UserDataHeader::from_octetbuf(buf)?;
            let header_octets = header.length as usize + 1;
            if encoding == SmsEncoding::SevenBit {
                let (header_septets, padding) = header_septets_and_padding(header_octets);
                length -= header_septets as i64;
                padding_bits = padding;
            } else {
                length -= header_octets as i64;
            }
            ud.header = Some(header);
        }
        tracing::trace!("{} units of user data after header", length);

        if length <= 0 {
            return Ok(ud);
        }
        let length = length as usize;

        let (lang, lang_shift) = match &ud.header {
            Some(h) => (h.lang_index, h.lang_shift_index),
            None => (NL_IDENTIFIER_DEFAULT, NL_IDENTIFIER_DEFAULT),
        };
        match encoding {
            SmsEncoding::SevenBit => {
                if length > MAX_USER_DATA_7BIT {
                    tracing::warn!("user data too long: {} septets", length);
                    return Ok(ud);
                }
                ud.body = Some(buf.read_septets(length, padding_bits, lang, lang_shift)?);
            }
            SmsEncoding::EightBit => ud.data = Some(buf.read_octets(length)?),
            SmsEncoding::Ucs2 => ud.body = Some(buf.read_ucs2(length)?),
        }
        Ok(ud)
    }

    /// Value of TP-UDL for this user data in the given encoding
    pub fn compute_udl(&self, encoding: SmsEncoding) -> Result<usize, IccErr> {
        let header_octets = self.header.as_ref().map(|h| h.length as usize + 1).unwrap_or(0);
        match encoding {
            SmsEncoding::SevenBit => {
                let (lang, shift) = self.languages();
                let body = self.body.as_deref().unwrap_or("");
                let body_septets = septet_count(body, lang, shift)
                    .ok_or(IccErr::InvalidArguments { reason: "body not encodable as 7 bit" })?;
                let (header_septets, _) = if header_octets > 0 { header_septets_and_padding(header_octets) } else { (0, 0) };
                Ok(header_septets + body_septets)
            }
            SmsEncoding::EightBit => Ok(header_octets + self.data.as_ref().map(|d| d.len()).unwrap_or(0)),
            SmsEncoding::Ucs2 => {
                let units = self.body.as_deref().map(|b| b.encode_utf16().count()).unwrap_or(0);
                Ok(header_octets + units * 2)
            }
        }
    }

    /// Serialize TP-UDL followed by TP-UD
    pub fn to_octetbuf(&self, buf: &mut OctetBuffer, encoding: SmsEncoding) -> Result<(), IccErr> {
        let udl = self.compute_udl(encoding)?;
        buf.write_octet(udl as u8);

        let seven_bit = encoding == SmsEncoding::SevenBit;
        let mut padding_bits = 0;
        if let Some(header) = &self.header {
            header.to_octetbuf(buf, seven_bit)?;
            padding_bits = header_septets_and_padding(header.length as usize + 1).1;
        }

        match encoding {
            SmsEncoding::SevenBit => {
                let (lang, shift) = self.languages();
                if let Some(body) = &self.body {
                    buf.write_septets(body, padding_bits, lang, shift)?;
                }
            }
            SmsEncoding::EightBit => {
                if let Some(data) = &self.data {
                    buf.write_octets(data);
                }
            }
            SmsEncoding::Ucs2 => {
                if let Some(body) = &self.body {
                    buf.write_ucs2(body);
                }
            }
        }
        Ok(())
    }

    fn languages(&self) -> (u8, u8) {
        match &self.header {
            Some(h) => (h.lang_index, h.lang_shift_index),
            None => (NL_IDENTIFIER_DEFAULT, NL_IDENTIFIER_DEFAULT),
        }
    }
}

impl fmt::Display for UserData {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "UserData {{ header: {:?} body: {:?} data: {:?} }}", self.header, self.body, self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sms::fields::user_data_header::Concatenation;
    use icc_core::debug;

    #[test]
    fn test_header_padding() {
        // 6 header octets occupy 7 septets with one fill bit
        assert_eq!(header_septets_and_padding(6), (7, 1));
        assert_eq!(header_septets_and_padding(7), (8, 0));
    }

    #[test]
    fn test_septets_after_header() {
        debug::setup_logging_verbose();
        let mut header = UserDataHeader::default();
        header.concatenation = Some(Concatenation { reference: 7, max_seq: 2, seq: 2, ref_16bit: false });
        header.length = header.compute_length(true);
        let ud = UserData { header: Some(header), body: Some("Part two".to_string()), data: None };

        let mut buf = OctetBuffer::new();
        ud.to_octetbuf(&mut buf, SmsEncoding::SevenBit).unwrap();
        // 7 header septets + 8 body septets
        assert_eq!(buf.as_bytes()[0], 15);

        let udl = buf.read_octet().unwrap() as usize;
        let decoded = UserData::from_octetbuf(&mut buf, true, SmsEncoding::SevenBit, udl).unwrap();
        assert_eq!(decoded, ud);
    }

    #[test]
    fn test_ucs2_with_header_only() {
        // UDHL 5 plus length octet consume the whole UDL
        let mut buf = OctetBuffer::from_hex("050003010201").unwrap();
        let ud = UserData::from_octetbuf(&mut buf, true, SmsEncoding::Ucs2, 6).unwrap();
        assert!(ud.header.is_some());
        assert_eq!(ud.body, None);
    }
}

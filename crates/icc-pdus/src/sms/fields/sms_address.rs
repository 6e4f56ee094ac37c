use core::fmt;

use icc_core::bcd::string_to_extended_bcd;
use icc_core::gsm_alphabet::NL_IDENTIFIER_DEFAULT;
use icc_core::{IccErr, OctetBuffer};

use crate::sms::enums::type_of_number::TypeOfNumber;

/// Unknown type of number, ISDN/telephony numbering plan
pub const TOA_ISDN: u8 = 0x81;
/// International type of number, ISDN/telephony numbering plan
pub const TOA_INTERNATIONAL: u8 = 0x91;
/// Alphanumeric type of number (GSM 7 bit packed)
pub const TOA_ALPHANUMERIC: u8 = 0xD0;

/// 3GPP TS 23.040 clause 9.1.2.5 address field (TP-OA, TP-DA, TP-RA) and the RP-SMSC address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmsAddress {
    /// Type-of-address octet
    pub toa: u8,
    /// Dialable digits, '+' prefixed for international numbers. Decoded text for alphanumeric addresses.
    pub address: String,
}

impl SmsAddress {
    /// Build an address for a dialable number. A leading '+' selects the international TOA.
    pub fn from_number(number: &str) -> Self {
        let toa = if number.starts_with('+') { TOA_INTERNATIONAL } else { TOA_ISDN };
        let digits: String = number.chars().filter(|c| matches!(c, '0'..='9' | '*' | '#' | ',' | ';')).collect();
        let address = if toa == TOA_INTERNATIONAL { format!("+{}", digits) } else { digits };
        SmsAddress { toa, address }
    }

    pub fn type_of_number(&self) -> TypeOfNumber {
        TypeOfNumber::from_toa(self.toa)
    }

    pub fn is_alphanumeric(&self) -> bool {
        self.type_of_number() == TypeOfNumber::Alphanumeric
    }

    /// The address without the '+' prefix
    pub fn digits(&self) -> &str {
        self.address.strip_prefix('+').unwrap_or(&self.address)
    }

    /// Parse a TP address. `len` is the amount of useful semi-octets in the address value.
    pub fn from_octetbuf(buf: &mut OctetBuffer, len: u8) -> Result<Self, IccErr> {
        let pairs = (len as usize).div_ceil(2);
        let toa = buf.read_field("toa")?;

        if TypeOfNumber::from_toa(toa) == TypeOfNumber::Alphanumeric {
            let raw = buf.read_octets(pairs)?;
            let mut sub = OctetBuffer::from_vec(raw);
            let address = sub.read_septets(pairs * 8 / 7, 0, NL_IDENTIFIER_DEFAULT, NL_IDENTIFIER_DEFAULT)?;
            return Ok(SmsAddress { toa, address });
        }

        let digits = buf.read_swapped_nibble_extended_bcd_string(pairs, false)?;
        if digits.is_empty() {
            tracing::debug!("address without digits, toa 0x{:02x}", toa);
        }
        let address = if TypeOfNumber::from_toa(toa) == TypeOfNumber::International && !digits.is_empty() {
            format!("+{}", digits)
        } else {
            digits
        };
        Ok(SmsAddress { toa, address })
    }

    /// Serialize as a TP address: semi-octet count, type-of-address, value
    pub fn to_octetbuf(&self, buf: &mut OctetBuffer) -> Result<(), IccErr> {
        if self.is_alphanumeric() {
            let mut packed = OctetBuffer::new();
            packed.write_septets(&self.address, 0, NL_IDENTIFIER_DEFAULT, NL_IDENTIFIER_DEFAULT)?;
            let septets = icc_core::text_codec::septet_count(&self.address, NL_IDENTIFIER_DEFAULT, NL_IDENTIFIER_DEFAULT)
                .ok_or(IccErr::InvalidArguments { reason: "alphanumeric address" })?;
            buf.write_octet((septets * 7).div_ceil(4) as u8);
            buf.write_octet(self.toa);
            buf.write_octets(packed.as_bytes());
            return Ok(());
        }

        let bcd = string_to_extended_bcd(self.digits());
        buf.write_octet(bcd.len() as u8);
        buf.write_octet(self.toa);
        buf.write_swapped_nibble_bcd(&bcd)
    }

    /// Parse the RP-SMSC address that precedes the TPDU. Returns None when its length octet is 0.
    pub fn from_octetbuf_smsc(buf: &mut OctetBuffer) -> Result<Option<Self>, IccErr> {
        let len = buf.read_field("smsc_length")?;
        if len == 0 {
            return Ok(None);
        }
        let toa = buf.read_field("smsc_toa")?;
        let digits = buf.read_swapped_nibble_extended_bcd_string(len as usize - 1, false)?;
        let address = if toa >> 4 == TOA_INTERNATIONAL >> 4 { format!("+{}", digits) } else { digits };
        Ok(Some(SmsAddress { toa, address }))
    }

    /// Serialize as RP-SMSC address. The length octet counts the type-of-address octet and the value.
    pub fn to_octetbuf_smsc(smsc: Option<&SmsAddress>, buf: &mut OctetBuffer) -> Result<(), IccErr> {
        let Some(smsc) = smsc else {
            buf.write_octet(0);
            return Ok(());
        };
        let bcd = string_to_extended_bcd(smsc.digits());
        buf.write_octet((1 + bcd.len().div_ceil(2)) as u8);
        buf.write_octet(smsc.toa);
        buf.write_swapped_nibble_bcd(&bcd)
    }
}

impl fmt::Display for SmsAddress {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "SmsAddress {{ toa: 0x{:02x} address: {:?} }}", self.toa, self.address)
    }
}

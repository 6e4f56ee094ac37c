use core::fmt;

use icc_core::gsm_alphabet::{NL_IDENTIFIER_DEFAULT, index_of, locking_table};
use icc_core::text_codec::septet_count;
use icc_core::{IccErr, OctetBuffer};

use crate::sms::enums::message_type_indicator::MessageTypeIndicator;
use crate::sms::enums::sms_encoding::SmsEncoding;
use crate::sms::fields::data_coding_scheme::DataCodingScheme;
use crate::sms::fields::sms_address::SmsAddress;
use crate::sms::fields::user_data::{MAX_USER_DATA_7BIT, MAX_USER_DATA_OCTETS, UserData, header_septets_and_padding};
use crate::sms::fields::user_data_header::{Concatenation, UserDataHeader};
use crate::sms::pdus::sms_deliver::{FO_RP, FO_SRI_SRR, FO_UDHI};

const FO_RD: u8 = 0x04;
const FO_VPF_SHIFT: u8 = 3;

/// Representation of the SMS-SUBMIT TPDU (3GPP TS 23.040 clause 9.2.2.2).
/// Conveys a short message from the MS to the SC.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmsSubmit {
    /// 1 bit, TP-RD
    pub reject_duplicates: bool,
    /// 2 bits, TP-VPF. 0: absent, 2: relative, 1 / 3: 7 octet enhanced / absolute
    pub validity_period_format: u8,
    /// 1 bit, TP-SRR
    pub status_report_request: bool,
    /// 1 bit, TP-RP
    pub reply_path: bool,
    /// 1 octet, TP-MR
    pub message_reference: u8,
    /// 2-12 octets, TP-DA
    pub destination_address: SmsAddress,
    /// 1 octet, TP-PID
    pub pid: u8,
    /// 1 octet, TP-DCS
    pub dcs: DataCodingScheme,
    /// 0, 1 or 7 octets, TP-VP, kept raw
    pub validity_period: Vec<u8>,
    pub user_data: UserData,
}

impl SmsSubmit {
    /// Parse from OctetBuffer, positioned after the first octet
    pub fn from_octetbuf(buffer: &mut OctetBuffer, first_octet: u8) -> Result<Self, IccErr> {
        let validity_period_format = (first_octet >> FO_VPF_SHIFT) & 0x03;
        let message_reference = buffer.read_field("mr")?;
        let da_len = buffer.read_field("da_length")?;
        let destination_address = SmsAddress::from_octetbuf(buffer, da_len)?;
        let pid = buffer.read_field("pid")?;
        let dcs = DataCodingScheme::from_octet(buffer.read_field("dcs")?);
        let vp_len = match validity_period_format {
            0 => 0,
            2 => 1,
            _ => 7,
        };
        let validity_period = buffer.read_octets(vp_len)?;

        let udl = buffer.read_field("udl")? as usize;
        let user_data = if udl > 0 {
            UserData::from_octetbuf(buffer, first_octet & FO_UDHI != 0, dcs.encoding, udl)?
        } else {
            UserData::default()
        };

        Ok(SmsSubmit {
            reject_duplicates: first_octet & FO_RD != 0,
            validity_period_format,
            status_report_request: first_octet & FO_SRI_SRR != 0,
            reply_path: first_octet & FO_RP != 0,
            message_reference,
            destination_address,
            pid,
            dcs,
            validity_period,
            user_data,
        })
    }

    pub fn first_octet(&self) -> u8 {
        let mut fo = MessageTypeIndicator::Submit.into_raw() as u8;
        if self.reject_duplicates {
            fo |= FO_RD;
        }
        fo |= (self.validity_period_format & 0x03) << FO_VPF_SHIFT;
        if self.status_report_request {
            fo |= FO_SRI_SRR;
        }
        if self.user_data.header.is_some() {
            fo |= FO_UDHI;
        }
        if self.reply_path {
            fo |= FO_RP;
        }
        fo
    }

    /// Serialize this TPDU, first octet included
    pub fn to_octetbuf(&self, buffer: &mut OctetBuffer) -> Result<(), IccErr> {
        buffer.write_octet(self.first_octet());
        buffer.write_octet(self.message_reference);
        self.destination_address.to_octetbuf(buffer)?;
        buffer.write_octet(self.pid);
        buffer.write_octet(self.dcs.raw);
        buffer.write_octets(&self.validity_period);
        self.user_data.to_octetbuf(buffer, self.dcs.encoding)
    }
}

impl fmt::Display for SmsSubmit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "SmsSubmit {{ reject_duplicates: {} validity_period_format: {} status_report_request: {} reply_path: {} message_reference: {} destination_address: {} pid: 0x{:02x} dcs: {} validity_period: {:02X?} user_data: {} }}",
            self.reject_duplicates,
            self.validity_period_format,
            self.status_report_request,
            self.reply_path,
            self.message_reference,
            self.destination_address,
            self.pid,
            self.dcs,
            self.validity_period,
            self.user_data,
        )
    }
}

/// Everything needed to encode one outgoing SMS-SUBMIT.
/// `user_data_header_length` and `encoded_body_length` are pre-computed by the caller
/// (see `SubmitOptions::for_text` and `segment_text`) and checked on encode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOptions {
    pub number: String,
    pub body: Option<String>,
    /// Payload for 8 bit messages
    pub data: Option<Vec<u8>>,
    pub encoding: SmsEncoding,
    /// UDHL, 0 for no header
    pub user_data_header_length: u8,
    /// Septets for 7 bit, octets otherwise
    pub encoded_body_length: usize,
    pub lang_index: u8,
    pub lang_shift_index: u8,
    pub request_status_report: bool,
    pub segment_ref: u16,
    pub segment_ref_16bit: bool,
    /// 1-based
    pub segment_seq: u8,
    pub segment_max_seq: u8,
}

impl SubmitOptions {
    /// Single part message. 7 bit default alphabet when possible, UCS2 otherwise.
    pub fn for_text(number: &str, text: &str) -> Self {
        let (encoding, encoded_body_length) = match septet_count(text, NL_IDENTIFIER_DEFAULT, NL_IDENTIFIER_DEFAULT) {
            Some(septets) => (SmsEncoding::SevenBit, septets),
            None => (SmsEncoding::Ucs2, text.encode_utf16().count() * 2),
        };
        SubmitOptions {
            number: number.to_string(),
            body: Some(text.to_string()),
            data: None,
            encoding,
            user_data_header_length: 0,
            encoded_body_length,
            lang_index: NL_IDENTIFIER_DEFAULT,
            lang_shift_index: NL_IDENTIFIER_DEFAULT,
            request_status_report: false,
            segment_ref: 0,
            segment_ref_16bit: false,
            segment_seq: 0,
            segment_max_seq: 1,
        }
    }

    /// Binary payload, sent with 8 bit DCS
    pub fn for_data(number: &str, data: &[u8]) -> Self {
        SubmitOptions {
            number: number.to_string(),
            body: None,
            data: Some(data.to_vec()),
            encoding: SmsEncoding::EightBit,
            user_data_header_length: 0,
            encoded_body_length: data.len(),
            lang_index: NL_IDENTIFIER_DEFAULT,
            lang_shift_index: NL_IDENTIFIER_DEFAULT,
            request_status_report: false,
            segment_ref: 0,
            segment_ref_16bit: false,
            segment_seq: 0,
            segment_max_seq: 1,
        }
    }

    fn build_header(&self) -> Option<UserDataHeader> {
        let mut header = UserDataHeader::default();
        let mut present = false;
        if self.segment_max_seq > 1 {
            header.concatenation = Some(Concatenation {
                reference: self.segment_ref,
                max_seq: self.segment_max_seq,
                seq: self.segment_seq,
                ref_16bit: self.segment_ref_16bit,
            });
            present = true;
        }
        if self.encoding == SmsEncoding::SevenBit {
            header.lang_index = self.lang_index;
            header.lang_shift_index = self.lang_shift_index;
            present |= self.lang_index != NL_IDENTIFIER_DEFAULT || self.lang_shift_index != NL_IDENTIFIER_DEFAULT;
        }
        present.then_some(header)
    }

    /// UDHL implied by the segment and language settings
    pub fn compute_header_length(&self) -> u8 {
        self.build_header()
            .map(|h| h.compute_length(self.encoding == SmsEncoding::SevenBit))
            .unwrap_or(0)
    }
}

/// Encode an SMS-SUBMIT TPDU: MR 0, PID 0, no validity period
pub fn encode_submit(options: &SubmitOptions) -> Result<Vec<u8>, IccErr> {
    let mut header = options.build_header();
    match header.as_mut() {
        Some(h) => h.length = options.user_data_header_length,
        None if options.user_data_header_length != 0 => {
            return Err(IccErr::InconsistentLength { expected: 0, found: options.user_data_header_length as usize });
        }
        None => {}
    }

    let user_data = UserData {
        header,
        body: options.body.clone(),
        data: options.data.clone(),
    };
    let body_only = UserData { header: None, ..user_data.clone() };
    let body_len = body_only.compute_udl(options.encoding)?;
    if body_len != options.encoded_body_length {
        return Err(IccErr::InconsistentLength { expected: body_len, found: options.encoded_body_length });
    }

    let submit = SmsSubmit {
        reject_duplicates: false,
        validity_period_format: 0,
        status_report_request: options.request_status_report,
        reply_path: false,
        message_reference: 0,
        destination_address: SmsAddress::from_number(&options.number),
        pid: 0,
        dcs: DataCodingScheme::for_encoding(options.encoding),
        validity_period: Vec::new(),
        user_data,
    };
    tracing::debug!("encode {}", submit);

    let mut buf = OctetBuffer::new();
    submit.to_octetbuf(&mut buf)?;
    Ok(buf.into_bytes())
}

/// Split `text` into SUBMIT options, one per segment. A single segment carries no concatenation header.
pub fn segment_text(number: &str, text: &str, segment_ref: u16, segment_ref_16bit: bool) -> Vec<SubmitOptions> {
    let single = SubmitOptions::for_text(number, text);
    let single_limit = match single.encoding {
        SmsEncoding::SevenBit => MAX_USER_DATA_7BIT,
        _ => MAX_USER_DATA_OCTETS,
    };
    if single.encoded_body_length <= single_limit {
        return vec![single];
    }

    let header_octets = if segment_ref_16bit { 7 } else { 6 };
    let parts: Vec<String> = match single.encoding {
        SmsEncoding::SevenBit => {
            let limit = MAX_USER_DATA_7BIT - header_septets_and_padding(header_octets).0;
            split_by_cost(text, limit, |c| if index_of(locking_table(NL_IDENTIFIER_DEFAULT), c).is_some() { 1 } else { 2 })
        }
        _ => {
            let limit = MAX_USER_DATA_OCTETS - header_octets;
            split_by_cost(text, limit, |c| c.len_utf16() * 2)
        }
    };

    let max_seq = parts.len().min(u8::MAX as usize) as u8;
    parts
        .into_iter()
        .take(max_seq as usize)
        .enumerate()
        .map(|(i, part)| {
            let mut opts = SubmitOptions::for_text(number, &part);
            opts.encoding = single.encoding;
            if opts.encoding == SmsEncoding::Ucs2 {
                opts.encoded_body_length = part.encode_utf16().count() * 2;
            }
            opts.segment_ref = segment_ref;
            opts.segment_ref_16bit = segment_ref_16bit;
            opts.segment_seq = i as u8 + 1;
            opts.segment_max_seq = max_seq;
            opts.user_data_header_length = opts.compute_header_length();
            opts
        })
        .collect()
}

/// Greedy split, never separating a character from its escape or surrogate
fn split_by_cost(text: &str, limit: usize, cost: impl Fn(char) -> usize) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut used = 0;
    for c in text.chars() {
        let n = cost(c);
        if used + n > limit {
            parts.push(std::mem::take(&mut current));
            used = 0;
        }
        current.push(c);
        used += n;
    }
    if !current.is_empty() {
        parts.push(current);
    }
    parts
}

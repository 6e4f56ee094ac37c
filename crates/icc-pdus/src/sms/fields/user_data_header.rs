use core::fmt;

use icc_core::gsm_alphabet::{NL_IDENTIFIER_DEFAULT, has_language_table};
use icc_core::{IccErr, OctetBuffer};

use crate::sms::fields::data_coding_scheme::MessageWaiting;

/// 3GPP TS 23.040 clause 9.2.3.24 information element identifiers
pub const IEI_CONCATENATED_8BIT: u8 = 0x00;
pub const IEI_SPECIAL_SMS_MESSAGE_INDICATION: u8 = 0x01;
pub const IEI_PORT_ADDRESSING_8BIT: u8 = 0x04;
pub const IEI_PORT_ADDRESSING_16BIT: u8 = 0x05;
pub const IEI_CONCATENATED_16BIT: u8 = 0x08;
pub const IEI_NATIONAL_LANGUAGE_SINGLE_SHIFT: u8 = 0x24;
pub const IEI_NATIONAL_LANGUAGE_LOCKING_SHIFT: u8 = 0x25;

/// 8 bit ports below this value are reserved
const RESERVED_8BIT_PORTS: u16 = 240;
/// 16 bit ports from this value on are reserved
const VALID_16BIT_PORTS: u16 = 49152;
/// Storage type bit of the special SMS message indication
const MWI_STORE_TYPE_BIT: u8 = 0x80;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Concatenation {
    pub reference: u16,
    /// Total amount of segments
    pub max_seq: u8,
    /// 1-based sequence number of this segment
    pub seq: u8,
    /// Reference was carried in IE 0x08
    pub ref_16bit: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortAddressing {
    pub destination_port: u16,
    pub originator_port: u16,
}

/// Special SMS message indication (IE 0x01)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecialMessageIndication {
    /// Storage type bit set: the message must be stored
    pub store: bool,
    pub msg_count: u8,
}

impl SpecialMessageIndication {
    /// Combine with a MWI already derived from the DCS. The UDH wins, except that a
    /// discard request does not override an earlier decision.
    pub fn apply(&self, dcs_mwi: Option<MessageWaiting>) -> MessageWaiting {
        let discard = if self.store {
            false
        } else {
            dcs_mwi.map(|m| m.discard).unwrap_or(true)
        };
        MessageWaiting {
            active: self.msg_count > 0,
            discard,
            msg_count: self.msg_count as i32,
        }
    }
}

/// 3GPP TS 23.040 clause 9.2.3.24 TP-User-Data-Header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDataHeader {
    /// UDHL, excluding the length octet itself
    pub length: u8,
    /// Locking shift table index
    pub lang_index: u8,
    /// Single shift table index
    pub lang_shift_index: u8,
    pub concatenation: Option<Concatenation>,
    pub ports: Option<PortAddressing>,
    pub special_message: Option<SpecialMessageIndication>,
}

impl Default for UserDataHeader {
    fn default() -> Self {
        UserDataHeader {
            length: 0,
            lang_index: NL_IDENTIFIER_DEFAULT,
            lang_shift_index: NL_IDENTIFIER_DEFAULT,
            concatenation: None,
            ports: None,
            special_message: None,
        }
    }
}

impl UserDataHeader {
    /// Parse a header, starting at the UDHL octet
    pub fn from_octetbuf(buf: &mut OctetBuffer) -> Result<Self, IccErr> {
        let mut header = UserDataHeader::default();
        header.length = buf.read_field("udhl")?;
        tracing::trace!("UDH length {}", header.length);

        let mut data_available = header.length as i32;
        while data_available >= 2 {
            let id = buf.read_field("iei")?;
            let length = buf.read_field("iel")?;
            data_available -= 2;

            match id {
                IEI_CONCATENATED_8BIT => {
                    let reference = buf.read_field("concat_ref")? as u16;
                    let max_seq = buf.read_field("concat_max")?;
                    let seq = buf.read_field("concat_seq")?;
                    data_available -= 3;
                    if max_seq != 0 && seq != 0 && seq <= max_seq {
                        header.concatenation = Some(Concatenation { reference, max_seq, seq, ref_16bit: false });
                    }
                }
                IEI_CONCATENATED_16BIT => {
                    let reference = buf.read_u16("concat_ref")?;
                    let max_seq = buf.read_field("concat_max")?;
                    let seq = buf.read_field("concat_seq")?;
                    data_available -= 4;
                    if max_seq != 0 && seq != 0 && seq <= max_seq {
                        header.concatenation = Some(Concatenation { reference, max_seq, seq, ref_16bit: true });
                    }
                }
                IEI_PORT_ADDRESSING_8BIT => {
                    let destination_port = buf.read_field("dst_port")? as u16;
                    let originator_port = buf.read_field("orig_port")? as u16;
                    data_available -= 2;
                    // Reserved values are ignored, the IE is dropped
                    if destination_port >= RESERVED_8BIT_PORTS && originator_port >= RESERVED_8BIT_PORTS {
                        header.ports = Some(PortAddressing { destination_port, originator_port });
                    }
                }
                IEI_PORT_ADDRESSING_16BIT => {
                    let destination_port = buf.read_u16("dst_port")?;
                    let originator_port = buf.read_u16("orig_port")?;
                    data_available -= 4;
                    // Some carriers use reserved originator ports for WAP push; kept anyway
                    if destination_port >= VALID_16BIT_PORTS || originator_port >= VALID_16BIT_PORTS {
                        tracing::warn!("reserved port numbers [{}, {}]", destination_port, originator_port);
                    }
                    header.ports = Some(PortAddressing { destination_port, originator_port });
                }
                IEI_NATIONAL_LANGUAGE_SINGLE_SHIFT => {
                    let index = buf.read_field("lang_shift_index")?;
                    data_available -= 1;
                    if has_language_table(index) {
                        header.lang_shift_index = index;
                    }
                }
                IEI_NATIONAL_LANGUAGE_LOCKING_SHIFT => {
                    let index = buf.read_field("lang_index")?;
                    data_available -= 1;
                    if has_language_table(index) {
                        header.lang_index = index;
                    }
                }
                IEI_SPECIAL_SMS_MESSAGE_INDICATION => {
                    let indication = buf.read_field("msg_ind")?;
                    let msg_count = buf.read_field("msg_count")?;
                    data_available -= 2;
                    header.special_message = Some(SpecialMessageIndication {
                        store: indication & MWI_STORE_TYPE_BIT != 0,
                        msg_count,
                    });
                }
                _ => {
                    let skipped = buf.read_slice(length as usize)?;
                    tracing::debug!("unsupported IEI 0x{:02x}, skipped {:02X?}", id, skipped);
                    data_available -= length as i32;
                }
            }
        }

        if data_available != 0 {
            return Err(IccErr::MalformedPdu { field: "udh", reason: "illegal user data header" });
        }
        Ok(header)
    }

    /// UDHL for the information elements this header carries, given the message encoding
    pub fn compute_length(&self, seven_bit: bool) -> u8 {
        let mut len = 0;
        if let Some(c) = &self.concatenation {
            if c.max_seq > 1 {
                len += if c.ref_16bit { 6 } else { 5 };
            }
        }
        if let Some(p) = &self.ports {
            len += if p.destination_port > 0xFF || p.originator_port > 0xFF { 6 } else { 4 };
        }
        if self.special_message.is_some() {
            len += 4;
        }
        if seven_bit {
            if self.lang_index != NL_IDENTIFIER_DEFAULT {
                len += 3;
            }
            if self.lang_shift_index != NL_IDENTIFIER_DEFAULT {
                len += 3;
            }
        }
        len
    }

    /// Serialize. `length` must already hold the value from compute_length.
    pub fn to_octetbuf(&self, buf: &mut OctetBuffer, seven_bit: bool) -> Result<(), IccErr> {
        let expected = self.compute_length(seven_bit);
        if self.length != expected {
            return Err(IccErr::InconsistentLength { expected: expected as usize, found: self.length as usize });
        }
        buf.write_octet(self.length);

        if let Some(c) = &self.concatenation {
            if c.max_seq > 1 {
                if c.ref_16bit {
                    buf.write_octet(IEI_CONCATENATED_16BIT);
                    buf.write_octet(4);
                    buf.write_octet((c.reference >> 8) as u8);
                } else {
                    buf.write_octet(IEI_CONCATENATED_8BIT);
                    buf.write_octet(3);
                }
                buf.write_octet((c.reference & 0xFF) as u8);
                buf.write_octet(c.max_seq);
                buf.write_octet(c.seq);
            }
        }
        if let Some(p) = &self.ports {
            if p.destination_port > 0xFF || p.originator_port > 0xFF {
                buf.write_octet(IEI_PORT_ADDRESSING_16BIT);
                buf.write_octet(4);
                buf.write_u16(p.destination_port);
                buf.write_u16(p.originator_port);
            } else {
                buf.write_octet(IEI_PORT_ADDRESSING_8BIT);
                buf.write_octet(2);
                buf.write_octet(p.destination_port as u8);
                buf.write_octet(p.originator_port as u8);
            }
        }
        if let Some(s) = &self.special_message {
            buf.write_octet(IEI_SPECIAL_SMS_MESSAGE_INDICATION);
            buf.write_octet(2);
            buf.write_octet(if s.store { MWI_STORE_TYPE_BIT } else { 0 });
            buf.write_octet(s.msg_count);
        }
        if seven_bit {
            if self.lang_index != NL_IDENTIFIER_DEFAULT {
                buf.write_octet(IEI_NATIONAL_LANGUAGE_LOCKING_SHIFT);
                buf.write_octet(1);
                buf.write_octet(self.lang_index);
            }
            if self.lang_shift_index != NL_IDENTIFIER_DEFAULT {
                buf.write_octet(IEI_NATIONAL_LANGUAGE_SINGLE_SHIFT);
                buf.write_octet(1);
                buf.write_octet(self.lang_shift_index);
            }
        }
        Ok(())
    }
}

impl fmt::Display for UserDataHeader {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "UserDataHeader {{ length: {} lang_index: {} lang_shift_index: {} concatenation: {:?} ports: {:?} special_message: {:?} }}",
            self.length, self.lang_index, self.lang_shift_index, self.concatenation, self.ports, self.special_message
        )
    }
}

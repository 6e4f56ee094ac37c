//! Common PCN Handset Specification 4.2 files: EF_CPHS_INFO, EF_CPHS_CFF, EF_CPHS_ONS and EF_CPHS_ONSF

use icc_core::IccErr;

use crate::icc::fields::alpha_identifier::decode_alpha_identifier;

/// Services of the CPHS service table, numbered from 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CphsService {
    /// Customer service profile
    Csp = 1,
    /// SIM service table, phase 1 only
    Sst = 2,
    /// Mailbox numbers
    Mbn = 3,
    /// Operator name short form, phase 2
    Onsf = 4,
    /// Information numbers, phase 2
    InfoNum = 5,
}

/// EF_CPHS_INFO, CPHS 4.2 clause B.3.1.1: phase, then the service table at two bits
/// per service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CphsInfo {
    pub phase: u8,
    /// Services of other phases already masked out
    pub service_table: Vec<u8>,
}

impl CphsInfo {
    pub fn from_bytes(data: &[u8]) -> Result<Self, IccErr> {
        let Some((&phase, table)) = data.split_first() else {
            return Err(IccErr::OutOfBounds { field: Some("cphs_phase") });
        };
        let mut service_table = table.to_vec();
        match phase {
            1 => {
                // Phase 2 only services
                if let Some(first) = service_table.first_mut() {
                    *first &= 0x3F;
                }
                if let Some(second) = service_table.get_mut(1) {
                    *second = 0x00;
                }
            }
            2 => {
                // Phase 1 only services
                if let Some(first) = service_table.first_mut() {
                    *first &= 0xF3;
                }
            }
            _ => return Err(IccErr::InvalidValue { field: "cphs_phase", value: phase as u64 }),
        }
        Ok(CphsInfo { phase, service_table })
    }

    /// The activated bit of the service
    pub fn is_available(&self, service: CphsService) -> bool {
        let n = service as usize - 1;
        let bitmask = 2u8 << ((n % 4) * 2);
        self.service_table.get(n / 4).is_some_and(|octet| octet & bitmask != 0)
    }
}

/// Voice forwarding flag set, CPHS 4.2 clause B.4.5
const CFF_VOICE_ACTIVE: u8 = 0xA0;
const CFF_VOICE_INACTIVE: u8 = 0x50;

/// EF_CPHS_CFF call forwarding flags. The first octet carries the voice flag of line 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CphsCff {
    raw: Vec<u8>,
}

impl CphsCff {
    pub fn from_bytes(data: &[u8]) -> Result<Self, IccErr> {
        if data.is_empty() {
            return Err(IccErr::OutOfBounds { field: Some("cphs_cff") });
        }
        Ok(CphsCff { raw: data.to_vec() })
    }

    pub fn voice_forwarding_active(&self) -> bool {
        self.raw[0] & CFF_VOICE_ACTIVE != 0
    }

    /// File content with the voice flag replaced, the low nibble and trailing octets untouched
    pub fn with_voice_forwarding(&self, active: bool) -> Vec<u8> {
        let mut data = self.raw.clone();
        data[0] = (data[0] & 0x0F) | if active { CFF_VOICE_ACTIVE } else { CFF_VOICE_INACTIVE };
        data
    }
}

/// Operator name string or its short form, an alpha identifier filling the whole file
pub fn read_operator_name(data: &[u8]) -> String {
    decode_alpha_identifier(data)
}

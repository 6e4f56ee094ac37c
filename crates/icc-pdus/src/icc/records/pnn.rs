use icc_core::{IccErr, OctetBuffer};

use crate::icc::fields::network_name::NetworkName;

/// TS 24.008 clause 10.5.3.5a network name IEIs
const PNN_IEI_FULL_NETWORK_NAME: u8 = 0x43;
const PNN_IEI_SHORT_NETWORK_NAME: u8 = 0x45;

/// EF_PNN PLMN network name record, 3GPP TS 31.102 clause 4.2.58
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PnnRecord {
    pub full_name: Option<NetworkName>,
    pub short_name: Option<NetworkName>,
}

impl PnnRecord {
    pub fn from_bytes(record: &[u8]) -> Result<Self, IccErr> {
        let mut buf = OctetBuffer::from_bytes(record);
        let mut pnn = PnnRecord::default();
        while let Some(tag) = buf.peek_octet() {
            if tag == 0xFF {
                break;
            }
            buf.skip(1)?;
            let len = buf.read_field("pnn_length")? as usize;
            let value = buf.read_slice(len)?;
            match tag {
                PNN_IEI_FULL_NETWORK_NAME => pnn.full_name = NetworkName::from_bytes(value),
                PNN_IEI_SHORT_NETWORK_NAME => pnn.short_name = NetworkName::from_bytes(value),
                _ => tracing::trace!("skipping PNN tag 0x{:02x}", tag),
            }
        }
        Ok(pnn)
    }
}

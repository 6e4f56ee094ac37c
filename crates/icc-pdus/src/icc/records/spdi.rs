use icc_core::{IccErr, OctetBuffer};

use crate::icc::fields::plmn::Plmn;

/// Service provider display information template
const SPDI_TAG_SPDI: u8 = 0xA3;
const SPDI_TAG_PLMN_LIST: u8 = 0x80;

/// EF_SPDI, 3GPP TS 31.102 clause 4.2.66. Returns the PLMNs on which the service provider
/// name is displayed. Entries holding any unused octet are skipped.
pub fn read_spdi(data: &[u8]) -> Result<Vec<Plmn>, IccErr> {
    let mut buf = OctetBuffer::from_bytes(data);
    while buf.get_len_remaining() >= 2 {
        let tag = buf.read_field("spdi_tag")?;
        let len = buf.read_field("spdi_length")? as usize;
        match tag {
            // Value is itself a TLV
            SPDI_TAG_SPDI => continue,
            SPDI_TAG_PLMN_LIST => {
                let list = buf.read_slice(len.min(buf.get_len_remaining()))?;
                let mut plmns = Vec::new();
                for entry in list.chunks_exact(3) {
                    if entry.contains(&0xFF) {
                        continue;
                    }
                    if let Some(plmn) = Plmn::from_bytes(entry)? {
                        plmns.push(plmn);
                    }
                }
                tracing::debug!("SPDI: {:?}", plmns);
                return Ok(plmns);
            }
            _ => break,
        }
    }
    Ok(Vec::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use icc_core::octet_buffer::hex_to_bytes;

    #[test]
    fn test_spdi() {
        let data = hex_to_bytes("A30B800964F010FFFFFF130014FFFF").unwrap();
        let plmns = read_spdi(&data).unwrap();
        assert_eq!(plmns, vec![Plmn::new("460", "01"), Plmn::new("310", "410")]);
    }

    #[test]
    fn test_no_plmn_list() {
        assert!(read_spdi(&hex_to_bytes("A3038101FFFF").unwrap()).unwrap().is_empty());
        assert!(read_spdi(&[0xFF; 8]).unwrap().is_empty());
    }
}

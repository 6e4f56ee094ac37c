//! ISIM identities, 3GPP TS 31.103 clauses 4.2.2 to 4.2.4

use icc_core::{IccErr, OctetBuffer};

/// NAI and URI TLV data object tag of EF_IMPI, EF_DOMAIN and EF_IMPU
pub const ISIM_TLV_TAG: u8 = 0x80;

/// Value of the 0x80 data object, None when the file carries another object or is empty
pub fn read_isim_identity(data: &[u8]) -> Result<Option<String>, IccErr> {
    let mut buf = OctetBuffer::from_bytes(data);
    let tag = buf.read_field("isim_tag")?;
    if tag != ISIM_TLV_TAG {
        tracing::debug!("unexpected ISIM data object 0x{:02x}", tag);
        return Ok(None);
    }
    let len = buf.read_field("isim_length")? as usize;
    let value = buf.read_slice(len)?;
    if value.is_empty() {
        return Ok(None);
    }
    Ok(Some(String::from_utf8_lossy(value).into_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_impi() {
        let mut data = vec![0x80, 0x0B];
        data.extend_from_slice(b"user@ims.io");
        data.extend_from_slice(&[0xFF; 4]);
        assert_eq!(read_isim_identity(&data).unwrap().as_deref(), Some("user@ims.io"));
        assert_eq!(read_isim_identity(&[0x80, 0x00, 0xFF]).unwrap(), None);
        assert_eq!(read_isim_identity(&[0xFF, 0xFF]).unwrap(), None);
    }
}

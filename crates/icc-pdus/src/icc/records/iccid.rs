use icc_core::{IccErr, OctetBuffer};

/// EF_ICCID, ETSI TS 102.221 clause 13.2. Swapped BCD over the whole file, trailing F dropped.
pub fn read_iccid(data: &[u8]) -> Result<String, IccErr> {
    let mut buf = OctetBuffer::from_bytes(data);
    let iccid = buf.read_swapped_nibble_bcd_string(data.len(), true)?;
    tracing::debug!("ICCID: {}", iccid);
    Ok(iccid)
}

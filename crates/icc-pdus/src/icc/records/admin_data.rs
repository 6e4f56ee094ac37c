/// EF_AD administrative data, 3GPP TS 31.102 clause 4.2.18
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminData {
    /// UE operation mode
    pub ue_mode: u8,
    /// Length of the MNC in the IMSI, 2 or 3 when present
    pub mnc_length: Option<usize>,
}

impl AdminData {
    pub fn from_bytes(data: &[u8]) -> Self {
        let mnc_length = match data.get(3).map(|b| b & 0x0F) {
            Some(len @ (2 | 3)) => Some(len as usize),
            _ => None,
        };
        AdminData { ue_mode: data.first().copied().unwrap_or(0), mnc_length }
    }

    /// Split an IMSI into MCC and MNC. Without a known MNC length two digits are assumed.
    pub fn mcc_mnc_from_imsi(&self, imsi: &str) -> Option<(String, String)> {
        let mnc_length = self.mnc_length.unwrap_or(2);
        if imsi.len() < 3 + mnc_length || !imsi.is_ascii() {
            return None;
        }
        Some((imsi[..3].to_string(), imsi[3..3 + mnc_length].to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mnc_length() {
        let ad = AdminData::from_bytes(&[0x00, 0x00, 0x00, 0x03]);
        assert_eq!(ad.mnc_length, Some(3));
        assert_eq!(ad.mcc_mnc_from_imsi("310410123456789"), Some(("310".to_string(), "410".to_string())));

        let ad = AdminData::from_bytes(&[0x00, 0x00, 0x00, 0x0F]);
        assert_eq!(ad.mnc_length, None);
        assert_eq!(ad.mcc_mnc_from_imsi("46001"), Some(("460".to_string(), "01".to_string())));
        assert_eq!(AdminData::from_bytes(&[0x80]).mnc_length, None);
    }
}

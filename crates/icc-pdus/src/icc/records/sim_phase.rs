use icc_core::IccErr;

/// EF_PHASE value from which the terminal runs the PROFILE DOWNLOAD procedure,
/// 3GPP TS 51.011 clause 10.3.19
pub const PHASE_2_PROFILE_DOWNLOAD_REQUIRED: u8 = 0x03;

/// EF_PHASE, SIM only
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimPhase(pub u8);

impl SimPhase {
    pub fn from_bytes(data: &[u8]) -> Result<Self, IccErr> {
        data.first().map(|&phase| SimPhase(phase)).ok_or(IccErr::OutOfBounds { field: Some("sim_phase") })
    }

    pub fn profile_download_required(&self) -> bool {
        self.0 >= PHASE_2_PROFILE_DOWNLOAD_REQUIRED
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase() {
        assert!(!SimPhase::from_bytes(&[0x02]).unwrap().profile_download_required());
        assert!(SimPhase::from_bytes(&[0x03, 0xFF]).unwrap().profile_download_required());
        assert!(SimPhase::from_bytes(&[]).is_err());
    }
}

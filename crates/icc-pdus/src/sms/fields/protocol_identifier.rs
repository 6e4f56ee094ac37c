//! 3GPP TS 23.040 clause 9.2.3.9 TP-Protocol-Identifier

pub const PID_DEFAULT: u8 = 0x00;
/// Short message type 0: acknowledge, then discard
pub const PID_SHORT_MESSAGE_TYPE_0: u8 = 0x40;
pub const PID_ANSI_136_R_DATA: u8 = 0x7C;
pub const PID_USIM_DATA_DOWNLOAD: u8 = 0x7F;

/// The PID as interpreted by the ME. Reserved, obsolete and unsupported values read as the default.
pub fn effective_pid(pid: u8) -> u8 {
    match pid {
        PID_SHORT_MESSAGE_TYPE_0 | PID_ANSI_136_R_DATA | PID_USIM_DATA_DOWNLOAD => pid,
        _ => PID_DEFAULT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_pid() {
        assert_eq!(effective_pid(0x40), PID_SHORT_MESSAGE_TYPE_0);
        assert_eq!(effective_pid(0x41), PID_DEFAULT);
        assert_eq!(effective_pid(0x21), PID_DEFAULT);
    }
}

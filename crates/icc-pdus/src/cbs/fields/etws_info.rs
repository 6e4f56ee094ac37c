use core::fmt;

use crate::cbs::enums::etws_warning_type::EtwsWarningType;

/// First message identifier reserved for ETWS, 3GPP TS 23.041 clause 9.4.1.2.2
pub const CB_MESSAGE_ID_ETWS_BEGIN: u16 = 0x1100;
pub const CB_MESSAGE_ID_ETWS_END: u16 = 0x1107;

pub fn is_etws_message_id(message_id: u16) -> bool {
    (CB_MESSAGE_ID_ETWS_BEGIN..=CB_MESSAGE_ID_ETWS_END).contains(&message_id)
}

/// ETWS indications, from the message code of a secondary notification
/// or from the warning type word of a primary notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EtwsInfo {
    pub warning_type: Option<EtwsWarningType>,
    pub emergency_user_alert: bool,
    pub popup: bool,
}

impl EtwsInfo {
    /// Secondary notification carried as a regular CB message. None for non ETWS ids.
    pub fn from_message_code(message_id: u16, message_code: u16) -> Option<Self> {
        if !is_etws_message_id(message_id) {
            return None;
        }
        Some(EtwsInfo {
            warning_type: EtwsWarningType::try_from((message_id - CB_MESSAGE_ID_ETWS_BEGIN) as u64).ok(),
            emergency_user_alert: message_code & 0x0200 != 0,
            popup: message_code & 0x0100 != 0,
        })
    }

    /// 3GPP TS 23.041 clause 9.3.24 Warning-Type word of a primary notification
    pub fn from_warning_type_word(word: u16) -> Self {
        EtwsInfo {
            warning_type: EtwsWarningType::try_from(((word >> 9) & 0x7F) as u64).ok(),
            emergency_user_alert: word & 0x0100 != 0,
            popup: word & 0x0080 != 0,
        }
    }
}

impl fmt::Display for EtwsInfo {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "EtwsInfo {{ warning_type: {:?} emergency_user_alert: {} popup: {} }}",
            self.warning_type, self.emergency_user_alert, self.popup
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_code_bits() {
        let info = EtwsInfo::from_message_code(0x1101, 0x0300).unwrap();
        assert_eq!(info.warning_type, Some(EtwsWarningType::Tsunami));
        assert!(info.emergency_user_alert);
        assert!(info.popup);

        // Ids beyond the named warning types keep the flags only
        let info = EtwsInfo::from_message_code(0x1106, 0x0100).unwrap();
        assert_eq!(info.warning_type, None);
        assert!(!info.emergency_user_alert);

        assert_eq!(EtwsInfo::from_message_code(0x1000, 0x0300), None);
    }

    #[test]
    fn test_warning_type_word() {
        // Earthquake and tsunami, alert and popup
        let info = EtwsInfo::from_warning_type_word(0x0580);
        assert_eq!(info.warning_type, Some(EtwsWarningType::EarthquakeAndTsunami));
        assert!(info.emergency_user_alert);
        assert!(info.popup);
    }
}

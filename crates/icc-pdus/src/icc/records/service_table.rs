//! SIM, USIM and CSIM service tables: EF_SST 3GPP TS 51.011 clause 10.3.7,
//! EF_UST 3GPP TS 31.102 clause 4.2.8, EF_CST 3GPP2 C.S0065 clause 5.2.18

use icc_core::CardAppType;

/// Services the stack queries before touching the matching EF
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IccService {
    Adn,
    Fdn,
    Sms,
    Msisdn,
    Ext1,
    Ext2,
    Ext3,
    Cbmi,
    Gid1,
    Gid2,
    Spn,
    Sdn,
    DataDownloadSmsCb,
    DataDownloadSmsPp,
    Cbmir,
    Bdn,
    Img,
    Pnn,
    Opl,
    Mdn,
    Mwis,
    Cfis,
    Spdi,
    EnhancedPhonebook,
}

impl IccService {
    /// Service number in the table of the given application, starting at 1
    pub fn service_number(self, app: CardAppType) -> Option<u8> {
        use IccService::*;
        match app {
            CardAppType::Sim => match self {
                Adn => Some(2),
                Fdn => Some(3),
                Sms => Some(4),
                Msisdn => Some(9),
                Ext1 => Some(10),
                Ext2 => Some(11),
                Cbmi => Some(14),
                Gid1 => Some(15),
                Gid2 => Some(16),
                Spn => Some(17),
                Sdn => Some(18),
                Ext3 => Some(19),
                DataDownloadSmsCb => Some(25),
                DataDownloadSmsPp => Some(26),
                Cbmir => Some(30),
                Bdn => Some(31),
                Img => Some(39),
                Pnn => Some(51),
                Opl => Some(52),
                Mdn => Some(53),
                Mwis => Some(54),
                Cfis => Some(55),
                Spdi => Some(56),
                _ => None,
            },
            CardAppType::Usim => match self {
                Fdn => Some(2),
                Ext2 => Some(3),
                Sdn => Some(4),
                Ext3 => Some(5),
                Bdn => Some(6),
                Sms => Some(10),
                Cbmi => Some(15),
                Cbmir => Some(16),
                Gid1 => Some(17),
                Gid2 => Some(18),
                Spn => Some(19),
                Msisdn => Some(21),
                Img => Some(22),
                DataDownloadSmsPp => Some(28),
                DataDownloadSmsCb => Some(29),
                Pnn => Some(45),
                Opl => Some(46),
                Mdn => Some(47),
                Mwis => Some(48),
                Cfis => Some(49),
                Spdi => Some(51),
                _ => None,
            },
            CardAppType::Ruim => match self {
                Fdn => Some(3),
                Sms => Some(4),
                EnhancedPhonebook => Some(6),
                Spn => Some(17),
                _ => None,
            },
            CardAppType::Isim => None,
        }
    }
}

/// Raw service table of the active application
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceTable {
    pub app_type: CardAppType,
    pub table: Vec<u8>,
}

impl ServiceTable {
    pub fn new(app_type: CardAppType, table: &[u8]) -> Self {
        ServiceTable { app_type, table: table.to_vec() }
    }

    /// SIM and RUIM code two bits per service (allocated, activated) and need the activated bit.
    /// USIM codes one bit per service.
    pub fn is_available(&self, service: IccService) -> bool {
        let Some(number) = service.service_number(self.app_type) else {
            return false;
        };
        let n = (number - 1) as usize;
        let (index, bitmask) = match self.app_type {
            CardAppType::Sim | CardAppType::Ruim => (n / 4, 2u8 << ((n % 4) * 2)),
            _ => (n / 8, 1u8 << (n % 8)),
        };
        self.table.get(index).is_some_and(|b| b & bitmask != 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sim_two_bit_entries() {
        // Services 1..4 allocated and activated; 17 (SPN) allocated only
        let sst = ServiceTable::new(CardAppType::Sim, &[0xFF, 0x00, 0x00, 0x00, 0x01]);
        assert!(sst.is_available(IccService::Adn));
        assert!(sst.is_available(IccService::Fdn));
        assert!(sst.is_available(IccService::Sms));
        assert!(!sst.is_available(IccService::Msisdn));
        assert!(!sst.is_available(IccService::Spn));
        assert!(!sst.is_available(IccService::Spdi));
    }

    #[test]
    fn test_usim_one_bit_entries() {
        // Service 2 (FDN) and 19 (SPN)
        let ust = ServiceTable::new(CardAppType::Usim, &[0x02, 0x00, 0x04]);
        assert!(ust.is_available(IccService::Fdn));
        assert!(ust.is_available(IccService::Spn));
        assert!(!ust.is_available(IccService::Sdn));
        assert!(!ust.is_available(IccService::Adn));
    }

    #[test]
    fn test_ruim_enhanced_phonebook() {
        // Service 6 activated bit lives in octet 1, bit 4
        let cst = ServiceTable::new(CardAppType::Ruim, &[0x00, 0x08]);
        assert!(cst.is_available(IccService::EnhancedPhonebook));
        assert!(!cst.is_available(IccService::Fdn));
    }
}

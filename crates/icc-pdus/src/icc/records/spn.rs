use core::fmt;

use icc_core::IccErr;

use crate::icc::fields::alpha_identifier::decode_alpha_identifier;

/// Display of the registered PLMN name required when in the home network
pub const SPN_DISPLAY_PLMN_IN_HOME: u8 = 0x01;
/// Display of the service provider name not required when roaming
pub const SPN_HIDE_WHEN_ROAMING: u8 = 0x02;

/// EF_SPN service provider name, 3GPP TS 31.102 clause 4.2.12
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceProviderName {
    pub display_condition: u8,
    pub name: String,
}

impl ServiceProviderName {
    pub fn from_bytes(data: &[u8]) -> Result<Self, IccErr> {
        let Some((&display_condition, name)) = data.split_first() else {
            return Err(IccErr::OutOfBounds { field: Some("spn") });
        };
        Ok(ServiceProviderName { display_condition, name: decode_alpha_identifier(name) })
    }

    pub fn show_plmn_in_home(&self) -> bool {
        self.display_condition & SPN_DISPLAY_PLMN_IN_HOME != 0
    }

    pub fn show_spn_when_roaming(&self) -> bool {
        self.display_condition & SPN_HIDE_WHEN_ROAMING == 0
    }
}

impl fmt::Display for ServiceProviderName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ServiceProviderName {{ display_condition: {:02x} name: {:?} }}", self.display_condition, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use icc_core::octet_buffer::hex_to_bytes;

    #[test]
    fn test_spn() {
        let spn = ServiceProviderName::from_bytes(&hex_to_bytes("0154656C636FFFFFFFFF").unwrap()).unwrap();
        assert_eq!(spn.name, "Telco");
        assert!(spn.show_plmn_in_home());
        assert!(spn.show_spn_when_roaming());
        assert!(ServiceProviderName::from_bytes(&[]).is_err());
    }
}

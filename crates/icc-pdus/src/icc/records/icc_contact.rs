use core::fmt;

/// A phonebook entry as presented to users of the stack, assembled from EF_ADN and,
/// on USIM, the auxiliary EF_EMAIL and EF_ANR files of its phonebook set
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IccContact {
    /// ADN record number, starting at 1
    pub record_id: u8,
    pub alpha_id: String,
    /// Includes extension digits when chained
    pub number: String,
    pub emails: Vec<String>,
    pub anrs: Vec<String>,
    /// Index of the EF_PBR record this contact belongs to
    pub pbr_index: Option<usize>,
}

impl IccContact {
    pub fn new(alpha_id: &str, number: &str) -> Self {
        IccContact { alpha_id: alpha_id.to_string(), number: number.to_string(), ..Default::default() }
    }

    pub fn email(&self) -> Option<&str> {
        self.emails.first().map(String::as_str)
    }

    pub fn anr(&self) -> Option<&str> {
        self.anrs.first().map(String::as_str)
    }

    /// Contact id unique across phonebook sets, derived from the ICC id as the
    /// upper layers expect
    pub fn global_id(&self, iccid: &str, adn_records_per_set: usize) -> String {
        let offset = self.pbr_index.unwrap_or(0) * adn_records_per_set;
        format!("{}{}", iccid, offset + self.record_id as usize)
    }
}

impl fmt::Display for IccContact {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "IccContact {{ record_id: {} alpha_id: {:?} number: {} emails: {:?} anrs: {:?} pbr_index: {:?} }}",
            self.record_id, self.alpha_id, self.number, self.emails, self.anrs, self.pbr_index
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_id() {
        let mut contact = IccContact::new("Alice", "123");
        contact.record_id = 4;
        assert_eq!(contact.global_id("8986001", 250), "89860014");
        contact.pbr_index = Some(1);
        assert_eq!(contact.global_id("8986001", 250), "8986001254");
        assert_eq!(contact.email(), None);
    }
}

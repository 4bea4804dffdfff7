//! Customer Data

use crate::domain::customers::records::CustomerUuid;

/// New Customer Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewCustomer {
    pub uuid: CustomerUuid,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Customer Update Data
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerUpdate {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Contact details after trimming; blank values become `None` and emails are
/// lower-cased.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CustomerContact {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl CustomerContact {
    pub(crate) fn normalise(name: &str, email: Option<&str>, phone: Option<&str>) -> Option<Self> {
        let name = name.trim();

        if name.is_empty() {
            return None;
        }

        Some(Self {
            name: name.to_string(),
            email: non_blank(email).map(str::to_lowercase),
            phone: non_blank(phone).map(str::to_string),
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

impl NewCustomer {
    pub(crate) fn contact(&self) -> Option<CustomerContact> {
        CustomerContact::normalise(&self.name, self.email.as_deref(), self.phone.as_deref())
    }
}

impl CustomerUpdate {
    pub(crate) fn contact(&self) -> Option<CustomerContact> {
        CustomerContact::normalise(&self.name, self.email.as_deref(), self.phone.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_name_is_rejected() {
        assert!(CustomerContact::normalise("   ", None, None).is_none());
    }

    #[test]
    fn contact_fields_are_trimmed() {
        let contact = CustomerContact::normalise(" Ada ", Some(" Ada@Example.com "), Some(" 0123 "));

        assert_eq!(
            contact,
            Some(CustomerContact {
                name: "Ada".to_string(),
                email: Some("ada@example.com".to_string()),
                phone: Some("0123".to_string()),
            })
        );
    }

    #[test]
    fn blank_optional_fields_become_none() {
        let contact = CustomerContact::normalise("Ada", Some(""), Some("  "));

        assert_eq!(
            contact,
            Some(CustomerContact {
                name: "Ada".to_string(),
                email: None,
                phone: None,
            })
        );
    }
}

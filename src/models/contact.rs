use serde::{Deserialize, Serialize};
use std::fmt;

/// A single directory entry.
///
/// The name is the record's identity: case-sensitive and code-unit
/// exact. No two live contacts share a name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    pub phone: String,
}

impl Contact {
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
        }
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} : {}", self.name, self.phone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_display() {
        let contact = Contact::new("ann", "555-0101");
        assert_eq!(contact.to_string(), "ann : 555-0101");
    }

    #[test]
    fn test_contact_identity_is_case_sensitive() {
        assert_ne!(Contact::new("Ann", "1"), Contact::new("ann", "1"));
    }
}

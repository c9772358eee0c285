use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::pii::Masked;

/// A registered customer. Email is optional; phone is required.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: Uuid,
    pub name: String,
    pub email: Option<Masked<String>>,
    pub phone: Masked<String>,
}

impl Customer {
    pub fn new(name: impl Into<String>, email: Option<String>, phone: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            email: email.map(Masked),
            phone: Masked(phone.into()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    pub id: Uuid,
    pub name: String,
    pub email: Masked<String>,
    pub phone: Masked<String>,
    pub role: String,
}

impl Employee {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            email: Masked(email.into()),
            phone: Masked(phone.into()),
            role: role.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contact_details_stay_out_of_debug_output() {
        let customer = Customer::new("John Doe", Some("jdoe@example.com".into()), "416-555-0101");
        let debug = format!("{:?}", customer);
        assert!(debug.contains("John Doe"));
        assert!(!debug.contains("jdoe@example.com"));
        assert!(!debug.contains("416-555-0101"));
    }

    #[test]
    fn customer_serializes_real_contact_details() {
        let customer = Customer::new("Jane Smith", Some("jane@example.com".into()), "416-555-0102");
        let json = serde_json::to_value(&customer).unwrap();
        assert_eq!(json["email"], "jane@example.com");
        assert_eq!(json["phone"], "416-555-0102");
    }
}

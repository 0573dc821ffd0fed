use serde::{Deserialize, Serialize};

/// Customer that can be linked to a tab and notified about its progress.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Customer {
    /// Unique identifier of the customer.
    pub id: i32,
    /// Tenant that owns the customer.
    pub tenant_id: i32,
    /// Name used when addressing the customer in messages.
    pub name: String,
    /// Phone number in international format without separators, e.g. `5511999998888`.
    pub phone: Option<String>,
}

/// Payload required to insert a new customer for a tenant.
#[derive(Debug, Clone, Deserialize)]
pub struct NewCustomer {
    pub tenant_id: i32,
    pub name: String,
    pub phone: Option<String>,
}

impl NewCustomer {
    #[must_use]
    pub fn new(tenant_id: i32, name: impl Into<String>) -> Self {
        Self {
            tenant_id,
            name: name.into(),
            phone: None,
        }
    }

    /// Attach a phone number, keeping only its digits.
    #[must_use]
    pub fn with_phone(mut self, phone: impl AsRef<str>) -> Self {
        let digits: String = phone
            .as_ref()
            .chars()
            .filter(char::is_ascii_digit)
            .collect();
        self.phone = (!digits.is_empty()).then_some(digits);
        self
    }
}

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Sellable catalog product as seen by the order lifecycle.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: i32,
    pub tenant_id: i32,
    pub name: String,
    /// Current price in the smallest currency unit (cents).
    pub price_cents: i64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a new product for a tenant.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub tenant_id: i32,
    pub name: String,
    pub price_cents: i64,
}

impl NewProduct {
    pub fn new(tenant_id: i32, name: impl Into<String>, price_cents: i64) -> Self {
        Self {
            tenant_id,
            name: name.into(),
            price_cents,
        }
    }
}

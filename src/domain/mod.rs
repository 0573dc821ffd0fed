pub mod cash_session;
pub mod customer;
pub mod inventory;
pub mod order;
pub mod product;
pub mod table;
pub mod tenant;

use thiserror::Error;

/// A stored or submitted value does not name a known enum variant.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown {kind} `{value}`")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownVariant {
    pub fn new(kind: &'static str, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}

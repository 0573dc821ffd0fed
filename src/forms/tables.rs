use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::table::NewDiningTable;

pub type TableFormResult<T> = Result<T, TableFormError>;

#[derive(Debug, Error)]
pub enum TableFormError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
}

/// Payload for registering a dining table.
#[derive(Debug, Deserialize, Validate)]
pub struct AddTableForm {
    /// Number printed on the table, unique per tenant.
    #[validate(range(min = 1, max = 9999))]
    pub number: i32,
}

impl AddTableForm {
    pub fn into_new_table(self, tenant_id: i32) -> TableFormResult<NewDiningTable> {
        self.validate()?;
        Ok(NewDiningTable::new(tenant_id, self.number))
    }
}

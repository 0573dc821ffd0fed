use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::customer::NewCustomer;
use crate::domain::product::NewProduct;
use crate::forms::{AmountError, parse_amount_cents, sanitize_inline_text};

const NAME_MAX_LEN: u64 = 128;
const PHONE_MAX_LEN: u64 = 32;

pub type CatalogFormResult<T> = Result<T, CatalogFormError>;

#[derive(Debug, Error)]
pub enum CatalogFormError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("name cannot be empty")]
    EmptyName,
    #[error("invalid price: {0}")]
    Price(#[from] AmountError),
}

#[derive(Debug, Deserialize, Validate)]
pub struct AddProductForm {
    #[validate(length(min = 1, max = NAME_MAX_LEN))]
    pub name: String,
    /// Menu price as a decimal string, e.g. `"12.50"`.
    pub price: String,
}

impl AddProductForm {
    pub fn into_new_product(self, tenant_id: i32) -> CatalogFormResult<NewProduct> {
        self.validate()?;

        let name = sanitize_inline_text(&self.name);
        if name.is_empty() {
            return Err(CatalogFormError::EmptyName);
        }

        Ok(NewProduct::new(
            tenant_id,
            name,
            parse_amount_cents(&self.price)?,
        ))
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct AddCustomerForm {
    #[validate(length(min = 1, max = NAME_MAX_LEN))]
    pub name: String,
    #[validate(length(max = PHONE_MAX_LEN))]
    pub phone: Option<String>,
}

impl AddCustomerForm {
    pub fn into_new_customer(self, tenant_id: i32) -> CatalogFormResult<NewCustomer> {
        self.validate()?;

        let name = sanitize_inline_text(&self.name);
        if name.is_empty() {
            return Err(CatalogFormError::EmptyName);
        }

        let customer = NewCustomer::new(tenant_id, name);
        Ok(match self.phone {
            Some(phone) => customer.with_phone(phone),
            None => customer,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_price_is_converted_to_cents() {
        let product = AddProductForm {
            name: "Burger".to_string(),
            price: "12.50".to_string(),
        }
        .into_new_product(1)
        .expect("valid form");

        assert_eq!(product.price_cents, 1250);
    }

    #[test]
    fn customer_phone_keeps_digits() {
        let customer = AddCustomerForm {
            name: "Ana".to_string(),
            phone: Some("+55 (11) 99999-8888".to_string()),
        }
        .into_new_customer(1)
        .expect("valid form");

        assert_eq!(customer.phone.as_deref(), Some("5511999998888"));
    }
}

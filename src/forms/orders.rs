use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::order::{NewOrder, NewOrderItem, OrderStatus, Settlement, StatusChange};
use crate::domain::tenant::TenantContext;
use crate::forms::{parse_amount_cents, sanitize_inline_text};

const OBSERVATION_MAX_LEN: u64 = 255;
const PAYMENT_METHOD_MAX_LEN: u64 = 32;

/// Result type returned by the order form helpers.
pub type OrderFormResult<T> = Result<T, OrderFormError>;

/// Errors that can occur while processing order payloads.
#[derive(Debug, Error)]
pub enum OrderFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("a table or a customer is required to open an order")]
    MissingTarget,
    #[error("invalid status `{0}`")]
    InvalidStatus(String),
    #[error("payment method is required to mark an order as paid")]
    MissingPaymentMethod,
}

/// Payload for opening a tab on a table, for a customer, or both.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct OpenOrderForm {
    #[validate(range(min = 1))]
    pub table_id: Option<i32>,
    #[validate(range(min = 1))]
    pub customer_id: Option<i32>,
}

impl OpenOrderForm {
    pub fn into_new_order(self, ctx: &TenantContext) -> OrderFormResult<NewOrder> {
        self.validate()?;

        match (self.table_id, self.customer_id) {
            (Some(table_id), customer_id) => {
                let order = NewOrder::for_table(ctx.tenant_id, ctx.user_id, table_id);
                Ok(match customer_id {
                    Some(customer_id) => order.with_customer_id(customer_id),
                    None => order,
                })
            }
            (None, Some(customer_id)) => Ok(NewOrder::for_customer(
                ctx.tenant_id,
                ctx.user_id,
                customer_id,
            )),
            (None, None) => Err(OrderFormError::MissingTarget),
        }
    }
}

/// Payload for adding a line item.
#[derive(Debug, Deserialize, Validate)]
pub struct AddItemForm {
    #[validate(range(min = 1))]
    pub product_id: i32,
    #[validate(range(min = 1))]
    pub quantity: i32,
    #[validate(length(max = OBSERVATION_MAX_LEN))]
    pub observation: Option<String>,
}

impl AddItemForm {
    pub fn into_new_item(self) -> OrderFormResult<NewOrderItem> {
        self.validate()?;

        let item = NewOrderItem::new(self.product_id, self.quantity);
        let observation = self
            .observation
            .as_deref()
            .map(sanitize_inline_text)
            .filter(|value| !value.is_empty());

        Ok(match observation {
            Some(observation) => item.with_observation(observation),
            None => item,
        })
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct LinkCustomerForm {
    #[validate(range(min = 1))]
    pub customer_id: i32,
}

impl LinkCustomerForm {
    pub fn into_customer_id(self) -> OrderFormResult<i32> {
        self.validate()?;
        Ok(self.customer_id)
    }
}

/// Payload for `PUT /orders/{id}/status`.
///
/// `tip` is accepted as a number or a string; anything that is not a
/// non-negative amount counts as no tip.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateStatusForm {
    pub status: String,
    #[validate(length(max = PAYMENT_METHOD_MAX_LEN))]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub tip: Option<Value>,
    #[validate(range(min = 1))]
    pub cash_register_id: Option<i32>,
}

impl UpdateStatusForm {
    /// Validates the requested transition before any state is touched.
    pub fn into_status_change(self) -> OrderFormResult<StatusChange> {
        self.validate()?;

        let status = self
            .status
            .trim()
            .parse::<OrderStatus>()
            .map_err(|_| OrderFormError::InvalidStatus(self.status.clone()))?;

        if status != OrderStatus::Paid {
            return Ok(StatusChange::Advance(status));
        }

        let settlement = SettleOrderForm {
            payment_method: self.payment_method.unwrap_or_default(),
            tip: self.tip,
            cash_register_id: self.cash_register_id,
        }
        .into_settlement()?;

        Ok(StatusChange::Settle(settlement))
    }
}

/// Payload for `POST /orders/{id}/settle`.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct SettleOrderForm {
    #[serde(default)]
    #[validate(length(max = PAYMENT_METHOD_MAX_LEN))]
    pub payment_method: String,
    #[serde(default)]
    pub tip: Option<Value>,
    #[validate(range(min = 1))]
    pub cash_register_id: Option<i32>,
}

impl SettleOrderForm {
    pub fn into_settlement(self) -> OrderFormResult<Settlement> {
        self.validate()?;

        let payment_method = sanitize_inline_text(&self.payment_method).to_lowercase();
        if payment_method.is_empty() {
            return Err(OrderFormError::MissingPaymentMethod);
        }

        let settlement =
            Settlement::new(payment_method).with_tip_cents(tip_cents(self.tip.as_ref()));

        Ok(match self.cash_register_id {
            Some(register_id) => settlement.on_register(register_id),
            None => settlement,
        })
    }
}

/// Tip in cents. Missing, malformed, negative and oversized values become
/// zero.
pub fn tip_cents(tip: Option<&Value>) -> i64 {
    let raw = match tip {
        Some(Value::Number(number)) => number.to_string(),
        Some(Value::String(text)) => text.clone(),
        _ => return 0,
    };

    parse_amount_cents(&raw).unwrap_or(0)
}

/// Filters accepted by the order listing.
#[derive(Debug, Default, Deserialize)]
pub struct OrdersQuery {
    pub status: Option<String>,
    #[serde(default)]
    pub open_only: bool,
}

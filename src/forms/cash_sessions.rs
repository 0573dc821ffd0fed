use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::cash_session::{
    CloseCashSession, NewCashRegister, OpenCashSession, SalesReportQuery,
};
use crate::domain::tenant::TenantContext;
use crate::forms::{AmountError, parse_amount_cents, sanitize_inline_text};

const NAME_MAX_LEN: u64 = 64;

pub type CashFormResult<T> = Result<T, CashFormError>;

/// Errors that can occur while processing register and session payloads.
#[derive(Debug, Error)]
pub enum CashFormError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("register name cannot be empty")]
    EmptyName,
    #[error("invalid amount: {0}")]
    Amount(#[from] AmountError),
    #[error("report range ends before it starts")]
    InvertedRange,
}

#[derive(Debug, Deserialize, Validate)]
pub struct AddCashRegisterForm {
    #[validate(length(min = 1, max = NAME_MAX_LEN))]
    pub name: String,
}

impl AddCashRegisterForm {
    pub fn into_new_register(self, tenant_id: i32) -> CashFormResult<NewCashRegister> {
        self.validate()?;

        let name = sanitize_inline_text(&self.name);
        if name.is_empty() {
            return Err(CashFormError::EmptyName);
        }

        Ok(NewCashRegister::new(tenant_id, name))
    }
}

/// Payload for opening a register. Amounts are decimal strings.
#[derive(Debug, Deserialize, Validate)]
pub struct OpenSessionForm {
    #[validate(range(min = 1))]
    pub cash_register_id: i32,
    #[serde(default)]
    pub opening_balance: Option<String>,
}

impl OpenSessionForm {
    pub fn into_open_session(self, ctx: &TenantContext) -> CashFormResult<OpenCashSession> {
        self.validate()?;

        let opening_balance_cents = match self.opening_balance.as_deref().map(str::trim) {
            None | Some("") => 0,
            Some(value) => parse_amount_cents(value)?,
        };

        Ok(OpenCashSession {
            tenant_id: ctx.tenant_id,
            cash_register_id: self.cash_register_id,
            opening_balance_cents,
            opened_by: ctx.user_id,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct CloseSessionForm {
    pub closing_balance: String,
}

impl CloseSessionForm {
    pub fn into_close_session(self, ctx: &TenantContext) -> CashFormResult<CloseCashSession> {
        Ok(CloseCashSession {
            closing_balance_cents: parse_amount_cents(&self.closing_balance)?,
            closed_by: ctx.user_id,
        })
    }
}

/// Inclusive date range of a sales report.
#[derive(Debug, Deserialize)]
pub struct SalesReportForm {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl SalesReportForm {
    /// Covers `from` 00:00:00 through the end of `to`.
    pub fn into_query(self, tenant_id: i32) -> CashFormResult<SalesReportQuery> {
        if self.to < self.from {
            return Err(CashFormError::InvertedRange);
        }

        let end_of_day =
            NaiveTime::from_hms_micro_opt(23, 59, 59, 999_999).unwrap_or(NaiveTime::MIN);

        Ok(SalesReportQuery {
            tenant_id,
            from: NaiveDateTime::new(self.from, NaiveTime::MIN),
            to: NaiveDateTime::new(self.to, end_of_day),
        })
    }
}

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::UnknownVariant;

/// Physical point-of-sale terminal.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CashRegister {
    pub id: i32,
    pub tenant_id: i32,
    pub name: String,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
}

/// Register listing entry together with its currently open session, if any.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct CashRegisterOverview {
    #[serde(flatten)]
    pub register: CashRegister,
    pub open_session_id: Option<i32>,
}

#[derive(Debug, Clone)]
pub struct NewCashRegister {
    pub tenant_id: i32,
    pub name: String,
}

impl NewCashRegister {
    pub fn new(tenant_id: i32, name: impl Into<String>) -> Self {
        Self {
            tenant_id,
            name: name.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum CashSessionStatus {
    #[default]
    Open,
    Closed,
}

impl CashSessionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            CashSessionStatus::Open => "open",
            CashSessionStatus::Closed => "closed",
        }
    }
}

impl fmt::Display for CashSessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CashSessionStatus {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "open" => Ok(CashSessionStatus::Open),
            "closed" => Ok(CashSessionStatus::Closed),
            other => Err(UnknownVariant::new("cash session status", other)),
        }
    }
}

/// Accounting period on one register, from opening to closing the drawer.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CashSession {
    pub id: i32,
    pub tenant_id: i32,
    pub cash_register_id: i32,
    pub status: CashSessionStatus,
    pub opening_balance_cents: i64,
    /// Counted drawer balance, frozen when the session is closed.
    pub closing_balance_cents: Option<i64>,
    pub opened_by: i32,
    pub closed_by: Option<i32>,
    pub opened_at: NaiveDateTime,
    pub closed_at: Option<NaiveDateTime>,
}

impl CashSession {
    pub fn is_open(&self) -> bool {
        self.status == CashSessionStatus::Open
    }
}

/// Payload required to open a register.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenCashSession {
    pub tenant_id: i32,
    pub cash_register_id: i32,
    pub opening_balance_cents: i64,
    pub opened_by: i32,
}

/// Payload required to close a register.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloseCashSession {
    pub closing_balance_cents: i64,
    pub closed_by: i32,
}

/// Kind of ledger entry posted against a cash session.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    /// Change placed in the drawer when the session was opened.
    OpeningFloat,
    /// Payment received for a settled tab.
    Revenue,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionKind::OpeningFloat => "opening_float",
            TransactionKind::Revenue => "revenue",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "opening_float" => Ok(TransactionKind::OpeningFloat),
            "revenue" => Ok(TransactionKind::Revenue),
            other => Err(UnknownVariant::new("transaction kind", other)),
        }
    }
}

/// Append-only ledger entry.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CashTransaction {
    pub id: i32,
    pub tenant_id: i32,
    pub cash_session_id: i32,
    pub order_id: Option<i32>,
    pub kind: TransactionKind,
    pub amount_cents: i64,
    pub payment_method: Option<String>,
    pub description: String,
    pub created_at: NaiveDateTime,
}

/// Payload for a new ledger entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCashTransaction {
    pub tenant_id: i32,
    pub cash_session_id: i32,
    pub order_id: Option<i32>,
    pub kind: TransactionKind,
    pub amount_cents: i64,
    pub payment_method: Option<String>,
    pub description: String,
}

impl NewCashTransaction {
    pub fn opening_float(tenant_id: i32, cash_session_id: i32, amount_cents: i64) -> Self {
        Self {
            tenant_id,
            cash_session_id,
            order_id: None,
            kind: TransactionKind::OpeningFloat,
            amount_cents,
            payment_method: None,
            description: "Opening float".to_string(),
        }
    }

    pub fn revenue(
        tenant_id: i32,
        cash_session_id: i32,
        order_id: i32,
        amount_cents: i64,
        payment_method: impl Into<String>,
    ) -> Self {
        Self {
            tenant_id,
            cash_session_id,
            order_id: Some(order_id),
            kind: TransactionKind::Revenue,
            amount_cents,
            payment_method: Some(payment_method.into()),
            description: format!("Sale of order #{order_id}"),
        }
    }
}

/// Session with its ledger and running totals.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct CashSessionSummary {
    pub session: CashSession,
    pub transactions: Vec<CashTransaction>,
    pub opening_float_cents: i64,
    pub revenue_cents: i64,
    /// What the drawer should hold: opening float plus revenue.
    pub expected_balance_cents: i64,
}

impl CashSessionSummary {
    pub fn new(session: CashSession, transactions: Vec<CashTransaction>) -> Self {
        let sum_of = |kind: TransactionKind| -> i64 {
            transactions
                .iter()
                .filter(|entry| entry.kind == kind)
                .map(|entry| entry.amount_cents)
                .sum()
        };
        let opening_float_cents = sum_of(TransactionKind::OpeningFloat);
        let revenue_cents = sum_of(TransactionKind::Revenue);

        Self {
            session,
            opening_float_cents,
            revenue_cents,
            expected_balance_cents: opening_float_cents + revenue_cents,
            transactions,
        }
    }
}

/// Query for revenue entries of a tenant in `[from, to]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalesReportQuery {
    pub tenant_id: i32,
    pub from: NaiveDateTime,
    pub to: NaiveDateTime,
}

/// Revenue entries with their totals.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct SalesReport {
    pub transactions: Vec<CashTransaction>,
    pub total_revenue_cents: i64,
    pub total_transactions: usize,
}

impl SalesReport {
    pub fn new(transactions: Vec<CashTransaction>) -> Self {
        Self {
            total_revenue_cents: transactions.iter().map(|entry| entry.amount_cents).sum(),
            total_transactions: transactions.len(),
            transactions,
        }
    }
}

/// Revenue of one calendar day.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct DailySales {
    pub date: NaiveDate,
    pub total_cents: i64,
}

/// Figures of the day shown on the front page.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct Dashboard {
    pub date: NaiveDate,
    pub revenue_cents: i64,
    /// Tabs opened during the day.
    pub orders_count: i64,
    /// Revenue per tab opened, rounded down. Zero without tabs.
    pub average_ticket_cents: i64,
    /// Tabs that are neither paid nor canceled, whenever opened.
    pub open_orders_count: i64,
    /// Revenue per day up to and including `date`, oldest first.
    pub daily_sales: Vec<DailySales>,
}

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::UnknownVariant;
use crate::domain::cash_session::{
    CashRegister as DomainCashRegister, CashSession as DomainCashSession,
    CashTransaction as DomainCashTransaction, NewCashRegister as DomainNewCashRegister,
    NewCashTransaction as DomainNewCashTransaction, OpenCashSession,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::cash_registers)]
pub struct CashRegister {
    pub id: i32,
    pub tenant_id: i32,
    pub name: String,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::cash_registers)]
pub struct NewCashRegister<'a> {
    pub tenant_id: i32,
    pub name: &'a str,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = crate::schema::cash_sessions)]
#[diesel(belongs_to(CashRegister, foreign_key = cash_register_id))]
pub struct CashSession {
    pub id: i32,
    pub tenant_id: i32,
    pub cash_register_id: i32,
    pub status: String,
    pub opening_balance_cents: i64,
    pub closing_balance_cents: Option<i64>,
    pub opened_by: i32,
    pub closed_by: Option<i32>,
    pub opened_at: NaiveDateTime,
    pub closed_at: Option<NaiveDateTime>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::cash_sessions)]
pub struct NewCashSession {
    pub tenant_id: i32,
    pub cash_register_id: i32,
    pub opening_balance_cents: i64,
    pub opened_by: i32,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::cash_transactions)]
pub struct CashTransaction {
    pub id: i32,
    pub tenant_id: i32,
    pub cash_session_id: i32,
    pub order_id: Option<i32>,
    pub kind: String,
    pub amount_cents: i64,
    pub payment_method: Option<String>,
    pub description: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::cash_transactions)]
pub struct NewCashTransaction<'a> {
    pub tenant_id: i32,
    pub cash_session_id: i32,
    pub order_id: Option<i32>,
    pub kind: &'a str,
    pub amount_cents: i64,
    pub payment_method: Option<&'a str>,
    pub description: &'a str,
}

impl From<CashRegister> for DomainCashRegister {
    fn from(value: CashRegister) -> Self {
        Self {
            id: value.id,
            tenant_id: value.tenant_id,
            name: value.name,
            is_active: value.is_active,
            created_at: value.created_at,
        }
    }
}

impl<'a> From<&'a DomainNewCashRegister> for NewCashRegister<'a> {
    fn from(value: &'a DomainNewCashRegister) -> Self {
        Self {
            tenant_id: value.tenant_id,
            name: value.name.as_str(),
        }
    }
}

impl TryFrom<CashSession> for DomainCashSession {
    type Error = UnknownVariant;

    fn try_from(value: CashSession) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id,
            tenant_id: value.tenant_id,
            cash_register_id: value.cash_register_id,
            status: value.status.parse()?,
            opening_balance_cents: value.opening_balance_cents,
            closing_balance_cents: value.closing_balance_cents,
            opened_by: value.opened_by,
            closed_by: value.closed_by,
            opened_at: value.opened_at,
            closed_at: value.closed_at,
        })
    }
}

impl From<&OpenCashSession> for NewCashSession {
    fn from(value: &OpenCashSession) -> Self {
        Self {
            tenant_id: value.tenant_id,
            cash_register_id: value.cash_register_id,
            opening_balance_cents: value.opening_balance_cents,
            opened_by: value.opened_by,
        }
    }
}

impl TryFrom<CashTransaction> for DomainCashTransaction {
    type Error = UnknownVariant;

    fn try_from(value: CashTransaction) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id,
            tenant_id: value.tenant_id,
            cash_session_id: value.cash_session_id,
            order_id: value.order_id,
            kind: value.kind.parse()?,
            amount_cents: value.amount_cents,
            payment_method: value.payment_method,
            description: value.description,
            created_at: value.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewCashTransaction> for NewCashTransaction<'a> {
    fn from(value: &'a DomainNewCashTransaction) -> Self {
        Self {
            tenant_id: value.tenant_id,
            cash_session_id: value.cash_session_id,
            order_id: value.order_id,
            kind: value.kind.as_str(),
            amount_cents: value.amount_cents,
            payment_method: value.payment_method.as_deref(),
            description: value.description.as_str(),
        }
    }
}

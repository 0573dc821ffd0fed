use std::collections::HashMap;

use chrono::Utc;
use diesel::dsl::{exists, select};
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::domain::cash_session::{
    CashRegister as DomainCashRegister, CashRegisterOverview, CashSession as DomainCashSession,
    CashSessionStatus, CashTransaction as DomainCashTransaction, CloseCashSession,
    NewCashRegister as DomainNewCashRegister, NewCashTransaction as DomainNewCashTransaction,
    OpenCashSession, SalesReportQuery, TransactionKind,
};
use crate::models::cash_session::{
    CashRegister as DbCashRegister, CashSession as DbCashSession,
    CashTransaction as DbCashTransaction, NewCashRegister as DbNewCashRegister,
    NewCashSession as DbNewCashSession, NewCashTransaction as DbNewCashTransaction,
};
use crate::repository::{
    CashSessionReader, CashSessionWriter, DieselRepository, RepositoryError, RepositoryResult,
};

const ALREADY_OPEN: &str = "cash register already has an open session";

/// Cash-drawer sessions and the append-only ledger posted against them.
pub struct CashSessionLedger;

impl CashSessionLedger {
    /// Open session of `cash_register_id`, or the tenant's earliest opened
    /// session when no register is given.
    pub fn find_open_session(
        tx: &mut SqliteConnection,
        tenant_id: i32,
        cash_register_id: Option<i32>,
    ) -> RepositoryResult<Option<DomainCashSession>> {
        use crate::schema::cash_sessions;

        let mut query = cash_sessions::table
            .filter(cash_sessions::tenant_id.eq(tenant_id))
            .filter(cash_sessions::status.eq(CashSessionStatus::Open.as_str()))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(register_id) = cash_register_id {
            query = query.filter(cash_sessions::cash_register_id.eq(register_id));
        }

        let session = query
            .order((cash_sessions::opened_at.asc(), cash_sessions::id.asc()))
            .first::<DbCashSession>(tx)
            .optional()?;

        Ok(session.map(DomainCashSession::try_from).transpose()?)
    }

    /// Appends a ledger entry. The session must still be open when the entry
    /// is written.
    pub fn post(
        tx: &mut SqliteConnection,
        entry: &DomainNewCashTransaction,
    ) -> RepositoryResult<DomainCashTransaction> {
        use crate::schema::{cash_sessions, cash_transactions};

        let open = select(exists(
            cash_sessions::table
                .filter(cash_sessions::id.eq(entry.cash_session_id))
                .filter(cash_sessions::tenant_id.eq(entry.tenant_id))
                .filter(cash_sessions::status.eq(CashSessionStatus::Open.as_str())),
        ))
        .get_result::<bool>(tx)?;

        if !open {
            return Err(RepositoryError::SessionNotOpen(entry.cash_session_id));
        }

        let created = diesel::insert_into(cash_transactions::table)
            .values(&DbNewCashTransaction::from(entry))
            .get_result::<DbCashTransaction>(tx)?;

        Ok(DomainCashTransaction::try_from(created)?)
    }

    /// Posts the revenue of a settled tab.
    pub fn post_revenue(
        tx: &mut SqliteConnection,
        session: &DomainCashSession,
        order_id: i32,
        amount_cents: i64,
        payment_method: &str,
    ) -> RepositoryResult<DomainCashTransaction> {
        Self::post(
            tx,
            &DomainNewCashTransaction::revenue(
                session.tenant_id,
                session.id,
                order_id,
                amount_cents,
                payment_method,
            ),
        )
    }

    /// Opens a session on a register, posting the opening float when it is
    /// positive.
    pub fn open(
        tx: &mut SqliteConnection,
        payload: &OpenCashSession,
    ) -> RepositoryResult<DomainCashSession> {
        use crate::schema::{cash_registers, cash_sessions};

        let register_known = select(exists(
            cash_registers::table
                .filter(cash_registers::id.eq(payload.cash_register_id))
                .filter(cash_registers::tenant_id.eq(payload.tenant_id)),
        ))
        .get_result::<bool>(tx)?;

        if !register_known {
            return Err(RepositoryError::NotFound);
        }

        if Self::find_open_session(tx, payload.tenant_id, Some(payload.cash_register_id))?
            .is_some()
        {
            return Err(RepositoryError::Conflict(ALREADY_OPEN.to_string()));
        }

        let created = diesel::insert_into(cash_sessions::table)
            .values(&DbNewCashSession::from(payload))
            .get_result::<DbCashSession>(tx)
            .map_err(|err| RepositoryError::from(err).conflict_as(ALREADY_OPEN))?;

        let session = DomainCashSession::try_from(created)?;

        if payload.opening_balance_cents > 0 {
            Self::post(
                tx,
                &DomainNewCashTransaction::opening_float(
                    session.tenant_id,
                    session.id,
                    payload.opening_balance_cents,
                ),
            )?;
        }

        Ok(session)
    }

    /// Closes an open session and freezes its counted balance.
    pub fn close(
        tx: &mut SqliteConnection,
        session_id: i32,
        tenant_id: i32,
        payload: &CloseCashSession,
    ) -> RepositoryResult<DomainCashSession> {
        use crate::schema::cash_sessions;

        let closed = diesel::update(
            cash_sessions::table
                .filter(cash_sessions::id.eq(session_id))
                .filter(cash_sessions::tenant_id.eq(tenant_id))
                .filter(cash_sessions::status.eq(CashSessionStatus::Open.as_str())),
        )
        .set((
            cash_sessions::status.eq(CashSessionStatus::Closed.as_str()),
            cash_sessions::closing_balance_cents.eq(Some(payload.closing_balance_cents)),
            cash_sessions::closed_by.eq(Some(payload.closed_by)),
            cash_sessions::closed_at.eq(Some(Utc::now().naive_utc())),
        ))
        .get_result::<DbCashSession>(tx)
        .optional()?;

        match closed {
            Some(session) => Ok(DomainCashSession::try_from(session)?),
            None => Err(RepositoryError::NotFound),
        }
    }
}

impl CashSessionReader for DieselRepository {
    fn list_cash_registers(&self, tenant_id: i32) -> RepositoryResult<Vec<CashRegisterOverview>> {
        use crate::schema::{cash_registers, cash_sessions};

        let mut conn = self.conn()?;

        let registers = cash_registers::table
            .filter(cash_registers::tenant_id.eq(tenant_id))
            .order(cash_registers::name.asc())
            .load::<DbCashRegister>(&mut conn)?;

        let open_sessions: HashMap<i32, i32> = cash_sessions::table
            .filter(cash_sessions::tenant_id.eq(tenant_id))
            .filter(cash_sessions::status.eq(CashSessionStatus::Open.as_str()))
            .select((cash_sessions::cash_register_id, cash_sessions::id))
            .load::<(i32, i32)>(&mut conn)?
            .into_iter()
            .collect();

        Ok(registers
            .into_iter()
            .map(|register| CashRegisterOverview {
                open_session_id: open_sessions.get(&register.id).copied(),
                register: DomainCashRegister::from(register),
            })
            .collect())
    }

    fn get_cash_session(
        &self,
        id: i32,
        tenant_id: i32,
    ) -> RepositoryResult<Option<DomainCashSession>> {
        use crate::schema::cash_sessions;

        let mut conn = self.conn()?;
        let session = cash_sessions::table
            .filter(cash_sessions::id.eq(id))
            .filter(cash_sessions::tenant_id.eq(tenant_id))
            .first::<DbCashSession>(&mut conn)
            .optional()?;

        Ok(session.map(DomainCashSession::try_from).transpose()?)
    }

    fn find_open_session(
        &self,
        tenant_id: i32,
        cash_register_id: Option<i32>,
    ) -> RepositoryResult<Option<DomainCashSession>> {
        let mut conn = self.conn()?;
        CashSessionLedger::find_open_session(&mut conn, tenant_id, cash_register_id)
    }

    fn list_session_transactions(
        &self,
        session_id: i32,
        tenant_id: i32,
    ) -> RepositoryResult<Vec<DomainCashTransaction>> {
        use crate::schema::cash_transactions;

        let mut conn = self.conn()?;
        let rows = cash_transactions::table
            .filter(cash_transactions::cash_session_id.eq(session_id))
            .filter(cash_transactions::tenant_id.eq(tenant_id))
            .order(cash_transactions::id.asc())
            .load::<DbCashTransaction>(&mut conn)?;

        into_domain_transactions(rows)
    }

    fn list_revenue(
        &self,
        query: &SalesReportQuery,
    ) -> RepositoryResult<Vec<DomainCashTransaction>> {
        use crate::schema::cash_transactions;

        let mut conn = self.conn()?;
        let rows = cash_transactions::table
            .filter(cash_transactions::tenant_id.eq(query.tenant_id))
            .filter(cash_transactions::kind.eq(TransactionKind::Revenue.as_str()))
            .filter(cash_transactions::created_at.between(query.from, query.to))
            .order((cash_transactions::created_at.desc(), cash_transactions::id.desc()))
            .load::<DbCashTransaction>(&mut conn)?;

        into_domain_transactions(rows)
    }
}

impl CashSessionWriter for DieselRepository {
    fn create_cash_register(
        &self,
        new_register: &DomainNewCashRegister,
    ) -> RepositoryResult<DomainCashRegister> {
        use crate::schema::cash_registers;

        let mut conn = self.conn()?;
        let created = diesel::insert_into(cash_registers::table)
            .values(&DbNewCashRegister::from(new_register))
            .get_result::<DbCashRegister>(&mut conn)
            .map_err(|err| {
                RepositoryError::from(err).conflict_as(&format!(
                    "cash register `{}` already exists",
                    new_register.name
                ))
            })?;

        Ok(created.into())
    }

    fn open_cash_session(&self, payload: &OpenCashSession) -> RepositoryResult<DomainCashSession> {
        self.unit_of_work(|tx| CashSessionLedger::open(tx, payload))
    }

    fn close_cash_session(
        &self,
        session_id: i32,
        tenant_id: i32,
        payload: &CloseCashSession,
    ) -> RepositoryResult<DomainCashSession> {
        self.unit_of_work(|tx| CashSessionLedger::close(tx, session_id, tenant_id, payload))
    }
}

fn into_domain_transactions(
    rows: Vec<DbCashTransaction>,
) -> RepositoryResult<Vec<DomainCashTransaction>> {
    rows.into_iter()
        .map(|row| DomainCashTransaction::try_from(row).map_err(RepositoryError::from))
        .collect()
}

use crate::domain::cash_session::{
    CashRegister, CashRegisterOverview, CashSession, CashSessionSummary,
};
use crate::domain::tenant::TenantContext;
use crate::forms::cash_sessions::{
    AddCashRegisterForm, CashFormError, CloseSessionForm, OpenSessionForm,
};
use crate::repository::{CashSessionReader, CashSessionWriter};
use crate::services::{ServiceError, ServiceResult};

impl From<CashFormError> for ServiceError {
    fn from(value: CashFormError) -> Self {
        ServiceError::Validation(value.to_string())
    }
}

pub fn create_register<R>(
    repo: &R,
    ctx: &TenantContext,
    form: AddCashRegisterForm,
) -> ServiceResult<CashRegister>
where
    R: CashSessionWriter + ?Sized,
{
    let new_register = form.into_new_register(ctx.tenant_id)?;
    Ok(repo.create_cash_register(&new_register)?)
}

/// Registers of the tenant with the id of their open session, if any.
pub fn list_registers<R>(repo: &R, ctx: &TenantContext) -> ServiceResult<Vec<CashRegisterOverview>>
where
    R: CashSessionReader + ?Sized,
{
    Ok(repo.list_cash_registers(ctx.tenant_id)?)
}

/// Opens the drawer of a register. A register holds at most one open session.
pub fn open_session<R>(
    repo: &R,
    ctx: &TenantContext,
    form: OpenSessionForm,
) -> ServiceResult<CashSession>
where
    R: CashSessionWriter + ?Sized,
{
    let payload = form.into_open_session(ctx)?;
    let session = repo.open_cash_session(&payload)?;

    log::info!(
        "Cash session {} opened on register {} by user {} with {} cents",
        session.id,
        session.cash_register_id,
        ctx.user_id,
        session.opening_balance_cents
    );

    Ok(session)
}

pub fn close_session<R>(
    repo: &R,
    ctx: &TenantContext,
    session_id: i32,
    form: CloseSessionForm,
) -> ServiceResult<CashSession>
where
    R: CashSessionWriter + ?Sized,
{
    let payload = form.into_close_session(ctx)?;
    let session = repo.close_cash_session(session_id, ctx.tenant_id, &payload)?;

    log::info!(
        "Cash session {} closed by user {} with {} cents counted",
        session.id,
        ctx.user_id,
        payload.closing_balance_cents
    );

    Ok(session)
}

/// Open session of a register, or the tenant's current one when no register
/// is given.
pub fn current_session<R>(
    repo: &R,
    ctx: &TenantContext,
    cash_register_id: Option<i32>,
) -> ServiceResult<CashSession>
where
    R: CashSessionReader + ?Sized,
{
    repo.find_open_session(ctx.tenant_id, cash_register_id)?
        .ok_or(ServiceError::NoOpenSession)
}

/// Session with its ledger and expected drawer balance.
pub fn session_summary<R>(
    repo: &R,
    ctx: &TenantContext,
    session_id: i32,
) -> ServiceResult<CashSessionSummary>
where
    R: CashSessionReader + ?Sized,
{
    let session = repo
        .get_cash_session(session_id, ctx.tenant_id)?
        .ok_or(ServiceError::NotFound)?;
    let transactions = repo.list_session_transactions(session.id, ctx.tenant_id)?;

    Ok(CashSessionSummary::new(session, transactions))
}

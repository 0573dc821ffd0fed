use actix_web::{HttpResponse, Responder, get, post, web};
use pushkind_common::domain::auth::AuthenticatedUser;
use serde::Deserialize;

use crate::MANAGEMENT_ROLES;
use crate::forms::cash_sessions::{AddCashRegisterForm, CloseSessionForm, OpenSessionForm};
use crate::repository::DieselRepository;
use crate::routes::{authorize, error_response};
use crate::services::cash_sessions;

#[derive(Debug, Default, Deserialize)]
pub struct CurrentSessionQuery {
    pub cash_register_id: Option<i32>,
}

#[get("/cash-registers")]
pub async fn list_registers(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let ctx = match authorize(&user, MANAGEMENT_ROLES) {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };

    match cash_sessions::list_registers(repo.get_ref(), &ctx) {
        Ok(registers) => HttpResponse::Ok().json(registers),
        Err(err) => error_response("list cash registers", err),
    }
}

#[post("/cash-registers")]
pub async fn add_register(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<AddCashRegisterForm>,
) -> impl Responder {
    let ctx = match authorize(&user, MANAGEMENT_ROLES) {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };

    match cash_sessions::create_register(repo.get_ref(), &ctx, form.into_inner()) {
        Ok(register) => HttpResponse::Created().json(register),
        Err(err) => error_response("create cash register", err),
    }
}

#[post("/cash-sessions")]
pub async fn open_session(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<OpenSessionForm>,
) -> impl Responder {
    let ctx = match authorize(&user, MANAGEMENT_ROLES) {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };

    match cash_sessions::open_session(repo.get_ref(), &ctx, form.into_inner()) {
        Ok(session) => HttpResponse::Created().json(session),
        Err(err) => error_response("open cash session", err),
    }
}

#[get("/cash-sessions/current")]
pub async fn show_current_session(
    params: web::Query<CurrentSessionQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let ctx = match authorize(&user, MANAGEMENT_ROLES) {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };

    match cash_sessions::current_session(repo.get_ref(), &ctx, params.cash_register_id) {
        Ok(session) => HttpResponse::Ok().json(session),
        Err(err) => error_response("load current cash session", err),
    }
}

#[get("/cash-sessions/{session_id}")]
/// Session with its ledger and the balance the drawer should hold.
pub async fn show_session(
    session_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let ctx = match authorize(&user, MANAGEMENT_ROLES) {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };

    match cash_sessions::session_summary(repo.get_ref(), &ctx, session_id.into_inner()) {
        Ok(summary) => HttpResponse::Ok().json(summary),
        Err(err) => error_response("load cash session", err),
    }
}

#[post("/cash-sessions/{session_id}/close")]
pub async fn close_session(
    session_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<CloseSessionForm>,
) -> impl Responder {
    let ctx = match authorize(&user, MANAGEMENT_ROLES) {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };

    match cash_sessions::close_session(
        repo.get_ref(),
        &ctx,
        session_id.into_inner(),
        form.into_inner(),
    ) {
        Ok(session) => HttpResponse::Ok().json(session),
        Err(err) => error_response("close cash session", err),
    }
}

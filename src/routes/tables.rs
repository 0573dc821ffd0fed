use actix_web::{HttpResponse, Responder, get, post, web};
use pushkind_common::domain::auth::AuthenticatedUser;

use crate::forms::tables::AddTableForm;
use crate::repository::DieselRepository;
use crate::routes::{authorize, error_response};
use crate::services::tables;
use crate::{MANAGEMENT_ROLES, OPERATIONAL_ROLES};

#[get("/tables")]
pub async fn list_tables(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let ctx = match authorize(&user, OPERATIONAL_ROLES) {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };

    match tables::list_tables(repo.get_ref(), &ctx) {
        Ok(tables) => HttpResponse::Ok().json(tables),
        Err(err) => error_response("list tables", err),
    }
}

#[get("/tables/{table_id}")]
pub async fn show_table(
    table_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let ctx = match authorize(&user, OPERATIONAL_ROLES) {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };

    match tables::get_table(repo.get_ref(), &ctx, table_id.into_inner()) {
        Ok(table) => HttpResponse::Ok().json(table),
        Err(err) => error_response("load table", err),
    }
}

#[post("/tables")]
pub async fn add_table(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<AddTableForm>,
) -> impl Responder {
    let ctx = match authorize(&user, MANAGEMENT_ROLES) {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };

    match tables::create_table(repo.get_ref(), &ctx, form.into_inner()) {
        Ok(table) => HttpResponse::Created().json(table),
        Err(err) => error_response("create table", err),
    }
}

use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{HttpResponse, Responder, get, web};
use chrono::Utc;
use pushkind_common::domain::auth::AuthenticatedUser;

use crate::MANAGEMENT_ROLES;
use crate::forms::cash_sessions::SalesReportForm;
use crate::repository::DieselRepository;
use crate::routes::{authorize, error_response};
use crate::services::reports;

#[get("/reports/sales")]
pub async fn sales_report(
    params: web::Query<SalesReportForm>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let ctx = match authorize(&user, MANAGEMENT_ROLES) {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };

    match reports::sales_report(repo.get_ref(), &ctx, params.into_inner()) {
        Ok(report) => HttpResponse::Ok().json(report),
        Err(err) => error_response("build sales report", err),
    }
}

#[get("/reports/sales.csv")]
pub async fn sales_report_csv(
    params: web::Query<SalesReportForm>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let ctx = match authorize(&user, MANAGEMENT_ROLES) {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };

    let file_name = format!("sales-{}-{}.csv", params.from, params.to);

    let csv = reports::sales_report(repo.get_ref(), &ctx, params.into_inner())
        .and_then(|report| reports::sales_report_csv(&report));

    match csv {
        Ok(bytes) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header(ContentDisposition {
                disposition: DispositionType::Attachment,
                parameters: vec![DispositionParam::Filename(file_name)],
            })
            .body(bytes),
        Err(err) => error_response("export sales report", err),
    }
}

#[get("/reports/dashboard")]
pub async fn show_dashboard(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let ctx = match authorize(&user, MANAGEMENT_ROLES) {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };

    match reports::dashboard(repo.get_ref(), &ctx, Utc::now().date_naive()) {
        Ok(dashboard) => HttpResponse::Ok().json(dashboard),
        Err(err) => error_response("build dashboard", err),
    }
}

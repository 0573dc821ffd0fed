use actix_web::HttpResponse;
use pushkind_common::domain::auth::AuthenticatedUser;
use serde::Serialize;

use crate::domain::tenant::TenantContext;
use crate::services::ServiceError;

pub mod cash_sessions;
pub mod catalog;
pub mod inventory;
pub mod orders;
pub mod reports;
pub mod tables;

#[derive(Serialize)]
struct ErrorBody<'a> {
    message: &'a str,
}

fn error_body(message: &str) -> ErrorBody<'_> {
    ErrorBody { message }
}

/// Builds the tenant context of `user`, rejecting callers without one of the
/// `allowed` roles.
pub(crate) fn authorize(
    user: &AuthenticatedUser,
    allowed: &[&str],
) -> Result<TenantContext, HttpResponse> {
    let ctx = TenantContext::try_from(user).map_err(|err| {
        log::warn!("Rejected principal {}: {err}", user.email);
        HttpResponse::Unauthorized().json(error_body("unauthorized"))
    })?;

    if !ctx.has_any_role(allowed) {
        return Err(HttpResponse::Forbidden().json(error_body("insufficient permissions")));
    }

    Ok(ctx)
}

/// Maps a service failure onto its HTTP status. Internal details are logged
/// and never returned to the client.
pub(crate) fn error_response(action: &str, err: ServiceError) -> HttpResponse {
    match &err {
        ServiceError::Unauthorized => {
            HttpResponse::Forbidden().json(error_body("insufficient permissions"))
        }
        ServiceError::Validation(message) | ServiceError::InvalidStatus(message) => {
            HttpResponse::BadRequest().json(error_body(message))
        }
        ServiceError::NoOpenSession | ServiceError::SessionNotOpen(_) => {
            HttpResponse::BadRequest().json(error_body(&err.to_string()))
        }
        ServiceError::NotFound => HttpResponse::NotFound().json(error_body("not found")),
        ServiceError::Conflict(message) => HttpResponse::Conflict().json(error_body(message)),
        ServiceError::Internal(_) => {
            log::error!("Failed to {action}: {err}");
            HttpResponse::InternalServerError().json(error_body("internal server error"))
        }
    }
}

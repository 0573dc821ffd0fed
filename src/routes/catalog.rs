use actix_web::{HttpResponse, Responder, get, post, web};
use pushkind_common::domain::auth::AuthenticatedUser;

use crate::forms::catalog::{AddCustomerForm, AddProductForm};
use crate::repository::DieselRepository;
use crate::routes::{authorize, error_response};
use crate::services::catalog;
use crate::{MANAGEMENT_ROLES, OPERATIONAL_ROLES};

#[post("/products")]
pub async fn add_product(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<AddProductForm>,
) -> impl Responder {
    let ctx = match authorize(&user, MANAGEMENT_ROLES) {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };

    match catalog::create_product(repo.get_ref(), &ctx, form.into_inner()) {
        Ok(product) => HttpResponse::Created().json(product),
        Err(err) => error_response("create product", err),
    }
}

#[get("/products/{product_id}")]
pub async fn show_product(
    product_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let ctx = match authorize(&user, OPERATIONAL_ROLES) {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };

    match catalog::get_product(repo.get_ref(), &ctx, product_id.into_inner()) {
        Ok(product) => HttpResponse::Ok().json(product),
        Err(err) => error_response("load product", err),
    }
}

#[post("/customers")]
pub async fn add_customer(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<AddCustomerForm>,
) -> impl Responder {
    let ctx = match authorize(&user, OPERATIONAL_ROLES) {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };

    match catalog::create_customer(repo.get_ref(), &ctx, form.into_inner()) {
        Ok(customer) => HttpResponse::Created().json(customer),
        Err(err) => error_response("create customer", err),
    }
}

#[get("/customers/{customer_id}")]
pub async fn show_customer(
    customer_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let ctx = match authorize(&user, OPERATIONAL_ROLES) {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };

    match catalog::get_customer(repo.get_ref(), &ctx, customer_id.into_inner()) {
        Ok(customer) => HttpResponse::Ok().json(customer),
        Err(err) => error_response("load customer", err),
    }
}

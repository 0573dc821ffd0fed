use actix_web::{HttpResponse, Responder, get, post, put, web};
use pushkind_common::domain::auth::AuthenticatedUser;

use crate::MANAGEMENT_ROLES;
use crate::forms::inventory::{AddInventoryItemForm, ReplaceRecipeForm};
use crate::repository::DieselRepository;
use crate::routes::{authorize, error_response};
use crate::services::inventory;

#[get("/inventory")]
pub async fn list_inventory(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let ctx = match authorize(&user, MANAGEMENT_ROLES) {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };

    match inventory::list_items(repo.get_ref(), &ctx) {
        Ok(items) => HttpResponse::Ok().json(items),
        Err(err) => error_response("list inventory", err),
    }
}

#[get("/inventory/{item_id}")]
pub async fn show_inventory_item(
    item_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let ctx = match authorize(&user, MANAGEMENT_ROLES) {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };

    match inventory::get_item(repo.get_ref(), &ctx, item_id.into_inner()) {
        Ok(item) => HttpResponse::Ok().json(item),
        Err(err) => error_response("load inventory item", err),
    }
}

#[post("/inventory")]
pub async fn add_inventory_item(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<AddInventoryItemForm>,
) -> impl Responder {
    let ctx = match authorize(&user, MANAGEMENT_ROLES) {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };

    match inventory::create_item(repo.get_ref(), &ctx, form.into_inner()) {
        Ok(item) => HttpResponse::Created().json(item),
        Err(err) => error_response("create inventory item", err),
    }
}

#[get("/products/{product_id}/recipe")]
pub async fn show_recipe(
    product_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let ctx = match authorize(&user, MANAGEMENT_ROLES) {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };

    match inventory::get_recipe(repo.get_ref(), &ctx, product_id.into_inner()) {
        Ok(recipe) => HttpResponse::Ok().json(recipe),
        Err(err) => error_response("load recipe", err),
    }
}

#[put("/products/{product_id}/recipe")]
pub async fn replace_recipe(
    product_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<ReplaceRecipeForm>,
) -> impl Responder {
    let ctx = match authorize(&user, MANAGEMENT_ROLES) {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };

    match inventory::replace_recipe(
        repo.get_ref(),
        &ctx,
        product_id.into_inner(),
        form.into_inner(),
    ) {
        Ok(recipe) => HttpResponse::Ok().json(recipe),
        Err(err) => error_response("replace recipe", err),
    }
}

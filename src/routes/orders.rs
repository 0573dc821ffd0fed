use actix_web::{HttpResponse, Responder, delete, get, post, put, web};
use pushkind_common::domain::auth::AuthenticatedUser;

use crate::forms::orders::{
    AddItemForm, LinkCustomerForm, OpenOrderForm, OrdersQuery, SettleOrderForm, UpdateStatusForm,
};
use crate::notifications::NotificationSender;
use crate::repository::DieselRepository;
use crate::routes::{authorize, error_response};
use crate::services::orders;
use crate::{KITCHEN_ROLES, MANAGEMENT_ROLES, OPERATIONAL_ROLES, STAFF_ROLES};

#[post("/orders")]
pub async fn open_order(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<OpenOrderForm>,
) -> impl Responder {
    let ctx = match authorize(&user, OPERATIONAL_ROLES) {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };

    match orders::open_order(repo.get_ref(), &ctx, form.into_inner()) {
        Ok(order) => HttpResponse::Created().json(order),
        Err(err) => error_response("open order", err),
    }
}

#[get("/orders")]
/// Kitchen view of the tenant's tabs, optionally filtered by `status`.
pub async fn list_orders(
    params: web::Query<OrdersQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let ctx = match authorize(&user, STAFF_ROLES) {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };

    match orders::list_orders(repo.get_ref(), &ctx, params.into_inner()) {
        Ok(orders) => HttpResponse::Ok().json(orders),
        Err(err) => error_response("list orders", err),
    }
}

#[get("/orders/{order_id}")]
pub async fn show_order(
    order_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let ctx = match authorize(&user, STAFF_ROLES) {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };

    match orders::get_order(repo.get_ref(), &ctx, order_id.into_inner()) {
        Ok(order) => HttpResponse::Ok().json(order),
        Err(err) => error_response("load order", err),
    }
}

#[get("/tables/{table_id}/order")]
pub async fn show_table_order(
    table_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let ctx = match authorize(&user, OPERATIONAL_ROLES) {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };

    match orders::find_open_order_for_table(repo.get_ref(), &ctx, table_id.into_inner()) {
        Ok(order) => HttpResponse::Ok().json(order),
        Err(err) => error_response("load table order", err),
    }
}

#[get("/customers/{customer_id}/order")]
pub async fn show_customer_order(
    customer_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let ctx = match authorize(&user, OPERATIONAL_ROLES) {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };

    match orders::find_active_order_for_customer(repo.get_ref(), &ctx, customer_id.into_inner()) {
        Ok(order) => HttpResponse::Ok().json(order),
        Err(err) => error_response("load customer order", err),
    }
}

#[post("/orders/{order_id}/items")]
pub async fn add_item(
    order_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<AddItemForm>,
) -> impl Responder {
    let ctx = match authorize(&user, OPERATIONAL_ROLES) {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };

    match orders::add_item(repo.get_ref(), &ctx, order_id.into_inner(), form.into_inner()) {
        Ok(item) => HttpResponse::Created().json(item),
        Err(err) => error_response("add order item", err),
    }
}

#[delete("/orders/{order_id}/items/{item_id}")]
pub async fn remove_item(
    path: web::Path<(i32, i32)>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let ctx = match authorize(&user, OPERATIONAL_ROLES) {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };
    let (order_id, item_id) = path.into_inner();

    match orders::remove_item(repo.get_ref(), &ctx, order_id, item_id) {
        Ok(order) => HttpResponse::Ok().json(order),
        Err(err) => error_response("remove order item", err),
    }
}

#[put("/orders/{order_id}/customer")]
pub async fn link_customer(
    order_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<LinkCustomerForm>,
) -> impl Responder {
    let ctx = match authorize(&user, OPERATIONAL_ROLES) {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };

    match orders::link_customer(repo.get_ref(), &ctx, order_id.into_inner(), form.into_inner()) {
        Ok(order) => HttpResponse::Ok().json(order),
        Err(err) => error_response("link customer", err),
    }
}

#[put("/orders/{order_id}/status")]
/// Moves a tab through the kitchen. Marking it `paid` settles it and is
/// reserved to cashiers.
pub async fn update_status(
    order_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    notifier: web::Data<dyn NotificationSender>,
    form: web::Json<UpdateStatusForm>,
) -> impl Responder {
    let allowed = if form.status.trim() == "paid" {
        MANAGEMENT_ROLES
    } else {
        KITCHEN_ROLES
    };
    let ctx = match authorize(&user, allowed) {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };

    match orders::update_status(
        repo.get_ref(),
        notifier.get_ref(),
        &ctx,
        order_id.into_inner(),
        form.into_inner(),
    ) {
        Ok(order) => HttpResponse::Ok().json(order),
        Err(err) => error_response("update order status", err),
    }
}

#[post("/orders/{order_id}/settle")]
pub async fn settle_order(
    order_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    notifier: web::Data<dyn NotificationSender>,
    form: web::Json<SettleOrderForm>,
) -> impl Responder {
    let ctx = match authorize(&user, MANAGEMENT_ROLES) {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };

    match orders::settle(
        repo.get_ref(),
        notifier.get_ref(),
        &ctx,
        order_id.into_inner(),
        form.into_inner(),
    ) {
        Ok(order) => HttpResponse::Ok().json(order),
        Err(err) => error_response("settle order", err),
    }
}

//! Order lifecycle coordinator.
//!
//! Every state-changing call maps onto exactly one repository unit of work.
//! Customer notifications are sent only after that unit of work committed and
//! can never fail the call.

use crate::domain::order::{
    Order, OrderItem, OrderListQuery, OrderStatus, Settlement, StatusChange, StatusTransition,
};
use crate::domain::tenant::TenantContext;
use crate::forms::orders::{
    AddItemForm, LinkCustomerForm, OpenOrderForm, OrderFormError, OrdersQuery, SettleOrderForm,
    UpdateStatusForm,
};
use crate::notifications::{NotificationSender, status_message};
use crate::repository::{CustomerReader, OrderReader, OrderWriter};
use crate::services::{ServiceError, ServiceResult};

impl From<OrderFormError> for ServiceError {
    fn from(value: OrderFormError) -> Self {
        match value {
            OrderFormError::InvalidStatus(_) => ServiceError::InvalidStatus(value.to_string()),
            other => ServiceError::Validation(other.to_string()),
        }
    }
}

/// Opens a tab, occupying the table when one is given.
pub fn open_order<R>(repo: &R, ctx: &TenantContext, form: OpenOrderForm) -> ServiceResult<Order>
where
    R: OrderWriter + ?Sized,
{
    let new_order = form.into_new_order(ctx)?;
    let order = repo.open_order(&new_order)?;

    log::info!(
        "Order {} opened by user {} (table {:?}, customer {:?})",
        order.id,
        ctx.user_id,
        order.table_id,
        order.customer_id
    );

    Ok(order)
}

pub fn get_order<R>(repo: &R, ctx: &TenantContext, order_id: i32) -> ServiceResult<Order>
where
    R: OrderReader + ?Sized,
{
    repo.get_order_by_id(order_id, ctx.tenant_id)?
        .ok_or(ServiceError::NotFound)
}

/// Kitchen view: tabs in creation order, optionally filtered by status.
pub fn list_orders<R>(
    repo: &R,
    ctx: &TenantContext,
    query: OrdersQuery,
) -> ServiceResult<Vec<Order>>
where
    R: OrderReader + ?Sized,
{
    let mut list_query = OrderListQuery::new(ctx.tenant_id);

    if let Some(status) = query
        .status
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        let status = status
            .parse::<OrderStatus>()
            .map_err(|err| ServiceError::InvalidStatus(err.to_string()))?;
        list_query = list_query.status(status);
    }

    if query.open_only {
        list_query = list_query.open_only();
    }

    Ok(repo.list_orders(list_query)?)
}

/// Unpaid, uncanceled tab currently seated at `table_id`.
pub fn find_open_order_for_table<R>(
    repo: &R,
    ctx: &TenantContext,
    table_id: i32,
) -> ServiceResult<Order>
where
    R: OrderReader + ?Sized,
{
    let query = OrderListQuery::new(ctx.tenant_id)
        .table_id(table_id)
        .open_only();

    repo.list_orders(query)?
        .into_iter()
        .next()
        .ok_or(ServiceError::NotFound)
}

/// Most recent unpaid, uncanceled tab of `customer_id`.
pub fn find_active_order_for_customer<R>(
    repo: &R,
    ctx: &TenantContext,
    customer_id: i32,
) -> ServiceResult<Order>
where
    R: OrderReader + ?Sized,
{
    let query = OrderListQuery::new(ctx.tenant_id)
        .customer_id(customer_id)
        .open_only();

    repo.list_orders(query)?
        .into_iter()
        .last()
        .ok_or(ServiceError::NotFound)
}

/// Adds a line item priced from the catalog at this moment.
pub fn add_item<R>(
    repo: &R,
    ctx: &TenantContext,
    order_id: i32,
    form: AddItemForm,
) -> ServiceResult<OrderItem>
where
    R: OrderWriter + ?Sized,
{
    let new_item = form.into_new_item()?;
    Ok(repo.add_order_item(order_id, ctx.tenant_id, &new_item)?)
}

/// Removes a line item and returns the tab with its reduced total.
pub fn remove_item<R>(
    repo: &R,
    ctx: &TenantContext,
    order_id: i32,
    item_id: i32,
) -> ServiceResult<Order>
where
    R: OrderWriter + ?Sized,
{
    Ok(repo.remove_order_item(order_id, item_id, ctx.tenant_id)?)
}

/// Links (or re-links) a customer to a tab.
pub fn link_customer<R>(
    repo: &R,
    ctx: &TenantContext,
    order_id: i32,
    form: LinkCustomerForm,
) -> ServiceResult<Order>
where
    R: OrderWriter + ?Sized,
{
    let customer_id = form.into_customer_id()?;
    Ok(repo.link_customer(order_id, ctx.tenant_id, customer_id)?)
}

/// Moves a tab to the requested status. `paid` runs the settlement.
pub fn update_status<R, N>(
    repo: &R,
    notifier: &N,
    ctx: &TenantContext,
    order_id: i32,
    form: UpdateStatusForm,
) -> ServiceResult<Order>
where
    R: OrderWriter + CustomerReader + ?Sized,
    N: NotificationSender + ?Sized,
{
    let change = form.into_status_change()?;
    apply_status_change(repo, notifier, ctx, order_id, &change)
}

/// Settles a tab: tip, revenue, stock depletion, table release and `paid`,
/// all or nothing. Settling an already paid tab changes nothing.
pub fn settle<R, N>(
    repo: &R,
    notifier: &N,
    ctx: &TenantContext,
    order_id: i32,
    form: SettleOrderForm,
) -> ServiceResult<Order>
where
    R: OrderWriter + CustomerReader + ?Sized,
    N: NotificationSender + ?Sized,
{
    let settlement: Settlement = form.into_settlement()?;
    apply_status_change(
        repo,
        notifier,
        ctx,
        order_id,
        &StatusChange::Settle(settlement),
    )
}

fn apply_status_change<R, N>(
    repo: &R,
    notifier: &N,
    ctx: &TenantContext,
    order_id: i32,
    change: &StatusChange,
) -> ServiceResult<Order>
where
    R: OrderWriter + CustomerReader + ?Sized,
    N: NotificationSender + ?Sized,
{
    let transition = repo
        .change_order_status(order_id, ctx.tenant_id, change)
        .inspect_err(|err| {
            log::warn!(
                "Order {order_id} could not move to {}: {err}",
                change.target()
            )
        })?;

    if transition.changed() {
        log::info!(
            "Order {order_id} moved from {} to {} by user {}",
            transition.previous,
            transition.order.status,
            ctx.user_id
        );
    }

    notify_customer(repo, notifier, &transition);

    Ok(transition.order)
}

/// Best-effort message to the linked customer. Every failure is logged and
/// swallowed.
fn notify_customer<R, N>(repo: &R, notifier: &N, transition: &StatusTransition)
where
    R: CustomerReader + ?Sized,
    N: NotificationSender + ?Sized,
{
    let order = &transition.order;

    if !transition.changed() || !order.status.notifies_customer() {
        return;
    }

    let Some(customer_id) = order.customer_id else {
        return;
    };

    let customer = match repo.get_customer_by_id(customer_id, order.tenant_id) {
        Ok(Some(customer)) => customer,
        Ok(None) => {
            log::warn!("Customer {customer_id} of order {} not found", order.id);
            return;
        }
        Err(err) => {
            log::error!("Failed to load customer {customer_id} for notification: {err}");
            return;
        }
    };

    let Some(phone) = customer.phone.as_deref() else {
        return;
    };

    let Some(body) = status_message(order.status, &customer.name, order.id) else {
        return;
    };

    if let Err(err) = notifier.send(phone, &body) {
        log::error!("Failed to notify customer {customer_id} about order {}: {err}", order.id);
    }
}

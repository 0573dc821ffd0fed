use chrono::Utc;
use diesel::dsl::{exists, select};
use diesel::prelude::*;
use diesel::sqlite::{Sqlite, SqliteConnection};

use crate::domain::order::{
    NewOrder as DomainNewOrder, NewOrderItem as DomainNewOrderItem, Order as DomainOrder,
    OrderItem as DomainOrderItem, OrderListQuery, OrderStatus, Settlement, StatusChange,
    StatusTransition,
};
use crate::models::order::{
    NewOrder as DbNewOrder, NewOrderItem as DbNewOrderItem, Order as DbOrder,
    OrderItem as DbOrderItem,
};
use crate::repository::cash_session::CashSessionLedger;
use crate::repository::inventory::InventoryLedger;
use crate::repository::table::TableRegistry;
use crate::repository::{
    DieselRepository, OrderReader, OrderWriter, RepositoryError, RepositoryResult,
};

impl OrderReader for DieselRepository {
    fn get_order_by_id(&self, id: i32, tenant_id: i32) -> RepositoryResult<Option<DomainOrder>> {
        use crate::schema::orders;

        let mut conn = self.conn()?;
        let order = orders::table
            .filter(orders::id.eq(id))
            .filter(orders::tenant_id.eq(tenant_id))
            .first::<DbOrder>(&mut conn)
            .optional()?;

        match order {
            Some(order) => {
                let items = load_items(&mut conn, order.id)?;
                Ok(Some(order.into_domain(items)?))
            }
            None => Ok(None),
        }
    }

    fn list_orders(&self, query: OrderListQuery) -> RepositoryResult<Vec<DomainOrder>> {
        use crate::schema::orders;

        let mut conn = self.conn()?;

        let rows = filtered_orders(&query)
            .order((orders::created_at.asc(), orders::id.asc()))
            .load::<DbOrder>(&mut conn)?;

        let line_items = DbOrderItem::belonging_to(&rows)
            .order(crate::schema::order_items::id.asc())
            .load::<DbOrderItem>(&mut conn)?
            .grouped_by(&rows);

        rows.into_iter()
            .zip(line_items)
            .map(|(order, items)| order.into_domain(items).map_err(RepositoryError::from))
            .collect()
    }

    fn count_orders(&self, query: OrderListQuery) -> RepositoryResult<i64> {
        let mut conn = self.conn()?;
        Ok(filtered_orders(&query).count().get_result::<i64>(&mut conn)?)
    }
}

fn filtered_orders(query: &OrderListQuery) -> crate::schema::orders::BoxedQuery<'static, Sqlite> {
    use crate::schema::orders;

    let mut items = orders::table
        .filter(orders::tenant_id.eq(query.tenant_id))
        .into_boxed::<Sqlite>();

    if let Some(status) = query.status {
        items = items.filter(orders::status.eq(status.as_str()));
    }
    if let Some(table_id) = query.table_id {
        items = items.filter(orders::table_id.eq(table_id));
    }
    if let Some(customer_id) = query.customer_id {
        items = items.filter(orders::customer_id.eq(customer_id));
    }
    if query.open_only {
        items = items.filter(
            orders::status.ne_all(vec![OrderStatus::Paid.as_str(), OrderStatus::Canceled.as_str()]),
        );
    }
    if let Some((from, to)) = query.created_between {
        items = items.filter(orders::created_at.between(from, to));
    }

    items
}

impl OrderWriter for DieselRepository {
    fn open_order(&self, new_order: &DomainNewOrder) -> RepositoryResult<DomainOrder> {
        use crate::schema::orders;

        self.unit_of_work(|tx| {
            if let Some(customer_id) = new_order.customer_id {
                ensure_customer_in_tenant(tx, customer_id, new_order.tenant_id)?;
            }

            if let Some(table_id) = new_order.table_id {
                TableRegistry::mark_occupied(tx, table_id, new_order.tenant_id)?;
            }

            let created = diesel::insert_into(orders::table)
                .values(&DbNewOrder::from_domain(
                    new_order,
                    OrderStatus::Pending.as_str(),
                    Utc::now().naive_utc(),
                ))
                .get_result::<DbOrder>(tx)?;

            Ok(created.into_domain(Vec::new())?)
        })
    }

    fn add_order_item(
        &self,
        order_id: i32,
        tenant_id: i32,
        new_item: &DomainNewOrderItem,
    ) -> RepositoryResult<DomainOrderItem> {
        use crate::schema::{order_items, orders, products};

        self.unit_of_work(|tx| {
            let order = load_order_row(tx, order_id, tenant_id)?;
            ensure_editable(&order)?;

            let unit_price_cents = products::table
                .filter(products::id.eq(new_item.product_id))
                .filter(products::tenant_id.eq(tenant_id))
                .select(products::price_cents)
                .first::<i64>(tx)
                .optional()?
                .ok_or(RepositoryError::NotFound)?;

            let created = diesel::insert_into(order_items::table)
                .values(&DbNewOrderItem::from_domain(
                    order.id,
                    new_item,
                    unit_price_cents,
                ))
                .get_result::<DbOrderItem>(tx)?;

            let total_cents = line_total(&created)
                .and_then(|line| order.total_cents.checked_add(line))
                .ok_or_else(|| {
                    RepositoryError::OutOfRange(format!("order {} total", order.id))
                })?;

            diesel::update(orders::table.filter(orders::id.eq(order.id)))
                .set((
                    orders::total_cents.eq(total_cents),
                    orders::updated_at.eq(Utc::now().naive_utc()),
                ))
                .execute(tx)?;

            Ok(created.into())
        })
    }

    fn remove_order_item(
        &self,
        order_id: i32,
        item_id: i32,
        tenant_id: i32,
    ) -> RepositoryResult<DomainOrder> {
        use crate::schema::{order_items, orders};

        self.unit_of_work(|tx| {
            let order = load_order_row(tx, order_id, tenant_id)?;
            ensure_editable(&order)?;

            let item = order_items::table
                .filter(order_items::id.eq(item_id))
                .filter(order_items::order_id.eq(order.id))
                .first::<DbOrderItem>(tx)
                .optional()?
                .ok_or(RepositoryError::NotFound)?;

            let total_cents = line_total(&item)
                .and_then(|line| order.total_cents.checked_sub(line))
                .ok_or_else(|| {
                    RepositoryError::OutOfRange(format!("order {} total", order.id))
                })?;

            diesel::delete(order_items::table.filter(order_items::id.eq(item.id))).execute(tx)?;

            diesel::update(orders::table.filter(orders::id.eq(order.id)))
                .set((
                    orders::total_cents.eq(total_cents),
                    orders::updated_at.eq(Utc::now().naive_utc()),
                ))
                .execute(tx)?;

            load_order(tx, order.id, tenant_id)
        })
    }

    fn link_customer(
        &self,
        order_id: i32,
        tenant_id: i32,
        customer_id: i32,
    ) -> RepositoryResult<DomainOrder> {
        use crate::schema::orders;

        self.unit_of_work(|tx| {
            ensure_customer_in_tenant(tx, customer_id, tenant_id)?;

            let updated = diesel::update(
                orders::table
                    .filter(orders::id.eq(order_id))
                    .filter(orders::tenant_id.eq(tenant_id)),
            )
            .set((
                orders::customer_id.eq(Some(customer_id)),
                orders::updated_at.eq(Utc::now().naive_utc()),
            ))
            .execute(tx)?;

            if updated == 0 {
                return Err(RepositoryError::NotFound);
            }

            load_order(tx, order_id, tenant_id)
        })
    }

    fn change_order_status(
        &self,
        order_id: i32,
        tenant_id: i32,
        change: &StatusChange,
    ) -> RepositoryResult<StatusTransition> {
        self.unit_of_work(|tx| {
            let row = load_order_row(tx, order_id, tenant_id)?;
            let previous: OrderStatus = row.status.parse()?;
            let target = change.target();

            // Repeating the current status, including a retried settlement,
            // leaves every ledger untouched.
            if previous == target {
                return Ok(StatusTransition {
                    previous,
                    order: load_order(tx, order_id, tenant_id)?,
                    revenue_transaction_id: None,
                });
            }

            if previous.is_closed() {
                return Err(RepositoryError::Conflict(format!(
                    "order {order_id} is already {previous}"
                )));
            }

            let revenue_transaction_id = match change {
                StatusChange::Settle(settlement) => Some(settle(tx, &row, settlement)?),
                StatusChange::Advance(OrderStatus::Paid) => {
                    return Err(RepositoryError::Conflict(
                        "orders are paid only through settlement".to_string(),
                    ));
                }
                StatusChange::Advance(status) => {
                    set_status(tx, &row, previous, *status)?;
                    if *status == OrderStatus::Canceled {
                        if let Some(table_id) = row.table_id {
                            TableRegistry::mark_available(tx, table_id)?;
                        }
                    }
                    None
                }
            };

            Ok(StatusTransition {
                previous,
                order: load_order(tx, order_id, tenant_id)?,
                revenue_transaction_id,
            })
        })
    }
}

/// Settlement of an unpaid tab: records the tip, posts revenue to the open
/// session, depletes stock, frees the table and marks the tab paid.
///
/// Returns the id of the revenue entry.
fn settle(
    tx: &mut SqliteConnection,
    order: &DbOrder,
    settlement: &Settlement,
) -> RepositoryResult<i32> {
    use crate::schema::orders;

    let session =
        CashSessionLedger::find_open_session(tx, order.tenant_id, settlement.cash_register_id)?
            .ok_or(RepositoryError::NoOpenSession)?;

    let final_cents = order
        .total_cents
        .checked_add(settlement.tip_cents)
        .ok_or_else(|| {
            RepositoryError::OutOfRange(format!("order {} final amount", order.id))
        })?;
    let now = Utc::now().naive_utc();

    let updated = diesel::update(
        orders::table
            .filter(orders::id.eq(order.id))
            .filter(orders::status.ne(OrderStatus::Paid.as_str())),
    )
    .set((
        orders::tip_cents.eq(settlement.tip_cents),
        orders::final_cents.eq(Some(final_cents)),
        orders::updated_at.eq(now),
    ))
    .execute(tx)?;

    if updated == 0 {
        return Err(RepositoryError::Conflict(format!(
            "order {} is already paid",
            order.id
        )));
    }

    let revenue = CashSessionLedger::post_revenue(
        tx,
        &session,
        order.id,
        final_cents,
        &settlement.payment_method,
    )?;

    for item in load_items(tx, order.id)? {
        InventoryLedger::deplete_for_sale(tx, item.product_id, item.quantity, order.tenant_id)?;
    }

    if let Some(table_id) = order.table_id {
        TableRegistry::mark_available(tx, table_id)?;
    }

    diesel::update(orders::table.filter(orders::id.eq(order.id)))
        .set((
            orders::status.eq(OrderStatus::Paid.as_str()),
            orders::updated_at.eq(now),
        ))
        .execute(tx)?;

    log::info!(
        "Order {} settled for {final_cents} cents on cash session {}",
        order.id,
        session.id
    );

    Ok(revenue.id)
}

fn set_status(
    tx: &mut SqliteConnection,
    order: &DbOrder,
    previous: OrderStatus,
    target: OrderStatus,
) -> RepositoryResult<()> {
    use crate::schema::orders;

    let updated = diesel::update(
        orders::table
            .filter(orders::id.eq(order.id))
            .filter(orders::status.eq(previous.as_str())),
    )
    .set((
        orders::status.eq(target.as_str()),
        orders::updated_at.eq(Utc::now().naive_utc()),
    ))
    .execute(tx)?;

    if updated == 0 {
        return Err(RepositoryError::Conflict(format!(
            "order {} changed concurrently",
            order.id
        )));
    }

    Ok(())
}

fn ensure_editable(order: &DbOrder) -> RepositoryResult<()> {
    let status: OrderStatus = order.status.parse()?;
    if status.is_closed() {
        return Err(RepositoryError::Conflict(format!(
            "order {} is already {status}",
            order.id
        )));
    }
    Ok(())
}

fn ensure_customer_in_tenant(
    tx: &mut SqliteConnection,
    customer_id: i32,
    tenant_id: i32,
) -> RepositoryResult<()> {
    use crate::schema::customers;

    let found = select(exists(
        customers::table
            .filter(customers::id.eq(customer_id))
            .filter(customers::tenant_id.eq(tenant_id)),
    ))
    .get_result::<bool>(tx)?;

    if found {
        Ok(())
    } else {
        Err(RepositoryError::NotFound)
    }
}

fn line_total(item: &DbOrderItem) -> Option<i64> {
    i64::from(item.quantity).checked_mul(item.unit_price_cents)
}

fn load_order_row(
    tx: &mut SqliteConnection,
    order_id: i32,
    tenant_id: i32,
) -> RepositoryResult<DbOrder> {
    use crate::schema::orders;

    orders::table
        .filter(orders::id.eq(order_id))
        .filter(orders::tenant_id.eq(tenant_id))
        .first::<DbOrder>(tx)
        .optional()?
        .ok_or(RepositoryError::NotFound)
}

fn load_items(tx: &mut SqliteConnection, order_id: i32) -> RepositoryResult<Vec<DbOrderItem>> {
    use crate::schema::order_items;

    Ok(order_items::table
        .filter(order_items::order_id.eq(order_id))
        .order(order_items::id.asc())
        .load::<DbOrderItem>(tx)?)
}

fn load_order(
    tx: &mut SqliteConnection,
    order_id: i32,
    tenant_id: i32,
) -> RepositoryResult<DomainOrder> {
    let order = load_order_row(tx, order_id, tenant_id)?;
    let items = load_items(tx, order.id)?;
    Ok(order.into_domain(items)?)
}

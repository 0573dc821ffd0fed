use pushkind_pos::domain::order::OrderStatus;
use pushkind_pos::domain::table::TableStatus;
use pushkind_pos::forms::orders::{
    AddItemForm, LinkCustomerForm, OpenOrderForm, OrdersQuery, UpdateStatusForm,
};
use pushkind_pos::notifications::LogSender;
use pushkind_pos::services::{ServiceError, orders, tables};

mod common;

use common::{Restaurant, TENANT, TestDb, ctx};

fn item(product_id: i32, quantity: i32) -> AddItemForm {
    AddItemForm {
        product_id,
        quantity,
        observation: Some("no onions".to_string()),
    }
}

fn status(value: &str) -> UpdateStatusForm {
    UpdateStatusForm {
        status: value.to_string(),
        ..Default::default()
    }
}

#[test]
fn test_remove_item_restores_total() {
    let test_db = TestDb::new();
    let repo = test_db.repo();
    let shop = Restaurant::seed(&repo);

    let order = orders::open_order(
        &repo,
        &ctx(),
        OpenOrderForm {
            table_id: Some(shop.table_id),
            customer_id: None,
        },
    )
    .expect("open");
    orders::add_item(&repo, &ctx(), order.id, item(shop.soda_id, 1)).expect("soda");
    let burgers =
        orders::add_item(&repo, &ctx(), order.id, item(shop.burger_id, 3)).expect("burgers");

    assert_eq!(burgers.unit_price_cents, 1000);
    assert_eq!(burgers.observation.as_deref(), Some("no onions"));
    assert_eq!(
        orders::get_order(&repo, &ctx(), order.id)
            .expect("order")
            .total_cents,
        3500
    );

    let order = orders::remove_item(&repo, &ctx(), order.id, burgers.id).expect("remove");

    assert_eq!(order.total_cents, 500);
    assert_eq!(order.items.len(), 1);
    assert_eq!(order.total_cents, order.items_total_cents());
}

#[test]
fn test_unknown_product_is_not_found() {
    let test_db = TestDb::new();
    let repo = test_db.repo();
    let shop = Restaurant::seed(&repo);

    let order = orders::open_order(
        &repo,
        &ctx(),
        OpenOrderForm {
            table_id: None,
            customer_id: Some(shop.customer_id),
        },
    )
    .expect("open");

    let result = orders::add_item(&repo, &ctx(), order.id, item(9_999, 1));
    assert!(matches!(result, Err(ServiceError::NotFound)));
}

#[test]
fn test_cancel_frees_table_and_closes_tab() {
    let test_db = TestDb::new();
    let repo = test_db.repo();
    let shop = Restaurant::seed(&repo);

    let order = orders::open_order(
        &repo,
        &ctx(),
        OpenOrderForm {
            table_id: Some(shop.table_id),
            customer_id: None,
        },
    )
    .expect("open");

    let canceled = orders::update_status(&repo, &LogSender, &ctx(), order.id, status("canceled"))
        .expect("cancel");
    assert_eq!(canceled.status, OrderStatus::Canceled);

    let table = tables::get_table(&repo, &ctx(), shop.table_id).expect("table");
    assert_eq!(table.status, TableStatus::Available);

    let edit = orders::add_item(&repo, &ctx(), order.id, item(shop.soda_id, 1));
    assert!(matches!(edit, Err(ServiceError::Conflict(_))));

    let reopen = orders::update_status(&repo, &LogSender, &ctx(), order.id, status("pending"));
    assert!(matches!(reopen, Err(ServiceError::Conflict(_))));

    // The table takes a new tab once the old one is gone.
    orders::open_order(
        &repo,
        &ctx(),
        OpenOrderForm {
            table_id: Some(shop.table_id),
            customer_id: None,
        },
    )
    .expect("new tab");
}

#[test]
fn test_kitchen_progress_and_lookups() {
    let test_db = TestDb::new();
    let repo = test_db.repo();
    let shop = Restaurant::seed(&repo);

    let order = orders::open_order(
        &repo,
        &ctx(),
        OpenOrderForm {
            table_id: Some(shop.table_id),
            customer_id: None,
        },
    )
    .expect("open");
    orders::link_customer(
        &repo,
        &ctx(),
        order.id,
        LinkCustomerForm {
            customer_id: shop.customer_id,
        },
    )
    .expect("link");

    for next in ["in_progress", "ready", "delivered"] {
        orders::update_status(&repo, &LogSender, &ctx(), order.id, status(next)).expect(next);
    }

    let seated = orders::find_open_order_for_table(&repo, &ctx(), shop.table_id).expect("seated");
    assert_eq!(seated.id, order.id);
    assert_eq!(seated.status, OrderStatus::Delivered);

    let active =
        orders::find_active_order_for_customer(&repo, &ctx(), shop.customer_id).expect("active");
    assert_eq!(active.id, order.id);

    let ready = orders::list_orders(
        &repo,
        &ctx(),
        OrdersQuery {
            status: Some("ready".to_string()),
            open_only: false,
        },
    )
    .expect("list");
    assert!(ready.is_empty());

    let invalid = orders::list_orders(
        &repo,
        &ctx(),
        OrdersQuery {
            status: Some("served".to_string()),
            open_only: false,
        },
    );
    assert!(matches!(invalid, Err(ServiceError::InvalidStatus(_))));
}

#[test]
fn test_other_tenant_cannot_see_or_touch_tab() {
    let test_db = TestDb::new();
    let repo = test_db.repo();
    let shop = Restaurant::seed(&repo);

    let order = orders::open_order(
        &repo,
        &ctx(),
        OpenOrderForm {
            table_id: Some(shop.table_id),
            customer_id: None,
        },
    )
    .expect("open");

    let stranger = pushkind_pos::domain::tenant::TenantContext::new(TENANT + 1, 99);

    assert!(matches!(
        orders::get_order(&repo, &stranger, order.id),
        Err(ServiceError::NotFound)
    ));
    assert!(matches!(
        orders::add_item(&repo, &stranger, order.id, item(shop.soda_id, 1)),
        Err(ServiceError::NotFound)
    ));
    assert!(matches!(
        orders::open_order(
            &repo,
            &stranger,
            OpenOrderForm {
                table_id: Some(shop.table_id),
                customer_id: None,
            },
        ),
        Err(ServiceError::NotFound)
    ));
}

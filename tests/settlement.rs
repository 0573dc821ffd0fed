use std::sync::{Barrier, Mutex};
use std::thread;

use pushkind_pos::domain::cash_session::TransactionKind;
use pushkind_pos::domain::order::{OrderStatus, Settlement, StatusChange};
use pushkind_pos::domain::table::TableStatus;
use pushkind_pos::forms::orders::{AddItemForm, OpenOrderForm, SettleOrderForm, UpdateStatusForm};
use pushkind_pos::notifications::{LogSender, NotificationError, NotificationSender};
use pushkind_pos::repository::{
    CashSessionReader, DieselRepository, InventoryReader, OrderReader, OrderWriter,
    RepositoryError,
};
use pushkind_pos::services::{ServiceError, cash_sessions, orders, tables};
use serde_json::json;

mod common;

use common::{Restaurant, TENANT, TestDb, ctx};

/// Records every message and then fails, like an unreachable gateway.
#[derive(Default)]
struct FailingRecorder {
    sent: Mutex<Vec<(String, String)>>,
}

impl NotificationSender for FailingRecorder {
    fn send(&self, phone: &str, body: &str) -> Result<(), NotificationError> {
        self.sent
            .lock()
            .expect("recorder lock")
            .push((phone.to_string(), body.to_string()));
        Err(NotificationError::Rejected(503))
    }
}

fn cash_tip() -> SettleOrderForm {
    SettleOrderForm {
        payment_method: "cash".to_string(),
        tip: Some(json!("2.50")),
        cash_register_id: None,
    }
}

/// Table tab with two burgers at 10.00 and one soda at 5.00.
fn open_tab(repo: &DieselRepository, shop: &Restaurant) -> i32 {
    let ctx = ctx();
    let order = orders::open_order(
        repo,
        &ctx,
        OpenOrderForm {
            table_id: Some(shop.table_id),
            customer_id: None,
        },
    )
    .expect("open order");

    for (product_id, quantity) in [(shop.burger_id, 2), (shop.soda_id, 1)] {
        orders::add_item(
            repo,
            &ctx,
            order.id,
            AddItemForm {
                product_id,
                quantity,
                observation: None,
            },
        )
        .expect("add item");
    }

    order.id
}

#[test]
fn test_table_cannot_hold_two_open_tabs() {
    let test_db = TestDb::new();
    let repo = test_db.repo();
    let shop = Restaurant::seed(&repo);

    open_tab(&repo, &shop);

    let table = tables::get_table(&repo, &ctx(), shop.table_id).expect("table");
    assert_eq!(table.status, TableStatus::Occupied);

    let second = orders::open_order(
        &repo,
        &ctx(),
        OpenOrderForm {
            table_id: Some(shop.table_id),
            customer_id: None,
        },
    );
    assert!(matches!(second, Err(ServiceError::Conflict(_))));
}

#[test]
fn test_total_follows_line_items() {
    let test_db = TestDb::new();
    let repo = test_db.repo();
    let shop = Restaurant::seed(&repo);

    let order_id = open_tab(&repo, &shop);
    let order = orders::get_order(&repo, &ctx(), order_id).expect("order");

    assert_eq!(order.total_cents, 2500);
    assert_eq!(order.total_cents, order.items_total_cents());
}

#[test]
fn test_settle_without_open_session_changes_nothing() {
    let test_db = TestDb::new();
    let repo = test_db.repo();
    let shop = Restaurant::seed(&repo);
    let order_id = open_tab(&repo, &shop);

    let result = orders::settle(&repo, &LogSender, &ctx(), order_id, cash_tip());
    assert!(matches!(result, Err(ServiceError::NoOpenSession)));

    let order = repo
        .get_order_by_id(order_id, TENANT)
        .expect("load")
        .expect("order exists");
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.tip_cents, 0);
    assert_eq!(order.final_cents, None);

    let table = tables::get_table(&repo, &ctx(), shop.table_id).expect("table");
    assert_eq!(table.status, TableStatus::Occupied);

    let beef = repo
        .get_inventory_item(shop.beef_id, TENANT)
        .expect("load")
        .expect("beef");
    assert_eq!(beef.quantity_on_hand, 5_000);
}

#[test]
fn test_settle_posts_revenue_frees_table_and_depletes_stock() {
    let test_db = TestDb::new();
    let repo = test_db.repo();
    let shop = Restaurant::seed(&repo);
    let order_id = open_tab(&repo, &shop);
    let session_id = shop.open_register(&repo);

    let order = orders::settle(&repo, &LogSender, &ctx(), order_id, cash_tip()).expect("settle");

    assert_eq!(order.status, OrderStatus::Paid);
    assert_eq!(order.tip_cents, 250);
    assert_eq!(order.final_cents, Some(2750));

    let ledger = repo
        .list_session_transactions(session_id, TENANT)
        .expect("ledger");
    let revenue: Vec<_> = ledger
        .iter()
        .filter(|entry| entry.kind == TransactionKind::Revenue)
        .collect();
    assert_eq!(revenue.len(), 1);
    assert_eq!(revenue[0].amount_cents, 2750);
    assert_eq!(revenue[0].order_id, Some(order_id));
    assert_eq!(revenue[0].payment_method.as_deref(), Some("cash"));

    let table = tables::get_table(&repo, &ctx(), shop.table_id).expect("table");
    assert_eq!(table.status, TableStatus::Available);

    let beef = repo
        .get_inventory_item(shop.beef_id, TENANT)
        .expect("load")
        .expect("beef");
    assert_eq!(beef.quantity_on_hand, 5_000 - 2 * 150);

    // One bun in stock, two burgers sold.
    let bun = repo
        .get_inventory_item(shop.bun_id, TENANT)
        .expect("load")
        .expect("bun");
    assert_eq!(bun.quantity_on_hand, -1_000);

    let summary = cash_sessions::session_summary(&repo, &ctx(), session_id).expect("summary");
    assert_eq!(summary.expected_balance_cents, 10_000 + 2750);
}

#[test]
fn test_second_settlement_is_a_no_op() {
    let test_db = TestDb::new();
    let repo = test_db.repo();
    let shop = Restaurant::seed(&repo);
    let order_id = open_tab(&repo, &shop);
    let session_id = shop.open_register(&repo);

    orders::settle(&repo, &LogSender, &ctx(), order_id, cash_tip()).expect("first settle");
    let again = orders::settle(&repo, &LogSender, &ctx(), order_id, cash_tip()).expect("second");

    assert_eq!(again.status, OrderStatus::Paid);
    assert_eq!(again.final_cents, Some(2750));

    let revenue_count = repo
        .list_session_transactions(session_id, TENANT)
        .expect("ledger")
        .into_iter()
        .filter(|entry| entry.kind == TransactionKind::Revenue)
        .count();
    assert_eq!(revenue_count, 1);

    let beef = repo
        .get_inventory_item(shop.beef_id, TENANT)
        .expect("load")
        .expect("beef");
    assert_eq!(beef.quantity_on_hand, 4_700);
}

#[test]
fn test_paid_status_settles_through_update_status() {
    let test_db = TestDb::new();
    let repo = test_db.repo();
    let shop = Restaurant::seed(&repo);
    let order_id = open_tab(&repo, &shop);
    shop.open_register(&repo);

    let order = orders::update_status(
        &repo,
        &LogSender,
        &ctx(),
        order_id,
        UpdateStatusForm {
            status: "paid".to_string(),
            payment_method: Some("card".to_string()),
            tip: Some(json!("oops")),
            cash_register_id: Some(shop.register_id),
        },
    )
    .expect("paid");

    assert_eq!(order.status, OrderStatus::Paid);
    assert_eq!(order.final_cents, Some(2500));
}

#[test]
fn test_ready_notifies_linked_customer_and_swallows_failure() {
    let test_db = TestDb::new();
    let repo = test_db.repo();
    let shop = Restaurant::seed(&repo);
    let order_id = open_tab(&repo, &shop);
    orders::link_customer(
        &repo,
        &ctx(),
        order_id,
        pushkind_pos::forms::orders::LinkCustomerForm {
            customer_id: shop.customer_id,
        },
    )
    .expect("link");

    let notifier = FailingRecorder::default();
    let order = orders::update_status(
        &repo,
        &notifier,
        &ctx(),
        order_id,
        UpdateStatusForm {
            status: "ready".to_string(),
            ..Default::default()
        },
    )
    .expect("ready despite failed notification");

    assert_eq!(order.status, OrderStatus::Ready);

    let sent = notifier.sent.lock().expect("recorder lock");
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, "5511999998888");
    assert!(sent[0].1.contains("ready"));
}

#[test]
fn test_sales_report_lists_revenue() {
    let test_db = TestDb::new();
    let repo = test_db.repo();
    let shop = Restaurant::seed(&repo);
    let order_id = open_tab(&repo, &shop);
    shop.open_register(&repo);
    orders::settle(&repo, &LogSender, &ctx(), order_id, cash_tip()).expect("settle");

    let today = chrono::Utc::now().date_naive();
    let report = pushkind_pos::services::reports::sales_report(
        &repo,
        &ctx(),
        pushkind_pos::forms::cash_sessions::SalesReportForm {
            from: today.pred_opt().unwrap_or(today),
            to: today.succ_opt().unwrap_or(today),
        },
    )
    .expect("report");

    assert_eq!(report.total_transactions, 1);
    assert_eq!(report.total_revenue_cents, 2750);

    let revenue = repo
        .list_revenue(&pushkind_pos::domain::cash_session::SalesReportQuery {
            tenant_id: TENANT + 1,
            from: report.transactions[0].created_at,
            to: report.transactions[0].created_at,
        })
        .expect("other tenant");
    assert!(revenue.is_empty());
}

#[test]
fn test_oversized_tip_counts_as_no_tip() {
    let test_db = TestDb::new();
    let repo = test_db.repo();
    let shop = Restaurant::seed(&repo);
    let order_id = open_tab(&repo, &shop);
    let session_id = shop.open_register(&repo);

    let order = orders::settle(
        &repo,
        &LogSender,
        &ctx(),
        order_id,
        SettleOrderForm {
            payment_method: "cash".to_string(),
            tip: Some(json!("92233720368547758.07")),
            cash_register_id: None,
        },
    )
    .expect("settle");

    assert_eq!(order.tip_cents, 0);
    assert_eq!(order.final_cents, Some(2500));

    let summary = cash_sessions::session_summary(&repo, &ctx(), session_id).expect("summary");
    assert_eq!(summary.revenue_cents, 2500);
}

#[test]
fn test_final_amount_overflow_rolls_back() {
    let test_db = TestDb::new();
    let repo = test_db.repo();
    let shop = Restaurant::seed(&repo);
    let order_id = open_tab(&repo, &shop);
    let session_id = shop.open_register(&repo);

    let change = StatusChange::Settle(Settlement::new("cash").with_tip_cents(i64::MAX));
    let result = repo.change_order_status(order_id, TENANT, &change);
    assert!(matches!(result, Err(RepositoryError::OutOfRange(_))));

    let order = repo
        .get_order_by_id(order_id, TENANT)
        .expect("load")
        .expect("order exists");
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.final_cents, None);

    let summary = cash_sessions::session_summary(&repo, &ctx(), session_id).expect("summary");
    assert_eq!(summary.revenue_cents, 0);

    let beef = repo
        .get_inventory_item(shop.beef_id, TENANT)
        .expect("load")
        .expect("beef");
    assert_eq!(beef.quantity_on_hand, 5_000);
}

#[test]
fn test_concurrent_settlements_post_once() {
    let test_db = TestDb::new();
    let repo = test_db.repo();
    let shop = Restaurant::seed(&repo);
    let order_id = open_tab(&repo, &shop);
    let session_id = shop.open_register(&repo);
    let barrier = Barrier::new(2);

    let results: Vec<_> = thread::scope(|scope| {
        let handles: Vec<_> = (0..2)
            .map(|_| {
                let repo = repo.clone();
                let barrier = &barrier;
                scope.spawn(move || {
                    barrier.wait();
                    orders::settle(&repo, &LogSender, &ctx(), order_id, cash_tip())
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| handle.join().expect("thread panicked"))
            .collect()
    });

    for result in &results {
        let order = result.as_ref().expect("both settlements return the paid tab");
        assert_eq!(order.status, OrderStatus::Paid);
        assert_eq!(order.final_cents, Some(2750));
    }

    let revenue_count = repo
        .list_session_transactions(session_id, TENANT)
        .expect("ledger")
        .into_iter()
        .filter(|entry| entry.kind == TransactionKind::Revenue)
        .count();
    assert_eq!(revenue_count, 1);

    let beef = repo
        .get_inventory_item(shop.beef_id, TENANT)
        .expect("load")
        .expect("beef");
    assert_eq!(beef.quantity_on_hand, 4_700);
}

#[test]
fn test_concurrent_tabs_for_one_table_leave_one_open() {
    let test_db = TestDb::new();
    let repo = test_db.repo();
    let shop = Restaurant::seed(&repo);
    let barrier = Barrier::new(2);

    let results: Vec<_> = thread::scope(|scope| {
        let handles: Vec<_> = (0..2)
            .map(|_| {
                let repo = repo.clone();
                let barrier = &barrier;
                let table_id = shop.table_id;
                scope.spawn(move || {
                    barrier.wait();
                    orders::open_order(
                        &repo,
                        &ctx(),
                        OpenOrderForm {
                            table_id: Some(table_id),
                            customer_id: None,
                        },
                    )
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| handle.join().expect("thread panicked"))
            .collect()
    });

    assert_eq!(results.iter().filter(|result| result.is_ok()).count(), 1);
    assert!(
        results
            .iter()
            .any(|result| matches!(result, Err(ServiceError::Conflict(_))))
    );

    let open = orders::list_orders(
        &repo,
        &ctx(),
        pushkind_pos::forms::orders::OrdersQuery {
            status: None,
            open_only: true,
        },
    )
    .expect("list");
    assert_eq!(open.len(), 1);
    assert_eq!(open[0].table_id, Some(shop.table_id));
}

#[test]
fn test_dashboard_reflects_settled_tab() {
    let test_db = TestDb::new();
    let repo = test_db.repo();
    let shop = Restaurant::seed(&repo);
    let order_id = open_tab(&repo, &shop);
    shop.open_register(&repo);
    orders::settle(&repo, &LogSender, &ctx(), order_id, cash_tip()).expect("settle");

    let today = chrono::Utc::now().date_naive();
    let dashboard =
        pushkind_pos::services::reports::dashboard(&repo, &ctx(), today).expect("dashboard");

    assert_eq!(dashboard.revenue_cents, 2750);
    assert_eq!(dashboard.orders_count, 1);
    assert_eq!(dashboard.average_ticket_cents, 2750);
    assert_eq!(dashboard.open_orders_count, 0);
    assert_eq!(dashboard.daily_sales.len(), 7);
    assert_eq!(
        dashboard.daily_sales.last().map(|sales| sales.total_cents),
        Some(2750)
    );
}

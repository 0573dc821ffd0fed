use chrono::{Days, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::domain::cash_session::{DailySales, Dashboard, SalesReport};
use crate::domain::order::OrderListQuery;
use crate::domain::tenant::TenantContext;
use crate::forms::cash_sessions::SalesReportForm;
use crate::repository::{CashSessionReader, OrderReader};
use crate::services::{ServiceError, ServiceResult};

/// Number of days in the dashboard sales series, `today` included.
pub const DASHBOARD_DAYS: u64 = 7;

/// Revenue posted in the requested date range, newest first.
pub fn sales_report<R>(
    repo: &R,
    ctx: &TenantContext,
    form: SalesReportForm,
) -> ServiceResult<SalesReport>
where
    R: CashSessionReader + ?Sized,
{
    let query = form.into_query(ctx.tenant_id)?;
    Ok(SalesReport::new(repo.list_revenue(&query)?))
}

/// Revenue and tab counts of `today` plus the recent daily sales series.
pub fn dashboard<R>(repo: &R, ctx: &TenantContext, today: NaiveDate) -> ServiceResult<Dashboard>
where
    R: CashSessionReader + OrderReader + ?Sized,
{
    let first_day = today
        .checked_sub_days(Days::new(DASHBOARD_DAYS - 1))
        .unwrap_or(today);

    let series = SalesReportForm {
        from: first_day,
        to: today,
    }
    .into_query(ctx.tenant_id)?;
    let day = SalesReportForm {
        from: today,
        to: today,
    }
    .into_query(ctx.tenant_id)?;

    let mut daily_sales: Vec<DailySales> = first_day
        .iter_days()
        .take_while(|date| *date <= today)
        .map(|date| DailySales {
            date,
            total_cents: 0,
        })
        .collect();

    for entry in repo.list_revenue(&series)? {
        let date = entry.created_at.date();
        if let Some(sales) = daily_sales.iter_mut().find(|sales| sales.date == date) {
            sales.total_cents = sales.total_cents.saturating_add(entry.amount_cents);
        }
    }

    let revenue_cents = daily_sales
        .last()
        .map(|sales| sales.total_cents)
        .unwrap_or_default();

    let orders_count = repo.count_orders(
        OrderListQuery::new(ctx.tenant_id).created_between(day.from, day.to),
    )?;
    let open_orders_count = repo.count_orders(OrderListQuery::new(ctx.tenant_id).open_only())?;

    let average_ticket_cents = if orders_count > 0 {
        revenue_cents / orders_count
    } else {
        0
    };

    Ok(Dashboard {
        date: today,
        revenue_cents,
        orders_count,
        average_ticket_cents,
        open_orders_count,
        daily_sales,
    })
}

#[derive(Debug, Serialize)]
struct SalesReportRow<'a> {
    transaction_id: i32,
    created_at: NaiveDateTime,
    order_id: Option<i32>,
    cash_session_id: i32,
    payment_method: &'a str,
    amount: String,
    description: &'a str,
}

/// Renders a sales report as CSV with one row per revenue entry.
pub fn sales_report_csv(report: &SalesReport) -> ServiceResult<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    for entry in &report.transactions {
        writer
            .serialize(SalesReportRow {
                transaction_id: entry.id,
                created_at: entry.created_at,
                order_id: entry.order_id,
                cash_session_id: entry.cash_session_id,
                payment_method: entry.payment_method.as_deref().unwrap_or_default(),
                amount: format_cents(entry.amount_cents),
                description: &entry.description,
            })
            .map_err(|err| ServiceError::Internal(err.to_string()))?;
    }

    writer
        .into_inner()
        .map_err(|err| ServiceError::Internal(err.to_string()))
}

fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    format!("{sign}{}.{:02}", cents / 100, cents % 100)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::cash_session::{CashTransaction, TransactionKind};
    use crate::repository::mock::{MockCashSessionReader, MockRepository};

    fn revenue(id: i32, amount_cents: i64) -> CashTransaction {
        revenue_on(1, id, amount_cents)
    }

    fn revenue_on(day: u32, id: i32, amount_cents: i64) -> CashTransaction {
        CashTransaction {
            id,
            tenant_id: 1,
            cash_session_id: 2,
            order_id: Some(id * 10),
            kind: TransactionKind::Revenue,
            amount_cents,
            payment_method: Some("cash".to_string()),
            description: format!("Sale of order #{}", id * 10),
            created_at: NaiveDate::from_ymd_opt(2025, 3, day)
                .and_then(|date| date.and_hms_opt(12, 30, 0))
                .unwrap_or_default(),
        }
    }

    #[test]
    fn report_totals_revenue() {
        let mut repo = MockCashSessionReader::new();
        repo.expect_list_revenue()
            .withf(|query| query.tenant_id == 1 && query.from < query.to)
            .returning(|_| Ok(vec![revenue(2, 2_750), revenue(1, 1_000)]));

        let day = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap_or_default();
        let report = sales_report(
            &repo,
            &TenantContext::new(1, 3),
            SalesReportForm { from: day, to: day },
        )
        .expect("report");

        assert_eq!(report.total_revenue_cents, 3_750);
        assert_eq!(report.total_transactions, 2);
    }

    #[test]
    fn csv_has_header_and_decimal_amounts() {
        let report = SalesReport::new(vec![revenue(1, 2_750)]);

        let bytes = sales_report_csv(&report).expect("csv");
        let text = String::from_utf8(bytes).expect("utf-8");
        let mut lines = text.lines();

        assert_eq!(
            lines.next(),
            Some("transaction_id,created_at,order_id,cash_session_id,payment_method,amount,description")
        );
        assert_eq!(
            lines.next(),
            Some("1,2025-03-01T12:30:00,10,2,cash,27.50,Sale of order #10")
        );
    }

    #[test]
    fn dashboard_groups_revenue_by_day() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap_or_default();

        let mut repo = MockRepository::new();
        repo.expect_list_revenue()
            .withf(|query| query.tenant_id == 1 && query.from.date().to_string() == "2025-03-01")
            .returning(|_| {
                Ok(vec![
                    revenue_on(7, 3, 2_000),
                    revenue_on(7, 2, 1_000),
                    revenue_on(2, 1, 500),
                ])
            });
        repo.expect_count_orders()
            .withf(|query| !query.open_only && query.created_between.is_some())
            .times(1)
            .returning(|_| Ok(4));
        repo.expect_count_orders()
            .withf(|query| query.open_only && query.created_between.is_none())
            .times(1)
            .returning(|_| Ok(2));

        let dashboard = dashboard(&repo, &TenantContext::new(1, 3), today).expect("dashboard");

        assert_eq!(dashboard.revenue_cents, 3_000);
        assert_eq!(dashboard.orders_count, 4);
        assert_eq!(dashboard.average_ticket_cents, 750);
        assert_eq!(dashboard.open_orders_count, 2);
        assert_eq!(dashboard.daily_sales.len(), 7);
        assert_eq!(dashboard.daily_sales[1].total_cents, 500);
        assert_eq!(dashboard.daily_sales[6].date, today);
    }

    #[test]
    fn dashboard_without_tabs_has_zero_average() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap_or_default();

        let mut repo = MockRepository::new();
        repo.expect_list_revenue().returning(|_| Ok(Vec::new()));
        repo.expect_count_orders().returning(|_| Ok(0));

        let dashboard = dashboard(&repo, &TenantContext::new(1, 3), today).expect("dashboard");

        assert_eq!(dashboard.average_ticket_cents, 0);
        assert!(dashboard.daily_sales.iter().all(|sales| sales.total_cents == 0));
    }

    #[test]
    fn cents_are_formatted_with_two_places() {
        assert_eq!(format_cents(5), "0.05");
        assert_eq!(format_cents(-1_250), "-12.50");
    }
}

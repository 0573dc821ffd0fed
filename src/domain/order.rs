use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::UnknownVariant;

/// Possible lifecycle states for a tab.
///
/// Kitchen progress runs `pending → in_progress → ready → delivered`; `paid`
/// is reached only through settlement and `canceled` from any unpaid state.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Tab is open and has not been sent to the kitchen.
    #[default]
    Pending,
    /// Kitchen is preparing the order.
    InProgress,
    /// Order is ready to be served or picked up.
    Ready,
    /// Order has been handed to the customer.
    Delivered,
    /// Order has been settled against a cash session.
    Paid,
    /// Order has been abandoned before payment.
    Canceled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 6] = [
        OrderStatus::Pending,
        OrderStatus::InProgress,
        OrderStatus::Ready,
        OrderStatus::Delivered,
        OrderStatus::Paid,
        OrderStatus::Canceled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::InProgress => "in_progress",
            OrderStatus::Ready => "ready",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Paid => "paid",
            OrderStatus::Canceled => "canceled",
        }
    }

    /// Paid and canceled tabs accept no further changes.
    pub fn is_closed(self) -> bool {
        matches!(self, OrderStatus::Paid | OrderStatus::Canceled)
    }

    /// Whether entering this status sends the linked customer a message.
    pub fn notifies_customer(self) -> bool {
        matches!(
            self,
            OrderStatus::InProgress | OrderStatus::Ready | OrderStatus::Delivered
        )
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| UnknownVariant::new("order status", value))
    }
}

/// Line item of a tab with the price captured when it was added.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct OrderItem {
    pub id: i32,
    pub order_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    /// Product price at insertion time, in cents. Never re-read from the catalog.
    pub unit_price_cents: i64,
    /// Free-form kitchen note such as "no onions".
    pub observation: Option<String>,
    pub created_at: NaiveDateTime,
}

impl OrderItem {
    /// Contribution of this line to the order total.
    pub fn line_total_cents(&self) -> i64 {
        i64::from(self.quantity).saturating_mul(self.unit_price_cents)
    }
}

/// Domain representation of a tab ("comanda").
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Order {
    pub id: i32,
    pub tenant_id: i32,
    /// Dining table for dine-in tabs; `None` for self-service tabs.
    pub table_id: Option<i32>,
    pub customer_id: Option<i32>,
    /// Staff member who opened the tab.
    pub user_id: i32,
    pub status: OrderStatus,
    /// Sum of the line items, in cents.
    pub total_cents: i64,
    /// Tip recorded at settlement, in cents.
    pub tip_cents: i64,
    /// `total_cents + tip_cents`, set only when the tab is paid.
    pub final_cents: Option<i64>,
    pub items: Vec<OrderItem>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Order {
    /// Recomputes the total from the line items.
    pub fn items_total_cents(&self) -> i64 {
        self.items.iter().map(OrderItem::line_total_cents).sum()
    }
}

/// Payload required to open a tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub tenant_id: i32,
    pub user_id: i32,
    pub table_id: Option<i32>,
    pub customer_id: Option<i32>,
}

impl NewOrder {
    /// Build a tab for a dining table.
    pub fn for_table(tenant_id: i32, user_id: i32, table_id: i32) -> Self {
        Self {
            tenant_id,
            user_id,
            table_id: Some(table_id),
            customer_id: None,
        }
    }

    /// Build a self-service tab for a customer.
    pub fn for_customer(tenant_id: i32, user_id: i32, customer_id: i32) -> Self {
        Self {
            tenant_id,
            user_id,
            table_id: None,
            customer_id: Some(customer_id),
        }
    }

    pub fn with_customer_id(mut self, customer_id: i32) -> Self {
        self.customer_id = Some(customer_id);
        self
    }
}

/// Payload required to add a line item to a tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrderItem {
    pub product_id: i32,
    pub quantity: i32,
    pub observation: Option<String>,
}

impl NewOrderItem {
    pub fn new(product_id: i32, quantity: i32) -> Self {
        Self {
            product_id,
            quantity,
            observation: None,
        }
    }

    pub fn with_observation(mut self, observation: impl Into<String>) -> Self {
        self.observation = Some(observation.into());
        self
    }
}

/// Payment details for the settlement transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settlement {
    /// Tender used, e.g. `cash`, `card`, `pix`.
    pub payment_method: String,
    /// Tip in cents; zero when none was given.
    pub tip_cents: i64,
    /// Register whose open session receives the revenue. When `None` the
    /// tenant's earliest opened session is used.
    pub cash_register_id: Option<i32>,
}

impl Settlement {
    pub fn new(payment_method: impl Into<String>) -> Self {
        Self {
            payment_method: payment_method.into(),
            tip_cents: 0,
            cash_register_id: None,
        }
    }

    pub fn with_tip_cents(mut self, tip_cents: i64) -> Self {
        self.tip_cents = tip_cents;
        self
    }

    pub fn on_register(mut self, cash_register_id: i32) -> Self {
        self.cash_register_id = Some(cash_register_id);
        self
    }
}

/// Requested status change, validated before any state is touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusChange {
    /// Kitchen progress or cancellation.
    Advance(OrderStatus),
    /// Composite settlement transition to `paid`.
    Settle(Settlement),
}

impl StatusChange {
    pub fn target(&self) -> OrderStatus {
        match self {
            StatusChange::Advance(status) => *status,
            StatusChange::Settle(_) => OrderStatus::Paid,
        }
    }
}

/// Result of a committed status change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusTransition {
    /// Status the tab had when the unit of work started.
    pub previous: OrderStatus,
    /// Tab as committed.
    pub order: Order,
    /// Revenue entry posted by settlement; `None` when nothing was posted,
    /// including repeated settlement of an already paid tab.
    pub revenue_transaction_id: Option<i32>,
}

impl StatusTransition {
    /// Whether the status actually changed.
    pub fn changed(&self) -> bool {
        self.previous != self.order.status
    }
}

/// Query definition used to list tabs for a tenant.
#[derive(Debug, Clone)]
pub struct OrderListQuery {
    pub tenant_id: i32,
    pub status: Option<OrderStatus>,
    pub table_id: Option<i32>,
    pub customer_id: Option<i32>,
    /// Restrict the listing to tabs that are neither paid nor canceled.
    pub open_only: bool,
    /// Inclusive creation window.
    pub created_between: Option<(NaiveDateTime, NaiveDateTime)>,
}

impl OrderListQuery {
    pub fn new(tenant_id: i32) -> Self {
        Self {
            tenant_id,
            status: None,
            table_id: None,
            customer_id: None,
            open_only: false,
            created_between: None,
        }
    }

    pub fn status(mut self, status: OrderStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn table_id(mut self, table_id: i32) -> Self {
        self.table_id = Some(table_id);
        self
    }

    pub fn customer_id(mut self, customer_id: i32) -> Self {
        self.customer_id = Some(customer_id);
        self
    }

    pub fn open_only(mut self) -> Self {
        self.open_only = true;
        self
    }

    pub fn created_between(mut self, from: NaiveDateTime, to: NaiveDateTime) -> Self {
        self.created_between = Some((from, to));
        self
    }
}

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::UnknownVariant;
use crate::domain::order::{
    NewOrder as DomainNewOrder, NewOrderItem as DomainNewOrderItem, Order as DomainOrder,
    OrderItem as DomainOrderItem,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::orders)]
pub struct Order {
    pub id: i32,
    pub tenant_id: i32,
    pub table_id: Option<i32>,
    pub customer_id: Option<i32>,
    pub user_id: i32,
    pub status: String,
    pub total_cents: i64,
    pub tip_cents: i64,
    pub final_cents: Option<i64>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = crate::schema::order_items)]
#[diesel(belongs_to(Order, foreign_key = order_id))]
pub struct OrderItem {
    pub id: i32,
    pub order_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub unit_price_cents: i64,
    pub observation: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::orders)]
pub struct NewOrder<'a> {
    pub tenant_id: i32,
    pub table_id: Option<i32>,
    pub customer_id: Option<i32>,
    pub user_id: i32,
    pub status: &'a str,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::order_items)]
pub struct NewOrderItem<'a> {
    pub order_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub unit_price_cents: i64,
    pub observation: Option<&'a str>,
}

impl Order {
    pub fn into_domain(self, items: Vec<OrderItem>) -> Result<DomainOrder, UnknownVariant> {
        Ok(DomainOrder {
            id: self.id,
            tenant_id: self.tenant_id,
            table_id: self.table_id,
            customer_id: self.customer_id,
            user_id: self.user_id,
            status: self.status.parse()?,
            total_cents: self.total_cents,
            tip_cents: self.tip_cents,
            final_cents: self.final_cents,
            items: items.into_iter().map(DomainOrderItem::from).collect(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl From<OrderItem> for DomainOrderItem {
    fn from(value: OrderItem) -> Self {
        Self {
            id: value.id,
            order_id: value.order_id,
            product_id: value.product_id,
            quantity: value.quantity,
            unit_price_cents: value.unit_price_cents,
            observation: value.observation,
            created_at: value.created_at,
        }
    }
}

impl<'a> NewOrder<'a> {
    pub fn from_domain(value: &DomainNewOrder, status: &'a str, now: NaiveDateTime) -> Self {
        Self {
            tenant_id: value.tenant_id,
            table_id: value.table_id,
            customer_id: value.customer_id,
            user_id: value.user_id,
            status,
            updated_at: now,
        }
    }
}

impl<'a> NewOrderItem<'a> {
    /// Builds the row with the price snapshot taken from the catalog.
    pub fn from_domain(
        order_id: i32,
        value: &'a DomainNewOrderItem,
        unit_price_cents: i64,
    ) -> Self {
        Self {
            order_id,
            product_id: value.product_id,
            quantity: value.quantity,
            unit_price_cents,
            observation: value.observation.as_deref(),
        }
    }
}

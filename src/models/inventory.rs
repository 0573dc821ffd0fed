use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::inventory::{
    InventoryItem as DomainInventoryItem, NewInventoryItem as DomainNewInventoryItem, RecipeEntry,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::inventory_items)]
pub struct InventoryItem {
    pub id: i32,
    pub tenant_id: i32,
    pub name: String,
    pub quantity_on_hand: i64,
    pub unit_of_measure: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::inventory_items)]
pub struct NewInventoryItem<'a> {
    pub tenant_id: i32,
    pub name: &'a str,
    pub quantity_on_hand: i64,
    pub unit_of_measure: &'a str,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::product_inventory_usage)]
pub struct ProductInventoryUsage {
    pub id: i32,
    pub product_id: i32,
    pub inventory_item_id: i32,
    pub quantity_consumed: i64,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::product_inventory_usage)]
pub struct NewProductInventoryUsage {
    pub product_id: i32,
    pub inventory_item_id: i32,
    pub quantity_consumed: i64,
}

impl From<InventoryItem> for DomainInventoryItem {
    fn from(value: InventoryItem) -> Self {
        Self {
            id: value.id,
            tenant_id: value.tenant_id,
            name: value.name,
            quantity_on_hand: value.quantity_on_hand,
            unit_of_measure: value.unit_of_measure,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewInventoryItem> for NewInventoryItem<'a> {
    fn from(value: &'a DomainNewInventoryItem) -> Self {
        Self {
            tenant_id: value.tenant_id,
            name: value.name.as_str(),
            quantity_on_hand: value.quantity_on_hand,
            unit_of_measure: value.unit_of_measure.as_str(),
        }
    }
}

impl From<ProductInventoryUsage> for RecipeEntry {
    fn from(value: ProductInventoryUsage) -> Self {
        RecipeEntry::new(value.inventory_item_id, value.quantity_consumed)
    }
}

impl NewProductInventoryUsage {
    pub fn from_domain(product_id: i32, entry: &RecipeEntry) -> Self {
        Self {
            product_id,
            inventory_item_id: entry.inventory_item_id,
            quantity_consumed: entry.quantity_consumed,
        }
    }
}

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Number of stored units per whole unit of measure.
///
/// Quantities are kept as signed thousandths so `0.125 kg` is stored as `125`.
pub const QUANTITY_SCALE: i64 = 1000;

/// Stock item tracked per tenant.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct InventoryItem {
    pub id: i32,
    pub tenant_id: i32,
    pub name: String,
    /// On-hand stock in thousandths of `unit_of_measure`. May be negative:
    /// depletion applies no floor.
    pub quantity_on_hand: i64,
    pub unit_of_measure: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewInventoryItem {
    pub tenant_id: i32,
    pub name: String,
    pub quantity_on_hand: i64,
    pub unit_of_measure: String,
}

impl NewInventoryItem {
    pub fn new(
        tenant_id: i32,
        name: impl Into<String>,
        unit_of_measure: impl Into<String>,
    ) -> Self {
        Self {
            tenant_id,
            name: name.into(),
            quantity_on_hand: 0,
            unit_of_measure: unit_of_measure.into(),
        }
    }

    pub fn with_quantity_on_hand(mut self, quantity_on_hand: i64) -> Self {
        self.quantity_on_hand = quantity_on_hand;
        self
    }
}

/// One ingredient of a product's bill of materials.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct RecipeEntry {
    pub inventory_item_id: i32,
    /// Thousandths of the ingredient consumed per unit of product sold.
    pub quantity_consumed: i64,
}

impl RecipeEntry {
    pub fn new(inventory_item_id: i32, quantity_consumed: i64) -> Self {
        Self {
            inventory_item_id,
            quantity_consumed,
        }
    }

    /// Stock removed when `quantity_sold` units of the product are sold.
    /// `None` when the amount does not fit in an `i64`.
    pub fn depletion_for(&self, quantity_sold: i32) -> Option<i64> {
        self.quantity_consumed.checked_mul(i64::from(quantity_sold))
    }
}

/// Complete recipe of a product.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Recipe {
    pub product_id: i32,
    pub entries: Vec<RecipeEntry>,
}

use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::inventory::{NewInventoryItem, RecipeEntry};
use crate::forms::{AmountError, parse_quantity, sanitize_inline_text};

const NAME_MAX_LEN: u64 = 128;
const UNIT_MAX_LEN: u64 = 16;

pub type InventoryFormResult<T> = Result<T, InventoryFormError>;

/// Errors that can occur while processing inventory payloads.
#[derive(Debug, Error)]
pub enum InventoryFormError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("inventory item name cannot be empty")]
    EmptyName,
    #[error("invalid quantity: {0}")]
    Quantity(#[from] AmountError),
    #[error("ingredient {0} must consume a positive quantity")]
    ZeroConsumption(i32),
}

#[derive(Debug, Deserialize, Validate)]
pub struct AddInventoryItemForm {
    #[validate(length(min = 1, max = NAME_MAX_LEN))]
    pub name: String,
    /// Unit such as `kg`, `l` or `un`.
    #[validate(length(min = 1, max = UNIT_MAX_LEN))]
    pub unit_of_measure: String,
    #[serde(default)]
    pub quantity_on_hand: Option<String>,
}

impl AddInventoryItemForm {
    pub fn into_new_item(self, tenant_id: i32) -> InventoryFormResult<NewInventoryItem> {
        self.validate()?;

        let name = sanitize_inline_text(&self.name);
        if name.is_empty() {
            return Err(InventoryFormError::EmptyName);
        }

        let unit = sanitize_inline_text(&self.unit_of_measure).to_lowercase();
        let item = NewInventoryItem::new(tenant_id, name, unit);

        Ok(match self.quantity_on_hand.as_deref().map(str::trim) {
            None | Some("") => item,
            Some(value) => item.with_quantity_on_hand(parse_quantity(value)?),
        })
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct RecipeEntryForm {
    #[validate(range(min = 1))]
    pub inventory_item_id: i32,
    /// Amount of the ingredient used per unit sold, e.g. `"0.2"`.
    pub quantity_consumed: String,
}

/// Full replacement of a product's recipe.
#[derive(Debug, Deserialize, Validate)]
pub struct ReplaceRecipeForm {
    #[validate(nested)]
    pub entries: Vec<RecipeEntryForm>,
}

impl ReplaceRecipeForm {
    pub fn into_entries(self) -> InventoryFormResult<Vec<RecipeEntry>> {
        self.validate()?;

        self.entries
            .into_iter()
            .map(|entry| {
                let consumed = parse_quantity(&entry.quantity_consumed)?;
                if consumed == 0 {
                    return Err(InventoryFormError::ZeroConsumption(entry.inventory_item_id));
                }
                Ok(RecipeEntry::new(entry.inventory_item_id, consumed))
            })
            .collect()
    }
}

use crate::domain::inventory::{InventoryItem, Recipe};
use crate::domain::tenant::TenantContext;
use crate::forms::inventory::{AddInventoryItemForm, InventoryFormError, ReplaceRecipeForm};
use crate::repository::{InventoryReader, InventoryWriter};
use crate::services::{ServiceError, ServiceResult};

impl From<InventoryFormError> for ServiceError {
    fn from(value: InventoryFormError) -> Self {
        ServiceError::Validation(value.to_string())
    }
}

pub fn create_item<R>(
    repo: &R,
    ctx: &TenantContext,
    form: AddInventoryItemForm,
) -> ServiceResult<InventoryItem>
where
    R: InventoryWriter + ?Sized,
{
    let new_item = form.into_new_item(ctx.tenant_id)?;
    Ok(repo.create_inventory_item(&new_item)?)
}

pub fn list_items<R>(repo: &R, ctx: &TenantContext) -> ServiceResult<Vec<InventoryItem>>
where
    R: InventoryReader + ?Sized,
{
    Ok(repo.list_inventory_items(ctx.tenant_id)?)
}

pub fn get_item<R>(repo: &R, ctx: &TenantContext, item_id: i32) -> ServiceResult<InventoryItem>
where
    R: InventoryReader + ?Sized,
{
    repo.get_inventory_item(item_id, ctx.tenant_id)?
        .ok_or(ServiceError::NotFound)
}

pub fn get_recipe<R>(repo: &R, ctx: &TenantContext, product_id: i32) -> ServiceResult<Recipe>
where
    R: InventoryReader + ?Sized,
{
    Ok(repo.get_recipe(product_id, ctx.tenant_id)?)
}

/// Replaces every ingredient of a product's recipe. An empty list stops the
/// product from tracking stock.
pub fn replace_recipe<R>(
    repo: &R,
    ctx: &TenantContext,
    product_id: i32,
    form: ReplaceRecipeForm,
) -> ServiceResult<Recipe>
where
    R: InventoryWriter + ?Sized,
{
    let entries = form.into_entries()?;
    let recipe = repo.replace_recipe(product_id, ctx.tenant_id, &entries)?;

    log::info!(
        "Recipe of product {product_id} replaced with {} ingredient(s)",
        recipe.entries.len()
    );

    Ok(recipe)
}

use chrono::Utc;
use diesel::dsl::{exists, select};
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::domain::inventory::{
    InventoryItem as DomainInventoryItem, NewInventoryItem as DomainNewInventoryItem, Recipe,
    RecipeEntry,
};
use crate::models::inventory::{
    InventoryItem as DbInventoryItem, NewInventoryItem as DbNewInventoryItem,
    NewProductInventoryUsage, ProductInventoryUsage,
};
use crate::repository::{
    DieselRepository, InventoryReader, InventoryWriter, RepositoryError, RepositoryResult,
};

/// Stock depletion driven by product recipes.
pub struct InventoryLedger;

impl InventoryLedger {
    /// Recipe of `product_id`; empty when the product tracks no stock.
    pub fn recipe_for(
        tx: &mut SqliteConnection,
        product_id: i32,
    ) -> RepositoryResult<Vec<RecipeEntry>> {
        use crate::schema::product_inventory_usage;

        let rows = product_inventory_usage::table
            .filter(product_inventory_usage::product_id.eq(product_id))
            .order(product_inventory_usage::inventory_item_id.asc())
            .load::<ProductInventoryUsage>(tx)?;

        Ok(rows.into_iter().map(RecipeEntry::from).collect())
    }

    /// Removes the ingredients of `quantity_sold` units of `product_id` from
    /// stock. Stock is allowed to go negative.
    pub fn deplete_for_sale(
        tx: &mut SqliteConnection,
        product_id: i32,
        quantity_sold: i32,
        tenant_id: i32,
    ) -> RepositoryResult<()> {
        use crate::schema::inventory_items;

        let now = Utc::now().naive_utc();

        for entry in Self::recipe_for(tx, product_id)? {
            let on_hand = inventory_items::table
                .filter(inventory_items::id.eq(entry.inventory_item_id))
                .filter(inventory_items::tenant_id.eq(tenant_id))
                .select(inventory_items::quantity_on_hand)
                .first::<i64>(tx)
                .optional()?;

            let Some(on_hand) = on_hand else {
                log::warn!(
                    "Recipe of product {product_id} references inventory item {} outside tenant {tenant_id}",
                    entry.inventory_item_id
                );
                continue;
            };

            let remaining = entry
                .depletion_for(quantity_sold)
                .and_then(|amount| on_hand.checked_sub(amount))
                .ok_or_else(|| {
                    RepositoryError::OutOfRange(format!(
                        "stock of item {}",
                        entry.inventory_item_id
                    ))
                })?;

            diesel::update(
                inventory_items::table.filter(inventory_items::id.eq(entry.inventory_item_id)),
            )
            .set((
                inventory_items::quantity_on_hand.eq(remaining),
                inventory_items::updated_at.eq(now),
            ))
            .execute(tx)?;
        }

        Ok(())
    }
}

impl InventoryReader for DieselRepository {
    fn get_inventory_item(
        &self,
        id: i32,
        tenant_id: i32,
    ) -> RepositoryResult<Option<DomainInventoryItem>> {
        use crate::schema::inventory_items;

        let mut conn = self.conn()?;
        let item = inventory_items::table
            .filter(inventory_items::id.eq(id))
            .filter(inventory_items::tenant_id.eq(tenant_id))
            .first::<DbInventoryItem>(&mut conn)
            .optional()?;

        Ok(item.map(Into::into))
    }

    fn list_inventory_items(&self, tenant_id: i32) -> RepositoryResult<Vec<DomainInventoryItem>> {
        use crate::schema::inventory_items;

        let mut conn = self.conn()?;
        let items = inventory_items::table
            .filter(inventory_items::tenant_id.eq(tenant_id))
            .order(inventory_items::name.asc())
            .load::<DbInventoryItem>(&mut conn)?;

        Ok(items.into_iter().map(Into::into).collect())
    }

    fn get_recipe(&self, product_id: i32, tenant_id: i32) -> RepositoryResult<Recipe> {
        let mut conn = self.conn()?;
        ensure_product_in_tenant(&mut conn, product_id, tenant_id)?;

        Ok(Recipe {
            product_id,
            entries: InventoryLedger::recipe_for(&mut conn, product_id)?,
        })
    }
}

impl InventoryWriter for DieselRepository {
    fn create_inventory_item(
        &self,
        new_item: &DomainNewInventoryItem,
    ) -> RepositoryResult<DomainInventoryItem> {
        use crate::schema::inventory_items;

        let mut conn = self.conn()?;
        let created = diesel::insert_into(inventory_items::table)
            .values(&DbNewInventoryItem::from(new_item))
            .get_result::<DbInventoryItem>(&mut conn)
            .map_err(|err| {
                RepositoryError::from(err).conflict_as(&format!(
                    "inventory item `{}` already exists",
                    new_item.name
                ))
            })?;

        Ok(created.into())
    }

    fn replace_recipe(
        &self,
        product_id: i32,
        tenant_id: i32,
        entries: &[RecipeEntry],
    ) -> RepositoryResult<Recipe> {
        use crate::schema::{inventory_items, product_inventory_usage};

        self.unit_of_work(|tx| {
            ensure_product_in_tenant(tx, product_id, tenant_id)?;

            let mut item_ids: Vec<i32> = entries
                .iter()
                .map(|entry| entry.inventory_item_id)
                .collect();
            item_ids.sort_unstable();
            item_ids.dedup();

            let owned = inventory_items::table
                .filter(inventory_items::id.eq_any(&item_ids))
                .filter(inventory_items::tenant_id.eq(tenant_id))
                .count()
                .get_result::<i64>(tx)?;

            if owned as usize != item_ids.len() {
                return Err(RepositoryError::NotFound);
            }

            diesel::delete(
                product_inventory_usage::table
                    .filter(product_inventory_usage::product_id.eq(product_id)),
            )
            .execute(tx)?;

            if !entries.is_empty() {
                let payload: Vec<NewProductInventoryUsage> = entries
                    .iter()
                    .map(|entry| NewProductInventoryUsage::from_domain(product_id, entry))
                    .collect();

                diesel::insert_into(product_inventory_usage::table)
                    .values(&payload)
                    .execute(tx)
                    .map_err(|err| {
                        RepositoryError::from(err)
                            .conflict_as("recipe lists the same inventory item twice")
                    })?;
            }

            Ok(Recipe {
                product_id,
                entries: InventoryLedger::recipe_for(tx, product_id)?,
            })
        })
    }
}

fn ensure_product_in_tenant(
    conn: &mut SqliteConnection,
    product_id: i32,
    tenant_id: i32,
) -> RepositoryResult<()> {
    use crate::schema::products;

    let found = select(exists(
        products::table
            .filter(products::id.eq(product_id))
            .filter(products::tenant_id.eq(tenant_id)),
    ))
    .get_result::<bool>(conn)?;

    if found {
        Ok(())
    } else {
        Err(RepositoryError::NotFound)
    }
}

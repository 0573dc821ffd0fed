//! Helpers for integration tests.

use std::path::PathBuf;

use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tempfile::TempDir;

use pushkind_pos::db::{DbPool, establish_connection_pool};
use pushkind_pos::domain::tenant::TenantContext;
use pushkind_pos::forms::cash_sessions::{AddCashRegisterForm, OpenSessionForm};
use pushkind_pos::forms::catalog::{AddCustomerForm, AddProductForm};
use pushkind_pos::forms::inventory::{AddInventoryItemForm, RecipeEntryForm, ReplaceRecipeForm};
use pushkind_pos::forms::tables::AddTableForm;
use pushkind_pos::repository::DieselRepository;
use pushkind_pos::services::{cash_sessions, catalog, inventory, tables};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

pub const TENANT: i32 = 1;
pub const CASHIER: i32 = 10;

/// Temporary database used in integration tests. Removed on drop together
/// with its WAL files.
pub struct TestDb {
    _dir: TempDir,
    path: PathBuf,
    pool: DbPool,
}

impl TestDb {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir.");
        let path = dir.path().join("pos.db");
        let url = path.to_str().expect("Temp path is not UTF-8.");

        let pool = establish_connection_pool(url).expect("Failed to establish SQLite connection.");
        let mut conn = pool
            .get()
            .expect("Failed to get SQLite connection from pool.");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("Migrations failed");

        TestDb {
            _dir: dir,
            path,
            pool,
        }
    }

    pub fn path(&self) -> PathBuf {
        self.path.clone()
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    pub fn repo(&self) -> DieselRepository {
        DieselRepository::new(self.pool())
    }
}

pub fn ctx() -> TenantContext {
    TenantContext::new(TENANT, CASHIER).with_roles(["cashier"])
}

/// Restaurant seeded with one table, two priced products, a customer and a
/// burger recipe drawing on beef stock.
pub struct Restaurant {
    pub table_id: i32,
    pub burger_id: i32,
    pub soda_id: i32,
    pub customer_id: i32,
    pub beef_id: i32,
    pub bun_id: i32,
    pub register_id: i32,
}

impl Restaurant {
    pub fn seed(repo: &DieselRepository) -> Self {
        let ctx = ctx();

        let table = tables::create_table(repo, &ctx, AddTableForm { number: 1 }).expect("table");
        let burger = catalog::create_product(
            repo,
            &ctx,
            AddProductForm {
                name: "Burger".to_string(),
                price: "10.00".to_string(),
            },
        )
        .expect("burger");
        let soda = catalog::create_product(
            repo,
            &ctx,
            AddProductForm {
                name: "Soda".to_string(),
                price: "5.00".to_string(),
            },
        )
        .expect("soda");
        let customer = catalog::create_customer(
            repo,
            &ctx,
            AddCustomerForm {
                name: "Ana".to_string(),
                phone: Some("5511999998888".to_string()),
            },
        )
        .expect("customer");
        let beef = inventory::create_item(
            repo,
            &ctx,
            AddInventoryItemForm {
                name: "Beef".to_string(),
                unit_of_measure: "kg".to_string(),
                quantity_on_hand: Some("5".to_string()),
            },
        )
        .expect("beef");
        let bun = inventory::create_item(
            repo,
            &ctx,
            AddInventoryItemForm {
                name: "Bun".to_string(),
                unit_of_measure: "un".to_string(),
                quantity_on_hand: Some("1".to_string()),
            },
        )
        .expect("bun");
        inventory::replace_recipe(
            repo,
            &ctx,
            burger.id,
            ReplaceRecipeForm {
                entries: vec![
                    RecipeEntryForm {
                        inventory_item_id: beef.id,
                        quantity_consumed: "0.15".to_string(),
                    },
                    RecipeEntryForm {
                        inventory_item_id: bun.id,
                        quantity_consumed: "1".to_string(),
                    },
                ],
            },
        )
        .expect("recipe");
        let register = cash_sessions::create_register(
            repo,
            &ctx,
            AddCashRegisterForm {
                name: "Front".to_string(),
            },
        )
        .expect("register");

        Restaurant {
            table_id: table.id,
            burger_id: burger.id,
            soda_id: soda.id,
            customer_id: customer.id,
            beef_id: beef.id,
            bun_id: bun.id,
            register_id: register.id,
        }
    }

    pub fn open_register(&self, repo: &DieselRepository) -> i32 {
        cash_sessions::open_session(
            repo,
            &ctx(),
            OpenSessionForm {
                cash_register_id: self.register_id,
                opening_balance: Some("100.00".to_string()),
            },
        )
        .expect("open session")
        .id
    }
}

use diesel::sqlite::SqliteConnection;

use crate::db::{DbConnection, DbPool};
use crate::domain::cash_session::{
    CashRegister, CashRegisterOverview, CashSession, CashTransaction, CloseCashSession,
    NewCashRegister, OpenCashSession, SalesReportQuery,
};
use crate::domain::customer::{Customer, NewCustomer};
use crate::domain::inventory::{InventoryItem, NewInventoryItem, Recipe, RecipeEntry};
use crate::domain::order::{
    NewOrder, NewOrderItem, Order, OrderItem, OrderListQuery, StatusChange, StatusTransition,
};
use crate::domain::product::{NewProduct, Product};
use crate::domain::table::{DiningTable, NewDiningTable};

pub mod cash_session;
pub mod customer;
pub mod errors;
pub mod inventory;
pub mod order;
pub mod product;
pub mod table;

#[cfg(test)]
pub mod mock;

pub use errors::{RepositoryError, RepositoryResult};

#[derive(Clone)]
/// Diesel-backed repository implementation that wraps an r2d2 pool.
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository using the provided connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }

    /// Runs `work` inside a single `BEGIN IMMEDIATE` transaction.
    ///
    /// The write lock is taken before the first read, so concurrent units of
    /// work on the same database are serialised. Any `Err` returned by `work`
    /// rolls back every statement it issued.
    pub fn unit_of_work<T, F>(&self, work: F) -> RepositoryResult<T>
    where
        F: FnOnce(&mut SqliteConnection) -> RepositoryResult<T>,
    {
        let mut conn = self.conn()?;
        conn.immediate_transaction(work)
    }
}

/// Read-only operations over dining tables.
pub trait TableReader {
    fn get_table_by_id(&self, id: i32, tenant_id: i32) -> RepositoryResult<Option<DiningTable>>;
    fn list_tables(&self, tenant_id: i32) -> RepositoryResult<Vec<DiningTable>>;
}

/// Write operations over dining tables.
pub trait TableWriter {
    fn create_table(&self, new_table: &NewDiningTable) -> RepositoryResult<DiningTable>;
}

/// Catalog lookup used when pricing line items.
pub trait ProductReader {
    fn get_product_by_id(&self, id: i32, tenant_id: i32) -> RepositoryResult<Option<Product>>;
}

pub trait ProductWriter {
    fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
}

/// Customer lookup used for linking and notifications.
pub trait CustomerReader {
    fn get_customer_by_id(&self, id: i32, tenant_id: i32) -> RepositoryResult<Option<Customer>>;
}

pub trait CustomerWriter {
    fn create_customer(&self, new_customer: &NewCustomer) -> RepositoryResult<Customer>;
}

/// Read-only operations over stock items and recipes.
pub trait InventoryReader {
    fn get_inventory_item(
        &self,
        id: i32,
        tenant_id: i32,
    ) -> RepositoryResult<Option<InventoryItem>>;
    fn list_inventory_items(&self, tenant_id: i32) -> RepositoryResult<Vec<InventoryItem>>;
    fn get_recipe(&self, product_id: i32, tenant_id: i32) -> RepositoryResult<Recipe>;
}

/// Write operations over stock items and recipes.
pub trait InventoryWriter {
    fn create_inventory_item(&self, new_item: &NewInventoryItem)
    -> RepositoryResult<InventoryItem>;
    fn replace_recipe(
        &self,
        product_id: i32,
        tenant_id: i32,
        entries: &[RecipeEntry],
    ) -> RepositoryResult<Recipe>;
}

/// Read-only operations over registers, sessions and their ledger.
pub trait CashSessionReader {
    fn list_cash_registers(&self, tenant_id: i32) -> RepositoryResult<Vec<CashRegisterOverview>>;
    fn get_cash_session(&self, id: i32, tenant_id: i32) -> RepositoryResult<Option<CashSession>>;
    fn find_open_session(
        &self,
        tenant_id: i32,
        cash_register_id: Option<i32>,
    ) -> RepositoryResult<Option<CashSession>>;
    fn list_session_transactions(
        &self,
        session_id: i32,
        tenant_id: i32,
    ) -> RepositoryResult<Vec<CashTransaction>>;
    fn list_revenue(&self, query: &SalesReportQuery) -> RepositoryResult<Vec<CashTransaction>>;
}

/// Write operations over registers and sessions.
pub trait CashSessionWriter {
    fn create_cash_register(
        &self,
        new_register: &NewCashRegister,
    ) -> RepositoryResult<CashRegister>;
    fn open_cash_session(&self, payload: &OpenCashSession) -> RepositoryResult<CashSession>;
    fn close_cash_session(
        &self,
        session_id: i32,
        tenant_id: i32,
        payload: &CloseCashSession,
    ) -> RepositoryResult<CashSession>;
}

/// Read-only operations over tabs.
pub trait OrderReader {
    fn get_order_by_id(&self, id: i32, tenant_id: i32) -> RepositoryResult<Option<Order>>;
    fn list_orders(&self, query: OrderListQuery) -> RepositoryResult<Vec<Order>>;
    fn count_orders(&self, query: OrderListQuery) -> RepositoryResult<i64>;
}

/// Lifecycle transitions over tabs. Every method is one atomic unit of work.
pub trait OrderWriter {
    fn open_order(&self, new_order: &NewOrder) -> RepositoryResult<Order>;
    fn add_order_item(
        &self,
        order_id: i32,
        tenant_id: i32,
        new_item: &NewOrderItem,
    ) -> RepositoryResult<OrderItem>;
    fn remove_order_item(
        &self,
        order_id: i32,
        item_id: i32,
        tenant_id: i32,
    ) -> RepositoryResult<Order>;
    fn link_customer(
        &self,
        order_id: i32,
        tenant_id: i32,
        customer_id: i32,
    ) -> RepositoryResult<Order>;
    fn change_order_status(
        &self,
        order_id: i32,
        tenant_id: i32,
        change: &StatusChange,
    ) -> RepositoryResult<StatusTransition>;
}

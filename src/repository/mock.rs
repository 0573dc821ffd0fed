use mockall::mock;

use super::{
    CashSessionReader, CashSessionWriter, CustomerReader, CustomerWriter, InventoryReader,
    InventoryWriter, OrderReader, OrderWriter, ProductReader, ProductWriter, TableReader,
    TableWriter,
};
use crate::domain::{
    cash_session::{
        CashRegister, CashRegisterOverview, CashSession, CashTransaction, CloseCashSession,
        NewCashRegister, OpenCashSession, SalesReportQuery,
    },
    customer::{Customer, NewCustomer},
    inventory::{InventoryItem, NewInventoryItem, Recipe, RecipeEntry},
    order::{
        NewOrder, NewOrderItem, Order, OrderItem, OrderListQuery, StatusChange, StatusTransition,
    },
    product::{NewProduct, Product},
    table::{DiningTable, NewDiningTable},
};
use crate::repository::RepositoryResult;

mock! {
    pub TableReader {}

    impl TableReader for TableReader {
        fn get_table_by_id(&self, id: i32, tenant_id: i32) -> RepositoryResult<Option<DiningTable>>;
        fn list_tables(&self, tenant_id: i32) -> RepositoryResult<Vec<DiningTable>>;
    }
}

mock! {
    pub TableWriter {}

    impl TableWriter for TableWriter {
        fn create_table(&self, new_table: &NewDiningTable) -> RepositoryResult<DiningTable>;
    }
}

mock! {
    pub ProductReader {}

    impl ProductReader for ProductReader {
        fn get_product_by_id(&self, id: i32, tenant_id: i32) -> RepositoryResult<Option<Product>>;
    }
}

mock! {
    pub ProductWriter {}

    impl ProductWriter for ProductWriter {
        fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
    }
}

mock! {
    pub CustomerReader {}

    impl CustomerReader for CustomerReader {
        fn get_customer_by_id(&self, id: i32, tenant_id: i32) -> RepositoryResult<Option<Customer>>;
    }
}

mock! {
    pub CustomerWriter {}

    impl CustomerWriter for CustomerWriter {
        fn create_customer(&self, new_customer: &NewCustomer) -> RepositoryResult<Customer>;
    }
}

mock! {
    pub InventoryReader {}

    impl InventoryReader for InventoryReader {
        fn get_inventory_item(&self, id: i32, tenant_id: i32) -> RepositoryResult<Option<InventoryItem>>;
        fn list_inventory_items(&self, tenant_id: i32) -> RepositoryResult<Vec<InventoryItem>>;
        fn get_recipe(&self, product_id: i32, tenant_id: i32) -> RepositoryResult<Recipe>;
    }
}

mock! {
    pub InventoryWriter {}

    impl InventoryWriter for InventoryWriter {
        fn create_inventory_item(&self, new_item: &NewInventoryItem) -> RepositoryResult<InventoryItem>;
        fn replace_recipe(&self, product_id: i32, tenant_id: i32, entries: &[RecipeEntry]) -> RepositoryResult<Recipe>;
    }
}

mock! {
    pub CashSessionReader {}

    impl CashSessionReader for CashSessionReader {
        fn list_cash_registers(&self, tenant_id: i32) -> RepositoryResult<Vec<CashRegisterOverview>>;
        fn get_cash_session(&self, id: i32, tenant_id: i32) -> RepositoryResult<Option<CashSession>>;
        fn find_open_session(&self, tenant_id: i32, cash_register_id: Option<i32>) -> RepositoryResult<Option<CashSession>>;
        fn list_session_transactions(&self, session_id: i32, tenant_id: i32) -> RepositoryResult<Vec<CashTransaction>>;
        fn list_revenue(&self, query: &SalesReportQuery) -> RepositoryResult<Vec<CashTransaction>>;
    }
}

mock! {
    pub CashSessionWriter {}

    impl CashSessionWriter for CashSessionWriter {
        fn create_cash_register(&self, new_register: &NewCashRegister) -> RepositoryResult<CashRegister>;
        fn open_cash_session(&self, payload: &OpenCashSession) -> RepositoryResult<CashSession>;
        fn close_cash_session(&self, session_id: i32, tenant_id: i32, payload: &CloseCashSession) -> RepositoryResult<CashSession>;
    }
}

mock! {
    pub OrderReader {}

    impl OrderReader for OrderReader {
        fn get_order_by_id(&self, id: i32, tenant_id: i32) -> RepositoryResult<Option<Order>>;
        fn list_orders(&self, query: OrderListQuery) -> RepositoryResult<Vec<Order>>;
        fn count_orders(&self, query: OrderListQuery) -> RepositoryResult<i64>;
    }
}

mock! {
    pub OrderWriter {}

    impl OrderWriter for OrderWriter {
        fn open_order(&self, new_order: &NewOrder) -> RepositoryResult<Order>;
        fn add_order_item(&self, order_id: i32, tenant_id: i32, new_item: &NewOrderItem) -> RepositoryResult<OrderItem>;
        fn remove_order_item(&self, order_id: i32, item_id: i32, tenant_id: i32) -> RepositoryResult<Order>;
        fn link_customer(&self, order_id: i32, tenant_id: i32, customer_id: i32) -> RepositoryResult<Order>;
        fn change_order_status(&self, order_id: i32, tenant_id: i32, change: &StatusChange) -> RepositoryResult<StatusTransition>;
    }
}

// Single mock implementing every reader and writer, for services generic
// over several traits at once.
mock! {
    pub Repository {}

    impl OrderReader for Repository {
        fn get_order_by_id(&self, id: i32, tenant_id: i32) -> RepositoryResult<Option<Order>>;
        fn list_orders(&self, query: OrderListQuery) -> RepositoryResult<Vec<Order>>;
        fn count_orders(&self, query: OrderListQuery) -> RepositoryResult<i64>;
    }

    impl OrderWriter for Repository {
        fn open_order(&self, new_order: &NewOrder) -> RepositoryResult<Order>;
        fn add_order_item(&self, order_id: i32, tenant_id: i32, new_item: &NewOrderItem) -> RepositoryResult<OrderItem>;
        fn remove_order_item(&self, order_id: i32, item_id: i32, tenant_id: i32) -> RepositoryResult<Order>;
        fn link_customer(&self, order_id: i32, tenant_id: i32, customer_id: i32) -> RepositoryResult<Order>;
        fn change_order_status(&self, order_id: i32, tenant_id: i32, change: &StatusChange) -> RepositoryResult<StatusTransition>;
    }

    impl CustomerReader for Repository {
        fn get_customer_by_id(&self, id: i32, tenant_id: i32) -> RepositoryResult<Option<Customer>>;
    }

    impl CashSessionReader for Repository {
        fn list_cash_registers(&self, tenant_id: i32) -> RepositoryResult<Vec<CashRegisterOverview>>;
        fn get_cash_session(&self, id: i32, tenant_id: i32) -> RepositoryResult<Option<CashSession>>;
        fn find_open_session(&self, tenant_id: i32, cash_register_id: Option<i32>) -> RepositoryResult<Option<CashSession>>;
        fn list_session_transactions(&self, session_id: i32, tenant_id: i32) -> RepositoryResult<Vec<CashTransaction>>;
        fn list_revenue(&self, query: &SalesReportQuery) -> RepositoryResult<Vec<CashTransaction>>;
    }

    impl CashSessionWriter for Repository {
        fn create_cash_register(&self, new_register: &NewCashRegister) -> RepositoryResult<CashRegister>;
        fn open_cash_session(&self, payload: &OpenCashSession) -> RepositoryResult<CashSession>;
        fn close_cash_session(&self, session_id: i32, tenant_id: i32, payload: &CloseCashSession) -> RepositoryResult<CashSession>;
    }
}

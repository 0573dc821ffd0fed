pub mod cash_session;
pub mod customer;
pub mod inventory;
pub mod order;
pub mod product;
pub mod table;

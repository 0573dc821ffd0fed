pub mod config;
pub mod db;
pub mod domain;
pub mod forms;
pub mod models;
pub mod notifications;
pub mod repository;
pub mod routes;
pub mod schema;
pub mod services;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_CASHIER: &str = "cashier";
pub const ROLE_WAITER: &str = "waiter";
pub const ROLE_KITCHEN: &str = "kitchen";

/// Front of house: opening tabs and taking orders.
pub const OPERATIONAL_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_CASHIER, ROLE_WAITER];
/// Moving tabs through preparation.
pub const KITCHEN_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_CASHIER, ROLE_KITCHEN];
/// Registers, settlement, stock and reports.
pub const MANAGEMENT_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_CASHIER];
pub const STAFF_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_CASHIER, ROLE_WAITER, ROLE_KITCHEN];

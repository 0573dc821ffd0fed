use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::UnknownVariant;

/// Occupancy state of a dining table.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TableStatus {
    /// No open tab is attached to the table.
    #[default]
    Available,
    /// A tab is open for the table.
    Occupied,
}

impl TableStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TableStatus::Available => "available",
            TableStatus::Occupied => "occupied",
        }
    }
}

impl fmt::Display for TableStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TableStatus {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "available" => Ok(TableStatus::Available),
            "occupied" => Ok(TableStatus::Occupied),
            other => Err(UnknownVariant::new("table status", other)),
        }
    }
}

/// Dining table owned by a tenant.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct DiningTable {
    pub id: i32,
    pub tenant_id: i32,
    /// Number printed on the table; unique per tenant.
    pub number: i32,
    pub status: TableStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Payload required to register a new table.
#[derive(Debug, Clone)]
pub struct NewDiningTable {
    pub tenant_id: i32,
    pub number: i32,
}

impl NewDiningTable {
    pub fn new(tenant_id: i32, number: i32) -> Self {
        Self { tenant_id, number }
    }
}

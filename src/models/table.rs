use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::UnknownVariant;
use crate::domain::table::{
    DiningTable as DomainDiningTable, NewDiningTable as DomainNewDiningTable,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::dining_tables)]
pub struct DiningTable {
    pub id: i32,
    pub tenant_id: i32,
    pub number: i32,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::dining_tables)]
pub struct NewDiningTable {
    pub tenant_id: i32,
    pub number: i32,
}

impl TryFrom<DiningTable> for DomainDiningTable {
    type Error = UnknownVariant;

    fn try_from(value: DiningTable) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id,
            tenant_id: value.tenant_id,
            number: value.number,
            status: value.status.parse()?,
            created_at: value.created_at,
            updated_at: value.updated_at,
        })
    }
}

impl From<&DomainNewDiningTable> for NewDiningTable {
    fn from(value: &DomainNewDiningTable) -> Self {
        Self {
            tenant_id: value.tenant_id,
            number: value.number,
        }
    }
}

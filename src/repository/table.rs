use chrono::Utc;
use diesel::dsl::{exists, select};
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::domain::table::{
    DiningTable as DomainDiningTable, NewDiningTable as DomainNewDiningTable, TableStatus,
};
use crate::models::table::{DiningTable as DbDiningTable, NewDiningTable as DbNewDiningTable};
use crate::repository::{
    DieselRepository, RepositoryError, RepositoryResult, TableReader, TableWriter,
};

/// Occupancy transitions of dining tables.
///
/// Has no transaction boundary of its own: callers pass the connection of the
/// unit of work they are running.
pub struct TableRegistry;

impl TableRegistry {
    /// Marks the table occupied.
    ///
    /// The update is conditional on the table being available, so two
    /// concurrent tabs for the same table cannot both succeed.
    pub fn mark_occupied(
        tx: &mut SqliteConnection,
        table_id: i32,
        tenant_id: i32,
    ) -> RepositoryResult<()> {
        use crate::schema::dining_tables;

        let updated = diesel::update(
            dining_tables::table
                .filter(dining_tables::id.eq(table_id))
                .filter(dining_tables::tenant_id.eq(tenant_id))
                .filter(dining_tables::status.eq(TableStatus::Available.as_str())),
        )
        .set((
            dining_tables::status.eq(TableStatus::Occupied.as_str()),
            dining_tables::updated_at.eq(Utc::now().naive_utc()),
        ))
        .execute(tx)?;

        if updated == 1 {
            return Ok(());
        }

        let known = select(exists(
            dining_tables::table
                .filter(dining_tables::id.eq(table_id))
                .filter(dining_tables::tenant_id.eq(tenant_id)),
        ))
        .get_result::<bool>(tx)?;

        if known {
            Err(RepositoryError::Conflict(format!(
                "table {table_id} is not available"
            )))
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    /// Marks the table available. Freeing an available table is a no-op.
    pub fn mark_available(tx: &mut SqliteConnection, table_id: i32) -> RepositoryResult<()> {
        use crate::schema::dining_tables;

        diesel::update(
            dining_tables::table
                .filter(dining_tables::id.eq(table_id))
                .filter(dining_tables::status.ne(TableStatus::Available.as_str())),
        )
        .set((
            dining_tables::status.eq(TableStatus::Available.as_str()),
            dining_tables::updated_at.eq(Utc::now().naive_utc()),
        ))
        .execute(tx)?;

        Ok(())
    }
}

impl TableReader for DieselRepository {
    fn get_table_by_id(
        &self,
        id: i32,
        tenant_id: i32,
    ) -> RepositoryResult<Option<DomainDiningTable>> {
        use crate::schema::dining_tables;

        let mut conn = self.conn()?;
        let table = dining_tables::table
            .filter(dining_tables::id.eq(id))
            .filter(dining_tables::tenant_id.eq(tenant_id))
            .first::<DbDiningTable>(&mut conn)
            .optional()?;

        Ok(table.map(DomainDiningTable::try_from).transpose()?)
    }

    fn list_tables(&self, tenant_id: i32) -> RepositoryResult<Vec<DomainDiningTable>> {
        use crate::schema::dining_tables;

        let mut conn = self.conn()?;
        let tables = dining_tables::table
            .filter(dining_tables::tenant_id.eq(tenant_id))
            .order(dining_tables::number.asc())
            .load::<DbDiningTable>(&mut conn)?;

        tables
            .into_iter()
            .map(|table| DomainDiningTable::try_from(table).map_err(RepositoryError::from))
            .collect()
    }
}

impl TableWriter for DieselRepository {
    fn create_table(
        &self,
        new_table: &DomainNewDiningTable,
    ) -> RepositoryResult<DomainDiningTable> {
        use crate::schema::dining_tables;

        let mut conn = self.conn()?;

        let created = diesel::insert_into(dining_tables::table)
            .values(&DbNewDiningTable::from(new_table))
            .get_result::<DbDiningTable>(&mut conn)
            .map_err(|err| {
                RepositoryError::from(err).conflict_as(&format!(
                    "table number {} already exists",
                    new_table.number
                ))
            })?;

        Ok(DomainDiningTable::try_from(created)?)
    }
}

use crate::domain::table::DiningTable;
use crate::domain::tenant::TenantContext;
use crate::forms::tables::{AddTableForm, TableFormError};
use crate::repository::{TableReader, TableWriter};
use crate::services::{ServiceError, ServiceResult};

impl From<TableFormError> for ServiceError {
    fn from(value: TableFormError) -> Self {
        ServiceError::Validation(value.to_string())
    }
}

/// Registers a dining table; numbers are unique per tenant.
pub fn create_table<R>(
    repo: &R,
    ctx: &TenantContext,
    form: AddTableForm,
) -> ServiceResult<DiningTable>
where
    R: TableWriter + ?Sized,
{
    let new_table = form.into_new_table(ctx.tenant_id)?;
    Ok(repo.create_table(&new_table)?)
}

pub fn list_tables<R>(repo: &R, ctx: &TenantContext) -> ServiceResult<Vec<DiningTable>>
where
    R: TableReader + ?Sized,
{
    Ok(repo.list_tables(ctx.tenant_id)?)
}

pub fn get_table<R>(repo: &R, ctx: &TenantContext, table_id: i32) -> ServiceResult<DiningTable>
where
    R: TableReader + ?Sized,
{
    repo.get_table_by_id(table_id, ctx.tenant_id)?
        .ok_or(ServiceError::NotFound)
}

#[cfg(test)]
mod tests {
    use mockall::predicate::*;

    use super::*;
    use crate::repository::RepositoryError;
    use crate::repository::mock::{MockTableReader, MockTableWriter};

    #[test]
    fn duplicate_table_number_is_a_conflict() {
        let mut repo = MockTableWriter::new();
        repo.expect_create_table()
            .withf(|table| table.number == 4 && table.tenant_id == 1)
            .returning(|_| {
                Err(RepositoryError::Conflict(
                    "table number 4 already exists".to_string(),
                ))
            });

        let result = create_table(&repo, &TenantContext::new(1, 2), AddTableForm { number: 4 });

        assert!(matches!(result, Err(ServiceError::Conflict(_))));
    }

    #[test]
    fn unknown_table_is_not_found() {
        let mut repo = MockTableReader::new();
        repo.expect_get_table_by_id()
            .with(eq(9), eq(1))
            .returning(|_, _| Ok(None));

        assert!(matches!(
            get_table(&repo, &TenantContext::new(1, 2), 9),
            Err(ServiceError::NotFound)
        ));
    }
}

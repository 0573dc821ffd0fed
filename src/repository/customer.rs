use diesel::prelude::*;

use crate::{
    domain::customer::{Customer as DomainCustomer, NewCustomer as DomainNewCustomer},
    models::customer::{Customer as DbCustomer, NewCustomer as DbNewCustomer},
    repository::{CustomerReader, CustomerWriter, DieselRepository, RepositoryResult},
};

impl CustomerReader for DieselRepository {
    fn get_customer_by_id(
        &self,
        id: i32,
        tenant_id: i32,
    ) -> RepositoryResult<Option<DomainCustomer>> {
        use crate::schema::customers;

        let mut conn = self.conn()?;
        let customer = customers::table
            .filter(customers::id.eq(id))
            .filter(customers::tenant_id.eq(tenant_id))
            .first::<DbCustomer>(&mut conn)
            .optional()?;

        Ok(customer.map(Into::into))
    }
}

impl CustomerWriter for DieselRepository {
    fn create_customer(
        &self,
        new_customer: &DomainNewCustomer,
    ) -> RepositoryResult<DomainCustomer> {
        use crate::schema::customers;

        let mut conn = self.conn()?;
        let created = diesel::insert_into(customers::table)
            .values(&DbNewCustomer::from(new_customer))
            .get_result::<DbCustomer>(&mut conn)?;

        Ok(created.into())
    }
}

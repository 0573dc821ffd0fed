use diesel::prelude::*;

use crate::{
    domain::product::{NewProduct as DomainNewProduct, Product as DomainProduct},
    models::product::{NewProduct as DbNewProduct, Product as DbProduct},
    repository::{DieselRepository, ProductReader, ProductWriter, RepositoryResult},
};

impl ProductReader for DieselRepository {
    fn get_product_by_id(
        &self,
        id: i32,
        tenant_id: i32,
    ) -> RepositoryResult<Option<DomainProduct>> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let product = products::table
            .filter(products::id.eq(id))
            .filter(products::tenant_id.eq(tenant_id))
            .first::<DbProduct>(&mut conn)
            .optional()?;

        Ok(product.map(Into::into))
    }
}

impl ProductWriter for DieselRepository {
    fn create_product(&self, new_product: &DomainNewProduct) -> RepositoryResult<DomainProduct> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let created = diesel::insert_into(products::table)
            .values(&DbNewProduct::from(new_product))
            .get_result::<DbProduct>(&mut conn)?;

        Ok(created.into())
    }
}

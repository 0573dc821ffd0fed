//! Minimal product and customer management backing the order lifecycle.

use crate::domain::customer::Customer;
use crate::domain::product::Product;
use crate::domain::tenant::TenantContext;
use crate::forms::catalog::{AddCustomerForm, AddProductForm, CatalogFormError};
use crate::repository::{CustomerReader, CustomerWriter, ProductReader, ProductWriter};
use crate::services::{ServiceError, ServiceResult};

impl From<CatalogFormError> for ServiceError {
    fn from(value: CatalogFormError) -> Self {
        ServiceError::Validation(value.to_string())
    }
}

pub fn create_product<R>(
    repo: &R,
    ctx: &TenantContext,
    form: AddProductForm,
) -> ServiceResult<Product>
where
    R: ProductWriter + ?Sized,
{
    let new_product = form.into_new_product(ctx.tenant_id)?;
    Ok(repo.create_product(&new_product)?)
}

pub fn get_product<R>(repo: &R, ctx: &TenantContext, product_id: i32) -> ServiceResult<Product>
where
    R: ProductReader + ?Sized,
{
    repo.get_product_by_id(product_id, ctx.tenant_id)?
        .ok_or(ServiceError::NotFound)
}

pub fn create_customer<R>(
    repo: &R,
    ctx: &TenantContext,
    form: AddCustomerForm,
) -> ServiceResult<Customer>
where
    R: CustomerWriter + ?Sized,
{
    let new_customer = form.into_new_customer(ctx.tenant_id)?;
    Ok(repo.create_customer(&new_customer)?)
}

pub fn get_customer<R>(repo: &R, ctx: &TenantContext, customer_id: i32) -> ServiceResult<Customer>
where
    R: CustomerReader + ?Sized,
{
    repo.get_customer_by_id(customer_id, ctx.tenant_id)?
        .ok_or(ServiceError::NotFound)
}

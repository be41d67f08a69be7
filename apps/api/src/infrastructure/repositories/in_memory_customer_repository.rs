use crate::domain::customer::{
    entity::Customer,
    errors::DomainError,
    filter::{CustomerFilter, CustomerUpdate},
    repository::{CustomerRepository, FindOptions},
};
use crate::domain::shared::unique_entity_id::UniqueEntityId;
use async_trait::async_trait;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

/// Process-local customer store kept in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryCustomerRepository {
    customers: RwLock<Vec<Customer>>,
}

impl InMemoryCustomerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_customers(customers: Vec<Customer>) -> Self {
        Self {
            customers: RwLock::new(customers),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<Customer>>, DomainError> {
        self.customers
            .read()
            .map_err(|_| DomainError::InfrastructureError("customer store lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<Customer>>, DomainError> {
        self.customers
            .write()
            .map_err(|_| DomainError::InfrastructureError("customer store lock poisoned".into()))
    }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn find(
        &self,
        filter: &CustomerFilter,
        options: Option<FindOptions>,
    ) -> Result<Vec<Customer>, DomainError> {
        let options = options.unwrap_or_default();
        let skip = options.skip.unwrap_or(0).max(0) as usize;
        let limit = options.limit.map_or(usize::MAX, |l| l.max(0) as usize);

        let found: Vec<Customer> = self
            .read()?
            .iter()
            .filter(|c| filter.matches(c))
            .skip(skip)
            .take(limit)
            .cloned()
            .collect();
        debug!(count = found.len(), "in-memory find");
        Ok(found)
    }

    async fn find_one(&self, filter: &CustomerFilter) -> Result<Option<Customer>, DomainError> {
        Ok(self.read()?.iter().find(|c| filter.matches(c)).cloned())
    }

    async fn add(&self, customer: &Customer) -> Result<(), DomainError> {
        let mut customers = self.write()?;
        if customers.iter().any(|c| c.id() == customer.id()) {
            return Err(DomainError::AlreadyExists(format!(
                "customer {}",
                customer.id()
            )));
        }
        if customers
            .iter()
            .any(|c| c.taxpayer_id == customer.taxpayer_id)
        {
            return Err(DomainError::AlreadyExists(format!(
                "customer with taxpayer id {}",
                customer.taxpayer_id.formatted()
            )));
        }
        customers.push(customer.clone());
        Ok(())
    }

    async fn remove(&self, id: UniqueEntityId) -> Result<u64, DomainError> {
        let mut customers = self.write()?;
        let before = customers.len();
        customers.retain(|c| c.id() != id);
        Ok((before - customers.len()) as u64)
    }

    async fn find_one_and_update(
        &self,
        filter: &CustomerFilter,
        update: &CustomerUpdate,
    ) -> Result<u64, DomainError> {
        let mut customers = self.write()?;
        match customers.iter_mut().find(|c| filter.matches(c)) {
            Some(customer) => {
                update.apply(customer);
                Ok(1)
            }
            None => Ok(0),
        }
    }
}

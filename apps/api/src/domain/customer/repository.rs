use super::entity::Customer;
use super::errors::DomainError;
use super::filter::{CustomerFilter, CustomerUpdate};
use crate::domain::shared::{pagination::PaginationRequest, unique_entity_id::UniqueEntityId};
use async_trait::async_trait;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FindOptions {
    pub limit: Option<i64>,
    pub skip: Option<i64>,
}

impl From<PaginationRequest> for FindOptions {
    fn from(page: PaginationRequest) -> Self {
        Self {
            limit: Some(page.limit),
            skip: Some(page.offset),
        }
    }
}

/// Storage port for customers. Results come back in insertion order.
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    async fn find(
        &self,
        filter: &CustomerFilter,
        options: Option<FindOptions>,
    ) -> Result<Vec<Customer>, DomainError>;
    async fn find_one(&self, filter: &CustomerFilter) -> Result<Option<Customer>, DomainError>;
    async fn add(&self, customer: &Customer) -> Result<(), DomainError>;
    /// Returns how many customers were removed.
    async fn remove(&self, id: UniqueEntityId) -> Result<u64, DomainError>;
    /// Applies `update` to the first match and returns how many were updated.
    async fn find_one_and_update(
        &self,
        filter: &CustomerFilter,
        update: &CustomerUpdate,
    ) -> Result<u64, DomainError>;

    async fn ping(&self) -> Result<(), DomainError> {
        Ok(())
    }
}

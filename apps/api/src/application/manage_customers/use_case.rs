use super::dto::UpdateCustomerRequest;
use crate::domain::customer::{
    entity::Customer,
    errors::DomainError,
    filter::{CustomerFilter, CustomerQuery, CustomerUpdate},
    repository::CustomerRepository,
};
use crate::domain::shared::unique_entity_id::UniqueEntityId;
use crate::infrastructure::logging::traits::Logger;
use std::sync::Arc;
use validator::Validate;

/// Single-customer reads and writes addressed by identity.
pub struct ManageCustomersUseCase {
    repository: Arc<dyn CustomerRepository>,
    logger: Arc<dyn Logger>,
}

impl ManageCustomersUseCase {
    pub fn new(repository: Arc<dyn CustomerRepository>, logger: Arc<dyn Logger>) -> Self {
        Self { repository, logger }
    }

    pub async fn get(&self, id: UniqueEntityId) -> Result<Customer, DomainError> {
        self.repository
            .find_one(&by_id(id))
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("customer {}", id)))
    }

    pub async fn update(
        &self,
        id: UniqueEntityId,
        request: UpdateCustomerRequest,
    ) -> Result<u64, DomainError> {
        request.validate()?;
        let update = CustomerUpdate::from(request);
        if update.is_empty() {
            return Err(DomainError::ValidationError(
                "update must change at least one field".into(),
            ));
        }

        let updated = self.repository.find_one_and_update(&by_id(id), &update).await?;
        if updated == 0 {
            return Err(DomainError::NotFound(format!("customer {}", id)));
        }

        self.logger.info(&format!("Updated customer {}", id));
        Ok(updated)
    }

    pub async fn remove(&self, id: UniqueEntityId) -> Result<u64, DomainError> {
        let removed = self.repository.remove(id).await?;
        if removed == 0 {
            return Err(DomainError::NotFound(format!("customer {}", id)));
        }

        self.logger.info(&format!("Removed customer {}", id));
        Ok(removed)
    }
}

fn by_id(id: UniqueEntityId) -> CustomerFilter {
    CustomerFilter::Fields(CustomerQuery::by_id(id))
}

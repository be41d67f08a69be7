use super::dto::RegisterCustomerRequest;
use crate::domain::customer::{
    entity::{Customer, CustomerProps},
    errors::DomainError,
    filter::{CustomerFilter, CustomerQuery},
    repository::CustomerRepository,
    value_objects::TaxpayerId,
};
use crate::infrastructure::logging::traits::Logger;
use chrono::Utc;
use std::sync::Arc;
use validator::Validate;

pub struct RegisterCustomerUseCase {
    repository: Arc<dyn CustomerRepository>,
    logger: Arc<dyn Logger>,
}

impl RegisterCustomerUseCase {
    pub fn new(repository: Arc<dyn CustomerRepository>, logger: Arc<dyn Logger>) -> Self {
        Self { repository, logger }
    }

    pub async fn execute(&self, request: RegisterCustomerRequest) -> Result<Customer, DomainError> {
        request.validate()?;
        let taxpayer_id = TaxpayerId::parse(&request.taxpayer_id)?;

        if request.birth_date > Utc::now().date_naive() {
            return Err(DomainError::ValidationError(
                "birth_date cannot be in the future".into(),
            ));
        }

        let existing = self
            .repository
            .find_one(&CustomerFilter::Fields(CustomerQuery::by_taxpayer_id(
                taxpayer_id.as_str(),
            )))
            .await?;
        if existing.is_some() {
            self.logger.warn(&format!(
                "Rejected duplicate registration for taxpayer id {}",
                taxpayer_id.formatted()
            ));
            return Err(DomainError::AlreadyExists(format!(
                "customer with taxpayer id {}",
                taxpayer_id.formatted()
            )));
        }

        let customer = Customer::new(CustomerProps {
            taxpayer_id,
            name: request.name.trim().to_string(),
            email: request.email.trim().to_ascii_lowercase(),
            phone: request.phone.trim().to_string(),
            address: request.address.into(),
            birth_date: request.birth_date,
        });

        if let Err(e) = self.repository.add(&customer).await {
            self.logger
                .error(&format!("Failed to register customer {}: {}", customer.id(), e));
            return Err(e);
        }

        self.logger
            .info(&format!("Registered customer {}", customer.id()));
        Ok(customer)
    }
}

use crate::domain::customer::{
    entity::Customer,
    errors::DomainError,
    filter::CustomerFilter,
    repository::{CustomerRepository, FindOptions},
};
use crate::infrastructure::logging::traits::Logger;
use std::sync::Arc;

/// Looks customers up by an opaque filter.
///
/// An empty lookup is `Ok(None)`. Repository failures are logged here and
/// returned to the caller unchanged.
pub struct SearchCustomersUseCase {
    repository: Arc<dyn CustomerRepository>,
    logger: Arc<dyn Logger>,
}

impl SearchCustomersUseCase {
    pub fn new(repository: Arc<dyn CustomerRepository>, logger: Arc<dyn Logger>) -> Self {
        Self { repository, logger }
    }

    pub async fn execute(
        &self,
        filter: impl Into<CustomerFilter>,
    ) -> Result<Option<Vec<Customer>>, DomainError> {
        self.execute_with(filter, None).await
    }

    pub async fn execute_with(
        &self,
        filter: impl Into<CustomerFilter>,
        options: Option<FindOptions>,
    ) -> Result<Option<Vec<Customer>>, DomainError> {
        let filter = filter.into();

        let customers = match self.repository.find(&filter, options).await {
            Ok(customers) => customers,
            Err(e) => {
                self.logger
                    .error(&format!("Customer search failed for {:?}: {}", filter, e));
                return Err(e);
            }
        };

        if customers.is_empty() {
            self.logger
                .info(&format!("No customers found for {:?}", filter));
            return Ok(None);
        }

        self.logger.info(&format!(
            "Found {} customer(s) for {:?}",
            customers.len(),
            filter
        ));
        Ok(Some(customers))
    }
}

use crate::{
    domain::customer::repository::CustomerRepository, infrastructure::logging::traits::Logger,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub customer_repo: Arc<dyn CustomerRepository>,
    pub logger: Arc<dyn Logger>,
}

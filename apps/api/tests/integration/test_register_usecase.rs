use super::helpers::{RecordingLogger, VALID_TAXPAYER_IDS, register_payload};
use chrono::{Days, Utc};
use customers::{
    application::register_customer::{dto::RegisterCustomerRequest, use_case::RegisterCustomerUseCase},
    domain::customer::{errors::DomainError, repository::CustomerRepository},
    infrastructure::repositories::in_memory_customer_repository::InMemoryCustomerRepository,
};
use std::sync::Arc;

fn request(name: &str, taxpayer_id: &str) -> RegisterCustomerRequest {
    serde_json::from_value(register_payload(name, taxpayer_id)).expect("valid payload")
}

#[tokio::test]
async fn registers_customer_with_normalised_fields() {
    let repository = Arc::new(InMemoryCustomerRepository::new());
    let logger = Arc::new(RecordingLogger::default());
    let sut = RegisterCustomerUseCase::new(repository.clone(), logger.clone());

    let customer = sut.execute(request("Iara", VALID_TAXPAYER_IDS[1])).await.unwrap();

    assert_eq!(customer.taxpayer_id.as_str(), "11144477735");
    assert_eq!(customer.address.state, "SP");
    let stored = repository.find(&"iara".into(), None).await.unwrap();
    assert_eq!(stored, vec![customer]);
    assert_eq!(logger.entries()[0].0, "info");
}

#[tokio::test]
async fn rejects_birth_date_in_the_future() {
    let sut = RegisterCustomerUseCase::new(
        Arc::new(InMemoryCustomerRepository::new()),
        Arc::new(RecordingLogger::default()),
    );
    let mut req = request("Iara", VALID_TAXPAYER_IDS[1]);
    req.birth_date = Utc::now()
        .date_naive()
        .checked_add_days(Days::new(2))
        .unwrap();

    let err = sut.execute(req).await.unwrap_err();

    assert!(matches!(err, DomainError::ValidationError(_)));
}

#[tokio::test]
async fn warns_and_rejects_duplicate_taxpayer() {
    let logger = Arc::new(RecordingLogger::default());
    let sut = RegisterCustomerUseCase::new(Arc::new(InMemoryCustomerRepository::new()), logger.clone());

    sut.execute(request("Iara", VALID_TAXPAYER_IDS[0])).await.unwrap();
    let err = sut
        .execute(request("Outra", "52998224725"))
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::AlreadyExists(_)));
    assert!(logger.entries().iter().any(|(level, _)| *level == "warn"));
}

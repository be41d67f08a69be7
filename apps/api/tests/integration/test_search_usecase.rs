use super::helpers::{
    FailingRepository, RecordingLogger, SingleCustomerRepository, VALID_TAXPAYER_IDS,
    sample_customer,
};
use customers::{
    application::search_customers::use_case::SearchCustomersUseCase,
    domain::customer::{errors::DomainError, filter::CustomerQuery},
    infrastructure::repositories::in_memory_customer_repository::InMemoryCustomerRepository,
};
use std::sync::Arc;

#[tokio::test]
async fn fails_with_repository_error_when_database_fails() {
    let repository = Arc::new(FailingRepository {
        error: DomainError::InfrastructureError("Internal Server Error".into()),
    });
    let logger = Arc::new(RecordingLogger::default());
    let sut = SearchCustomersUseCase::new(repository, logger.clone());

    let err = sut.execute("anything").await.expect_err("search should fail");

    assert!(err.to_string().contains("Internal Server Error"));
    let entries = logger.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].0, "error");
}

#[tokio::test]
async fn returns_nothing_when_no_record_matches() {
    let repository = Arc::new(InMemoryCustomerRepository::new());
    let sut = SearchCustomersUseCase::new(repository, Arc::new(RecordingLogger::default()));

    assert!(sut.execute("anything").await.unwrap().is_none());
}

#[tokio::test]
async fn returns_customers_when_records_match_the_filter() {
    let customer = sample_customer("Maria Souza", VALID_TAXPAYER_IDS[0], "Campinas");
    let repository = Arc::new(SingleCustomerRepository {
        customer: customer.clone(),
    });
    let logger = Arc::new(RecordingLogger::default());
    let sut = SearchCustomersUseCase::new(repository, logger.clone());

    let customers = sut.execute("anything").await.unwrap().expect("customers");

    assert_eq!(customers.len(), 1);
    assert_eq!(customers[0], customer);
    assert_eq!(logger.entries()[0].0, "info");
}

#[tokio::test]
async fn structured_filters_reach_the_repository() {
    let maria = sample_customer("Maria Souza", VALID_TAXPAYER_IDS[0], "Campinas");
    let joao = sample_customer("Joao Lima", VALID_TAXPAYER_IDS[1], "Santos");
    let repository = Arc::new(InMemoryCustomerRepository::with_customers(vec![
        maria.clone(),
        joao.clone(),
    ]));
    let sut = SearchCustomersUseCase::new(repository, Arc::new(RecordingLogger::default()));

    let by_city = CustomerQuery {
        city: Some("santos".into()),
        ..CustomerQuery::default()
    };
    assert_eq!(sut.execute(by_city).await.unwrap(), Some(vec![joao.clone()]));

    assert_eq!(
        sut.execute("").await.unwrap(),
        Some(vec![maria, joao]),
        "empty text keeps insertion order"
    );
}

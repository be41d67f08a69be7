use super::helpers::{VALID_TAXPAYER_IDS, sample_address, sample_customer};
use customers::{
    domain::customer::{
        errors::DomainError,
        filter::{CustomerFilter, CustomerQuery, CustomerUpdate},
        repository::{CustomerRepository, FindOptions},
    },
    infrastructure::repositories::in_memory_customer_repository::InMemoryCustomerRepository,
};

#[tokio::test]
async fn text_search_is_case_insensitive_across_fields() {
    let repo = InMemoryCustomerRepository::new();
    let maria = sample_customer("Maria Souza", VALID_TAXPAYER_IDS[0], "Campinas");
    let joao = sample_customer("Joao Lima", VALID_TAXPAYER_IDS[1], "Santos");
    repo.add(&maria).await.unwrap();
    repo.add(&joao).await.unwrap();

    let by_name = repo.find(&"SOUZA".into(), None).await.unwrap();
    assert_eq!(by_name, vec![maria.clone()]);

    let by_city = repo.find(&"santos".into(), None).await.unwrap();
    assert_eq!(by_city, vec![joao.clone()]);

    let by_taxpayer = repo.find(&"11144477735".into(), None).await.unwrap();
    assert_eq!(by_taxpayer, vec![joao]);

    assert!(repo.find(&"nobody".into(), None).await.unwrap().is_empty());
}

#[tokio::test]
async fn find_applies_skip_and_limit_in_insertion_order() {
    let repo = InMemoryCustomerRepository::with_customers(vec![
        sample_customer("Ana", VALID_TAXPAYER_IDS[0], "Recife"),
        sample_customer("Bia", VALID_TAXPAYER_IDS[1], "Recife"),
    ]);

    let page = repo
        .find(
            &CustomerFilter::Text(String::new()),
            Some(FindOptions {
                limit: Some(1),
                skip: Some(1),
            }),
        )
        .await
        .unwrap();

    assert_eq!(page.len(), 1);
    assert_eq!(page[0].name, "Bia");
}

#[tokio::test]
async fn add_rejects_duplicate_identity() {
    let repo = InMemoryCustomerRepository::new();
    let customer = sample_customer("Ana", VALID_TAXPAYER_IDS[0], "Recife");
    repo.add(&customer).await.unwrap();

    let err = repo.add(&customer).await.unwrap_err();
    assert!(matches!(err, DomainError::AlreadyExists(_)));

    let same_taxpayer = sample_customer("Ana Clara", VALID_TAXPAYER_IDS[0], "Olinda");
    assert_ne!(same_taxpayer.id(), customer.id());
    let err = repo.add(&same_taxpayer).await.unwrap_err();
    assert!(matches!(err, DomainError::AlreadyExists(_)));

    let found = repo.find(&CustomerFilter::Text(String::new()), None).await.unwrap();
    assert_eq!(found, vec![customer]);
}

#[tokio::test]
async fn field_search_folds_case_beyond_ascii() {
    let repo = InMemoryCustomerRepository::new();
    let joao = sample_customer("JOÃO", VALID_TAXPAYER_IDS[1], "SÃO PAULO");
    repo.add(&joao).await.unwrap();

    let query = CustomerQuery {
        name: Some("joão".into()),
        city: Some("são paulo".into()),
        ..CustomerQuery::default()
    };
    let found = repo.find(&CustomerFilter::Fields(query), None).await.unwrap();

    assert_eq!(found, vec![joao]);
}

#[tokio::test]
async fn find_one_and_update_changes_only_the_first_match() {
    let ana = sample_customer("Ana", VALID_TAXPAYER_IDS[0], "Recife");
    let bia = sample_customer("Bia", VALID_TAXPAYER_IDS[1], "Recife");
    let repo = InMemoryCustomerRepository::with_customers(vec![ana.clone(), bia.clone()]);

    let update = CustomerUpdate {
        phone: Some("81 999990000".into()),
        address: Some(sample_address("Olinda")),
        ..CustomerUpdate::default()
    };
    let filter = CustomerFilter::Fields(CustomerQuery {
        city: Some("Recife".into()),
        ..CustomerQuery::default()
    });

    assert_eq!(repo.find_one_and_update(&filter, &update).await.unwrap(), 1);

    let updated = repo
        .find_one(&CustomerQuery::by_id(ana.id()).into())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.id(), ana.id());
    assert_eq!(updated.phone, "81 999990000");
    assert_eq!(updated.address.city, "Olinda");
    assert_eq!(updated.name, "Ana");

    let untouched = repo
        .find_one(&CustomerQuery::by_id(bia.id()).into())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(untouched, bia);
}

#[tokio::test]
async fn remove_reports_how_many_were_deleted() {
    let ana = sample_customer("Ana", VALID_TAXPAYER_IDS[0], "Recife");
    let repo = InMemoryCustomerRepository::with_customers(vec![ana.clone()]);

    assert_eq!(repo.remove(ana.id()).await.unwrap(), 1);
    assert_eq!(repo.remove(ana.id()).await.unwrap(), 0);
    assert!(repo.find(&"".into(), None).await.unwrap().is_empty());
}

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::Request,
};
use chrono::NaiveDate;
use customers::{
    domain::{
        customer::{
            entity::{Address, Customer, CustomerProps},
            errors::DomainError,
            filter::{CustomerFilter, CustomerUpdate},
            repository::{CustomerRepository, FindOptions},
            value_objects::TaxpayerId,
        },
        shared::unique_entity_id::UniqueEntityId,
    },
    infrastructure::{
        logging::traits::Logger,
        repositories::in_memory_customer_repository::InMemoryCustomerRepository,
    },
    presentation::http::{routes::create_router, state::AppState},
};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

pub const VALID_TAXPAYER_IDS: [&str; 2] = ["529.982.247-25", "111.444.777-35"];

pub fn sample_address(city: &str) -> Address {
    Address {
        street: "Rua das Flores".to_string(),
        number: 100,
        neighborhood: "Centro".to_string(),
        state: "SP".to_string(),
        city: city.to_string(),
        postal_code: "01001-000".to_string(),
        complement: String::new(),
    }
}

pub fn sample_customer(name: &str, taxpayer_id: &str, city: &str) -> Customer {
    Customer::new(CustomerProps {
        taxpayer_id: TaxpayerId::parse(taxpayer_id).expect("valid taxpayer id"),
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
        phone: "11 982240000".to_string(),
        address: sample_address(city),
        birth_date: NaiveDate::from_ymd_opt(1988, 3, 14).expect("valid date"),
    })
}

pub fn register_payload(name: &str, taxpayer_id: &str) -> Value {
    json!({
        "taxpayer_id": taxpayer_id,
        "name": name,
        "email": format!("{}@example.com", name.to_lowercase()),
        "phone": "11 982240000",
        "address": {
            "street": "Avenida Paulista",
            "number": 1578,
            "neighborhood": "Bela Vista",
            "state": "sp",
            "city": "Sao Paulo",
            "postal_code": "01310-200",
            "complement": "Apto 12"
        },
        "birth_date": "1991-07-02"
    })
}

/// Repository whose `find` always yields a single customer; every other
/// operation is unsupported.
pub struct SingleCustomerRepository {
    pub customer: Customer,
}

#[async_trait]
impl CustomerRepository for SingleCustomerRepository {
    async fn find(
        &self,
        _filter: &CustomerFilter,
        _options: Option<FindOptions>,
    ) -> Result<Vec<Customer>, DomainError> {
        Ok(vec![self.customer.clone()])
    }

    async fn find_one(&self, _filter: &CustomerFilter) -> Result<Option<Customer>, DomainError> {
        Err(unsupported())
    }

    async fn add(&self, _customer: &Customer) -> Result<(), DomainError> {
        Err(unsupported())
    }

    async fn remove(&self, _id: UniqueEntityId) -> Result<u64, DomainError> {
        Err(unsupported())
    }

    async fn find_one_and_update(
        &self,
        _filter: &CustomerFilter,
        _update: &CustomerUpdate,
    ) -> Result<u64, DomainError> {
        Err(unsupported())
    }
}

/// Repository that fails every call with the configured error.
pub struct FailingRepository {
    pub error: DomainError,
}

#[async_trait]
impl CustomerRepository for FailingRepository {
    async fn find(
        &self,
        _filter: &CustomerFilter,
        _options: Option<FindOptions>,
    ) -> Result<Vec<Customer>, DomainError> {
        Err(self.error.clone())
    }

    async fn find_one(&self, _filter: &CustomerFilter) -> Result<Option<Customer>, DomainError> {
        Err(self.error.clone())
    }

    async fn add(&self, _customer: &Customer) -> Result<(), DomainError> {
        Err(self.error.clone())
    }

    async fn remove(&self, _id: UniqueEntityId) -> Result<u64, DomainError> {
        Err(self.error.clone())
    }

    async fn find_one_and_update(
        &self,
        _filter: &CustomerFilter,
        _update: &CustomerUpdate,
    ) -> Result<u64, DomainError> {
        Err(self.error.clone())
    }

    async fn ping(&self) -> Result<(), DomainError> {
        Err(self.error.clone())
    }
}

fn unsupported() -> DomainError {
    DomainError::InfrastructureError("Method not implemented.".into())
}

#[derive(Default)]
pub struct RecordingLogger {
    entries: Mutex<Vec<(&'static str, String)>>,
}

impl RecordingLogger {
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        self.entries.lock().expect("logger lock").clone()
    }

    fn push(&self, level: &'static str, message: &str) {
        self.entries
            .lock()
            .expect("logger lock")
            .push((level, message.to_string()));
    }
}

impl Logger for RecordingLogger {
    fn info(&self, message: &str) {
        self.push("info", message);
    }

    fn warn(&self, message: &str) {
        self.push("warn", message);
    }

    fn error(&self, message: &str) {
        self.push("error", message);
    }
}

pub struct TestApp {
    pub app: Router,
    pub logger: Arc<RecordingLogger>,
}

pub fn spawn_app_with(repository: Arc<dyn CustomerRepository>) -> TestApp {
    let logger = Arc::new(RecordingLogger::default());
    let state = AppState {
        customer_repo: repository,
        logger: logger.clone(),
    };

    TestApp {
        app: create_router(state),
        logger,
    }
}

pub fn spawn_app() -> TestApp {
    spawn_app_with(Arc::new(InMemoryCustomerRepository::new()))
}

pub async fn send(app: &Router, req: Request<Body>) -> axum::response::Response {
    app.clone().oneshot(req).await.expect("request failed")
}

pub async fn read_json<T: DeserializeOwned>(res: axum::response::Response) -> T {
    let bytes = to_bytes(res.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    serde_json::from_slice(&bytes).expect("failed to parse json")
}

pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("failed to build request")
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("failed to build request")
}

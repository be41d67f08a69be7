use crate::domain::customer::{
    entity::{Address, Customer, CustomerProps},
    errors::DomainError,
    filter::{CustomerFilter, CustomerUpdate},
    repository::{CustomerRepository, FindOptions},
    value_objects::TaxpayerId,
};
use crate::domain::shared::unique_entity_id::UniqueEntityId;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder, types::Json};
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

const UNIQUE_VIOLATION: &str = "23505";

/// JSON paths searched by free-text filters.
const TEXT_PATHS: [&str; 7] = [
    "document->>'name'",
    "document->>'email'",
    "document->>'taxpayer_id'",
    "document->>'phone'",
    "document->'address'->>'city'",
    "document->'address'->>'state'",
    "document->'address'->>'neighborhood'",
];

/// Persisted shape of a customer. The identity lives in the row, not in
/// the document.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CustomerDocument {
    taxpayer_id: TaxpayerId,
    name: String,
    email: String,
    phone: String,
    address: Address,
    birth_date: NaiveDate,
}

impl From<&Customer> for CustomerDocument {
    fn from(c: &Customer) -> Self {
        Self {
            taxpayer_id: c.taxpayer_id.clone(),
            name: c.name.clone(),
            email: c.email.clone(),
            phone: c.phone.clone(),
            address: c.address.clone(),
            birth_date: c.birth_date,
        }
    }
}

#[derive(FromRow)]
struct CustomerRow {
    id: Uuid,
    document: Json<CustomerDocument>,
}

impl From<CustomerRow> for Customer {
    fn from(r: CustomerRow) -> Self {
        let doc = r.document.0;
        Customer::restore(
            UniqueEntityId::from(r.id),
            CustomerProps {
                taxpayer_id: doc.taxpayer_id,
                name: doc.name,
                email: doc.email,
                phone: doc.phone,
                address: doc.address,
                birth_date: doc.birth_date,
            },
        )
    }
}

/// PostgreSQL used as a document store: one JSONB document per customer.
pub struct SqlxCustomerRepository {
    pub pool: PgPool,
}

impl SqlxCustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        info!("Initializing SqlxCustomerRepository with connection pool");
        Self { pool }
    }
}

/// Appends the WHERE clause for `filter` to `qb`.
fn apply_customer_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &CustomerFilter) {
    qb.push(" WHERE ");
    match filter {
        CustomerFilter::Text(text) => {
            let text = text.trim();
            if text.is_empty() {
                qb.push("TRUE");
                return;
            }
            let pattern = format!("%{}%", escape_like(text));
            qb.push("(");
            for (i, path) in TEXT_PATHS.iter().enumerate() {
                if i > 0 {
                    qb.push(" OR ");
                }
                qb.push(*path).push(" ILIKE ").push_bind(pattern.clone());
            }
            qb.push(")");
        }
        CustomerFilter::Fields(query) => {
            qb.push("TRUE");
            if let Some(id) = query.id {
                qb.push(" AND id = ").push_bind(id.value());
            }
            if let Some(taxpayer_id) = &query.taxpayer_id {
                qb.push(" AND document->>'taxpayer_id' = ")
                    .push_bind(taxpayer_id.clone());
            }
            if let Some(name) = &query.name {
                qb.push(" AND lower(document->>'name') = lower(")
                    .push_bind(name.clone())
                    .push(")");
            }
            if let Some(email) = &query.email {
                qb.push(" AND document->>'email' = ").push_bind(email.clone());
            }
            if let Some(phone) = &query.phone {
                qb.push(" AND document->>'phone' = ").push_bind(phone.clone());
            }
            if let Some(city) = &query.city {
                qb.push(" AND lower(document->'address'->>'city') = lower(")
                    .push_bind(city.clone())
                    .push(")");
            }
            if let Some(state) = &query.state {
                qb.push(" AND lower(document->'address'->>'state') = lower(")
                    .push_bind(state.clone())
                    .push(")");
            }
        }
    }
}

/// Escapes ILIKE wildcards so user text matches literally.
fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn infrastructure_error(operation: &str, e: sqlx::Error) -> DomainError {
    error!("Customer {} failed: {}", operation, e);
    DomainError::InfrastructureError(format!("Failed to {} customers: {}", operation, e))
}

#[async_trait]
impl CustomerRepository for SqlxCustomerRepository {
    /// Runs `filter` against the customers table in insertion order.
    ///
    /// # Errors
    /// Returns `DomainError::InfrastructureError` for connectivity issues or
    /// query failures
    #[instrument(skip(self))]
    async fn find(
        &self,
        filter: &CustomerFilter,
        options: Option<FindOptions>,
    ) -> Result<Vec<Customer>, DomainError> {
        let options = options.unwrap_or_default();
        let mut qb = QueryBuilder::<Postgres>::new("SELECT id, document FROM customers");
        apply_customer_filter(&mut qb, filter);
        qb.push(" ORDER BY created_at ASC, id ASC");
        if let Some(limit) = options.limit {
            qb.push(" LIMIT ").push_bind(limit.max(0));
        }
        if let Some(skip) = options.skip {
            qb.push(" OFFSET ").push_bind(skip.max(0));
        }

        let rows: Vec<CustomerRow> = qb
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| infrastructure_error("find", e))?;

        debug!("Customer find returned {} rows", rows.len());
        Ok(rows.into_iter().map(Customer::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_one(&self, filter: &CustomerFilter) -> Result<Option<Customer>, DomainError> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT id, document FROM customers");
        apply_customer_filter(&mut qb, filter);
        qb.push(" ORDER BY created_at ASC, id ASC LIMIT 1");

        let row: Option<CustomerRow> = qb
            .build_query_as()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| infrastructure_error("find one of the", e))?;

        Ok(row.map(Customer::from))
    }

    /// Inserts a new customer document.
    ///
    /// # Errors
    /// Returns `DomainError::AlreadyExists` when the id or taxpayer id is
    /// already stored
    #[instrument(skip(self, customer), fields(customer_id = %customer.id()))]
    async fn add(&self, customer: &Customer) -> Result<(), DomainError> {
        let document = Json(CustomerDocument::from(customer));

        sqlx::query("INSERT INTO customers (id, document) VALUES ($1, $2)")
            .bind(customer.id().value())
            .bind(document)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                let duplicate = e
                    .as_database_error()
                    .and_then(|db| db.code())
                    .is_some_and(|code| code == UNIQUE_VIOLATION);
                if duplicate {
                    DomainError::AlreadyExists(format!(
                        "customer with taxpayer id {}",
                        customer.taxpayer_id
                    ))
                } else {
                    infrastructure_error("add", e)
                }
            })?;

        info!("Successfully added customer {}", customer.id());
        Ok(())
    }

    #[instrument(skip(self))]
    async fn remove(&self, id: UniqueEntityId) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await
            .map_err(|e| infrastructure_error("remove", e))?;

        Ok(result.rows_affected())
    }

    /// Merges `update` into the first matching document. Top-level keys are
    /// replaced, so a provided address replaces the stored one whole.
    #[instrument(skip(self))]
    async fn find_one_and_update(
        &self,
        filter: &CustomerFilter,
        update: &CustomerUpdate,
    ) -> Result<u64, DomainError> {
        let mut qb = QueryBuilder::<Postgres>::new("UPDATE customers SET document = document || ");
        qb.push_bind(Json(update.clone()))
            .push(", updated_at = now() WHERE id = (SELECT id FROM customers");
        apply_customer_filter(&mut qb, filter);
        qb.push(" ORDER BY created_at ASC, id ASC LIMIT 1)");

        let result = qb
            .build()
            .execute(&self.pool)
            .await
            .map_err(|e| infrastructure_error("update", e))?;

        Ok(result.rows_affected())
    }

    async fn ping(&self) -> Result<(), DomainError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| infrastructure_error("reach", e))?;
        Ok(())
    }
}

use crate::domain::customer::{
    entity::Customer,
    filter::{CustomerFilter, CustomerQuery},
    value_objects::TaxpayerId,
};
use crate::domain::shared::pagination::PaginationRequest;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Query-string shape of a customer search.
///
/// `q` takes precedence; otherwise any structured field selects a
/// structured filter, and with neither every customer matches.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SearchRequest {
    pub q: Option<String>,
    pub taxpayer_id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl SearchRequest {
    pub fn filter(&self) -> CustomerFilter {
        if let Some(q) = &self.q {
            return CustomerFilter::Text(q.clone());
        }

        let query = CustomerQuery {
            id: None,
            taxpayer_id: non_blank(&self.taxpayer_id).map(|t| stored_taxpayer_id(&t)),
            name: non_blank(&self.name),
            email: non_blank(&self.email),
            phone: non_blank(&self.phone),
            city: non_blank(&self.city),
            state: non_blank(&self.state),
        };

        if query.is_empty() {
            CustomerFilter::Text(String::new())
        } else {
            CustomerFilter::Fields(query)
        }
    }

    pub fn pagination(&self) -> PaginationRequest {
        PaginationRequest::new(self.limit, self.offset)
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Taxpayer ids are stored as bare digits, so a formatted CPF is reduced
/// to its digits before it reaches the repository.
fn stored_taxpayer_id(value: &str) -> String {
    match TaxpayerId::parse(value) {
        Ok(id) => id.as_str().to_string(),
        Err(_) => {
            let digits: String = value.chars().filter(char::is_ascii_digit).collect();
            if digits.is_empty() {
                value.to_string()
            } else {
                digits
            }
        }
    }
}

#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SearchResponse {
    pub customers: Vec<Customer>,
    pub limit: i64,
    pub offset: i64,
}

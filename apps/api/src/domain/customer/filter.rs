use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entity::{Address, Customer};
use crate::domain::shared::unique_entity_id::UniqueEntityId;

/// Selection criteria handed to the repository untouched by use cases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum CustomerFilter {
    /// Case-insensitive substring match over the searchable fields. Empty
    /// text matches every customer.
    Text(String),
    /// Every provided field must match.
    Fields(CustomerQuery),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CustomerQuery {
    pub id: Option<UniqueEntityId>,
    /// Bare 11-digit form
    pub taxpayer_id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
}

impl CustomerQuery {
    pub fn by_id(id: UniqueEntityId) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    pub fn by_taxpayer_id(taxpayer_id: impl Into<String>) -> Self {
        Self {
            taxpayer_id: Some(taxpayer_id.into()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_none()
            && self.taxpayer_id.is_none()
            && self.name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.city.is_none()
            && self.state.is_none()
    }
}

impl CustomerFilter {
    pub fn matches(&self, customer: &Customer) -> bool {
        match self {
            CustomerFilter::Text(text) => {
                let needle = text.trim().to_lowercase();
                if needle.is_empty() {
                    return true;
                }
                searchable_fields(customer)
                    .iter()
                    .any(|field| field.to_lowercase().contains(&needle))
            }
            CustomerFilter::Fields(query) => {
                query.id.is_none_or(|id| customer.id() == id)
                    && query
                        .taxpayer_id
                        .as_deref()
                        .is_none_or(|t| customer.taxpayer_id.as_str() == t)
                    && query
                        .name
                        .as_deref()
                        .is_none_or(|n| same_text(&customer.name, n))
                    && query.email.as_deref().is_none_or(|e| customer.email == e)
                    && query.phone.as_deref().is_none_or(|p| customer.phone == p)
                    && query
                        .city
                        .as_deref()
                        .is_none_or(|c| same_text(&customer.address.city, c))
                    && query
                        .state
                        .as_deref()
                        .is_none_or(|s| same_text(&customer.address.state, s))
            }
        }
    }
}

/// Unicode-aware case-insensitive equality, matching `lower()` in Postgres.
fn same_text(stored: &str, wanted: &str) -> bool {
    stored.to_lowercase() == wanted.to_lowercase()
}

fn searchable_fields(customer: &Customer) -> [&str; 7] {
    [
        customer.name.as_str(),
        customer.email.as_str(),
        customer.taxpayer_id.as_str(),
        customer.phone.as_str(),
        customer.address.city.as_str(),
        customer.address.state.as_str(),
        customer.address.neighborhood.as_str(),
    ]
}

impl From<&str> for CustomerFilter {
    fn from(text: &str) -> Self {
        CustomerFilter::Text(text.to_string())
    }
}

impl From<String> for CustomerFilter {
    fn from(text: String) -> Self {
        CustomerFilter::Text(text)
    }
}

impl From<CustomerQuery> for CustomerFilter {
    fn from(query: CustomerQuery) -> Self {
        CustomerFilter::Fields(query)
    }
}

/// Partial change applied by `find_one_and_update`. Absent fields are left
/// alone; identity and taxpayer id cannot change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CustomerUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
}

impl CustomerUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.phone.is_none() && self.address.is_none()
    }

    pub fn apply(&self, customer: &mut Customer) {
        if let Some(name) = &self.name {
            customer.name = name.clone();
        }
        if let Some(email) = &self.email {
            customer.email = email.clone();
        }
        if let Some(phone) = &self.phone {
            customer.phone = phone.clone();
        }
        if let Some(address) = &self.address {
            customer.address = address.clone();
        }
    }
}

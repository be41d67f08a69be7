use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::value_objects::TaxpayerId;
use crate::domain::shared::unique_entity_id::UniqueEntityId;

/// Core domain entity representing a registered customer.
///
/// Customers are created through registration and afterwards rebuilt by the
/// repository layer from persisted documents. Use cases receive them as
/// read-only results.
///
/// # Invariants
/// - `id` is assigned once, at construction, and has no setter
/// - `taxpayer_id` is a valid CPF and is unique across customers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Customer {
    id: UniqueEntityId,

    /// Brazilian taxpayer number, 11 bare digits
    pub taxpayer_id: TaxpayerId,

    pub name: String,

    pub email: String,

    pub phone: String,

    pub address: Address,

    pub birth_date: NaiveDate,
}

/// Attributes shared by construction and restoration.
#[derive(Debug, Clone)]
pub struct CustomerProps {
    pub taxpayer_id: TaxpayerId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: Address,
    pub birth_date: NaiveDate,
}

impl Customer {
    /// Creates a customer with a freshly generated identity.
    pub fn new(props: CustomerProps) -> Self {
        Self::restore(UniqueEntityId::new(), props)
    }

    /// Rebuilds a customer whose identity was assigned earlier.
    pub fn restore(id: UniqueEntityId, props: CustomerProps) -> Self {
        Self {
            id,
            taxpayer_id: props.taxpayer_id,
            name: props.name,
            email: props.email,
            phone: props.phone,
            address: props.address,
            birth_date: props.birth_date,
        }
    }

    pub fn id(&self) -> UniqueEntityId {
        self.id
    }
}

/// Postal address owned by a customer. Has no identity of its own.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Address {
    pub street: String,
    pub number: i32,
    pub neighborhood: String,
    /// Two-letter state code
    pub state: String,
    pub city: String,
    pub postal_code: String,
    /// Empty when the address has no complement
    pub complement: String,
}

use crate::domain::customer::{
    entity::Address,
    value_objects::{PHONE_REGEX, POSTAL_CODE_REGEX, STATE_REGEX},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, TS)]
#[ts(export)]
pub struct RegisterCustomerRequest {
    /// CPF, formatted or bare digits
    pub taxpayer_id: String,
    #[validate(length(min = 1, max = 120))]
    #[validate(custom(function = "validate_not_blank", message = "name cannot be blank"))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(regex(path = *PHONE_REGEX))]
    pub phone: String,
    #[validate(nested)]
    pub address: AddressRequest,
    pub birth_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, TS)]
#[ts(export)]
pub struct AddressRequest {
    #[validate(length(min = 1, max = 200))]
    pub street: String,
    #[validate(range(min = 0))]
    pub number: i32,
    #[validate(length(max = 120))]
    pub neighborhood: String,
    #[validate(regex(path = *STATE_REGEX))]
    pub state: String,
    #[validate(length(min = 1, max = 120))]
    pub city: String,
    #[validate(regex(path = *POSTAL_CODE_REGEX))]
    pub postal_code: String,
    #[serde(default)]
    #[validate(length(max = 120))]
    pub complement: String,
}

pub(crate) fn validate_not_blank(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        return Err(validator::ValidationError::new("blank"));
    }
    Ok(())
}

impl From<AddressRequest> for Address {
    fn from(a: AddressRequest) -> Self {
        Address {
            street: a.street.trim().to_string(),
            number: a.number,
            neighborhood: a.neighborhood.trim().to_string(),
            state: a.state.to_ascii_uppercase(),
            city: a.city.trim().to_string(),
            postal_code: a.postal_code,
            complement: a.complement.trim().to_string(),
        }
    }
}

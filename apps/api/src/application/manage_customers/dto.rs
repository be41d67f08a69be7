use crate::application::register_customer::dto::{AddressRequest, validate_not_blank};
use crate::domain::customer::{filter::CustomerUpdate, value_objects::PHONE_REGEX};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use validator::Validate;

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, TS)]
#[ts(export)]
pub struct UpdateCustomerRequest {
    #[validate(length(min = 1, max = 120))]
    #[validate(custom(function = "validate_not_blank", message = "name cannot be blank"))]
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(regex(path = *PHONE_REGEX))]
    pub phone: Option<String>,
    #[validate(nested)]
    pub address: Option<AddressRequest>,
}

impl From<UpdateCustomerRequest> for CustomerUpdate {
    fn from(r: UpdateCustomerRequest) -> Self {
        CustomerUpdate {
            name: r.name.map(|n| n.trim().to_string()),
            email: r.email.map(|e| e.trim().to_ascii_lowercase()),
            phone: r.phone.map(|p| p.trim().to_string()),
            address: r.address.map(Into::into),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct UpdateCustomerResponse {
    pub updated: u64,
}

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;
use validator::Validate;

use super::errors::DomainError;

lazy_static! {
    pub static ref POSTAL_CODE_REGEX: regex::Regex = regex::Regex::new(r"^\d{5}-?\d{3}$").unwrap();
    pub static ref PHONE_REGEX: regex::Regex =
        regex::Regex::new(r"^\+?[0-9][0-9 ()-]{7,19}$").unwrap();
    pub static ref STATE_REGEX: regex::Regex = regex::Regex::new(r"^[A-Za-z]{2}$").unwrap();
    static ref TAXPAYER_ID_REGEX: regex::Regex =
        regex::Regex::new(r"^(\d{3}\.\d{3}\.\d{3}-\d{2}|\d{11})$").unwrap();
}

/// Brazilian individual taxpayer number (CPF), stored as 11 bare digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(try_from = "String")]
#[ts(export)]
pub struct TaxpayerId(String);

impl TaxpayerId {
    /// Accepts `000.000.000-00` or 11 bare digits and checks both verifier
    /// digits. Numbers made of a single repeated digit pass the checksum but
    /// are never issued, so they are rejected too.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        let value = value.trim();
        if !TAXPAYER_ID_REGEX.is_match(value) {
            return Err(DomainError::ValidationError(format!(
                "taxpayer id '{}' is not in CPF format",
                value
            )));
        }

        let digits: Vec<u32> = value.chars().filter_map(|c| c.to_digit(10)).collect();
        if digits.iter().all(|d| *d == digits[0]) {
            return Err(DomainError::ValidationError(
                "taxpayer id cannot repeat a single digit".into(),
            ));
        }

        if check_digit(&digits[..9]) != digits[9] || check_digit(&digits[..10]) != digits[10] {
            return Err(DomainError::ValidationError(format!(
                "taxpayer id '{}' has invalid check digits",
                value
            )));
        }

        Ok(Self(digits.iter().map(|d| d.to_string()).collect()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `000.000.000-00` rendering.
    pub fn formatted(&self) -> String {
        format!(
            "{}.{}.{}-{}",
            &self.0[0..3],
            &self.0[3..6],
            &self.0[6..9],
            &self.0[9..11]
        )
    }
}

impl TryFrom<String> for TaxpayerId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

fn check_digit(digits: &[u32]) -> u32 {
    let weight_start = digits.len() as u32 + 1;
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, d)| d * (weight_start - i as u32))
        .sum();
    match (sum * 10) % 11 {
        10 => 0,
        r => r,
    }
}

impl fmt::Display for TaxpayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PostalCode {
    #[validate(regex(path = *POSTAL_CODE_REGEX))]
    pub value: String,
}

impl PostalCode {
    pub fn new(value: String) -> Result<Self, validator::ValidationErrors> {
        let postal_code = Self { value };
        postal_code.validate()?;
        Ok(postal_code)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PhoneNumber {
    #[validate(regex(path = *PHONE_REGEX))]
    pub value: String,
}

impl PhoneNumber {
    pub fn new(value: String) -> Result<Self, validator::ValidationErrors> {
        let phone = Self { value };
        phone.validate()?;
        Ok(phone)
    }
}

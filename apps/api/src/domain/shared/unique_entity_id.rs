use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;
use uuid::Uuid;

/// Identity shared by every entity in the domain.
///
/// New identities are UUIDv7 so they sort by creation time. Persisted ids are
/// restored through `From<Uuid>` and never regenerated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct UniqueEntityId(Uuid);

impl UniqueEntityId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Parses the hyphenated text form produced by `Display`.
    pub fn parse(value: &str) -> Result<Self, uuid::Error> {
        Uuid::parse_str(value.trim()).map(Self)
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl Default for UniqueEntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for UniqueEntityId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for UniqueEntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

use serde::{Deserialize, Serialize};
use ts_rs::TS;

pub const MAX_PAGE_SIZE: i64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PaginationRequest {
    pub limit: i64,
    pub offset: i64,
}

impl PaginationRequest {
    /// Builds a page request, clamping the limit to `1..=MAX_PAGE_SIZE` and
    /// the offset to non-negative values.
    pub fn new(limit: Option<i64>, offset: Option<i64>) -> Self {
        let defaults = Self::default();
        Self {
            limit: limit.unwrap_or(defaults.limit).clamp(1, MAX_PAGE_SIZE),
            offset: offset.unwrap_or(defaults.offset).max(0),
        }
    }
}

impl Default for PaginationRequest {
    fn default() -> Self {
        Self {
            limit: 50,
            offset: 0,
        }
    }
}

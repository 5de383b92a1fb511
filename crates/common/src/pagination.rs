//! Pagination parameters for backend list endpoints

use serde::{Deserialize, Serialize};

/// Default page size for list endpoints
pub const DEFAULT_LIMIT: u32 = 50;

/// Maximum page size the backend accepts
pub const MAX_LIMIT: u32 = 200;

/// `skip`/`limit` pagination sent as query parameters on list calls
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub skip: Option<u32>,
    #[serde(default)]
    pub limit: Option<u32>,
}

impl Pagination {
    pub fn new(skip: u32, limit: u32) -> Self {
        Self {
            skip: Some(skip),
            limit: Some(limit),
        }
    }

    /// Get the skip, defaulting to 0
    pub fn skip(&self) -> u32 {
        self.skip.unwrap_or(0)
    }

    /// Get the limit, defaulting to 50, capped at 200
    pub fn limit(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }

    /// Query pairs in the order the backend documents them
    pub fn query_pairs(&self) -> [(&'static str, String); 2] {
        [
            ("skip", self.skip().to_string()),
            ("limit", self.limit().to_string()),
        ]
    }
}

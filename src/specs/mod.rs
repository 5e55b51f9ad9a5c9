// src/specs/mod.rs
//! # Endpoint "specs"
//!
//! One module per remote endpoint. Each spec knows *how to ask* (path, query,
//! headers, body) and *how to read the answer* (where the useful data lives in the
//! JSON payload). Nothing here decides when to call, how many calls run at once, or
//! what happens to the rows afterwards. That is `scrape`'s job.
//!
//! ## Current specs
//! - `inbox`: `POST /bugs.json`, turns an inbox + date range into report ids.
//! - `timeline`: `POST /graphql`, turns one report id into activity rows; also reads
//!   report metadata with a second template.
//!
//! ## Conventions
//! - Payload walking is **tolerant**: a missing branch yields an empty list or
//!   `"N/A"`, never an error. Only the HTTP status and GraphQL `errors` fail a call.
//! - Extraction functions are pure over `serde_json::Value` so they can be tested
//!   offline against captured payloads.
use std::fmt;

pub mod inbox;
pub mod timeline;

/// Report id as the site hands it out. Kept as text; never parsed.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// One timeline event of one report.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActivityRecord {
    pub item_id: String,
    pub action_type: String,
    pub actor: String,
    pub created_at: String,
    /// `None` when the activity carries no `internal` flag at all.
    pub internal: Option<bool>,
}

// src/config/consts.rs
use std::time::Duration;

// Net config
pub const DEFAULT_BASE_URL: &str = "https://hackerone.com";
pub const INBOX_PATH: &str = "/bugs.json";
pub const GRAPHQL_PATH: &str = "/graphql";
pub const TOKEN_PAGE_PATH: &str = "/bugs";
pub const USER_AGENT: &str = concat!("inbox_scrape/", env!("CARGO_PKG_VERSION"));
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// Inbox listing. One page only; anything past PAGE_LIMIT is not returned.
pub const PAGE_LIMIT: u32 = 1000;
pub const PAGE_INDEX: u32 = 1;
pub const SUBSTATES: [&str; 10] = [
    "new",
    "informative",
    "pending-program-review",
    "needs-more-info",
    "triaged",
    "retesting",
    "duplicate",
    "not-applicable",
    "resolved",
    "spam",
];

// Token
pub const CSRF_META_NAME: &str = "csrf-token";
pub const TOKEN_POLL_INTERVAL: Duration = Duration::from_millis(100);
pub const TOKEN_WAIT: Duration = Duration::from_millis(7000);

// Concurrency
pub const DEFAULT_BATCH_SIZE: usize = 5;
pub const BATCH_PAUSE: Duration = Duration::from_millis(120); // be polite

// Template placeholders, both spellings accepted
pub const ID_PLACEHOLDERS: [&str; 2] = ["[report_id]", "[reportId]"];

// Export
pub const DEFAULT_OUT_DIR: &str = "out";
pub const CSV_MIME: &str = "text/csv;charset=utf-8";
pub const NOT_AVAILABLE: &str = "N/A";

// Trigger message
pub const FETCH_MESSAGE_TYPE: &str = "FETCH_REPORT_IDS_FROM_INBOX";

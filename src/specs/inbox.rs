// src/specs/inbox.rs
// Inbox listing: inbox handle + date range → report ids.

use std::collections::HashSet;

use chrono::NaiveDate;
use reqwest::header::ACCEPT;
use serde_json::Value;
use tracing::{debug, info};

use super::ItemId;
use crate::config::consts::{INBOX_PATH, PAGE_INDEX, PAGE_LIMIT, SUBSTATES};
use crate::core::Api;
use crate::error::{Result, ScrapeError};
use crate::token::{TokenSource, token_or_fail};

/// Query string for `/bugs.json`. Every known substate is listed explicitly; the
/// endpoint has no "all" value. Single page only.
pub fn inbox_query(inbox: &str, start: NaiveDate, end: NaiveDate) -> Vec<(&'static str, String)> {
    let mut q = vec![
        ("organization_inbox_handle", inbox.to_string()),
        ("view", "all".to_string()),
        ("start_date", start.format("%Y-%m-%d").to_string()),
        ("end_date", end.format("%Y-%m-%d").to_string()),
        ("sort_direction", "descending".to_string()),
        ("sort_type", "latest_activity".to_string()),
        ("limit", PAGE_LIMIT.to_string()),
        ("page", PAGE_INDEX.to_string()),
        ("subject", "user".to_string()),
        ("report_id", "0".to_string()),
        ("text_query", String::new()),
    ];
    q.extend(SUBSTATES.iter().map(|s| ("substates[]", s.to_string())));
    q
}

/// Ids from a `{ "bugs": [ { "id": … } ] }` payload, falsy ids dropped,
/// first occurrence wins.
pub fn extract_ids(payload: &Value) -> Vec<ItemId> {
    let Some(bugs) = payload.get("bugs").and_then(Value::as_array) else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    bugs.iter()
        .filter_map(|bug| bug.get("id").and_then(id_text))
        .filter(|id| seen.insert(id.clone()))
        .map(ItemId::new)
        .collect()
}

/// Text form of an id value; `None` for null/false/0/"".
fn id_text(v: &Value) -> Option<String> {
    match v {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                (i != 0).then(|| i.to_string())
            } else if let Some(u) = n.as_u64() {
                Some(u.to_string())
            } else {
                let f = n.as_f64()?;
                if f == 0.0 || f.is_nan() {
                    None
                } else if f.fract() == 0.0 && f.abs() < 1e15 {
                    Some(format!("{}", f as i64))
                } else {
                    Some(f.to_string())
                }
            }
        }
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

/// Resolve an inbox + date range into the distinct report ids it lists.
/// Needs the token to be present already; does not wait for it.
pub async fn discover_ids<S: TokenSource + ?Sized>(
    api: &Api,
    tokens: &S,
    inbox: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<ItemId>> {
    let csrf = token_or_fail(tokens)?;

    info!(inbox, %start, %end, "Fetching inbox report ids");
    let resp = api
        .post(INBOX_PATH)
        .query(&inbox_query(inbox, start, end))
        .header(ACCEPT, "application/json")
        .header("X-CSRF-Token", csrf)
        .send()
        .await?;

    let status = resp.status();
    if !status.is_success() {
        return Err(ScrapeError::DiscoveryHttp { status: status.as_u16() });
    }

    let payload: Value = resp.json().await?;
    let ids = extract_ids(&payload);
    debug!(count = ids.len(), "Inbox listing parsed");
    Ok(ids)
}

// src/specs/timeline.rs
// GraphQL report queries: timeline activities (exported) and metadata (not exported).

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde_json::Value;
use tracing::debug;

use super::{ActivityRecord, ItemId};
use crate::config::consts::{GRAPHQL_PATH, ID_PLACEHOLDERS, NOT_AVAILABLE};
use crate::core::Api;
use crate::error::{Result, ScrapeError};

/// Report fields from the metadata query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportMetadata {
    pub status: String,
    pub researcher: String,
    pub title: String,
    pub program_name: String,
}

/// Substitute the report id for every placeholder in `template`.
pub fn fill_template(template: &str, id: &ItemId) -> String {
    ID_PLACEHOLDERS
        .iter()
        .fold(template.to_string(), |body, ph| body.replace(ph, id.as_str()))
}

/// `errors` counts when it is truthy: `null`, `false`, `0` and `""` mean none.
fn has_errors(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// POST a prepared body to `/graphql`. Fails on non-2xx or on a GraphQL `errors`
/// member; the first error message wins over the status code.
pub async fn post_graphql(api: &Api, body: String, csrf: &str) -> Result<Value> {
    let resp = api
        .post(GRAPHQL_PATH)
        .header(CONTENT_TYPE, "application/json")
        .header(ACCEPT, "application/json")
        .header("X-Csrf-Token", csrf)
        .body(body)
        .send()
        .await?;

    let status = resp.status();
    // Unparseable bodies count as `{}`
    let json: Value = resp.json().await.unwrap_or_else(|_| Value::Object(Default::default()));
    let errors = json.get("errors").filter(|e| has_errors(e));

    if !status.is_success() || errors.is_some() {
        let message = errors
            .and_then(|e| e.pointer("/0/message"))
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("GraphQL status {}", status.as_u16()));
        debug!(status = status.as_u16(), errors = ?errors, "GraphQL call failed");
        return Err(ScrapeError::Query(message));
    }
    Ok(json)
}

fn text_or_na(v: Option<&Value>) -> String {
    v.and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .unwrap_or(NOT_AVAILABLE)
        .to_string()
}

/// Flatten `data.reports.nodes[0].activities.edges[*].node` into records.
/// Any missing step means no activities.
pub fn extract_activities(payload: &Value, id: &ItemId) -> Vec<ActivityRecord> {
    let Some(edges) = payload
        .pointer("/data/reports/nodes/0/activities/edges")
        .and_then(Value::as_array)
    else {
        return Vec::new();
    };

    edges
        .iter()
        .map(|edge| {
            let node = edge.get("node");
            let field = |name: &str| node.and_then(|n| n.get(name));
            ActivityRecord {
                item_id: id.to_string(),
                action_type: text_or_na(field("type")),
                actor: text_or_na(node.and_then(|n| n.pointer("/actor/username"))),
                created_at: text_or_na(field("created_at")),
                internal: field("internal").and_then(Value::as_bool),
            }
        })
        .collect()
}

/// Read `data.reports.edges[0].node` of a metadata response.
pub fn extract_metadata(payload: &Value) -> ReportMetadata {
    let node = payload.pointer("/data/reports/edges/0/node");
    let at = |ptr: &str| node.and_then(|n| n.pointer(ptr));
    ReportMetadata {
        status: text_or_na(at("/substate")),
        researcher: text_or_na(at("/reporter/username")),
        title: text_or_na(at("/title")),
        program_name: text_or_na(at("/team/name")),
    }
}

/// All timeline activities of one report.
pub async fn fetch_timeline(
    api: &Api,
    id: &ItemId,
    csrf: &str,
    template: &str,
) -> Result<Vec<ActivityRecord>> {
    let json = post_graphql(api, fill_template(template, id), csrf).await?;
    Ok(extract_activities(&json, id))
}

/// Metadata of one report. The pipeline does not merge this into the export.
pub async fn fetch_metadata(
    api: &Api,
    id: &ItemId,
    csrf: &str,
    template: &str,
) -> Result<ReportMetadata> {
    let json = post_graphql(api, fill_template(template, id), csrf).await?;
    Ok(extract_metadata(&json))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn both_placeholder_spellings_are_filled() {
        let t = r#"{"a":"[report_id]","b":"[reportId]","c":"[report_id]"}"#;
        assert_eq!(fill_template(t, &ItemId::new("42")), r#"{"a":"42","b":"42","c":"42"}"#);
    }

    #[test]
    fn activities_are_flattened_with_defaults() {
        let payload = json!({ "data": { "reports": { "nodes": [ { "activities": { "edges": [
            { "node": { "type": "ActivitiesComment", "actor": { "username": "alice" },
                        "created_at": "2024-01-02T03:04:05Z", "internal": true } },
            { "node": { "type": "ActivitiesBugTriaged", "actor": null, "created_at": "" } },
            { "node": null }
        ] } } ] } } });
        let recs = extract_activities(&payload, &ItemId::new("9"));
        assert_eq!(recs.len(), 3);
        assert_eq!(recs[0].item_id, "9");
        assert_eq!(recs[0].actor, "alice");
        assert_eq!(recs[0].internal, Some(true));
        assert_eq!(recs[1].actor, "N/A");
        assert_eq!(recs[1].created_at, "N/A");
        assert_eq!(recs[1].internal, None);
        assert_eq!(recs[2].action_type, "N/A");
    }

    #[test]
    fn falsy_errors_member_is_no_error() {
        for v in [json!(null), json!(false), json!(0), json!("")] {
            assert!(!has_errors(&v), "{v}");
        }
        for v in [json!([]), json!({}), json!(true), json!("boom"), json!([{ "message": "x" }])] {
            assert!(has_errors(&v), "{v}");
        }
    }

    #[test]
    fn missing_path_is_empty() {
        let id = ItemId::new("1");
        assert!(extract_activities(&json!({}), &id).is_empty());
        assert!(extract_activities(&json!({ "data": { "reports": { "nodes": [] } } }), &id).is_empty());
        assert!(extract_activities(&json!({ "data": { "reports": { "nodes": [ {} ] } } }), &id).is_empty());
    }

    #[test]
    fn metadata_defaults_to_na() {
        let payload = json!({ "data": { "reports": { "edges": [ { "node": {
            "substate": "triaged", "title": "XSS", "team": { "name": "Acme" } } } ] } } });
        let m = extract_metadata(&payload);
        assert_eq!(m.status, "triaged");
        assert_eq!(m.researcher, "N/A");
        assert_eq!(m.title, "XSS");
        assert_eq!(m.program_name, "Acme");
        assert_eq!(extract_metadata(&json!(null)).title, "N/A");
    }
}

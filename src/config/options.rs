// src/config/options.rs
use std::time::Duration;

use chrono::NaiveDate;
use serde::Deserialize;

use super::consts::*;
use crate::error::{Result, ScrapeError};

/// Where and how to talk to the remote site.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiOptions {
    pub base_url: String,
    /// Raw `Cookie` header carrying the logged-in session.
    pub cookie: Option<String>,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for ApiOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            cookie: None,
            timeout: REQUEST_TIMEOUT,
            user_agent: USER_AGENT.to_string(),
        }
    }
}

impl ApiOptions {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_cookie(mut self, cookie: Option<String>) -> Self {
        self.cookie = cookie.filter(|c| !c.trim().is_empty());
        self
    }
}

/// GraphQL request bodies with an id placeholder.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Templates {
    /// Report metadata query. Carried along but not part of the CSV.
    pub metadata: String,
    pub timeline: String,
}

/// One scrape: which inbox, which dates, how many reports in flight at once.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrapeRequest {
    pub inbox: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub batch_size: usize,
    pub templates: Templates,
}

impl ScrapeRequest {
    pub fn new(inbox: impl Into<String>, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            inbox: inbox.into(),
            start_date,
            end_date,
            batch_size: DEFAULT_BATCH_SIZE,
            templates: Templates::default(),
        }
    }

    /// `None` and `0` both fall back to the default batch size.
    pub fn with_batch_size(mut self, batch_size: Option<usize>) -> Self {
        self.batch_size = match batch_size {
            Some(n) if n > 0 => n,
            _ => DEFAULT_BATCH_SIZE,
        };
        self
    }

    pub fn with_templates(mut self, templates: Templates) -> Self {
        self.templates = templates;
        self
    }
}

/// Dates travel as `YYYY-MM-DD` everywhere.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| ScrapeError::InvalidDate(s.to_string()))
}

/// The trigger payload as the extension popup sends it.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerMessage {
    #[serde(rename = "type")]
    pub kind: String,
    pub inbox: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub batch_size: Option<usize>,
    #[serde(default)]
    pub metadata_template: String,
    pub timeline_template: String,
}

impl TriggerMessage {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn into_request(self) -> Result<ScrapeRequest> {
        if self.kind != FETCH_MESSAGE_TYPE {
            return Err(ScrapeError::UnexpectedMessage(self.kind));
        }
        let start = parse_date(&self.start_date)?;
        let end = parse_date(&self.end_date)?;

        Ok(ScrapeRequest::new(self.inbox, start, end)
            .with_batch_size(self.batch_size)
            .with_templates(Templates {
                metadata: self.metadata_template,
                timeline: self.timeline_template,
            }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trigger_message_defaults_batch_size() {
        let msg = r#"{
            "type": "FETCH_REPORT_IDS_FROM_INBOX",
            "inbox": "acme",
            "startDate": "2024-01-01",
            "endDate": "2024-02-01",
            "metadataTemplate": "{}",
            "timelineTemplate": "{\"id\":\"[report_id]\"}"
        }"#;
        let req = TriggerMessage::from_json(msg).unwrap().into_request().unwrap();
        assert_eq!(req.inbox, "acme");
        assert_eq!(req.batch_size, DEFAULT_BATCH_SIZE);
        assert_eq!(req.start_date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(req.templates.timeline, r#"{"id":"[report_id]"}"#);
    }

    #[test]
    fn zero_batch_size_falls_back() {
        let d = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(ScrapeRequest::new("x", d, d).with_batch_size(Some(0)).batch_size, DEFAULT_BATCH_SIZE);
        assert_eq!(ScrapeRequest::new("x", d, d).with_batch_size(Some(3)).batch_size, 3);
    }

    #[test]
    fn other_message_types_are_rejected() {
        let msg = r#"{"type":"BEGIN_SCRAPE_FROM_INBOX","inbox":"a","startDate":"2024-01-01",
                      "endDate":"2024-01-02","timelineTemplate":""}"#;
        let err = TriggerMessage::from_json(msg).unwrap().into_request().unwrap_err();
        assert!(matches!(err, ScrapeError::UnexpectedMessage(t) if t == "BEGIN_SCRAPE_FROM_INBOX"));
    }

    #[test]
    fn bad_dates_are_rejected() {
        assert!(matches!(parse_date("01/02/2024"), Err(ScrapeError::InvalidDate(_))));
        assert!(parse_date(" 2024-03-09 ").is_ok());
    }
}

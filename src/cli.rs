// src/cli.rs
// Command-line host: stands in for the extension popup (flags or a trigger
// message) and for the page (CSRF token from markup or from the environment).

use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::NaiveDate;
use clap::{ArgAction, Parser};
use tracing::warn;

use crate::config::consts::{DEFAULT_BASE_URL, DEFAULT_OUT_DIR, TOKEN_PAGE_PATH};
use crate::config::options::{ApiOptions, ScrapeRequest, Templates, TriggerMessage, parse_date};
use crate::core::Api;
use crate::error::{Result, ScrapeError};
use crate::file::DirSink;
use crate::progress::Progress;
use crate::scrape::{self, RunSummary};
use crate::token::{MetaTag, StaticToken, TokenSource};

#[derive(Debug, Parser)]
#[command(name = "inbox_scrape", version, about = "Export HackerOne inbox report timelines to CSV")]
pub struct Args {
    /// Trigger message JSON file ("-" reads stdin). Replaces --inbox/--start/--end/templates.
    #[arg(long, value_name = "FILE")]
    pub message: Option<PathBuf>,

    /// Inbox handle to list reports from
    #[arg(long, required_unless_present = "message")]
    pub inbox: Option<String>,

    /// First day, YYYY-MM-DD
    #[arg(long, value_parser = parse_date_arg, required_unless_present = "message")]
    pub start: Option<NaiveDate>,

    /// Last day, YYYY-MM-DD
    #[arg(long, value_parser = parse_date_arg, required_unless_present = "message")]
    pub end: Option<NaiveDate>,

    /// Reports fetched concurrently per batch (default 5)
    #[arg(short = 'b', long)]
    pub batch_size: Option<usize>,

    /// GraphQL timeline query body; `[report_id]` / `[reportId]` get the id
    #[arg(long, value_name = "FILE", required_unless_present = "message")]
    pub timeline_template: Option<PathBuf>,

    /// GraphQL metadata query body (carried, not exported)
    #[arg(long, value_name = "FILE")]
    pub metadata_template: Option<PathBuf>,

    #[arg(long, env = "H1_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Session cookie header value
    #[arg(long, env = "H1_COOKIE", hide_env_values = true)]
    pub cookie: Option<String>,

    /// CSRF token; when absent it is read from the page at --token-page
    #[arg(long, env = "H1_CSRF_TOKEN", hide_env_values = true)]
    pub csrf_token: Option<String>,

    #[arg(long, default_value = TOKEN_PAGE_PATH)]
    pub token_page: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,

    #[arg(short = 'o', long, default_value = DEFAULT_OUT_DIR)]
    pub out_dir: PathBuf,

    /// Append logs to this file instead of stderr
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// -v debug, -vv trace
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

fn parse_date_arg(s: &str) -> std::result::Result<NaiveDate, String> {
    parse_date(s).map_err(|e| e.to_string())
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}

/// Turn flags (or the trigger message they point at) into a scrape request.
pub fn build_request(args: &Args) -> Result<ScrapeRequest> {
    if let Some(path) = &args.message {
        let request = TriggerMessage::from_json(&read_input(path)?)?.into_request()?;
        // An explicit flag still wins over the message's batch size
        return Ok(match args.batch_size {
            Some(n) => request.with_batch_size(Some(n)),
            None => request,
        });
    }

    let missing = |what: &str| ScrapeError::Config(format!("missing --{what}"));
    let inbox = args.inbox.clone().ok_or_else(|| missing("inbox"))?;
    let start = args.start.ok_or_else(|| missing("start"))?;
    let end = args.end.ok_or_else(|| missing("end"))?;
    let timeline = read_input(args.timeline_template.as_deref().ok_or_else(|| missing("timeline-template"))?)?;
    let metadata = match &args.metadata_template {
        Some(p) => read_input(p)?,
        None => String::new(),
    };

    Ok(ScrapeRequest::new(inbox, start, end)
        .with_batch_size(args.batch_size)
        .with_templates(Templates { metadata, timeline }))
}

pub fn api_options(args: &Args) -> ApiOptions {
    let mut opts = ApiOptions::default()
        .with_base_url(args.base_url.clone())
        .with_cookie(args.cookie.clone());
    opts.timeout = Duration::from_secs(args.timeout.max(1));
    opts
}

/// Everything one run needs, resolved up front.
pub struct Session {
    pub api: Api,
    pub tokens: Box<dyn TokenSource>,
    pub request: ScrapeRequest,
    pub sink: DirSink,
}

impl Session {
    pub async fn run(&self, progress: &mut dyn Progress) -> Result<RunSummary> {
        scrape::run(&self.api, &*self.tokens, &self.request, &self.sink, progress).await
    }
}

/// Build the request, the client and the token source.
///
/// A page that cannot be loaded is not an error here; the run then reports the
/// missing token like any page without one.
pub async fn prepare(args: &Args) -> Result<Session> {
    let request = build_request(args)?;
    let api = Api::new(&api_options(args))?;

    let tokens: Box<dyn TokenSource> = match args.csrf_token.as_deref().filter(|t| !t.trim().is_empty()) {
        Some(t) => Box::new(StaticToken::new(t)),
        None => match MetaTag::load(&api, &args.token_page).await {
            Ok(page) => Box::new(page),
            Err(e) => {
                warn!(page = %args.token_page, error = %e, "Could not load page for CSRF token");
                Box::new(StaticToken::none())
            }
        },
    };

    Ok(Session { api, tokens, request, sink: DirSink::new(&args.out_dir) })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_build_a_request() {
        let tmp = tempfile::tempdir().unwrap();
        let tpl = tmp.path().join("timeline.json");
        std::fs::write(&tpl, r#"{"query":"[report_id]"}"#).unwrap();

        let args = Args::try_parse_from([
            "inbox_scrape", "--inbox", "acme", "--start", "2024-01-01", "--end", "2024-01-31",
            "--timeline-template", tpl.to_str().unwrap(), "-b", "0",
        ])
        .unwrap();
        let req = build_request(&args).unwrap();
        assert_eq!(req.inbox, "acme");
        assert_eq!(req.batch_size, 5);
        assert_eq!(req.templates.timeline, r#"{"query":"[report_id]"}"#);
        assert!(req.templates.metadata.is_empty());
    }

    #[test]
    fn message_file_replaces_scrape_flags() {
        let tmp = tempfile::tempdir().unwrap();
        let msg = tmp.path().join("msg.json");
        std::fs::write(
            &msg,
            r#"{"type":"FETCH_REPORT_IDS_FROM_INBOX","inbox":"acme","startDate":"2024-01-01",
                "endDate":"2024-01-31","batchSize":2,"metadataTemplate":"m","timelineTemplate":"t"}"#,
        )
        .unwrap();

        let args = Args::try_parse_from(["inbox_scrape", "--message", msg.to_str().unwrap()]).unwrap();
        let req = build_request(&args).unwrap();
        assert_eq!(req.batch_size, 2);
        assert_eq!(req.templates.metadata, "m");
    }

    #[test]
    fn bad_date_flag_is_rejected() {
        let res = Args::try_parse_from([
            "inbox_scrape", "--inbox", "a", "--start", "31-01-2024", "--end", "2024-01-31",
            "--timeline-template", "t.json",
        ]);
        assert!(res.is_err());
    }
}

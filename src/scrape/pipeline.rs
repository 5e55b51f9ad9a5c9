// src/scrape/pipeline.rs
use std::path::PathBuf;
use std::time::Duration;

use tracing::{error, info};

use super::batch::run_batched;
use crate::config::consts::{BATCH_PAUSE, TOKEN_WAIT};
use crate::config::options::{ScrapeRequest, Templates};
use crate::core::Api;
use crate::csv::to_csv;
use crate::error::{Result, ScrapeError};
use crate::file::{Download, OutputSink, export_filename};
use crate::normalize::normalize;
use crate::progress::Progress;
use crate::specs::{ActivityRecord, ItemId, inbox, timeline};
use crate::token::{TokenSource, await_token};

/// What a finished run produced.
#[derive(Clone, Debug)]
pub struct RunSummary {
    pub reports: usize,
    pub rows: usize,
    pub path: PathBuf,
}

/// Fetch the timelines of `ids` in batches. The token is awaited once up front,
/// for at most `token_wait`; if it never shows up nothing is fetched.
pub async fn scrape_in_batches<S: TokenSource + ?Sized>(
    api: &Api,
    tokens: &S,
    ids: &[ItemId],
    batch_size: usize,
    templates: &Templates,
    token_wait: Duration,
    progress: &mut dyn Progress,
) -> Result<Vec<ActivityRecord>> {
    let csrf = await_token(tokens, token_wait).await?;
    let csrf = csrf.as_str();
    let template = templates.timeline.as_str();

    let rows = run_batched(
        ids,
        batch_size,
        BATCH_PAUSE,
        |id| async move { timeline::fetch_timeline(api, &id, csrf, template).await },
        progress,
    )
    .await;
    Ok(rows)
}

/// One full scrape: inbox listing → batched timelines → normalize → CSV → sink.
///
/// Status lines go to `progress`. A fatal error is reported there as
/// `Error: <message>` and returned; nothing is delivered in that case.
pub async fn run<S, O>(
    api: &Api,
    tokens: &S,
    request: &ScrapeRequest,
    sink: &O,
    progress: &mut dyn Progress,
) -> Result<RunSummary>
where
    S: TokenSource + ?Sized,
    O: OutputSink + ?Sized,
{
    let result = run_inner(api, tokens, request, sink, progress).await;
    if let Err(e) = &result {
        error!(inbox = %request.inbox, error = %e, "Inbox scrape failed");
        progress.log(&format!("Error: {e}"));
    }
    progress.finish();
    result
}

async fn run_inner<S, O>(
    api: &Api,
    tokens: &S,
    request: &ScrapeRequest,
    sink: &O,
    progress: &mut dyn Progress,
) -> Result<RunSummary>
where
    S: TokenSource + ?Sized,
    O: OutputSink + ?Sized,
{
    progress.log("Fetching reports from inbox…");
    let ids = inbox::discover_ids(
        api,
        tokens,
        &request.inbox,
        request.start_date,
        request.end_date,
    )
    .await?;

    if ids.is_empty() {
        return Err(ScrapeError::NoItemsFound);
    }

    progress.log(&format!("Found {} reports. Scraping…", ids.len()));
    progress.begin(ids.len());

    let records = scrape_in_batches(
        api,
        tokens,
        &ids,
        request.batch_size,
        &request.templates,
        TOKEN_WAIT,
        progress,
    )
    .await?;

    let rows = normalize(records);
    info!(reports = ids.len(), rows = rows.len(), "Timelines collected");

    let filename = export_filename(&request.inbox, request.start_date, request.end_date);
    let path = sink.deliver(&Download::csv(filename, to_csv(&rows)))?;
    progress.log("CSV downloaded.");

    Ok(RunSummary { reports: ids.len(), rows: rows.len(), path })
}

// src/scrape/batch.rs
use std::future::Future;
use std::time::Duration;

use futures::future::join_all;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::error::Result;
use crate::progress::Progress;
use crate::specs::{ActivityRecord, ItemId};

/// Fetch every id, `batch_size` at a time.
///
/// Batches run strictly one after another, each followed by `pause`. Inside a
/// batch all fetches are in flight together and the batch ends when the last
/// one settles. A failed fetch contributes no records and never stops the run.
///
/// Output order: batch by batch, in input order. `fetch` is called exactly once
/// per id.
pub async fn run_batched<F, Fut>(
    ids: &[ItemId],
    batch_size: usize,
    pause: Duration,
    fetch: F,
    progress: &mut dyn Progress,
) -> Vec<ActivityRecord>
where
    F: Fn(ItemId) -> Fut,
    Fut: Future<Output = Result<Vec<ActivityRecord>>>,
{
    let size = batch_size.max(1);
    let mut rows = Vec::new();

    for (n, batch) in ids.chunks(size).enumerate() {
        debug!(batch = n + 1, reports = batch.len(), "Dispatching batch");

        let settled = join_all(batch.iter().cloned().map(&fetch)).await;

        for (id, result) in batch.iter().zip(settled) {
            match result {
                Ok(mut records) => {
                    progress.item_done(id, records.len());
                    rows.append(&mut records);
                }
                Err(e) => {
                    warn!(report = %id, error = %e, "Report fetch failed, skipping");
                    progress.item_failed(id, &e.to_string());
                }
            }
        }

        sleep(pause).await;
    }

    rows
}

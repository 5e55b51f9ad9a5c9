// src/scrape/mod.rs
mod batch;
mod pipeline;

pub use batch::run_batched;
pub use pipeline::{RunSummary, run, scrape_in_batches};

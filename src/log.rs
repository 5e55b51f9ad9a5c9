// src/log.rs
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::{Result, ScrapeError};
use crate::file::ensure_directory;

fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "inbox_scrape=info",
        1 => "inbox_scrape=debug",
        _ => "inbox_scrape=trace,reqwest=debug",
    }
}

/// Install the global subscriber. `RUST_LOG` wins over `verbosity`.
/// With `log_file`, events are appended there (no ANSI) instead of stderr.
pub fn init(verbosity: u8, log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);

    let installed = match log_file {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                ensure_directory(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).try_init()
        }
        None => builder.with_writer(std::io::stderr).try_init(),
    };
    installed.map_err(|e| ScrapeError::Config(format!("logging: {e}")))
}

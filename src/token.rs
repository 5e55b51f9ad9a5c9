// src/token.rs
//! CSRF token supply.
//!
//! The site embeds its anti-forgery token in a `<meta name="csrf-token">` tag.
//! Hosts expose whatever they can see of the page through [`TokenSource`]; the
//! pipeline either takes the token as-is ([`token_or_fail`]) or waits for it to
//! show up ([`await_token`]).

use std::time::Duration;

use thiserror::Error;
use tokio::time::{Instant, sleep};
use tracing::debug;

use crate::config::consts::{CSRF_META_NAME, TOKEN_POLL_INTERVAL};
use crate::core::{Api, html};
use crate::error::{Result, ScrapeError};

/// Read-only view of the host's current token, if any.
pub trait TokenSource: Send + Sync {
    fn read(&self) -> Option<String>;
}

/// A token handed in up front (flag, env var, test).
#[derive(Clone, Debug, Default)]
pub struct StaticToken(Option<String>);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(Some(token.into()))
    }

    pub fn none() -> Self {
        Self(None)
    }
}

impl TokenSource for StaticToken {
    fn read(&self) -> Option<String> {
        self.0.clone()
    }
}

/// Token read from captured page markup.
#[derive(Clone, Debug)]
pub struct MetaTag {
    document: String,
}

impl MetaTag {
    pub fn new(document: impl Into<String>) -> Self {
        Self { document: document.into() }
    }

    /// Load a page from the site and keep its markup.
    pub async fn load(api: &Api, path: &str) -> Result<Self> {
        Ok(Self::new(api.get_text(path).await?))
    }
}

impl TokenSource for MetaTag {
    fn read(&self) -> Option<String> {
        html::meta_content(&self.document, CSRF_META_NAME)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("gave up after {0:?}")]
pub struct PollTimeout(pub Duration);

/// Run `probe` every `interval` until it yields a value or `timeout` has passed.
/// Always probes at least once, and once more after the last sleep.
pub async fn poll_with_deadline<T, F>(
    interval: Duration,
    timeout: Duration,
    mut probe: F,
) -> std::result::Result<T, PollTimeout>
where
    F: FnMut() -> Option<T>,
{
    let start = Instant::now();
    loop {
        if let Some(value) = probe() {
            return Ok(value);
        }
        if start.elapsed() >= timeout {
            return Err(PollTimeout(timeout));
        }
        sleep(interval).await;
    }
}

fn read_non_empty<S: TokenSource + ?Sized>(source: &S) -> Option<String> {
    source.read().filter(|t| !t.trim().is_empty())
}

/// The token right now, or `TokenNotFound`. No waiting.
pub fn token_or_fail<S: TokenSource + ?Sized>(source: &S) -> Result<String> {
    read_non_empty(source).ok_or(ScrapeError::TokenNotFound)
}

/// Poll `source` until a token appears, up to `timeout`.
pub async fn await_token<S: TokenSource + ?Sized>(source: &S, timeout: Duration) -> Result<String> {
    poll_with_deadline(TOKEN_POLL_INTERVAL, timeout, || read_non_empty(source))
        .await
        .map_err(|e| {
            debug!(error = %e, "CSRF token wait timed out");
            ScrapeError::TokenNotFound
        })
}

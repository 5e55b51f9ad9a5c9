// src/core/net.rs
// Shared HTTP client for every endpoint on the site.

use reqwest::{Client, RequestBuilder, header};
use tracing::debug;

use crate::config::options::ApiOptions;
use crate::error::Result;

#[derive(Clone, Debug)]
pub struct Api {
    client: Client,
    base_url: String,
    cookie: Option<String>,
}

impl Api {
    pub fn new(opts: &ApiOptions) -> Result<Self> {
        let client = Client::builder()
            .timeout(opts.timeout)
            .user_agent(opts.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            base_url: opts.base_url.trim_end_matches('/').to_string(),
            cookie: opts.cookie.clone(),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// POST with the session cookie attached. Callers add their own headers/body.
    pub fn post(&self, path: &str) -> RequestBuilder {
        let url = self.url(path);
        debug!(url = %url, "POST");
        self.with_session(self.client.post(url))
    }

    /// GET a page and return its markup. Non-2xx is an error.
    pub async fn get_text(&self, path: &str) -> Result<String> {
        let url = self.url(path);
        debug!(url = %url, "GET");
        let resp = self
            .with_session(self.client.get(url))
            .header(header::ACCEPT, "text/html")
            .send()
            .await?
            .error_for_status()?;
        Ok(resp.text().await?)
    }

    fn with_session(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.cookie {
            Some(c) => req.header(header::COOKIE, c),
            None => req,
        }
    }
}

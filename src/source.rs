use std::time::Duration;

use anyhow::Context;
use url::Url;

use crate::config::USER_AGENT;

/// Somewhere profile pages come from.
pub trait PageSource {
    /// Fetch one page of `author`'s publication list.
    ///
    /// `Ok(None)` means the server answered with something other than 200; `Err` means the
    /// request itself failed.
    fn fetch_page(
        &self,
        author: &str,
        start: usize,
        page_size: usize,
    ) -> anyhow::Result<Option<String>>;
}

/// Fetches profile pages over HTTP.
pub struct ScholarSource {
    agent: ureq::Agent,
    base: Url,
}

impl ScholarSource {
    pub fn new(base: Url) -> Self {
        let cfg = ureq::Agent::config_builder()
            .timeout_connect(Some(Duration::from_secs(5)))
            .timeout_global(Some(Duration::from_secs(30)))
            .http_status_as_error(false)
            .build();
        ScholarSource {
            agent: ureq::Agent::new_with_config(cfg),
            base,
        }
    }

    fn page_url(&self, author: &str, start: usize, page_size: usize) -> anyhow::Result<Url> {
        let mut url = self
            .base
            .join("citations")
            .with_context(|| format!("cannot build profile URL from {}", self.base))?;
        url.query_pairs_mut()
            .append_pair("user", author)
            .append_pair("cstart", &start.to_string())
            .append_pair("pagesize", &page_size.to_string());
        Ok(url)
    }
}

impl PageSource for ScholarSource {
    fn fetch_page(
        &self,
        author: &str,
        start: usize,
        page_size: usize,
    ) -> anyhow::Result<Option<String>> {
        let url = self.page_url(author, start, page_size)?;
        log::debug!("GET {url}");
        let res = self
            .agent
            .get(url.as_str())
            .header("User-Agent", USER_AGENT)
            .call()
            .with_context(|| format!("failed request for URL {url}"))?;

        let status = res.status();
        if status.as_u16() != 200 {
            log::warn!("{url} answered {status}");
            return Ok(None);
        }

        let body = res
            .into_body()
            .read_to_string()
            .with_context(|| format!("failed to read body of {url}"))?;
        Ok(Some(body))
    }
}

//! libcurl-backed `Fetch`: single GET, body buffered in memory.

use std::collections::BTreeMap;
use std::time::Duration;

use super::{Fetch, FetchError};
use crate::config::HlsdlConfig;

/// Timeouts and headers applied to every request.
#[derive(Debug, Clone)]
pub struct CurlFetcher {
    connect_timeout: Duration,
    timeout: Duration,
    low_speed_limit: u32,
    low_speed_time: Duration,
    headers: BTreeMap<String, String>,
}

impl CurlFetcher {
    pub fn new(cfg: &HlsdlConfig) -> Self {
        Self {
            connect_timeout: cfg.connect_timeout(),
            timeout: cfg.fetch_timeout(),
            low_speed_limit: cfg.low_speed_limit_bytes,
            low_speed_time: Duration::from_secs(cfg.low_speed_time_secs),
            headers: cfg.headers.clone(),
        }
    }
}

impl Default for CurlFetcher {
    fn default() -> Self {
        Self::new(&HlsdlConfig::default())
    }
}

impl Fetch for CurlFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let mut body = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        easy.connect_timeout(self.connect_timeout)?;
        // Stalled transfers fail on low speed; the hard timeout bounds everything else.
        easy.low_speed_limit(self.low_speed_limit)?;
        easy.low_speed_time(self.low_speed_time)?;
        easy.timeout(self.timeout)?;

        if !self.headers.is_empty() {
            let mut list = curl::easy::List::new();
            for (k, v) in &self.headers {
                list.append(&format!("{}: {}", k.trim(), v.trim()))?;
            }
            easy.http_headers(list)?;
        }

        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let code = easy.response_code()?;
        if !(200..300).contains(&code) {
            return Err(FetchError::Http(code));
        }
        tracing::trace!(url, bytes = body.len(), "fetched");
        Ok(body)
    }
}

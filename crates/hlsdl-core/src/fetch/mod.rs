//! The "fetch bytes from URL" capability.
//!
//! The engine only sees the `Fetch` trait; `CurlFetcher` is the production
//! implementation (one libcurl Easy handle per request).

mod curl_fetcher;

pub use curl_fetcher::CurlFetcher;

/// Error from a single fetch.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Curl reported an error (bad URL, timeout, connection, etc.).
    #[error("{0}")]
    Curl(#[from] curl::Error),
    /// Response had a non-2xx status.
    #[error("HTTP {0}")]
    Http(u32),
    /// Any other transport failure (used by non-HTTP implementations).
    #[error("{0}")]
    Unavailable(String),
}

/// Fetches the whole body at `url`.
///
/// Implementations are shared across worker threads and must not hold
/// per-request state.
pub trait Fetch: Send + Sync {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

impl<F: Fetch + ?Sized> Fetch for &F {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        (**self).fetch(url)
    }
}

impl<F: Fetch + ?Sized> Fetch for std::sync::Arc<F> {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        (**self).fetch(url)
    }
}

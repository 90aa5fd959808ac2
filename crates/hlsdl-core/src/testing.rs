//! In-memory `Fetch` used by engine tests.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use crate::fetch::{Fetch, FetchError};

/// Serves fixed bodies, fails chosen URLs, and records every request.
#[derive(Default)]
pub(crate) struct ScriptedFetch {
    bodies: HashMap<String, Vec<u8>>,
    failing: HashSet<String>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedFetch {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn serve(mut self, url: &str, body: &[u8]) -> Self {
        self.bodies.insert(url.to_string(), body.to_vec());
        self
    }

    pub(crate) fn fail(mut self, url: &str) -> Self {
        self.failing.insert(url.to_string());
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Fetch for ScriptedFetch {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        self.calls.lock().unwrap().push(url.to_string());
        if self.failing.contains(url) {
            return Err(FetchError::Http(500));
        }
        self.bodies
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::Unavailable(format!("no route for {}", url)))
    }
}

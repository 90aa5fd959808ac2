//! `info.json` metadata: the canonical playlist URL of a job.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Upstream renamed `newindex.m3u8` back to `index.m3u8`; stored URLs still use the old name.
const LEGACY_PLAYLIST_NAME: &str = "newindex.m3u8";
const PLAYLIST_NAME: &str = "index.m3u8";

/// Fields of `info.json` we consume; everything else is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistInfo {
    #[serde(rename = "_url")]
    pub url: String,
}

impl PlaylistInfo {
    /// The URL to fetch, with the legacy playlist name rewritten.
    pub fn playlist_url(&self) -> String {
        self.url.replace(LEGACY_PLAYLIST_NAME, PLAYLIST_NAME)
    }
}

/// Reads `path` and returns the rewritten playlist URL.
pub fn read_playlist_url(path: &Path) -> Result<String> {
    let data = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let info: PlaylistInfo = serde_json::from_slice(&data)
        .with_context(|| format!("invalid metadata in {}", path.display()))?;
    Ok(info.playlist_url())
}

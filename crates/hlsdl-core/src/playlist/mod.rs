//! M3U8 playlist parsing.
//!
//! Turns raw playlist text into the ordered list of references it mentions:
//! plain URI lines and `URI="..."` attributes of directive lines, in the order
//! they appear. Local filenames for those references are derived by `name`.

mod name;
mod parse;

pub use name::local_filename;
pub use parse::parse;

/// Extension that marks a reference as a nested playlist.
const PLAYLIST_EXTENSION: &str = ".m3u8";

/// One reference found in a playlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistEntry {
    /// True if the reference points at another `.m3u8` playlist.
    pub is_playlist: bool,
    /// The reference exactly as written (query string included).
    pub target: String,
}

/// Builds an entry for `reference`, classifying it by the path before any `?`.
pub fn classify(reference: &str) -> PlaylistEntry {
    let path = reference.split('?').next().unwrap_or(reference);
    PlaylistEntry {
        is_playlist: path.ends_with(PLAYLIST_EXTENSION),
        target: reference.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_plain_paths() {
        assert!(classify("low/index.m3u8").is_playlist);
        assert!(!classify("seg0.ts").is_playlist);
        assert!(!classify("index.m3u8.back").is_playlist);
    }

    #[test]
    fn classify_ignores_query_string() {
        let e = classify("https://cdn.example.com/v/index.m3u8?token=abc.ts");
        assert!(e.is_playlist);
        assert_eq!(e.target, "https://cdn.example.com/v/index.m3u8?token=abc.ts");

        let e = classify("seg1.ts?from=index.m3u8");
        assert!(!e.is_playlist);
    }

    #[test]
    fn classify_keeps_target_verbatim() {
        assert_eq!(classify("a/b/c.ts?x=1&y=2").target, "a/b/c.ts?x=1&y=2");
    }
}

//! Line-oriented extraction of references from playlist text.

use regex::Regex;
use std::sync::LazyLock;

use super::{classify, PlaylistEntry};

static URI_ATTRIBUTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"URI="([^"]+)""#).expect("URI attribute pattern is valid"));

/// Parses playlist text into its references, in source order.
///
/// Empty lines are dropped. A directive line (starting with `#`) contributes
/// its first `URI="..."` value, or nothing. Any other line is a reference as-is.
/// Text without references yields an empty list.
pub fn parse(raw: &str) -> Vec<PlaylistEntry> {
    raw.trim()
        .split('\n')
        .filter_map(|line| reference_of(line.trim()))
        .map(classify)
        .collect()
}

fn reference_of(line: &str) -> Option<&str> {
    if line.is_empty() {
        return None;
    }
    if line.starts_with('#') {
        return URI_ATTRIBUTE
            .captures(line)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str());
    }
    Some(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn targets(raw: &str) -> Vec<String> {
        parse(raw).into_iter().map(|e| e.target).collect()
    }

    #[test]
    fn directive_uris_and_plain_lines_interleave() {
        let raw = "#EXTM3U\n#EXT-X-KEY:URI=\"key0.bin\"\nseg0.ts\nseg1.ts\n";
        assert_eq!(targets(raw), vec!["key0.bin", "seg0.ts", "seg1.ts"]);
    }

    #[test]
    fn drops_empty_and_uri_less_directives() {
        let raw = "#EXTM3U\n\n#EXT-X-VERSION:3\n#EXTINF:10.0,\n  seg0.ts  \n\n#EXTINF:10.0,\nseg1.ts\n#EXT-X-ENDLIST";
        assert_eq!(targets(raw), vec!["seg0.ts", "seg1.ts"]);
    }

    #[test]
    fn crlf_line_endings() {
        let raw = "#EXTM3U\r\n#EXTINF:4,\r\nseg0.ts\r\n#EXTINF:4,\r\nseg1.ts\r\n";
        assert_eq!(targets(raw), vec!["seg0.ts", "seg1.ts"]);
    }

    #[test]
    fn first_uri_attribute_wins() {
        let raw = "#EXT-X-MEDIA:TYPE=AUDIO,URI=\"audio/index.m3u8\",NAME=\"x\"";
        let entries = parse(raw);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].target, "audio/index.m3u8");
        assert!(entries[0].is_playlist);
    }

    #[test]
    fn nested_playlist_lines_are_classified() {
        let raw = "#EXTM3U\n#EXT-X-STREAM-INF:BANDWIDTH=800000\nlow/index.m3u8?sig=1\n";
        let entries = parse(raw);
        assert_eq!(entries.len(), 1);
        assert!(entries[0].is_playlist);
        assert_eq!(entries[0].target, "low/index.m3u8?sig=1");
    }

    #[test]
    fn no_references_is_empty_not_error() {
        assert!(parse("").is_empty());
        assert!(parse("#EXTM3U\n#EXT-X-ENDLIST\n").is_empty());
        assert!(parse("  \n\n  ").is_empty());
    }

    #[test]
    fn empty_uri_attribute_is_ignored() {
        assert!(parse("#EXT-X-KEY:METHOD=NONE,URI=\"\"").is_empty());
    }
}

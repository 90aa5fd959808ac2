//! `hlsdl parse` – print the references of a local playlist.

use anyhow::{Context, Result};
use hlsdl_core::playlist::{self, PlaylistEntry};
use std::path::Path;

/// One output row: index, kind, local filename, reference. Index 0 is the
/// self-reference that fetch passes skip.
fn describe(index: usize, entry: &PlaylistEntry) -> String {
    let kind = match (index, entry.is_playlist) {
        (0, _) => "self",
        (_, true) => "playlist",
        (_, false) => "segment",
    };
    let name = match playlist::local_filename(&entry.target) {
        "" => "-",
        name => name,
    };
    format!("{:<5} {:<9} {:<24} {}", index, kind, name, entry.target)
}

pub fn run_parse(path: &Path) -> Result<()> {
    let bytes = std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let entries = playlist::parse(&String::from_utf8_lossy(&bytes));
    if entries.is_empty() {
        println!("No references in {}.", path.display());
        return Ok(());
    }
    println!("{:<5} {:<9} {:<24} {}", "#", "KIND", "FILENAME", "REFERENCE");
    for (i, e) in entries.iter().enumerate() {
        println!("{}", describe(i, e));
    }
    println!(
        "{} segment(s) to fetch",
        entries.len().saturating_sub(1)
    );
    Ok(())
}

//! Bounded worker pool over one job's entries.

use std::collections::VecDeque;
use std::path::Path;
use std::sync::{mpsc, Mutex, PoisonError};

use super::error::EntryErrorCause;
use super::store;
use crate::fetch::Fetch;
use crate::playlist::PlaylistEntry;

/// What happened to one entry.
#[derive(Debug)]
pub(super) enum EntryOutcome {
    /// Fetched and written.
    Fetched,
    /// A file already existed at the derived path; nothing was fetched.
    Present,
    /// Fetched, but an entry with the same local filename landed first.
    Duplicate,
}

pub(super) type EntryResult = Result<EntryOutcome, EntryErrorCause>;

/// Satisfies one entry: skip if present, else one fetch and a staged write.
pub(super) fn process_entry(
    dir: &Path,
    base_url: Option<&str>,
    entry: &PlaylistEntry,
    fetch: &dyn Fetch,
) -> EntryResult {
    let path = store::segment_path(dir, &entry.target)?;
    if path.exists() {
        return Ok(EntryOutcome::Present);
    }
    let address = store::fetch_address(base_url, &entry.target)?;
    if entry.is_playlist {
        tracing::debug!(reference = %entry.target, "nested playlist stored as a plain file");
    }
    let bytes = fetch.fetch(&address)?;
    match store::write_segment(&path, &bytes).map_err(EntryErrorCause::Write)? {
        store::Placement::Written => Ok(EntryOutcome::Fetched),
        store::Placement::AlreadyPresent => Ok(EntryOutcome::Duplicate),
    }
}

/// Runs `entries` on at most `max_concurrent` threads. `on_result` is called on
/// the calling thread once per entry, in completion order, with the entry's index.
pub(super) fn run_pool(
    dir: &Path,
    base_url: Option<&str>,
    entries: &[PlaylistEntry],
    fetch: &dyn Fetch,
    max_concurrent: usize,
    mut on_result: impl FnMut(usize, EntryResult),
) {
    let count = entries.len();
    if count == 0 {
        return;
    }
    let work: Mutex<VecDeque<(usize, &PlaylistEntry)>> =
        Mutex::new(entries.iter().enumerate().collect());
    let num_workers = max_concurrent.max(1).min(count);

    std::thread::scope(|scope| {
        let (tx, rx) = mpsc::channel();
        for _ in 0..num_workers {
            let work = &work;
            let tx = tx.clone();
            scope.spawn(move || loop {
                let next = work
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .pop_front();
                let Some((index, entry)) = next else {
                    break;
                };
                let res = process_entry(dir, base_url, entry, fetch);
                if tx.send((index, res)).is_err() {
                    break;
                }
            });
        }
        drop(tx);

        // Ends early only if every worker is gone (a panicking Fetch); the
        // scope then re-raises that panic.
        for (index, res) in rx {
            on_result(index, res);
        }
    });
}

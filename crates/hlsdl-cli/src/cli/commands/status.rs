//! `hlsdl status` – show status of every job directory.

use anyhow::Result;
use hlsdl_core::job_store::{self, JobListing, JobStatus, SourceKind};
use std::path::Path;

fn status_label(listing: &JobListing) -> &'static str {
    match (listing.status, listing.source) {
        (JobStatus::Complete, _) => "complete",
        (JobStatus::Pending, Some(_)) => "pending",
        (JobStatus::Pending, None) => "no-source",
    }
}

fn source_label(source: Option<SourceKind>) -> &'static str {
    match source {
        Some(SourceKind::Saved) => "saved",
        Some(SourceKind::Url) => "url",
        None => "-",
    }
}

pub fn run_status(root: &Path) -> Result<()> {
    let listing = job_store::scan(root)?;
    if listing.is_empty() {
        println!("No job directories in {}.", root.display());
        return Ok(());
    }
    println!("{:<10} {:<6} {}", "STATUS", "SOURCE", "KEY");
    for l in &listing {
        println!("{:<10} {:<6} {}", status_label(l), source_label(l.source), l.key);
    }
    Ok(())
}

//! Sequential job runner.
//!
//! Owns the discovered job list and walks it with a cursor, one job at a
//! time: resolve the playlist body, run a fetch pass, mark the job complete
//! only when the pass reports no errors. The next job never starts before the
//! current pass has drained.

mod outcome;

use anyhow::{Context, Result};

use crate::fetch::{Fetch, FetchError};
use crate::job_store::{self, Job, JobSource};
use crate::segment_fetcher::{ProgressTick, SegmentFetcher};

pub use outcome::{JobOutcome, JobResult, RunSummary};

pub struct JobRunner<F> {
    fetch: F,
    concurrency: usize,
    jobs: Vec<Job>,
    cursor: usize,
}

impl<F: Fetch> JobRunner<F> {
    pub fn new(fetch: F, concurrency: usize, jobs: Vec<Job>) -> Self {
        Self {
            fetch,
            concurrency,
            jobs,
            cursor: 0,
        }
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    /// Jobs not yet run.
    pub fn remaining(&self) -> usize {
        self.jobs.len() - self.cursor
    }

    /// Runs the job at the cursor and advances. Returns None when the queue is exhausted.
    /// Errors only if the completion marker cannot be written.
    pub fn run_next(
        &mut self,
        progress_tx: Option<&tokio::sync::mpsc::Sender<ProgressTick>>,
    ) -> Result<Option<JobOutcome>> {
        let Some(job) = self.jobs.get(self.cursor) else {
            return Ok(None);
        };
        self.cursor += 1;
        let outcome = run_job(&self.fetch, self.concurrency, job, progress_tx)?;
        Ok(Some(outcome))
    }

    /// Runs every remaining job in order.
    pub fn run_all(
        &mut self,
        progress_tx: Option<&tokio::sync::mpsc::Sender<ProgressTick>>,
    ) -> Result<RunSummary> {
        let mut summary = RunSummary::default();
        while let Some(outcome) = self.run_next(progress_tx)? {
            summary.outcomes.push(outcome);
        }
        tracing::info!(
            completed = summary.completed(),
            incomplete = summary.incomplete(),
            unavailable = summary.unavailable(),
            "run finished"
        );
        Ok(summary)
    }
}

impl<F: Fetch + 'static> JobRunner<F> {
    /// Runs every remaining job on the blocking pool. Progress ticks go to `progress_tx`.
    pub async fn run_all_blocking(
        mut self,
        progress_tx: Option<tokio::sync::mpsc::Sender<ProgressTick>>,
    ) -> Result<RunSummary> {
        tokio::task::spawn_blocking(move || self.run_all(progress_tx.as_ref()))
            .await
            .map_err(|e| anyhow::anyhow!("runner task join: {}", e))?
    }
}

/// Playlist text for `job`: fetched for URL sources, as saved otherwise.
fn playlist_body(fetch: &dyn Fetch, job: &Job) -> Result<String, FetchError> {
    match &job.source {
        JobSource::Saved(body) => Ok(body.clone()),
        JobSource::Url(url) => {
            let bytes = fetch.fetch(url)?;
            Ok(String::from_utf8_lossy(&bytes).into_owned())
        }
    }
}

fn run_job(
    fetch: &dyn Fetch,
    concurrency: usize,
    job: &Job,
    progress_tx: Option<&tokio::sync::mpsc::Sender<ProgressTick>>,
) -> Result<JobOutcome> {
    tracing::info!(key = %job.key, "job started");

    let body = match playlist_body(fetch, job) {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!(key = %job.key, "playlist unavailable: {}", e);
            return Ok(JobOutcome {
                key: job.key.clone(),
                result: JobResult::PlaylistUnavailable(e),
            });
        }
    };

    let report = SegmentFetcher::new(fetch, concurrency).run(job, &body, progress_tx);
    let result = if report.is_complete() {
        job_store::mark_complete(job)
            .with_context(|| format!("job {}: all segments present", job.key))?;
        JobResult::Complete(report)
    } else {
        for e in &report.errors {
            tracing::warn!(key = %job.key, "{}", e);
        }
        tracing::warn!(key = %job.key, failed = report.errors.len(), "job left incomplete");
        JobResult::Incomplete(report)
    };

    Ok(JobOutcome {
        key: job.key.clone(),
        result,
    })
}

//! Per-job and per-run results.

use crate::fetch::FetchError;
use crate::segment_fetcher::FetchReport;

/// How one job ended in this run.
#[derive(Debug)]
pub enum JobResult {
    /// Every entry satisfied; marker written.
    Complete(FetchReport),
    /// Some entries failed; left unmarked for the next run.
    Incomplete(FetchReport),
    /// The playlist body could not be fetched; nothing was touched.
    PlaylistUnavailable(FetchError),
}

#[derive(Debug)]
pub struct JobOutcome {
    pub key: String,
    pub result: JobResult,
}

impl JobOutcome {
    pub fn is_complete(&self) -> bool {
        matches!(self.result, JobResult::Complete(_))
    }
}

/// Outcomes of a whole run, in execution order.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub outcomes: Vec<JobOutcome>,
}

impl RunSummary {
    pub fn completed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_complete()).count()
    }

    pub fn incomplete(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.result, JobResult::Incomplete(_)))
            .count()
    }

    pub fn unavailable(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.result, JobResult::PlaylistUnavailable(_)))
            .count()
    }

    /// True when no job was left unfinished.
    pub fn all_complete(&self) -> bool {
        self.outcomes.iter().all(JobOutcome::is_complete)
    }
}

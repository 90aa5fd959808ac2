//! `hlsdl run` – discover pending jobs and download them one after another.

use anyhow::Result;
use hlsdl_core::config::HlsdlConfig;
use hlsdl_core::fetch::CurlFetcher;
use hlsdl_core::job_store;
use hlsdl_core::runner::{JobResult, JobRunner, RunSummary};
use hlsdl_core::segment_fetcher::ProgressTick;
use std::io::Write;
use std::path::Path;
use std::time::Instant;

const PROGRESS_INTERVAL_MS: u128 = 200;
const BAR_WIDTH: usize = 20;

/// `  downloading [-----     ] 5/10 50%`
fn render_progress(tick: &ProgressTick) -> String {
    let filled = ((tick.fraction() * BAR_WIDTH as f64).round() as usize).min(BAR_WIDTH);
    format!(
        "  downloading [{}{}] {}/{} {:.0}%",
        "-".repeat(filled),
        " ".repeat(BAR_WIDTH - filled),
        tick.current,
        tick.total,
        tick.fraction() * 100.0
    )
}

fn print_summary(summary: &RunSummary) {
    for o in &summary.outcomes {
        match &o.result {
            JobResult::Complete(r) => println!(
                "{}: complete ({} fetched, {} already present)",
                o.key, r.fetched_count, r.skipped_count
            ),
            JobResult::Incomplete(r) => {
                println!(
                    "{}: incomplete ({} of {} failed)",
                    o.key,
                    r.errors.len(),
                    r.total
                );
                for e in &r.errors {
                    println!("    {}", e);
                }
            }
            JobResult::PlaylistUnavailable(e) => println!("{}: playlist unavailable: {}", o.key, e),
        }
    }
}

pub async fn run_jobs(cfg: &HlsdlConfig, root: &Path, concurrency: Option<usize>) -> Result<()> {
    let jobs = job_store::discover(root)?;
    if jobs.is_empty() {
        println!("No pending jobs in {}.", root.display());
        return Ok(());
    }
    let concurrency = cfg.effective_concurrency(concurrency);
    tracing::info!(jobs = jobs.len(), concurrency, root = %root.display(), "starting run");

    let (progress_tx, mut progress_rx) = tokio::sync::mpsc::channel::<ProgressTick>(64);
    let progress_handle = tokio::spawn(async move {
        let mut last_print = Instant::now();
        let mut current_key: Option<String> = None;
        while let Some(tick) = progress_rx.recv().await {
            if current_key.as_deref() != Some(tick.key.as_str()) {
                if current_key.is_some() {
                    println!();
                }
                println!("key {}", tick.key);
                current_key = Some(tick.key.clone());
            }
            let now = Instant::now();
            if now.duration_since(last_print).as_millis() >= PROGRESS_INTERVAL_MS
                || tick.current >= tick.total
            {
                print!("\r{}", render_progress(&tick));
                let _ = std::io::stdout().flush();
                last_print = now;
            }
        }
        if current_key.is_some() {
            println!();
        }
    });

    let runner = JobRunner::new(CurlFetcher::new(cfg), concurrency, jobs);
    let summary = runner.run_all_blocking(Some(progress_tx)).await;
    let _ = progress_handle.await;
    let summary = summary?;

    print_summary(&summary);
    if !summary.all_complete() {
        anyhow::bail!(
            "{} job(s) incomplete, {} playlist(s) unavailable; rerun to resume",
            summary.incomplete(),
            summary.unavailable()
        );
    }
    tracing::info!("run completed {} job(s)", summary.completed());
    Ok(())
}

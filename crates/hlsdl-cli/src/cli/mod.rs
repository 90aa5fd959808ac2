//! CLI for the hlsdl segment downloader.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use hlsdl_core::config::{self, HlsdlConfig};
use std::path::{Path, PathBuf};

use commands::{run_completions, run_jobs, run_manpage, run_parse, run_status};

/// Top-level CLI for hlsdl.
#[derive(Debug, Parser)]
#[command(name = "hlsdl")]
#[command(about = "hlsdl: resumable HLS segment downloader", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download every pending playlist job under the root directory.
    Run {
        /// Directory with one subdirectory per job (default: config root_dir, else current dir).
        #[arg(long, value_name = "DIR")]
        root: Option<PathBuf>,
        /// Concurrent segment fetches per job (default: config concurrency).
        #[arg(long, value_name = "N")]
        concurrency: Option<usize>,
    },

    /// Show the status of every job directory.
    Status {
        /// Directory with one subdirectory per job.
        #[arg(long, value_name = "DIR")]
        root: Option<PathBuf>,
    },

    /// Print the references of a local playlist file and their local filenames.
    Parse {
        /// Path to an .m3u8 file (e.g. a saved index.m3u8.back).
        path: PathBuf,
    },

    /// Generate shell completions on stdout.
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },

    /// Print the man page (roff) on stdout.
    Manpage,
}

/// CLI flag, else config value, else current directory.
fn resolve_root(flag: Option<PathBuf>, cfg: &HlsdlConfig) -> Result<PathBuf> {
    match flag.or_else(|| cfg.root_dir.clone()) {
        Some(root) => Ok(root),
        None => Ok(std::env::current_dir()?),
    }
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Run { root, concurrency } => {
                let cfg = config::load_or_init()?;
                tracing::debug!("loaded config: {:?}", cfg);
                let root = resolve_root(root, &cfg)?;
                run_jobs(&cfg, &root, concurrency).await?;
            }
            CliCommand::Status { root } => {
                let cfg = config::load_or_init()?;
                run_status(&resolve_root(root, &cfg)?)?;
            }
            CliCommand::Parse { path } => run_parse(Path::new(&path))?,
            CliCommand::Completions { shell } => run_completions(shell),
            CliCommand::Manpage => run_manpage()?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;

//! CLI command handlers. Each command is in its own file.

mod completions;
mod parse;
mod run;
mod status;

pub use completions::{run_completions, run_manpage};
pub use parse::run_parse;
pub use run::run_jobs;
pub use status::run_status;

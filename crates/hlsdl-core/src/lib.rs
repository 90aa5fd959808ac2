pub mod config;
pub mod logging;

pub mod fetch;
pub mod job_store;
pub mod playlist;
pub mod runner;
pub mod segment_fetcher;

#[cfg(test)]
pub(crate) mod testing;

//! The probe engine: single-URL health checks with HEAD to GET method
//! escalation, and the concurrent fan-out across a site collection.
//!
//! Probes never fail as Rust errors. Every outcome, including timeouts and
//! transport failures, resolves to a [`ProbeResult`] value, so batch
//! aggregation needs no per-item recovery branch and a batch of N checks
//! always yields N results.

pub mod executor;
pub mod fanout;
pub mod types;

#[cfg(test)]
pub mod testutil;

pub use executor::ProbeExecutor;
pub use fanout::check_all;
pub use types::{ProbeMethod, ProbeResult, ProbeStatus, SiteCheckReport};

//! pinglog library exposing the probe-and-record sampling engine.
//!
//! Probes a fixed, ordered set of hosts once per sweep, converts each echo
//! outcome into a timestamped CSV record and appends it to a durable
//! results file until the configured run duration elapses.

pub mod adapters;
pub mod domain;
mod error;
pub mod fmt;
pub mod services;
pub mod sink;
pub mod stats;

pub use adapters::Probe;
pub use adapters::icmp::IcmpProbe;
pub use adapters::system_ping::SystemPingProbe;
pub use domain::sample::{ProbeOutcome, Record, RunConfig, Target, TargetRegistry};
pub use error::PinglogError;
pub use services::sampler::{RunSummary, Sampler};
pub use sink::CsvSink;

//! Probe backends and name resolution.

pub mod icmp;
pub mod resolver;
pub mod system_ping;

use std::future::Future;

use crate::domain::sample::{ProbeOutcome, Target};

/// Seam between the sampling loop and the echo mechanism.
///
/// Implementations convert every fault into [`ProbeOutcome::Failure`];
/// `probe` itself never fails and never panics. One echo per call, no
/// retries.
pub trait Probe {
    fn probe(&self, target: &Target) -> impl Future<Output = ProbeOutcome> + Send;
}

/// First non-blank line of a diagnostic, trailing terminator stripped.
///
/// Failure records must carry non-empty text, so a silent mechanism gets a
/// fixed placeholder.
pub(crate) fn first_line(text: &str) -> String {
    match text.lines().find(|l| !l.trim().is_empty()) {
        Some(l) => l.trim_end().to_string(),
        None => "probe produced no diagnostic output".to_string(),
    }
}

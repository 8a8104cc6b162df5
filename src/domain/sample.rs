use chrono::{DateTime, Local};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::PinglogError;

/// A host probed once per sweep.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Target {
    pub label: String,
    pub address: String,
}

impl Target {
    pub fn new(label: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            address: address.into(),
        }
    }

    /// Parse a `label=address` CLI target spec.
    ///
    /// A bare address is accepted and doubles as its own label.
    pub fn parse_spec(input: &str) -> Result<Self, PinglogError> {
        let s = input.trim();
        if s.is_empty() {
            return Err(PinglogError::Config("empty target spec".into()));
        }
        let (label, address) = match s.split_once('=') {
            Some((l, a)) => (l.trim(), a.trim()),
            None => (s, s),
        };
        if label.is_empty() || address.is_empty() {
            return Err(PinglogError::Config(format!(
                "invalid target spec '{input}', expected label=address"
            )));
        }
        Ok(Target::new(label, address))
    }
}

/// Ordered, non-empty set of probe targets.
///
/// Sweep order follows insertion order and is fixed for the run.
#[derive(Clone, Debug)]
pub struct TargetRegistry {
    targets: Vec<Target>,
}

impl TargetRegistry {
    pub fn new(targets: Vec<Target>) -> Result<Self, PinglogError> {
        if targets.is_empty() {
            return Err(PinglogError::Config("at least one target is required".into()));
        }
        for t in &targets {
            if t.label.is_empty() || t.address.is_empty() {
                return Err(PinglogError::Config(format!(
                    "empty label or address in target '{}={}'",
                    t.label, t.address
                )));
            }
            // labels land unquoted in the CSV, a comma would shift columns
            if t.label.contains(',') {
                return Err(PinglogError::Config(format!(
                    "label '{}' must not contain a comma",
                    t.label
                )));
            }
        }
        Ok(Self { targets })
    }

    /// The historical default pair: one well-known public host plus the
    /// conventional home router address.
    pub fn default_pair() -> Self {
        Self {
            targets: vec![
                Target::new("www.google.co.uk", "www.google.co.uk"),
                Target::new("router", "192.168.1.254"),
            ],
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Target> {
        self.targets.iter()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// Result of one echo probe against a single target.
#[derive(Clone, Debug, PartialEq)]
pub enum ProbeOutcome {
    /// Reply received; round trip time in milliseconds.
    Success { latency_ms: f64 },
    /// No usable reply; single-line diagnostic from the probe mechanism.
    Failure { detail: String },
}

/// One output row, created per probe and serialized immediately.
///
/// `latency_ms` is present exactly when `status` is `"OK"`.
#[derive(Clone, Debug)]
pub struct Record {
    pub at: DateTime<Local>,
    pub label: String,
    pub latency_ms: Option<f64>,
    pub status: String,
}

impl Record {
    pub fn new(at: DateTime<Local>, target: &Target, outcome: &ProbeOutcome) -> Self {
        match outcome {
            ProbeOutcome::Success { latency_ms } => Self {
                at,
                label: target.label.clone(),
                latency_ms: Some(*latency_ms),
                status: "OK".to_string(),
            },
            ProbeOutcome::Failure { detail } => Self {
                at,
                label: target.label.clone(),
                latency_ms: None,
                status: detail.clone(),
            },
        }
    }

    pub fn is_ok(&self) -> bool {
        self.latency_ms.is_some()
    }
}

/// Immutable configuration for one sampling run.
///
/// All durations are expressed in seconds, both here and on the CLI.
#[derive(Clone, Debug)]
pub struct RunConfig {
    pub basename: String,
    pub results_dir: PathBuf,
    pub duration: Duration,
    pub gap: Duration,
    pub timeout: Duration,
}

impl RunConfig {
    /// Validate raw CLI values and build the config.
    pub fn from_seconds(
        basename: String,
        results_dir: PathBuf,
        duration_secs: f64,
        gap_secs: f64,
        timeout_secs: f64,
    ) -> Result<Self, PinglogError> {
        if basename.trim().is_empty() {
            return Err(PinglogError::Config("output basename must not be empty".into()));
        }
        if basename.contains(['/', '\\']) {
            return Err(PinglogError::Config(format!(
                "output basename '{basename}' must not contain path separators"
            )));
        }
        for (name, value) in [("duration", duration_secs), ("gap", gap_secs)] {
            if !value.is_finite() || value < 0.0 {
                return Err(PinglogError::Config(format!(
                    "{name} must be a non-negative number of seconds, got {value}"
                )));
            }
        }
        if !timeout_secs.is_finite() || timeout_secs <= 0.0 {
            return Err(PinglogError::Config(format!(
                "timeout must be a positive number of seconds, got {timeout_secs}"
            )));
        }
        Ok(Self {
            basename,
            results_dir,
            duration: Duration::from_secs_f64(duration_secs),
            gap: Duration::from_secs_f64(gap_secs),
            timeout: Duration::from_secs_f64(timeout_secs),
        })
    }
}

use std::time::Instant;

use chrono::Local;
use console::{Term, style};
use tokio::signal;
use tracing::{instrument, warn};

use crate::adapters::Probe;
use crate::domain::sample::{ProbeOutcome, Record, RunConfig, TargetRegistry};
use crate::error::PinglogError;
use crate::fmt;
use crate::sink::CsvSink;
use crate::stats::{Stats, compute_stats};

/// Counters and latency statistics accumulated over a full run.
#[derive(Clone, Debug)]
pub struct RunSummary {
    pub sweeps: u64,
    pub sent: u64,
    pub ok: u64,
    pub failed: u64,
    /// Present when at least one probe succeeded.
    pub stats: Option<Stats>,
}

/// The sampling loop.
///
/// Owns the run configuration, the target registry, the probe backend and
/// the sink, and drives the schedule: sweep the registry in order, record
/// each outcome, sleep the configured gap, stop once the run duration has
/// elapsed. Strictly sequential; one probe and one write at a time.
pub struct Sampler<P: Probe> {
    config: RunConfig,
    registry: TargetRegistry,
    probe: P,
    sink: CsvSink,
    term: Term,
}

impl<P: Probe> Sampler<P> {
    pub fn new(
        config: RunConfig,
        registry: TargetRegistry,
        probe: P,
        sink: CsvSink,
        term: Term,
    ) -> Self {
        Self {
            config,
            registry,
            probe,
            sink,
            term,
        }
    }

    /// Run to completion and return the run's summary.
    ///
    /// The duration check runs once per full sweep, after it, so a zero
    /// duration still performs exactly one complete sweep. Ctrl-C during the
    /// inter-sweep gap drains early; the sink is closed cleanly either way.
    /// A sink write error aborts the run immediately.
    #[instrument(skip(self))]
    pub async fn run(self) -> Result<RunSummary, PinglogError> {
        let Sampler {
            config,
            registry,
            probe,
            mut sink,
            term,
        } = self;

        let started = Instant::now();
        let mut sweeps = 0u64;
        let mut sent = 0u64;
        let mut ok = 0u64;
        let mut failed = 0u64;
        let mut latencies: Vec<f64> = Vec::new();

        loop {
            for target in registry.iter() {
                let outcome = probe.probe(target).await;
                let record = Record::new(Local::now(), target, &outcome);
                sink.append(&fmt::csv::render_record(&record))?;
                term.write_line(&fmt::text::render_progress(&record)).ok();
                sent += 1;
                match &outcome {
                    ProbeOutcome::Success { latency_ms } => {
                        ok += 1;
                        latencies.push(*latency_ms);
                    }
                    ProbeOutcome::Failure { detail } => {
                        failed += 1;
                        warn!(label = %target.label, %detail, "probe failed");
                    }
                }
            }
            sweeps += 1;

            if started.elapsed() >= config.duration {
                break;
            }
            tokio::select! {
                _ = tokio::time::sleep(config.gap) => {}
                _ = signal::ctrl_c() => {
                    term.write_line(&style("Interrupted, draining").yellow().to_string())
                        .ok();
                    break;
                }
            }
        }

        // drain: no record written so far may be lost
        sink.close()?;

        let stats = if latencies.is_empty() {
            None
        } else {
            Some(compute_stats(&latencies))
        };
        Ok(RunSummary {
            sweeps,
            sent,
            ok,
            failed,
            stats,
        })
    }
}

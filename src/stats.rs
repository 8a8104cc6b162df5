#[cfg(feature = "json")]
use serde::Serialize;

/// Latency statistics over the successful probes of a run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "json", derive(Serialize))]
pub struct Stats {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub avg: f64,
}

pub fn compute_stats(samples: &[f64]) -> Stats {
    let count = samples.len();
    let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
    let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let avg = samples.iter().sum::<f64>() / count as f64;
    Stats {
        count,
        min,
        max,
        avg,
    }
}

use console::style;

use crate::domain::sample::Record;
use crate::services::sampler::RunSummary;

/// Render the per-probe progress line shown while the loop runs.
pub fn render_progress(r: &Record) -> String {
    let ts = r.at.format("%Y-%m-%d %H:%M:%S");
    match r.latency_ms {
        Some(ms) => format!(
            "[{}] {}: {}",
            ts,
            style(&r.label).green(),
            style(format!("{ms:.3} ms")).yellow()
        ),
        None => format!(
            "[{}] {}: {}",
            ts,
            style(&r.label).green(),
            style(&r.status).red()
        ),
    }
}

/// Render the end-of-run summary block.
pub fn render_summary(s: &RunSummary) -> String {
    let mut out = format!(
        "{} {} sweep/s, {} probes, {} ok, {} failed",
        style("Complete:").cyan().bold(),
        s.sweeps,
        s.sent,
        s.ok,
        s.failed
    );
    if let Some(stats) = &s.stats {
        out.push_str(&format!(
            "\n{} {:.3} ms (min: {:.3}, max: {:.3})",
            style("Avg latency:").cyan().bold(),
            stats.avg,
            stats.min,
            stats.max
        ));
    }
    out
}

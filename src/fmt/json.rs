#[cfg(feature = "json")]
use chrono::Utc;
#[cfg(feature = "json")]
use serde::Serialize;

use crate::error::PinglogError;
use crate::services::sampler::RunSummary;

#[cfg(feature = "json")]
#[derive(Serialize)]
pub struct JsonSummary {
    pub schema_version: u8,
    pub run_ts: String,
    pub sweeps: u64,
    pub probes: u64,
    pub ok: u64,
    pub failed: u64,
    pub latency_min_ms: Option<f64>,
    pub latency_max_ms: Option<f64>,
    pub latency_avg_ms: Option<f64>,
}

/// Serialize a run summary into a JSON string.
#[allow(unused_variables)]
pub fn summary_to_json(summary: &RunSummary, pretty: bool) -> Result<String, PinglogError> {
    #[cfg(feature = "json")]
    {
        let out = JsonSummary {
            schema_version: 1,
            run_ts: Utc::now().to_rfc3339(),
            sweeps: summary.sweeps,
            probes: summary.sent,
            ok: summary.ok,
            failed: summary.failed,
            latency_min_ms: summary.stats.as_ref().map(|s| s.min),
            latency_max_ms: summary.stats.as_ref().map(|s| s.max),
            latency_avg_ms: summary.stats.as_ref().map(|s| s.avg),
        };
        let text = if pretty {
            serde_json::to_string_pretty(&out).map_err(|e| PinglogError::Other(e.to_string()))?
        } else {
            serde_json::to_string(&out).map_err(|e| PinglogError::Other(e.to_string()))?
        };
        Ok(text)
    }
    #[cfg(not(feature = "json"))]
    {
        let _ = summary;
        let _ = pretty;
        Err(PinglogError::Other("json feature disabled".into()))
    }
}

use std::time::Duration;

use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

use super::{Probe, first_line};
use crate::domain::sample::{ProbeOutcome, Target};

/// Probe backend that shells out to the system `ping` utility.
///
/// One `ping -c 1` invocation per call, bounded by an explicit timeout that
/// kills the child on expiry. The reply is scraped for the `time=` marker,
/// which ties this backend to the utility's output format; prefer
/// [`super::icmp::IcmpProbe`] when raw sockets are available.
pub struct SystemPingProbe {
    timeout: Duration,
}

impl SystemPingProbe {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Probe for SystemPingProbe {
    async fn probe(&self, target: &Target) -> ProbeOutcome {
        let wait_secs = self.timeout.as_secs().max(1).to_string();
        let mut cmd = Command::new("ping");
        cmd.arg("-c")
            .arg("1")
            .arg("-W")
            .arg(&wait_secs)
            .arg(&target.address)
            .kill_on_drop(true);

        let output = match timeout(self.timeout, cmd.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                return ProbeOutcome::Failure {
                    detail: first_line(&e.to_string()),
                };
            }
            Err(_) => {
                return ProbeOutcome::Failure {
                    detail: format!("exceeded {:.0}s probe timeout", self.timeout.as_secs_f64()),
                };
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout);
        match parse_reply_ms(&stdout) {
            Some(latency_ms) => {
                debug!(label = %target.label, latency_ms, "echo reply");
                ProbeOutcome::Success { latency_ms }
            }
            None => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                let detail = if stderr.trim().is_empty() {
                    format!("no reply line from ping ({})", output.status)
                } else {
                    first_line(&stderr)
                };
                ProbeOutcome::Failure { detail }
            }
        }
    }
}

/// Extract the millisecond value from an echo reply.
///
/// Takes the text after the last `time=` marker, cut at the first
/// whitespace after the numeric value. `None` when the output carries no
/// parseable marker.
fn parse_reply_ms(stdout: &str) -> Option<f64> {
    let idx = stdout.rfind("time=")?;
    let tail = &stdout[idx + "time=".len()..];
    let value = tail.split_whitespace().next()?;
    value.parse::<f64>().ok()
}

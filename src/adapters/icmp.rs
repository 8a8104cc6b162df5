use std::net::IpAddr;
use std::time::Duration;

use surge_ping::{Client, Config, ICMP, PingIdentifier, PingSequence};
use tokio::time::timeout;
use tracing::debug;

use super::{Probe, first_line, resolver};
use crate::domain::sample::{ProbeOutcome, Target};

/// Structured ICMP echo probe.
///
/// Sends one echo request per call through a raw ICMP socket and reads the
/// reply round trip time directly, with no reply-text parsing. Needs
/// raw-socket privileges (root or `CAP_NET_RAW`); use
/// [`super::system_ping::SystemPingProbe`] where those are unavailable.
pub struct IcmpProbe {
    timeout: Duration,
}

impl IcmpProbe {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Probe for IcmpProbe {
    async fn probe(&self, target: &Target) -> ProbeOutcome {
        let ip = match resolver::resolve_ip(&target.address).await {
            Ok(ip) => ip,
            Err(e) => {
                return ProbeOutcome::Failure {
                    detail: first_line(&e.to_string()),
                };
            }
        };

        let config = match ip {
            IpAddr::V4(_) => Config::default(),
            IpAddr::V6(_) => Config::builder().kind(ICMP::V6).build(),
        };
        let client = match Client::new(&config) {
            Ok(c) => c,
            Err(e) => {
                return ProbeOutcome::Failure {
                    detail: first_line(&e.to_string()),
                };
            }
        };

        let mut pinger = client.pinger(ip, PingIdentifier(rand::random())).await;
        pinger.timeout(self.timeout);

        match timeout(self.timeout, pinger.ping(PingSequence(0), &[])).await {
            Ok(Ok((_, rtt))) => {
                let latency_ms = rtt.as_secs_f64() * 1000.0;
                debug!(label = %target.label, latency_ms, "echo reply");
                ProbeOutcome::Success { latency_ms }
            }
            Ok(Err(e)) => ProbeOutcome::Failure {
                detail: first_line(&e.to_string()),
            },
            Err(_) => ProbeOutcome::Failure {
                detail: format!("exceeded {:.0}s probe timeout", self.timeout.as_secs_f64()),
            },
        }
    }
}

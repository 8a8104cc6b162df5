use crate::domain::sample::Record;

/// Column header written once per fresh output file.
pub const HEADER: &str = "timestamp,host,milliseconds,error";

/// Render one record as a CSV line, without the trailing terminator.
///
/// Labels are validated comma-free at config time, so no quoting is applied.
/// Rendering is pure: identical records yield byte-identical lines.
pub fn render_record(r: &Record) -> String {
    let ts = r.at.format("%Y-%m-%d %H:%M:%S");
    match r.latency_ms {
        Some(ms) => format!("{},{},{:.3},{}", ts, r.label, ms, r.status),
        None => format!("{},{},,{}", ts, r.label, r.status),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sample::{ProbeOutcome, Target};
    use chrono::{Local, NaiveDateTime, TimeZone};

    fn at() -> chrono::DateTime<Local> {
        let naive: NaiveDateTime = "2025-03-01T09:30:05".parse().unwrap();
        Local.from_local_datetime(&naive).unwrap()
    }

    #[test]
    fn test_render_success() {
        let record = Record::new(
            at(),
            &Target::new("router", "192.168.1.254"),
            &ProbeOutcome::Success { latency_ms: 10.3 },
        );
        assert_eq!(
            render_record(&record),
            "2025-03-01 09:30:05,router,10.300,OK"
        );
    }

    #[test]
    fn test_render_failure_leaves_latency_empty() {
        let record = Record::new(
            at(),
            &Target::new("router", "192.168.1.254"),
            &ProbeOutcome::Failure {
                detail: "Name or service not known".into(),
            },
        );
        assert_eq!(
            render_record(&record),
            "2025-03-01 09:30:05,router,,Name or service not known"
        );
    }

    #[test]
    fn test_render_is_idempotent() {
        let record = Record::new(
            at(),
            &Target::new("bbc", "212.58.244.66"),
            &ProbeOutcome::Success { latency_ms: 21.07 },
        );
        assert_eq!(render_record(&record), render_record(&record));
    }
}

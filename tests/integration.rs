use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::NaiveDateTime;
use console::Term;

use pinglog::{
    CsvSink, Probe, ProbeOutcome, RunConfig, RunSummary, Sampler, Target, TargetRegistry,
};

/// Replays a fixed sequence of outcomes, one per probe call.
struct ScriptedProbe {
    outcomes: Mutex<VecDeque<ProbeOutcome>>,
}

impl ScriptedProbe {
    fn new(outcomes: Vec<ProbeOutcome>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into()),
        }
    }
}

impl Probe for ScriptedProbe {
    async fn probe(&self, _target: &Target) -> ProbeOutcome {
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(ProbeOutcome::Failure {
                detail: "script exhausted".into(),
            })
    }
}

/// Always replies with the same latency.
struct ConstProbe {
    latency_ms: f64,
}

impl Probe for ConstProbe {
    async fn probe(&self, _target: &Target) -> ProbeOutcome {
        ProbeOutcome::Success {
            latency_ms: self.latency_ms,
        }
    }
}

fn two_targets() -> Vec<Target> {
    vec![
        Target::new("alpha", "10.0.0.1"),
        Target::new("beta", "10.0.0.2"),
    ]
}

async fn run_sampler<P: Probe>(
    dir: &Path,
    targets: Vec<Target>,
    probe: P,
    duration_secs: f64,
    gap_secs: f64,
) -> (PathBuf, RunSummary) {
    let config =
        RunConfig::from_seconds("probe".into(), dir.to_path_buf(), duration_secs, gap_secs, 1.0)
            .expect("valid config");
    let registry = TargetRegistry::new(targets).expect("valid registry");
    let sink = CsvSink::create(&config.results_dir, &config.basename, chrono::Local::now())
        .expect("sink created");
    let path = sink.path().to_path_buf();
    let summary = Sampler::new(config, registry, probe, sink, Term::stdout())
        .run()
        .await
        .expect("run succeeds");
    (path, summary)
}

fn read_lines(path: &Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .expect("output file readable")
        .lines()
        .map(str::to_string)
        .collect()
}

/// Split a record into its four columns; the error column may itself
/// contain commas.
fn columns(line: &str) -> Vec<&str> {
    line.splitn(4, ',').collect()
}

#[tokio::test]
async fn test_zero_duration_runs_exactly_one_sweep() {
    let dir = tempfile::tempdir().unwrap();
    let probe = ScriptedProbe::new(vec![
        ProbeOutcome::Success { latency_ms: 10.0 },
        ProbeOutcome::Success { latency_ms: 20.0 },
    ]);
    let (path, summary) = run_sampler(dir.path(), two_targets(), probe, 0.0, 0.0).await;

    assert_eq!(summary.sweeps, 1);
    assert_eq!(summary.sent, 2);
    assert_eq!(summary.ok, 2);
    assert_eq!(summary.failed, 0);

    let lines = read_lines(&path);
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "timestamp,host,milliseconds,error");

    let first = columns(&lines[1]);
    assert_eq!(first[1], "alpha");
    assert_eq!(first[2], "10.000");
    assert_eq!(first[3], "OK");

    let second = columns(&lines[2]);
    assert_eq!(second[1], "beta");
    assert_eq!(second[2], "20.000");
    assert_eq!(second[3], "OK");
}

#[tokio::test]
async fn test_record_timestamps_are_second_precision() {
    let dir = tempfile::tempdir().unwrap();
    let probe = ScriptedProbe::new(vec![ProbeOutcome::Success { latency_ms: 1.0 }]);
    let (path, _) = run_sampler(
        dir.path(),
        vec![Target::new("alpha", "10.0.0.1")],
        probe,
        0.0,
        0.0,
    )
    .await;

    let lines = read_lines(&path);
    let ts = columns(&lines[1])[0];
    assert!(
        NaiveDateTime::parse_from_str(ts, "%Y-%m-%d %H:%M:%S").is_ok(),
        "unexpected timestamp '{ts}'"
    );
}

#[tokio::test]
async fn test_failing_target_records_diagnostic() {
    let dir = tempfile::tempdir().unwrap();
    let detail = "Name or service not known";
    let probe = ScriptedProbe::new(vec![
        ProbeOutcome::Success { latency_ms: 10.0 },
        ProbeOutcome::Failure {
            detail: detail.into(),
        },
    ]);
    let (path, summary) = run_sampler(dir.path(), two_targets(), probe, 0.0, 0.0).await;

    assert_eq!(summary.ok, 1);
    assert_eq!(summary.failed, 1);

    let lines = read_lines(&path);
    let failed = columns(&lines[2]);
    assert_eq!(failed[1], "beta");
    assert_eq!(failed[2], "");
    assert_eq!(failed[3], detail);
}

#[tokio::test]
async fn test_round_trip_reconstructs_outcomes() {
    let dir = tempfile::tempdir().unwrap();
    let script = vec![
        ProbeOutcome::Success { latency_ms: 10.25 },
        ProbeOutcome::Failure {
            detail: "connect: Network is unreachable".into(),
        },
    ];
    let probe = ScriptedProbe::new(script.clone());
    let (path, _) = run_sampler(dir.path(), two_targets(), probe, 0.0, 0.0).await;

    let lines = read_lines(&path);
    let decoded: Vec<ProbeOutcome> = lines[1..]
        .iter()
        .map(|line| {
            let cols = columns(line);
            if cols[3] == "OK" {
                ProbeOutcome::Success {
                    latency_ms: cols[2].parse().expect("latency parses"),
                }
            } else {
                assert_eq!(cols[2], "");
                ProbeOutcome::Failure {
                    detail: cols[3].to_string(),
                }
            }
        })
        .collect();

    assert_eq!(decoded.len(), script.len());
    for (got, want) in decoded.iter().zip(&script) {
        match (got, want) {
            (
                ProbeOutcome::Success { latency_ms: g },
                ProbeOutcome::Success { latency_ms: w },
            ) => assert!((g - w).abs() < 1e-3),
            (ProbeOutcome::Failure { detail: g }, ProbeOutcome::Failure { detail: w }) => {
                assert_eq!(g, w)
            }
            _ => panic!("outcome kind changed across the round trip"),
        }
    }
}

#[tokio::test]
async fn test_every_sweep_is_complete_and_ordered() {
    let dir = tempfile::tempdir().unwrap();
    let (path, summary) = run_sampler(
        dir.path(),
        two_targets(),
        ConstProbe { latency_ms: 5.0 },
        0.05,
        0.005,
    )
    .await;

    let lines = read_lines(&path);
    let records = &lines[1..];
    assert!(summary.sweeps >= 1);
    assert_eq!(records.len() as u64, summary.sent);
    assert_eq!(records.len() % 2, 0, "partial sweep written");
    for pair in records.chunks(2) {
        assert_eq!(columns(&pair[0])[1], "alpha");
        assert_eq!(columns(&pair[1])[1], "beta");
    }
}

#[tokio::test]
async fn test_summary_stats_cover_successes_only() {
    let dir = tempfile::tempdir().unwrap();
    let probe = ScriptedProbe::new(vec![
        ProbeOutcome::Success { latency_ms: 10.0 },
        ProbeOutcome::Failure {
            detail: "no reply".into(),
        },
        ProbeOutcome::Success { latency_ms: 30.0 },
    ]);
    let targets = vec![
        Target::new("a", "10.0.0.1"),
        Target::new("b", "10.0.0.2"),
        Target::new("c", "10.0.0.3"),
    ];
    let (_, summary) = run_sampler(dir.path(), targets, probe, 0.0, 0.0).await;

    let stats = summary.stats.expect("stats present");
    assert_eq!(stats.count, 2);
    assert_eq!(stats.min, 10.0);
    assert_eq!(stats.max, 30.0);
    assert!((stats.avg - 20.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_all_failures_leave_stats_empty() {
    let dir = tempfile::tempdir().unwrap();
    let probe = ScriptedProbe::new(vec![ProbeOutcome::Failure {
        detail: "no reply".into(),
    }]);
    let (_, summary) = run_sampler(
        dir.path(),
        vec![Target::new("a", "10.0.0.1")],
        probe,
        0.0,
        0.0,
    )
    .await;
    assert!(summary.stats.is_none());
    assert_eq!(summary.failed, 1);
}

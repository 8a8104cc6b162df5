use thiserror::Error;

/// Top-level error type for pinglog.
///
/// Probe failures are deliberately absent: a failed echo is recorded data
/// ([`crate::ProbeOutcome::Failure`]), not an error. Only faults that make
/// the run itself impossible live here.
#[derive(Error, Debug)]
pub enum PinglogError {
    /// Invalid run configuration, rejected before sampling starts.
    #[error("config: {0}")]
    Config(String),
    /// Underlying IO error. Sink writes are the usual source; losing the
    /// output file is fatal for the run.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// Other error cases.
    #[error("other: {0}")]
    Other(String),
}

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::debug;

use crate::error::PinglogError;
use crate::fmt::csv;

/// Append-only CSV sink for probe records.
///
/// The file is created (or truncated) once per run under a timestamped name
/// and every append is flushed and synced before returning, so a crash loses
/// at most the record being written. Any write error is fatal for the run.
pub struct CsvSink {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl CsvSink {
    /// Output path for a run started at `started`:
    /// `<dir>/<basename>_<YYYY-MM-DD_HH-MM-SS>.csv`.
    pub fn run_path(dir: &Path, basename: &str, started: DateTime<Local>) -> PathBuf {
        dir.join(format!(
            "{}_{}.csv",
            basename,
            started.format("%Y-%m-%d_%H-%M-%S")
        ))
    }

    /// Create the sink file and write the header line.
    pub fn create(
        dir: &Path,
        basename: &str,
        started: DateTime<Local>,
    ) -> Result<Self, PinglogError> {
        fs::create_dir_all(dir)?;
        let path = Self::run_path(dir, basename, started);
        let file = File::create(&path)?;
        debug!(path = %path.display(), "sink opened");
        let mut sink = Self {
            path,
            writer: BufWriter::new(file),
        };
        sink.append(csv::HEADER)?;
        Ok(sink)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one line and force it to durable storage.
    pub fn append(&mut self, line: &str) -> Result<(), PinglogError> {
        writeln!(self.writer, "{line}")?;
        self.writer.flush()?;
        self.writer.get_ref().sync_data()?;
        Ok(())
    }

    /// Flush and close the file.
    pub fn close(mut self) -> Result<(), PinglogError> {
        self.writer.flush()?;
        self.writer.get_ref().sync_all()?;
        Ok(())
    }
}

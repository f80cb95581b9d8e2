//! Per-host CSV log sessions.
//!
//! One session per (job, host). The CSV lives at
//! `<workdir>/<job_id>/<prefix>-<host>/gpu_usage.csv` and is append-only;
//! the header goes in exactly once, when the file is missing or empty.

use camino::{Utf8Path, Utf8PathBuf};
use std::fs::{self, OpenOptions};
use std::io::Write;
use thiserror::Error;

/// Fields requested from nvidia-smi, in CSV column order. The same
/// string serves as the file header and the `--query-gpu` argument.
pub const GPU_FIELDS: &str = "timestamp,name,pci.bus_id,driver_version,pstate,\
pcie.link.gen.max,pcie.link.gen.current,temperature.gpu,utilization.gpu,\
utilization.memory,memory.total,memory.free,memory.used";

const LOG_FILE_NAME: &str = "gpu_usage.csv";

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("log file I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Log-file handle for one host within one job.
#[derive(Debug)]
pub struct TelemetrySession {
    path: Utf8PathBuf,
}

impl TelemetrySession {
    pub fn new(workdir: &Utf8Path, job_id: &str, dir_prefix: &str, host: &str) -> Self {
        let path = workdir
            .join(job_id)
            .join(format!("{dir_prefix}-{host}"))
            .join(LOG_FILE_NAME);
        Self { path }
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Create the log directory and file, writing the header if the
    /// file is missing or still empty. Idempotent: a non-empty file is
    /// left untouched.
    pub fn ensure_initialized(&self) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let needs_header = match fs::metadata(&self.path) {
            Ok(meta) => meta.len() == 0,
            Err(_) => true,
        };

        if needs_header {
            let mut file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.path)?;
            writeln!(file, "{GPU_FIELDS}")?;
        }

        Ok(())
    }

    /// Append sample rows (one line per GPU) to the log.
    pub fn append_rows(&self, rows: &str) -> Result<(), SessionError> {
        if rows.trim().is_empty() {
            return Ok(());
        }

        let mut file = OpenOptions::new().append(true).open(&self.path)?;
        for line in rows.lines() {
            writeln!(file, "{}", line.trim_end())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn session_in(dir: &TempDir) -> TelemetrySession {
        let workdir = Utf8Path::from_path(dir.path()).unwrap();
        TelemetrySession::new(workdir, "1234", "node", "gpu01")
    }

    #[test]
    fn test_path_layout() {
        let dir = TempDir::new().unwrap();
        let session = session_in(&dir);
        assert!(session.path().as_str().ends_with("1234/node-gpu01/gpu_usage.csv"));
    }

    #[test]
    fn test_header_written_once() {
        let dir = TempDir::new().unwrap();
        let session = session_in(&dir);

        session.ensure_initialized().unwrap();
        session.ensure_initialized().unwrap();

        let content = fs::read_to_string(session.path()).unwrap();
        assert_eq!(content.matches("timestamp,name").count(), 1);
        assert!(content.starts_with(GPU_FIELDS));
    }

    #[test]
    fn test_nonempty_file_never_gets_another_header() {
        let dir = TempDir::new().unwrap();
        let session = session_in(&dir);

        session.ensure_initialized().unwrap();
        session.append_rows("2026/08/28 12:00:00.000, A100, 0:0:0.0\n").unwrap();
        session.ensure_initialized().unwrap();

        let content = fs::read_to_string(session.path()).unwrap();
        assert_eq!(content.matches("timestamp,name").count(), 1);
        assert_eq!(content.lines().count(), 2);
    }

    #[test]
    fn test_append_accumulates_rows() {
        let dir = TempDir::new().unwrap();
        let session = session_in(&dir);
        session.ensure_initialized().unwrap();

        session.append_rows("row one").unwrap();
        session.append_rows("row two\nrow three\n").unwrap();

        let content = fs::read_to_string(session.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[3], "row three");
    }

    #[test]
    fn test_append_ignores_empty_output() {
        let dir = TempDir::new().unwrap();
        let session = session_in(&dir);
        session.ensure_initialized().unwrap();

        session.append_rows("").unwrap();
        session.append_rows("   \n").unwrap();

        let content = fs::read_to_string(session.path()).unwrap();
        assert_eq!(content.lines().count(), 1);
    }
}

//! Per-file conversion outcomes.
//!
//! A failing file does not stop a batch: its error is kept in its [FileReport],
//! and the remaining files are processed.
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use log::{error, info};
use serde::Serialize;

use crate::error::Error;
use crate::filtering::Rejection;

/// Counters of a successful conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FileStats {
    /// translation units read (tmx2bitext).
    pub nb_units: u64,
    pub nb_pairs: u64,
    /// malformed lines skipped (bitext2tmx).
    pub nb_skipped: u64,
    /// discarded pairs, by reason.
    pub rejections: BTreeMap<String, u64>,
}

impl FileStats {
    pub fn reject(&mut self, rejection: Rejection) {
        *self
            .rejections
            .entry(rejection.as_str().to_string())
            .or_insert(0) += 1;
    }

    pub fn nb_rejected(&self) -> u64 {
        self.rejections.values().sum()
    }
}

#[derive(Debug)]
pub struct FileReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub outcome: Result<FileStats, Error>,
}

impl FileReport {
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }
}

#[derive(Serialize)]
struct FileEntry<'a> {
    input: &'a Path,
    output: &'a Path,
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    stats: Option<&'a FileStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<'a> From<&'a FileReport> for FileEntry<'a> {
    fn from(report: &'a FileReport) -> Self {
        Self {
            input: &report.input,
            output: &report.output,
            success: report.is_success(),
            stats: report.outcome.as_ref().ok(),
            error: report.outcome.as_ref().err().map(|e| e.to_string()),
        }
    }
}

/// Reports of a batch, in input order.
#[derive(Debug, Default)]
pub struct BatchReport {
    files: Vec<FileReport>,
}

impl BatchReport {
    pub fn new(files: Vec<FileReport>) -> Self {
        Self { files }
    }

    pub fn files(&self) -> &[FileReport] {
        &self.files
    }

    pub fn succeeded(&self) -> impl Iterator<Item = &FileReport> {
        self.files.iter().filter(|r| r.is_success())
    }

    pub fn failed(&self) -> impl Iterator<Item = &FileReport> {
        self.files.iter().filter(|r| !r.is_success())
    }

    /// `true` if every file has been converted.
    pub fn is_success(&self) -> bool {
        self.files.iter().all(FileReport::is_success)
    }

    pub fn to_json(&self) -> Result<serde_json::Value, Error> {
        let entries: Vec<FileEntry> = self.files.iter().map(FileEntry::from).collect();
        Ok(serde_json::to_value(entries)?)
    }

    /// Write the report as a JSON array at `path`.
    pub fn write_json(&self, path: &Path) -> Result<(), Error> {
        let entries: Vec<FileEntry> = self.files.iter().map(FileEntry::from).collect();
        let f = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(f, &entries)?;
        Ok(())
    }

    /// Log one line per file, then a summary.
    pub fn log_summary(&self) {
        for report in &self.files {
            match &report.outcome {
                Ok(stats) => info!(
                    "Succeed: {:?} -> {:?} ({} units, {} pairs, {} rejected, {} skipped)",
                    report.input,
                    report.output,
                    stats.nb_units,
                    stats.nb_pairs,
                    stats.nb_rejected(),
                    stats.nb_skipped
                ),
                Err(e) => error!("Failed: {:?}: {}", report.input, e),
            }
        }
        info!(
            "{} files converted, {} failed",
            self.succeeded().count(),
            self.failed().count()
        );
    }
}

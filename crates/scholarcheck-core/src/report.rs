//! Result sinks and run summaries
//!
//! The engine is the only writer to a sink and appends one row at a time.
//! The CSV sink flushes after every row, so an interrupted run leaves a
//! well-formed report holding every result written so far.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::{Classification, VerificationResult};
use crate::error::ReportError;

/// Report column order
pub const REPORT_COLUMNS: [&str; 8] = [
    "claimed_title",
    "matched_title",
    "matched_source",
    "doi",
    "confidence_score",
    "classification",
    "verification_strength",
    "reason",
];

/// Destination for verification results
pub trait ResultSink {
    fn append(&mut self, result: &VerificationResult) -> Result<(), ReportError>;

    fn finish(&mut self) -> Result<(), ReportError> {
        Ok(())
    }
}

impl ResultSink for Vec<VerificationResult> {
    fn append(&mut self, result: &VerificationResult) -> Result<(), ReportError> {
        self.push(result.clone());
        Ok(())
    }
}

/// CSV report writer
pub struct CsvReportSink<W: Write> {
    writer: csv::Writer<W>,
}

impl CsvReportSink<File> {
    /// Create (or truncate) a report file
    pub fn create(path: &Path) -> Result<Self, ReportError> {
        Self::new(File::create(path)?)
    }
}

impl<W: Write> CsvReportSink<W> {
    /// Wrap a writer and emit the header row immediately
    pub fn new(inner: W) -> Result<Self, ReportError> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(inner);
        writer.write_record(REPORT_COLUMNS)?;
        writer.flush()?;
        Ok(Self { writer })
    }

    /// Flush and hand back the underlying writer
    pub fn into_inner(self) -> Result<W, ReportError> {
        self.writer
            .into_inner()
            .map_err(|e| ReportError::Io(e.into_error()))
    }
}

impl<W: Write> ResultSink for CsvReportSink<W> {
    fn append(&mut self, result: &VerificationResult) -> Result<(), ReportError> {
        self.writer.serialize(result)?;
        self.writer.flush()?;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), ReportError> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Per-classification tally of a run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    /// Run was declared as a self-check by the profile owner
    pub self_check: bool,
    pub total: usize,
    counts: BTreeMap<Classification, usize>,
}

impl RunSummary {
    pub fn new(self_check: bool) -> Self {
        Self {
            self_check,
            ..Default::default()
        }
    }

    /// Tally an already-collected result stream
    pub fn from_results<'a>(
        self_check: bool,
        results: impl IntoIterator<Item = &'a VerificationResult>,
    ) -> Self {
        let mut summary = Self::new(self_check);
        for result in results {
            summary.record(result);
        }
        summary
    }

    pub fn record(&mut self, result: &VerificationResult) {
        self.total += 1;
        *self.counts.entry(result.classification).or_insert(0) += 1;
    }

    pub fn count(&self, classification: Classification) -> usize {
        self.counts.get(&classification).copied().unwrap_or(0)
    }

    /// Share of publications classified AUTHENTIC, in percent to one decimal
    pub fn authentic_percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let pct = self.count(Classification::Authentic) as f64 / self.total as f64 * 100.0;
        (pct * 10.0).round() / 10.0
    }
}

impl std::fmt::Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{} publications verified as AUTHENTIC ({:.1}%)",
            self.count(Classification::Authentic),
            self.total,
            self.authentic_percent()
        )?;
        if self.self_check {
            write!(f, " [self-check]")?;
        }
        Ok(())
    }
}

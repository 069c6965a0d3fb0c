//! Terminal progress reporting around a result sink

use scholarcheck_core::{ReportError, ResultSink, VerificationResult};

const TITLE_WIDTH: usize = 70;

/// Prints one progress line per result, then forwards it to `inner`
pub struct ProgressSink<S> {
    inner: S,
    total: usize,
    written: usize,
}

impl<S: ResultSink> ProgressSink<S> {
    pub fn new(inner: S, total: usize) -> Self {
        Self {
            inner,
            total,
            written: 0,
        }
    }

    pub fn written(&self) -> usize {
        self.written
    }

    pub fn line(&self, result: &VerificationResult) -> String {
        format!(
            "[{}/{}] {} -> {} ({})",
            self.written + 1,
            self.total,
            truncate(&result.claimed_title, TITLE_WIDTH),
            result.classification,
            result.confidence_score
        )
    }
}

impl<S: ResultSink> ResultSink for ProgressSink<S> {
    fn append(&mut self, result: &VerificationResult) -> Result<(), ReportError> {
        let line = self.line(result);
        self.inner.append(result)?;
        self.written += 1;
        println!("{}", line);
        Ok(())
    }

    fn finish(&mut self) -> Result<(), ReportError> {
        self.inner.finish()
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(3)).collect();
    cut.push_str("...");
    cut
}

//! Diagnostic side channel
//!
//! The public API never fails, so swallowed errors need somewhere to go. Components take an
//! injected [`DiagnosticSink`]; the default [`LogSink`] forwards to the `log` facade.

use crate::error::ContentError;
use std::fmt;

/// Where an error was swallowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Turning an untyped value into [`Content`](crate::content::Content)
    Resolve,
    /// Serializing a document to HTML
    Serialize,
    /// Walking a document for its text
    Extract,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Resolve => "resolve",
            Stage::Serialize => "serialize",
            Stage::Extract => "extract",
        };
        f.write_str(name)
    }
}

/// Receives errors that the public entry points convert into neutral results.
pub trait DiagnosticSink: Send + Sync {
    fn report(&self, stage: Stage, error: &ContentError);
}

/// Forwards diagnostics to `log::warn!`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&self, stage: Stage, error: &ContentError) {
        log::warn!("pressbox {stage} failed, using empty output: {error}");
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::Mutex;

    /// Sink that keeps every report for later assertions
    #[derive(Default)]
    pub struct RecordingSink {
        pub reports: Mutex<Vec<(Stage, String)>>,
    }

    impl RecordingSink {
        pub fn stages(&self) -> Vec<Stage> {
            self.reports
                .lock()
                .unwrap()
                .iter()
                .map(|(stage, _)| *stage)
                .collect()
        }
    }

    impl DiagnosticSink for RecordingSink {
        fn report(&self, stage: Stage, error: &ContentError) {
            self.reports
                .lock()
                .unwrap()
                .push((stage, error.to_string()));
        }
    }
}

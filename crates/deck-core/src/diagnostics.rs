//! Diagnostics reporting.
//!
//! Layout never aborts compilation; problems are reported to a sink passed in
//! by the caller instead of a process-wide logger.

use std::fmt;

/// Severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Severity {
    Debug,
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Debug => "debug",
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        f.write_str(label)
    }
}

/// A single reported problem or trace message.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    /// Slide the diagnostic belongs to, if any
    pub slide: Option<String>,
}

impl Diagnostic {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            slide: None,
        }
    }

    pub fn debug(message: impl Into<String>) -> Self {
        Self::new(Severity::Debug, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Attach the slide identifier.
    pub fn in_slide(mut self, slide: impl Into<String>) -> Self {
        self.slide = Some(slide.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.slide {
            Some(slide) => write!(f, "{} [{}]: {}", self.severity, slide, self.message),
            None => write!(f, "{}: {}", self.severity, self.message),
        }
    }
}

/// Receiver for diagnostics produced by the compiler passes.
pub trait Diagnostics {
    fn report(&mut self, diagnostic: Diagnostic);
}

impl<D: Diagnostics + ?Sized> Diagnostics for &mut D {
    fn report(&mut self, diagnostic: Diagnostic) {
        (**self).report(diagnostic);
    }
}

/// Forwards diagnostics to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl Diagnostics for LogSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        let target = "deck::layout";
        let slide = diagnostic.slide.as_deref().unwrap_or("-");
        match diagnostic.severity {
            Severity::Debug => log::debug!(target: target, "[{}] {}", slide, diagnostic.message),
            Severity::Info => log::info!(target: target, "[{}] {}", slide, diagnostic.message),
            Severity::Warning => log::warn!(target: target, "[{}] {}", slide, diagnostic.message),
            Severity::Error => log::error!(target: target, "[{}] {}", slide, diagnostic.message),
        }
    }
}

/// Stores every diagnostic it receives.
#[derive(Debug, Clone, Default)]
pub struct Collector {
    diagnostics: Vec<Diagnostic>,
}

impl Collector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Diagnostics at exactly the given severity.
    pub fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(move |d| d.severity == severity)
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.with_severity(severity).count()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

impl Diagnostics for Collector {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}

/// Sends every diagnostic to two sinks.
#[derive(Debug)]
pub struct Tee<A, B>(pub A, pub B);

impl<A: Diagnostics, B: Diagnostics> Diagnostics for Tee<A, B> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.0.report(diagnostic.clone());
        self.1.report(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collector_counts_by_severity() {
        let mut collector = Collector::new();
        collector.report(Diagnostic::warning("first"));
        collector.report(Diagnostic::error("second").in_slide("Intro"));
        collector.report(Diagnostic::warning("third"));

        assert_eq!(collector.count(Severity::Warning), 2);
        assert_eq!(collector.count(Severity::Error), 1);
        assert_eq!(collector.diagnostics()[1].slide.as_deref(), Some("Intro"));
    }

    #[test]
    fn test_tee_reports_to_both() {
        let mut tee = Tee(Collector::new(), Collector::new());
        tee.report(Diagnostic::debug("trace"));
        assert_eq!(tee.0.diagnostics().len(), 1);
        assert_eq!(tee.1.diagnostics().len(), 1);
    }

    #[test]
    fn test_diagnostic_display() {
        let d = Diagnostic::warning("move rejected").in_slide("Intro");
        assert_eq!(d.to_string(), "warning [Intro]: move rejected");
    }
}

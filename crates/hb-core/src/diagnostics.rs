//! Start-up diagnostics.
//!
//! Rule violations found while building a model are collected here instead of
//! aborting on the first one, so a single pass reports everything. Every push
//! is also emitted through `tracing`.

use core::fmt;

use crate::{HbError, HbResult, Id};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Severity {
    /// Reported; execution continues.
    Warning,
    /// Accumulated; start-up fails once all checks have run.
    Severe,
    /// Terminates the caller.
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Warning => "Warning",
            Severity::Severe => "Severe",
            Severity::Fatal => "Fatal",
        })
    }
}

/// Entity a diagnostic is attached to, so reports can be grouped.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Subject {
    pub kind: &'static str,
    pub id: Option<Id>,
    pub name: String,
}

impl Subject {
    pub fn new(kind: &'static str, id: Id, name: impl Into<String>) -> Self {
        Self {
            kind,
            id: Some(id),
            name: name.into(),
        }
    }

    pub fn named(kind: &'static str, name: impl Into<String>) -> Self {
        Self {
            kind,
            id: None,
            name: name.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diagnostic {
    pub severity: Severity,
    /// Routine or object type that raised it.
    pub context: String,
    pub message: String,
    /// Continuation lines.
    pub details: Vec<String>,
    pub subject: Option<Subject>,
}

impl Diagnostic {
    pub fn new(severity: Severity, context: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            context: context.into(),
            message: message.into(),
            details: Vec::new(),
            subject: None,
        }
    }

    pub fn with_subject(mut self, subject: Subject) -> Self {
        self.subject = Some(subject);
        self
    }

    pub fn with_detail(mut self, line: impl Into<String>) -> Self {
        self.details.push(line.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity >= Severity::Severe
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.severity, self.context, self.message)?;
        for line in &self.details {
            write!(f, "\n   ...{line}")?;
        }
        Ok(())
    }
}

/// Ordered collection of diagnostics.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        let subject = diagnostic
            .subject
            .as_ref()
            .map(|s| s.name.as_str())
            .unwrap_or("");
        match diagnostic.severity {
            Severity::Warning => tracing::warn!(
                context = %diagnostic.context,
                subject,
                "{}",
                diagnostic.message
            ),
            Severity::Severe | Severity::Fatal => tracing::error!(
                severity = %diagnostic.severity,
                context = %diagnostic.context,
                subject,
                "{}",
                diagnostic.message
            ),
        }
        self.items.push(diagnostic);
    }

    pub fn warning(&mut self, context: impl Into<String>, message: impl Into<String>) -> &mut Diagnostic {
        self.push(Diagnostic::new(Severity::Warning, context, message));
        self.last_mut()
    }

    pub fn severe(&mut self, context: impl Into<String>, message: impl Into<String>) -> &mut Diagnostic {
        self.push(Diagnostic::new(Severity::Severe, context, message));
        self.last_mut()
    }

    fn last_mut(&mut self) -> &mut Diagnostic {
        let last = self.items.len() - 1;
        &mut self.items[last]
    }

    /// Append diagnostics already logged elsewhere.
    pub fn extend(&mut self, other: Diagnostics) {
        self.items.extend(other.items);
    }

    pub fn has_errors(&self) -> bool {
        self.items.iter().any(Diagnostic::is_error)
    }

    pub fn error_count(&self) -> usize {
        self.items.iter().filter(|d| d.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.items
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.items
    }

    /// `Err(ErrorsFound)` if anything Severe or worse was collected.
    pub fn into_result(self) -> HbResult<Diagnostics> {
        match self.error_count() {
            0 => Ok(self),
            count => Err(HbError::ErrorsFound { count }),
        }
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = core::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warnings_do_not_count_as_errors() {
        let mut diags = Diagnostics::new();
        diags.warning("CheckAndSetConstructionProperties", "clamped");
        assert!(!diags.has_errors());
        assert_eq!(diags.warning_count(), 1);
        assert!(diags.into_result().is_ok());
    }

    #[test]
    fn severe_fails_into_result() {
        let mut diags = Diagnostics::new();
        diags
            .severe("CheckAndSetConstructionProperties", "bad layering")
            .details
            .push("extra".to_string());
        diags.severe("GetShadingControls", "missing blind");
        assert_eq!(diags.error_count(), 2);
        match diags.into_result() {
            Err(HbError::ErrorsFound { count }) => assert_eq!(count, 2),
            other => panic!("expected ErrorsFound, got {other:?}"),
        }
    }

    #[test]
    fn display_includes_details() {
        let d = Diagnostic::new(Severity::Severe, "ctx", "msg")
            .with_subject(Subject::new("Construction", Id::from_index(0), "WALL"))
            .with_detail("first rule");
        let text = d.to_string();
        assert!(text.starts_with("Severe: ctx: msg"), "got {text}");
        assert!(text.contains("...first rule"), "got {text}");
    }
}

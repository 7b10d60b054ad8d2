//! Where problems found during a pass end up.
//!
//! The caller picks the reporter: the command line verbs stay silent, the
//! window collects issues and shows them after the pass.

use serde::Serialize;
use std::sync::{Mutex, PoisonError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    /// One entry was skipped, the pass continued
    Warning,
    /// The pass stopped early, remaining entries untouched
    Aborted,
    /// Nothing could be enumerated
    Fatal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    pub severity: Severity,
    pub message: String,
}

impl Issue {
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    pub fn aborted(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Aborted,
            message: message.into(),
        }
    }

    pub fn fatal(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Fatal,
            message: message.into(),
        }
    }
}

pub trait Reporter {
    fn report(&self, issue: &Issue);
}

/// Drops every issue. Used for the non-interactive verbs.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentReporter;

impl Reporter for SilentReporter {
    fn report(&self, _issue: &Issue) {}
}

#[derive(Debug, Default)]
pub struct CollectingReporter {
    issues: Mutex<Vec<Issue>>,
}

impl CollectingReporter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn issues(&self) -> Vec<Issue> {
        self.issues
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn into_issues(self) -> Vec<Issue> {
        self.issues
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn count(&self, severity: Severity) -> usize {
        self.issues
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|i| i.severity == severity)
            .count()
    }
}

impl Reporter for CollectingReporter {
    fn report(&self, issue: &Issue) {
        self.issues
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(issue.clone());
    }
}

//! The outcome of a run, per definition and per instance.

use crate::planner::SyncDecision;
use crate::reconciliation::FormatChange;

#[derive(Debug, Default)]
pub struct SyncReport {
    /// Filenames dropped from the version store because the definition no longer exists.
    pub pruned: Vec<String>,
    pub definitions: Vec<DefinitionReport>,
}

#[derive(Debug)]
pub struct DefinitionReport {
    pub filename: String,
    pub outcome: DefinitionOutcome,
}

#[derive(Debug, PartialEq)]
pub enum DefinitionOutcome {
    Template,
    InvalidVersion,
    UpToDate,
    Synced {
        decision: SyncDecision,
        legs: Vec<LegReport>,
    },
}

#[derive(Debug, PartialEq)]
pub struct LegReport {
    pub instance: String,
    pub result: LegResult,
}

#[derive(Debug, PartialEq)]
pub enum LegResult {
    /// The definition's instance settings exclude this instance.
    Ineligible,
    InvalidSpecification,
    Synced {
        change: FormatChange,
        profiles_updated: usize,
    },
    Failed {
        error: String,
    },
}

impl SyncReport {
    pub fn new(pruned: Vec<String>) -> Self {
        SyncReport {
            pruned,
            definitions: Vec::new(),
        }
    }

    pub fn push(&mut self, filename: &str, outcome: DefinitionOutcome) {
        self.definitions.push(DefinitionReport {
            filename: String::from(filename),
            outcome,
        });
    }

    pub fn outcome(&self, filename: &str) -> Option<&DefinitionOutcome> {
        self.definitions
            .iter()
            .find(|d| d.filename == filename)
            .map(|d| &d.outcome)
    }

    /// Number of definitions that were pushed this run.
    pub fn synced_count(&self) -> usize {
        self.definitions
            .iter()
            .filter(|d| matches!(d.outcome, DefinitionOutcome::Synced { .. }))
            .count()
    }

    /// Number of instance legs that failed or were abandoned.
    pub fn failed_leg_count(&self) -> usize {
        self.legs()
            .filter(|l| {
                matches!(
                    l.result,
                    LegResult::Failed { .. } | LegResult::InvalidSpecification
                )
            })
            .count()
    }

    fn legs(&self) -> impl Iterator<Item = &LegReport> {
        self.definitions
            .iter()
            .filter_map(|d| match &d.outcome {
                DefinitionOutcome::Synced { legs, .. } => Some(legs),
                _ => None,
            })
            .flatten()
    }
}

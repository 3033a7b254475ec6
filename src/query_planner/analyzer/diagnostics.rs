//! Per-invocation record of what type inference did.
//!
//! Returned alongside the rewritten pattern so callers can see why a variable
//! was (or was not) typed without scraping logs.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Serialize;

use crate::pattern::{TypeLabel, VarName};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InferenceDiagnostics {
    pub branches: Vec<BranchDiagnostics>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BranchDiagnostics {
    pub branch: usize,
    /// No isa or relation constraints, so no ontology query was run.
    pub skipped: bool,
    /// Number of variable patterns in the ontology query.
    pub query_size: usize,
    pub answer_count: usize,
    pub resolved: BTreeMap<VarName, TypeLabel>,
    pub ambiguous: BTreeMap<VarName, BTreeSet<TypeLabel>>,
    pub warnings: Vec<String>,
}

impl BranchDiagnostics {
    pub fn new(branch: usize) -> Self {
        BranchDiagnostics {
            branch,
            ..Default::default()
        }
    }

    pub fn skipped(branch: usize) -> Self {
        BranchDiagnostics {
            branch,
            skipped: true,
            ..Default::default()
        }
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::warn!("TypeInference: branch {}: {}", self.branch, message);
        self.warnings.push(message);
    }
}

impl InferenceDiagnostics {
    pub fn push(&mut self, branch: BranchDiagnostics) {
        self.branches.push(branch);
    }

    pub fn resolved_count(&self) -> usize {
        self.branches.iter().map(|b| b.resolved.len()).sum()
    }

    pub fn ambiguous_count(&self) -> usize {
        self.branches.iter().map(|b| b.ambiguous.len()).sum()
    }

    pub fn skipped_count(&self) -> usize {
        self.branches.iter().filter(|b| b.skipped).count()
    }

    pub fn warnings(&self) -> impl Iterator<Item = &str> {
        self.branches
            .iter()
            .flat_map(|b| b.warnings.iter().map(String::as_str))
    }
}

impl fmt::Display for InferenceDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for branch in &self.branches {
            if branch.skipped {
                writeln!(f, "branch {}: skipped (no type constraints)", branch.branch)?;
                continue;
            }
            writeln!(
                f,
                "branch {}: {} query patterns, {} answers",
                branch.branch, branch.query_size, branch.answer_count
            )?;
            for (name, label) in &branch.resolved {
                writeln!(f, "  resolved  {} -> {}", name, label)?;
            }
            for (name, labels) in &branch.ambiguous {
                let labels: Vec<&str> = labels.iter().map(TypeLabel::as_str).collect();
                writeln!(f, "  ambiguous {} -> [{}]", name, labels.join(", "))?;
            }
            for warning in &branch.warnings {
                writeln!(f, "  warning   {}", warning)?;
            }
        }
        Ok(())
    }
}

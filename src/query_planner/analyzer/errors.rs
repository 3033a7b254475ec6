use std::fmt::Display;

use thiserror::Error;

use crate::{pattern::VarName, schema_executor::SchemaExecutionError};

/// Stage of the type inference pass an error was raised in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    ConstraintExtraction,
    SchemaExecution,
}

impl Display for Pass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Pass::ConstraintExtraction => write!(f, "ConstraintExtraction"),
            Pass::SchemaExecution => write!(f, "SchemaExecution"),
        }
    }
}

#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error(
        " {pass}: Malformed relation {relation}: role player {player} has neither a role label nor a role variable."
    )]
    MalformedRelation {
        pass: Pass,
        relation: VarName,
        player: VarName,
    },

    #[error(" {pass}: {source}.")]
    SchemaExecution {
        pass: Pass,
        #[source]
        source: SchemaExecutionError,
    },
}

impl AnalyzerError {
    pub fn pass(&self) -> Pass {
        match self {
            AnalyzerError::MalformedRelation { pass, .. }
            | AnalyzerError::SchemaExecution { pass, .. } => *pass,
        }
    }
}

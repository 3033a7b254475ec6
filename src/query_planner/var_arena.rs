//! Placeholder variable names.
//!
//! The type inference pass needs fresh variables for role labels in ontology
//! queries and for the `sub` atoms it writes back. Names are `<prefix><n>`
//! with `n` counting up from zero, skipping anything the input pattern already
//! uses, so the same input always produces the same output.

use std::collections::HashSet;

use crate::pattern::{Pattern, VarName};

#[derive(Debug, Clone)]
pub struct VarArena {
    prefix: String,
    used: HashSet<VarName>,
    next: usize,
}

impl VarArena {
    pub fn new(prefix: impl Into<String>) -> Self {
        VarArena {
            prefix: prefix.into(),
            used: HashSet::new(),
            next: 0,
        }
    }

    /// Arena that never hands out a name occurring in `pattern`.
    pub fn for_pattern(prefix: impl Into<String>, pattern: &Pattern) -> Self {
        let mut arena = VarArena::new(prefix);
        arena.reserve(pattern.var_names());
        arena
    }

    pub fn reserve(&mut self, names: impl IntoIterator<Item = VarName>) {
        self.used.extend(names);
    }

    pub fn fresh(&mut self) -> VarName {
        loop {
            let candidate = VarName::new(format!("{}{}", self.prefix, self.next));
            self.next += 1;
            if self.used.insert(candidate.clone()) {
                return candidate;
            }
        }
    }
}

//! Pattern Builders
//!
//! Small helpers for assembling patterns in code, mostly used by the rewriter
//! and by tests.
//!
//! # Example
//! ```ignore
//! use ontoplan::pattern::{and, var};
//!
//! let pattern = and(vec![
//!     var("y").isa("person").into(),
//!     var("r").rel("actor", "y").rel_var("a", "x").into(),
//! ]);
//! // { $y isa person; $r (actor: $y, $a: $x); }
//! ```

use super::{
    Conjunction, Disjunction, Literal, Pattern, Property, RolePlayer, TypeLabel, TypeRef, VarName,
    VarPattern,
};

/// Start a variable pattern with no properties.
pub fn var(name: impl Into<VarName>) -> VarPattern {
    VarPattern::new(name)
}

/// Conjunction of the given patterns.
pub fn and(patterns: Vec<Pattern>) -> Pattern {
    Pattern::Conjunction(Conjunction::new(patterns))
}

/// Disjunction of the given patterns.
pub fn or(patterns: Vec<Pattern>) -> Pattern {
    Pattern::Disjunction(Disjunction::new(patterns))
}

impl VarPattern {
    pub fn with_property(mut self, property: Property) -> Self {
        self.properties.push(property);
        self
    }

    pub fn isa(self, label: impl Into<TypeLabel>) -> Self {
        self.with_property(Property::Isa(TypeRef::Label(label.into())))
    }

    pub fn isa_var(self, name: impl Into<VarName>) -> Self {
        self.with_property(Property::Isa(TypeRef::Var(name.into())))
    }

    pub fn sub(self, label: impl Into<TypeLabel>) -> Self {
        self.with_property(Property::Sub(TypeRef::Label(label.into())))
    }

    pub fn sub_var(self, name: impl Into<VarName>) -> Self {
        self.with_property(Property::Sub(TypeRef::Var(name.into())))
    }

    pub fn label(self, label: impl Into<TypeLabel>) -> Self {
        self.with_property(Property::Label(label.into()))
    }

    pub fn plays(self, role: impl Into<TypeRef>) -> Self {
        self.with_property(Property::Plays(role.into()))
    }

    pub fn relates(self, role: impl Into<TypeRef>) -> Self {
        self.with_property(Property::Relates(role.into()))
    }

    pub fn has(self, attribute: impl Into<TypeLabel>, value: impl Into<Literal>) -> Self {
        self.with_property(Property::Has {
            attribute: attribute.into(),
            value: value.into(),
        })
    }

    /// Add a role player with a literal role label.
    pub fn rel(self, role: impl Into<TypeLabel>, player: impl Into<VarName>) -> Self {
        self.add_role_player(RolePlayer {
            role: Some(TypeRef::Label(role.into())),
            player: player.into(),
        })
    }

    /// Add a role player whose role is itself a variable.
    pub fn rel_var(self, role: impl Into<VarName>, player: impl Into<VarName>) -> Self {
        self.add_role_player(RolePlayer {
            role: Some(TypeRef::Var(role.into())),
            player: player.into(),
        })
    }

    /// Add a role player without any role reference.
    pub fn rel_player(self, player: impl Into<VarName>) -> Self {
        self.add_role_player(RolePlayer {
            role: None,
            player: player.into(),
        })
    }

    /// Role players accumulate into the single relation property of the
    /// variable.
    fn add_role_player(mut self, role_player: RolePlayer) -> Self {
        let existing = self.properties.iter_mut().find_map(|property| match property {
            Property::Relation(players) => Some(players),
            _ => None,
        });
        match existing {
            Some(players) => players.push(role_player),
            None => self.properties.push(Property::Relation(vec![role_player])),
        }
        self
    }
}

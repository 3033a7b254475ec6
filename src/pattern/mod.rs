//! # Pattern Model
//!
//! The match-pattern AST consumed and produced by the type inference engine.
//!
//! A [`Pattern`] is a boolean tree of [`VarPattern`]s. Each `VarPattern` is one
//! variable plus the properties constraining it:
//!
//! ```text
//! $y isa person;
//! $r (actor: $y, $a: $x) isa production-with-cast;
//! { $x isa movie; } or { $x isa tv-show; };
//! ```
//!
//! Properties are a closed enum. Data-level properties (`isa`, relation,
//! `has`) describe instances; schema-level properties (`label`, `sub`,
//! `plays`, `relates`) describe types and are what ontology queries are built
//! from.
//!
//! ## Module Organization
//!
//! - `combinators.rs`: `var()`, `and()`, `or()` builders
//! - `display.rs`: textual rendering of patterns
//! - `normal_form.rs`: disjunctive normal form conversion
//! - `errors.rs`: parse errors for string-encoded references

use std::fmt;

use serde::{Deserialize, Serialize};

pub mod combinators;
mod display;
pub mod errors;
pub mod normal_form;

pub use combinators::{and, or, var};
pub use normal_form::to_dnf;

use errors::PatternError;

/// Variable identifier, stored without the leading `$`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct VarName(String);

impl VarName {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        match name.strip_prefix('$') {
            Some(stripped) => VarName(stripped.to_string()),
            None => VarName(name),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for VarName {
    fn from(name: String) -> Self {
        VarName::new(name)
    }
}

impl From<&str> for VarName {
    fn from(name: &str) -> Self {
        VarName::new(name)
    }
}

impl From<VarName> for String {
    fn from(name: VarName) -> Self {
        name.0
    }
}

/// Schema type identifier (entity, relation, attribute or role label).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeLabel(String);

impl TypeLabel {
    pub fn new(label: impl Into<String>) -> Self {
        TypeLabel(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TypeLabel {
    fn from(label: &str) -> Self {
        TypeLabel::new(label)
    }
}

impl From<String> for TypeLabel {
    fn from(label: String) -> Self {
        TypeLabel(label)
    }
}

impl fmt::Display for TypeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Right-hand side of a type-level property: either a literal label or a
/// variable still to be solved.
///
/// Encoded as a single string: `"$t"` is a variable, anything else a label.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TypeRef {
    Label(TypeLabel),
    Var(VarName),
}

impl TypeRef {
    pub fn label(&self) -> Option<&TypeLabel> {
        match self {
            TypeRef::Label(label) => Some(label),
            TypeRef::Var(_) => None,
        }
    }

    pub fn var(&self) -> Option<&VarName> {
        match self {
            TypeRef::Var(name) => Some(name),
            TypeRef::Label(_) => None,
        }
    }
}

impl TryFrom<String> for TypeRef {
    type Error = PatternError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(PatternError::InvalidTypeRef { value });
        }
        match trimmed.strip_prefix('$') {
            Some("") => Err(PatternError::InvalidTypeRef { value }),
            Some(name) => Ok(TypeRef::Var(VarName::new(name))),
            None => Ok(TypeRef::Label(TypeLabel::new(trimmed))),
        }
    }
}

impl From<TypeRef> for String {
    fn from(value: TypeRef) -> Self {
        value.to_string()
    }
}

impl From<TypeLabel> for TypeRef {
    fn from(label: TypeLabel) -> Self {
        TypeRef::Label(label)
    }
}

/// `"$a"` becomes a variable, anything else a label.
impl From<&str> for TypeRef {
    fn from(value: &str) -> Self {
        match value.strip_prefix('$') {
            Some(name) if !name.is_empty() => TypeRef::Var(VarName::new(name)),
            _ => TypeRef::Label(TypeLabel::new(value)),
        }
    }
}

impl From<VarName> for TypeRef {
    fn from(name: VarName) -> Self {
        TypeRef::Var(name)
    }
}

/// Attribute value used by `has` properties. Opaque to type inference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Literal::String(value.to_string())
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Literal::Integer(value)
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Literal::Boolean(value)
    }
}

/// One role slot of a relation: `role: $player`, or just `$player` when the
/// role was left out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RolePlayer {
    #[serde(default)]
    pub role: Option<TypeRef>,
    pub player: VarName,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Property {
    /// `$x isa person` / `$x isa $t`
    Isa(TypeRef),
    /// `$t sub production`
    Sub(TypeRef),
    /// `$t label person`: the variable *is* the schema concept.
    Label(TypeLabel),
    /// `$t plays actor`
    Plays(TypeRef),
    /// `$t relates actor`
    Relates(TypeRef),
    /// `$r (actor: $y, $a: $x)`
    Relation(Vec<RolePlayer>),
    /// `$x has title "Godfather"`
    Has { attribute: TypeLabel, value: Literal },
}

/// A variable together with all properties attached to it in one place of the
/// query. This is the atomic unit of the normal form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VarPattern {
    pub name: VarName,
    #[serde(default)]
    pub properties: Vec<Property>,
}

impl VarPattern {
    pub fn new(name: impl Into<VarName>) -> Self {
        VarPattern {
            name: name.into(),
            properties: Vec::new(),
        }
    }

    /// Label of the first `isa` property whose target is a literal.
    pub fn isa_label(&self) -> Option<&TypeLabel> {
        self.properties.iter().find_map(|property| match property {
            Property::Isa(TypeRef::Label(label)) => Some(label),
            _ => None,
        })
    }

    pub fn role_players(&self) -> Option<&[RolePlayer]> {
        self.properties.iter().find_map(|property| match property {
            Property::Relation(players) => Some(players.as_slice()),
            _ => None,
        })
    }

    /// Every variable this pattern mentions, starting with its own name.
    pub fn var_names(&self) -> Vec<VarName> {
        let mut names = vec![self.name.clone()];
        for property in &self.properties {
            match property {
                Property::Isa(target)
                | Property::Sub(target)
                | Property::Plays(target)
                | Property::Relates(target) => {
                    if let TypeRef::Var(name) = target {
                        names.push(name.clone());
                    }
                }
                Property::Relation(players) => {
                    for role_player in players {
                        if let Some(TypeRef::Var(role)) = &role_player.role {
                            names.push(role.clone());
                        }
                        names.push(role_player.player.clone());
                    }
                }
                Property::Label(_) | Property::Has { .. } => {}
            }
        }
        names
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Conjunction<T> {
    pub patterns: Vec<T>,
}

impl<T> Conjunction<T> {
    pub fn new(patterns: Vec<T>) -> Self {
        Conjunction { patterns }
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.patterns.iter()
    }
}

impl<T> Default for Conjunction<T> {
    fn default() -> Self {
        Conjunction {
            patterns: Vec::new(),
        }
    }
}

impl<T> FromIterator<T> for Conjunction<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Conjunction::new(iter.into_iter().collect())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Disjunction<T> {
    pub patterns: Vec<T>,
}

impl<T> Disjunction<T> {
    pub fn new(patterns: Vec<T>) -> Self {
        Disjunction { patterns }
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.patterns.iter()
    }
}

impl<T> FromIterator<T> for Disjunction<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Disjunction::new(iter.into_iter().collect())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pattern {
    Var(VarPattern),
    Conjunction(Conjunction<Pattern>),
    Disjunction(Disjunction<Pattern>),
}

impl Pattern {
    /// Distinct variable names in order of first appearance.
    pub fn var_names(&self) -> Vec<VarName> {
        let mut names = Vec::new();
        self.collect_var_names(&mut names);
        names
    }

    fn collect_var_names(&self, names: &mut Vec<VarName>) {
        match self {
            Pattern::Var(var_pattern) => {
                for name in var_pattern.var_names() {
                    if !names.contains(&name) {
                        names.push(name);
                    }
                }
            }
            Pattern::Conjunction(conjunction) => {
                for pattern in conjunction.iter() {
                    pattern.collect_var_names(names);
                }
            }
            Pattern::Disjunction(disjunction) => {
                for pattern in disjunction.iter() {
                    pattern.collect_var_names(names);
                }
            }
        }
    }
}

impl From<VarPattern> for Pattern {
    fn from(var_pattern: VarPattern) -> Self {
        Pattern::Var(var_pattern)
    }
}

impl From<Conjunction<VarPattern>> for Pattern {
    fn from(conjunction: Conjunction<VarPattern>) -> Self {
        Pattern::Conjunction(conjunction.patterns.into_iter().map(Pattern::Var).collect())
    }
}

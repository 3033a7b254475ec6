use std::fmt;

use super::{Conjunction, Disjunction, Literal, Pattern, Property, RolePlayer, TypeRef, VarName, VarPattern};

impl fmt::Display for VarName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.0)
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Label(label) => write!(f, "{}", label),
            TypeRef::Var(name) => write!(f, "{}", name),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Boolean(value) => write!(f, "{}", value),
            Literal::Integer(value) => write!(f, "{}", value),
            Literal::Float(value) => write!(f, "{}", value),
            Literal::String(value) => write!(f, "{:?}", value),
        }
    }
}

impl fmt::Display for RolePlayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.role {
            Some(role) => write!(f, "{}: {}", role, self.player),
            None => write!(f, "{}", self.player),
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Property::Isa(target) => write!(f, "isa {}", target),
            Property::Sub(target) => write!(f, "sub {}", target),
            Property::Label(label) => write!(f, "label {}", label),
            Property::Plays(role) => write!(f, "plays {}", role),
            Property::Relates(role) => write!(f, "relates {}", role),
            Property::Relation(players) => {
                let players: Vec<String> = players.iter().map(|p| p.to_string()).collect();
                write!(f, "({})", players.join(", "))
            }
            Property::Has { attribute, value } => write!(f, "has {} {}", attribute, value),
        }
    }
}

/// `$r (actor: $y, $a: $x), isa production-with-cast`
impl fmt::Display for VarPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        // Relation tuple always comes right after the variable.
        let (relations, others): (Vec<&Property>, Vec<&Property>) = self
            .properties
            .iter()
            .partition(|property| matches!(property, Property::Relation(_)));
        for relation in relations {
            write!(f, " {}", relation)?;
        }
        for (i, property) in others.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, " {}", property)?;
        }
        Ok(())
    }
}

impl fmt::Display for Conjunction<VarPattern> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for pattern in self.iter() {
            write!(f, " {};", pattern)?;
        }
        write!(f, " }}")
    }
}

impl fmt::Display for Conjunction<Pattern> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for pattern in self.iter() {
            write!(f, " {}", pattern)?;
        }
        write!(f, " }}")
    }
}

impl fmt::Display for Disjunction<Pattern> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, pattern) in self.iter().enumerate() {
            if i > 0 {
                write!(f, " or ")?;
            }
            match pattern {
                Pattern::Conjunction(_) => write!(f, "{}", pattern)?,
                _ => write!(f, "{{ {} }}", pattern)?,
            }
        }
        Ok(())
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::Var(var_pattern) => write!(f, "{};", var_pattern),
            Pattern::Conjunction(conjunction) => write!(f, "{}", conjunction),
            Pattern::Disjunction(disjunction) => write!(f, "{};", disjunction),
        }
    }
}

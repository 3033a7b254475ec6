use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum PatternError {
    #[error("Invalid type reference `{value}`: expected a label or a `$variable`")]
    InvalidTypeRef { value: String },
}

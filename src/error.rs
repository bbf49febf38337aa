use thiserror::Error;

/// Failures raised while turning formula text into an [`ASTNode`](crate::ast::ASTNode).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Unknown operator/function: {0}")]
    UnknownOperator(String),

    #[error("{operator} requires {expected} arguments, got {found}")]
    ArityMismatch {
        operator: String,
        expected: String,
        found: usize,
    },

    #[error("Invalid arguments for {operator}: {reason}")]
    InvalidArguments { operator: String, reason: String },

    #[error("Cannot parse expression: {0}")]
    Malformed(String),

    #[error("Expression nesting exceeds the limit of {limit} levels")]
    NestingTooDeep { limit: usize },
}

impl ParseError {
    pub fn arity(operator: impl Into<String>, expected: impl ToString, found: usize) -> Self {
        ParseError::ArityMismatch {
            operator: operator.into(),
            expected: expected.to_string(),
            found,
        }
    }
}

/// Failures raised while evaluating a tree against a [`Context`](crate::context::Context).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvaluationError {
    #[error("Undefined variable: {0}")]
    UndefinedVariable(String),

    #[error("Division by zero")]
    DivisionByZero,

    #[error("{name} failed: {reason}")]
    FunctionFailed { name: String, reason: String },
}

/// Failures raised when a host feeds raw text into a [`Context`](crate::context::Context).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContextError {
    #[error("Variable name must not be empty")]
    EmptyName,

    #[error("Invalid number: {0}")]
    InvalidNumber(String),
}

/// Either stage failing during a one-shot parse + evaluate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormulaError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offender() {
        assert_eq!(
            ParseError::UnknownOperator("Foo".to_string()).to_string(),
            "Unknown operator/function: Foo"
        );
        assert_eq!(
            ParseError::arity("ADD", 2, 3).to_string(),
            "ADD requires 2 arguments, got 3"
        );
        assert_eq!(
            EvaluationError::UndefinedVariable("y".to_string()).to_string(),
            "Undefined variable: y"
        );
        assert_eq!(
            ParseError::Malformed("ADD(1".to_string()).to_string(),
            "Cannot parse expression: ADD(1"
        );
    }

    #[test]
    fn test_formula_error_is_transparent() {
        let err: FormulaError = EvaluationError::DivisionByZero.into();
        assert_eq!(err.to_string(), "Division by zero");
        assert!(matches!(err, FormulaError::Evaluation(_)));
    }
}

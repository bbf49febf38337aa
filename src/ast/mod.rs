use crate::context::Context;
use crate::error::EvaluationError;
use std::fmt;
use std::sync::Arc;

mod evaluator;
mod parser;
mod registry;

pub use evaluator::{Evaluator, DEFAULT_CACHE_SIZE};
pub use parser::{FormulaParser, DEFAULT_MAX_DEPTH};
pub use registry::{Arity, OperatorFactory, OperatorRegistry};

pub type Function = Arc<dyn Fn(&[f64]) -> Result<f64, EvaluationError> + Send + Sync>;

/// Handle to a host-supplied function bound into a [`ASTNode::FunctionCall`].
///
/// Two handles compare equal only when they share the same allocation.
#[derive(Clone)]
pub struct NativeFunction(Function);

impl NativeFunction {
    pub fn new<F>(function: F) -> Self
    where
        F: Fn(&[f64]) -> Result<f64, EvaluationError> + Send + Sync + 'static,
    {
        Self(Arc::new(function))
    }

    pub fn call(&self, args: &[f64]) -> Result<f64, EvaluationError> {
        (self.0)(args)
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("NativeFunction")
    }
}

impl PartialEq for NativeFunction {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ASTNode {
    Number(f64),
    /// Name as written in the formula; resolved case-insensitively at evaluation.
    Variable(String),
    BinaryOperation {
        left: Box<ASTNode>,
        operator: Operator,
        right: Box<ASTNode>,
    },
    FunctionCall {
        name: String,
        args: Vec<ASTNode>,
        function: NativeFunction,
    },
}

impl ASTNode {
    /// Evaluates the tree against `context`. Children run left to right and
    /// the first failure aborts the whole evaluation.
    pub fn evaluate(&self, context: &Context) -> Result<f64, EvaluationError> {
        match self {
            ASTNode::Number(value) => Ok(*value),

            ASTNode::Variable(name) => context
                .get_variable(name)
                .ok_or_else(|| EvaluationError::UndefinedVariable(name.clone())),

            ASTNode::BinaryOperation {
                left,
                operator,
                right,
            } => {
                let left_value = left.evaluate(context)?;
                let right_value = right.evaluate(context)?;
                operator.apply(left_value, right_value)
            }

            ASTNode::FunctionCall { args, function, .. } => {
                let values = args
                    .iter()
                    .map(|arg| arg.evaluate(context))
                    .collect::<Result<Vec<f64>, EvaluationError>>()?;
                function.call(&values)
            }
        }
    }
}

impl fmt::Display for ASTNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ASTNode::Number(value) => write!(f, "{}", value),
            ASTNode::Variable(name) => f.write_str(name),
            ASTNode::BinaryOperation {
                left,
                operator,
                right,
            } => write!(f, "{}({}, {})", operator, left, right),
            ASTNode::FunctionCall { name, args, .. } => {
                write!(f, "{}(", name)?;
                for (index, arg) in args.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                f.write_str(")")
            }
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
}

impl Operator {
    pub const ALL: [Operator; 5] = [
        Operator::Add,
        Operator::Subtract,
        Operator::Multiply,
        Operator::Divide,
        Operator::Power,
    ];

    /// Registry name of the operator.
    pub fn name(&self) -> &'static str {
        match self {
            Operator::Add => "ADD",
            Operator::Subtract => "SUBTRACT",
            Operator::Multiply => "MULTIPLY",
            Operator::Divide => "DIVIDE",
            Operator::Power => "POWER",
        }
    }

    pub fn apply(&self, left: f64, right: f64) -> Result<f64, EvaluationError> {
        match self {
            Operator::Add => Ok(left + right),
            Operator::Subtract => Ok(left - right),
            Operator::Multiply => Ok(left * right),
            Operator::Divide => {
                if right == 0.0 {
                    Err(EvaluationError::DivisionByZero)
                } else {
                    Ok(left / right)
                }
            }
            // NaN for negative bases with fractional exponents is passed through.
            Operator::Power => Ok(left.powf(right)),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

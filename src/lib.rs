//! # calcpro
//!
//! Parses prefix-call formulas such as `MULTIPLY(ADD(x, 3), 2)` into an
//! [`ASTNode`] tree and evaluates the tree against a [`Context`] of named
//! numbers.
//!
//! Operator names only gain meaning through an [`OperatorRegistry`], so new
//! operators are added by registering a factory; the parser never changes.
//! Parsing and evaluation are separate: parse once, evaluate against as many
//! contexts as needed.
//!
//! The free functions in this module share one process-wide registry
//! preloaded with ADD, SUBTRACT, MULTIPLY, DIVIDE and POWER. Callers wanting
//! isolated operator sets build their own [`OperatorRegistry`] or
//! [`Evaluator`].

pub mod ast;
pub mod context;
pub mod error;
pub mod operators;

pub use ast::{ASTNode, Arity, Evaluator, FormulaParser, NativeFunction, Operator, OperatorRegistry};
pub use calcpro_macros::formula_fn;
pub use context::Context;
pub use error::{ContextError, EvaluationError, FormulaError, ParseError};

use lazy_static::lazy_static;
use std::sync::{PoisonError, RwLock, RwLockReadGuard};

lazy_static! {
    static ref GLOBAL_REGISTRY: RwLock<OperatorRegistry> =
        RwLock::new(OperatorRegistry::with_builtins());
}

fn global_registry() -> RwLockReadGuard<'static, OperatorRegistry> {
    GLOBAL_REGISTRY
        .read()
        .unwrap_or_else(PoisonError::into_inner)
}

/// Parses `formula` with a snapshot of the process-wide registry. The lock
/// is released before any factory runs, so factories may register operators.
pub fn parse(formula: &str) -> Result<ASTNode, ParseError> {
    let registry = global_registry().clone();
    let parser = FormulaParser::new(&registry);
    parser.parse(formula)
}

pub fn evaluate(ast: &ASTNode, context: &Context) -> Result<f64, EvaluationError> {
    ast.evaluate(context)
}

pub fn evaluate_formula(formula: &str, context: &Context) -> Result<f64, FormulaError> {
    let ast = parse(formula)?;
    Ok(evaluate(&ast, context)?)
}

/// Adds or replaces an operator in the process-wide registry. Register
/// before parsing formulas that use the name.
pub fn register_operator<F>(name: &str, factory: F)
where
    F: Fn(Vec<ASTNode>) -> Result<ASTNode, ParseError> + Send + Sync + 'static,
{
    GLOBAL_REGISTRY
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .register(name, factory);
}

pub fn register_function<F>(name: &str, arity: Arity, function: F)
where
    F: Fn(&[f64]) -> Result<f64, EvaluationError> + Send + Sync + 'static,
{
    GLOBAL_REGISTRY
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .register_function(name, arity, function);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluate_formula_with_global_registry() {
        let mut context = Context::new();
        context.set_variable("x", 5.0);
        assert_eq!(
            evaluate_formula("MULTIPLY(ADD(x, 3), 2)", &context).unwrap(),
            16.0
        );
    }

    #[test]
    fn test_register_operator_globally() {
        assert_eq!(
            parse("global_twice(4)"),
            Err(ParseError::UnknownOperator("global_twice".to_string()))
        );

        register_operator("GLOBAL_TWICE", |mut args: Vec<ASTNode>| {
            if args.len() != 1 {
                return Err(ParseError::arity("GLOBAL_TWICE", 1, args.len()));
            }
            let arg = args.remove(0);
            Ok(ASTNode::BinaryOperation {
                left: Box::new(arg),
                operator: Operator::Multiply,
                right: Box::new(ASTNode::Number(2.0)),
            })
        });

        let ast = parse("global_twice(4)").unwrap();
        assert_eq!(evaluate(&ast, &Context::new()).unwrap(), 8.0);
    }

    #[test]
    fn test_factory_may_register_during_parse() {
        register_operator("GLOBAL_INSTALLER", |_args: Vec<ASTNode>| {
            register_function("GLOBAL_INSTALLED", Arity::Exact(0), |_| Ok(7.0));
            Ok(ASTNode::Number(1.0))
        });

        let (sender, receiver) = std::sync::mpsc::channel();
        std::thread::spawn(move || {
            let _ = sender.send(parse("GLOBAL_INSTALLER()"));
        });
        let result = receiver
            .recv_timeout(std::time::Duration::from_secs(5))
            .expect("parse blocked on the registry lock");
        assert_eq!(result, Ok(ASTNode::Number(1.0)));

        let ast = parse("global_installed()").unwrap();
        assert_eq!(evaluate(&ast, &Context::new()).unwrap(), 7.0);
    }
}

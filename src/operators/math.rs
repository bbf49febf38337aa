//! Optional numeric functions. Not part of the default operator set; call
//! [`register`] to make them available to a registry.

use crate::ast::{Arity, OperatorRegistry};
use crate::error::EvaluationError;

pub fn register(registry: &mut OperatorRegistry) {
    registry.register_function("MOD", Arity::Exact(2), modulo);
    registry.register_function("MIN", Arity::AtLeast(1), min);
    registry.register_function("MAX", Arity::AtLeast(1), max);
    registry.register_function("ABS", Arity::Exact(1), |args| Ok(args[0].abs()));
    registry.register_function("SQRT", Arity::Exact(1), |args| Ok(args[0].sqrt()));
    registry.register_function("NEG", Arity::Exact(1), |args| Ok(-args[0]));
}

fn modulo(args: &[f64]) -> Result<f64, EvaluationError> {
    if args[1] == 0.0 {
        return Err(EvaluationError::DivisionByZero);
    }
    Ok(args[0] % args[1])
}

fn min(args: &[f64]) -> Result<f64, EvaluationError> {
    Ok(args.iter().copied().fold(f64::INFINITY, f64::min))
}

fn max(args: &[f64]) -> Result<f64, EvaluationError> {
    Ok(args.iter().copied().fold(f64::NEG_INFINITY, f64::max))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::FormulaParser;
    use crate::context::Context;
    use crate::error::ParseError;

    fn eval(input: &str) -> Result<f64, EvaluationError> {
        let mut registry = OperatorRegistry::with_builtins();
        register(&mut registry);
        let ast = FormulaParser::new(&registry).parse(input).unwrap();
        ast.evaluate(&Context::new())
    }

    #[test]
    fn test_not_registered_by_default() {
        let registry = OperatorRegistry::with_builtins();
        assert_eq!(
            FormulaParser::new(&registry).parse("MAX(1, 2)"),
            Err(ParseError::UnknownOperator("MAX".to_string()))
        );
    }

    #[test]
    fn test_math_functions() {
        assert_eq!(eval("MOD(7, 3)").unwrap(), 1.0);
        assert_eq!(eval("MIN(4, -2, 9)").unwrap(), -2.0);
        assert_eq!(eval("MAX(4)").unwrap(), 4.0);
        assert_eq!(eval("ABS(-3.5)").unwrap(), 3.5);
        assert_eq!(eval("SQRT(POWER(3, 2))").unwrap(), 3.0);
        assert_eq!(eval("NEG(ADD(1, 2))").unwrap(), -3.0);
    }

    #[test]
    fn test_modulo_by_zero() {
        assert_eq!(eval("MOD(7, 0)"), Err(EvaluationError::DivisionByZero));
    }

    #[test]
    fn test_variadic_requires_one_argument() {
        let mut registry = OperatorRegistry::new();
        register(&mut registry);
        assert_eq!(
            FormulaParser::new(&registry).parse("min()"),
            Err(ParseError::arity("MIN", Arity::AtLeast(1), 0))
        );
    }
}

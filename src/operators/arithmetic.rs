use crate::ast::{ASTNode, Operator, OperatorRegistry};
use crate::error::ParseError;

pub fn register(registry: &mut OperatorRegistry) {
    for operator in Operator::ALL {
        registry.register(operator.name(), binary(operator));
    }
}

/// Factory for a two-argument [`Operator`]; any other argument count is an
/// arity error naming the operator.
pub fn binary(
    operator: Operator,
) -> impl Fn(Vec<ASTNode>) -> Result<ASTNode, ParseError> + Send + Sync + 'static {
    move |args: Vec<ASTNode>| {
        let [left, right]: [ASTNode; 2] = args
            .try_into()
            .map_err(|args: Vec<ASTNode>| ParseError::arity(operator.name(), 2, args.len()))?;

        Ok(ASTNode::BinaryOperation {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        })
    }
}

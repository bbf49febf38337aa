use crate::ast::{ASTNode, NativeFunction};
use crate::error::{EvaluationError, ParseError};
use crate::operators;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Builds a node from already-parsed argument nodes, or rejects them.
pub type OperatorFactory = Arc<dyn Fn(Vec<ASTNode>) -> Result<ASTNode, ParseError> + Send + Sync>;

/// Number of arguments a registered function accepts.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    AtLeast(usize),
    Any,
}

impl Arity {
    pub fn accepts(&self, count: usize) -> bool {
        match self {
            Arity::Exact(n) => count == *n,
            Arity::AtLeast(n) => count >= *n,
            Arity::Any => true,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exact(n) => write!(f, "{}", n),
            Arity::AtLeast(n) => write!(f, "at least {}", n),
            Arity::Any => f.write_str("any number of"),
        }
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_uppercase()
}

/// Case-insensitive table binding operator names to node factories.
///
/// This is the only place names acquire meaning: the parser knows the call
/// syntax, the registry decides what `NAME(...)` builds.
#[derive(Clone)]
pub struct OperatorRegistry {
    operators: HashMap<String, OperatorFactory>,
}

impl OperatorRegistry {
    /// An empty registry; every call fails with an unknown-operator error.
    pub fn new() -> Self {
        Self {
            operators: HashMap::new(),
        }
    }

    /// ADD, SUBTRACT, MULTIPLY, DIVIDE and POWER, two arguments each.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        operators::register_operators(&mut registry);
        registry
    }

    /// Binds `factory` to `name`, replacing any earlier binding.
    pub fn register<F>(&mut self, name: &str, factory: F)
    where
        F: Fn(Vec<ASTNode>) -> Result<ASTNode, ParseError> + Send + Sync + 'static,
    {
        self.operators.insert(normalize(name), Arc::new(factory));
    }

    /// Wraps a plain numeric function so that `NAME(a, b, ..)` parses into a
    /// [`ASTNode::FunctionCall`], checking the argument count at parse time.
    pub fn register_function<F>(&mut self, name: &str, arity: Arity, function: F)
    where
        F: Fn(&[f64]) -> Result<f64, EvaluationError> + Send + Sync + 'static,
    {
        let canonical = normalize(name);
        let function = NativeFunction::new(function);
        let operator = canonical.clone();
        self.operators.insert(
            canonical,
            Arc::new(move |args: Vec<ASTNode>| {
                if !arity.accepts(args.len()) {
                    return Err(ParseError::arity(operator.clone(), arity, args.len()));
                }
                Ok(ASTNode::FunctionCall {
                    name: operator.clone(),
                    args,
                    function: function.clone(),
                })
            }),
        );
    }

    pub fn lookup(&self, name: &str) -> Option<OperatorFactory> {
        self.operators.get(&normalize(name)).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.operators.contains_key(&normalize(name))
    }

    pub fn unregister(&mut self, name: &str) -> bool {
        self.operators.remove(&normalize(name)).is_some()
    }

    /// Registered names, upper-cased and sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.operators.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.operators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }
}

impl Default for OperatorRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl fmt::Debug for OperatorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperatorRegistry")
            .field("operators", &self.names())
            .finish()
    }
}

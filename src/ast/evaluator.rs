use crate::ast::{ASTNode, Arity, FormulaParser, OperatorRegistry, DEFAULT_MAX_DEPTH};
use crate::context::Context;
use crate::error::{EvaluationError, FormulaError, ParseError};
use log::{debug, trace};
use lru::LruCache;
use rayon::prelude::*;
use std::num::NonZeroUsize;

pub const DEFAULT_CACHE_SIZE: usize = 100;

/// Owns an operator registry and a cache of parsed formulas.
///
/// Registering an operator drops every cached tree, so a formula text never
/// maps to a tree built against an older set of bindings.
pub struct Evaluator {
    registry: OperatorRegistry,
    cache: Option<LruCache<String, ASTNode>>,
    max_depth: usize,
}

impl Evaluator {
    /// Creates an `Evaluator` with the built-in operators and room for
    /// `max_cache_size` parsed formulas (`0` disables caching).
    pub fn new(max_cache_size: usize) -> Self {
        Self::with_registry(OperatorRegistry::with_builtins(), max_cache_size)
    }

    pub fn with_registry(registry: OperatorRegistry, max_cache_size: usize) -> Self {
        Self {
            registry,
            cache: NonZeroUsize::new(max_cache_size).map(LruCache::new),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self.invalidate_cache();
        self
    }

    pub fn registry(&self) -> &OperatorRegistry {
        &self.registry
    }

    /// Registers an operator factory. See [`OperatorRegistry::register`].
    pub fn register_operator<F>(&mut self, name: &str, factory: F)
    where
        F: Fn(Vec<ASTNode>) -> Result<ASTNode, ParseError> + Send + Sync + 'static,
    {
        debug!("Registering operator {}", name);
        self.registry.register(name, factory);
        self.invalidate_cache();
    }

    /// Registers a numeric function. See [`OperatorRegistry::register_function`].
    pub fn register_function<F>(&mut self, name: &str, arity: Arity, function: F)
    where
        F: Fn(&[f64]) -> Result<f64, EvaluationError> + Send + Sync + 'static,
    {
        debug!("Registering function {}", name);
        self.registry.register_function(name, arity, function);
        self.invalidate_cache();
    }

    /// Parse a formula into an AST, reusing a cached tree when one exists.
    pub fn parse_expression(&mut self, expression: &str) -> Result<ASTNode, ParseError> {
        let key = expression.trim();

        if let Some(cache) = self.cache.as_mut() {
            if let Some(ast) = cache.get(key) {
                trace!("Parse cache hit: {}", key);
                return Ok(ast.clone());
            }
        }

        let ast = FormulaParser::new(&self.registry)
            .with_max_depth(self.max_depth)
            .parse(key)?;

        if let Some(cache) = self.cache.as_mut() {
            cache.put(key.to_string(), ast.clone());
        }

        Ok(ast)
    }

    /// Evaluate a single AST node against a single context.
    pub fn evaluate_ast(&self, ast: &ASTNode, context: &Context) -> Result<f64, EvaluationError> {
        ast.evaluate(context)
    }

    /// Parses and evaluates `expression` against `context`.
    ///
    /// # Returns
    ///
    /// * `Ok(f64)` if both stages succeed.
    /// * `Err(FormulaError::Parse)` or `Err(FormulaError::Evaluation)` for the first failure.
    pub fn evaluate_expression(
        &mut self,
        expression: &str,
        context: &Context,
    ) -> Result<f64, FormulaError> {
        let ast = self.parse_expression(expression)?;
        Ok(self.evaluate_ast(&ast, context)?)
    }

    /// Evaluates one tree against many contexts in parallel. Results keep
    /// the order of `contexts`.
    pub fn evaluate_batch(
        &self,
        ast: &ASTNode,
        contexts: &[Context],
    ) -> Vec<Result<f64, EvaluationError>> {
        debug!("Evaluating {} against {} contexts", ast, contexts.len());
        contexts
            .par_iter()
            .map(|context| ast.evaluate(context))
            .collect()
    }

    pub fn cached_formulas(&self) -> usize {
        self.cache.as_ref().map_or(0, LruCache::len)
    }

    fn invalidate_cache(&mut self) {
        if let Some(cache) = self.cache.as_mut() {
            cache.clear();
        }
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_SIZE)
    }
}

use crate::ast::{ASTNode, OperatorRegistry};
use crate::error::ParseError;
use log::{debug, trace};
use pest::Parser;
use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "formula.pest"]
struct LexemeParser;

/// Calls nested deeper than this are rejected instead of risking the stack.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Recursive-descent parser for `NAME(arg, ...)` formulas.
///
/// Numbers and bare identifiers are leaves; everything else must be a call
/// whose name the [`OperatorRegistry`] knows. Variables are not checked
/// here, they resolve at evaluation time.
pub struct FormulaParser<'r> {
    registry: &'r OperatorRegistry,
    max_depth: usize,
}

impl<'r> FormulaParser<'r> {
    pub fn new(registry: &'r OperatorRegistry) -> Self {
        Self {
            registry,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn parse(&self, input: &str) -> Result<ASTNode, ParseError> {
        debug!("Parsing formula: {}", input);
        let ast = self.parse_expression(input, 0)?;
        debug!("Parsed formula: {}", ast);
        Ok(ast)
    }

    fn parse_expression(&self, text: &str, depth: usize) -> Result<ASTNode, ParseError> {
        if depth > self.max_depth {
            return Err(ParseError::NestingTooDeep {
                limit: self.max_depth,
            });
        }

        let text = text.trim();

        if matches_whole(Rule::number_literal, text) {
            trace!("Number literal: {}", text);
            return match text.parse::<f64>() {
                Ok(value) if value.is_finite() => Ok(ASTNode::Number(value)),
                _ => Err(ParseError::Malformed(text.to_string())),
            };
        }

        if matches_whole(Rule::identifier_literal, text) {
            trace!("Variable reference: {}", text);
            return Ok(ASTNode::Variable(text.to_string()));
        }

        let (name, inner) =
            split_call(text).ok_or_else(|| ParseError::Malformed(text.to_string()))?;

        let args = split_arguments(inner)
            .into_iter()
            .map(|arg| self.parse_expression(arg, depth + 1))
            .collect::<Result<Vec<ASTNode>, ParseError>>()?;

        let factory = self
            .registry
            .lookup(name)
            .ok_or_else(|| ParseError::UnknownOperator(name.to_string()))?;

        trace!("Building {} with {} argument(s)", name, args.len());
        factory(args)
    }
}

fn matches_whole(rule: Rule, text: &str) -> bool {
    LexemeParser::parse(rule, text).is_ok()
}

/// Splits `NAME(inner)` into its trimmed name and argument text. The first
/// `(` opens the call and the text must end with `)`.
fn split_call(text: &str) -> Option<(&str, &str)> {
    let open = text.find('(')?;
    if open == 0 || !text.ends_with(')') {
        return None;
    }
    let name = text[..open].trim();
    let inner = text[open + 1..text.len() - 1].trim();
    Some((name, inner))
}

/// Splits on commas at parenthesis depth zero only. Empty input yields no
/// arguments rather than one empty argument.
fn split_arguments(text: &str) -> Vec<&str> {
    if text.is_empty() {
        return Vec::new();
    }

    let mut args = Vec::new();
    let mut depth: isize = 0;
    let mut start = 0;

    for (index, ch) in text.char_indices() {
        match ch {
            ',' if depth == 0 => {
                args.push(text[start..index].trim());
                start = index + 1;
            }
            '(' => depth += 1,
            ')' => depth -= 1,
            _ => {}
        }
    }
    args.push(text[start..].trim());

    args
}

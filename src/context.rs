use crate::error::ContextError;
use std::collections::HashMap;

/// Case-insensitive variable table consulted while evaluating a tree.
///
/// Names are stored upper-cased, so `x` and `X` address the same slot.
/// Writes overwrite; a missing name reads as `None`, never as zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Context {
    variables: HashMap<String, f64>,
}

fn normalize(name: &str) -> String {
    name.to_uppercase()
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_variable(&mut self, name: &str, value: f64) {
        self.variables.insert(normalize(name), value);
    }

    /// Parses a host-supplied name/value pair, as typed into a variable panel,
    /// and stores it. Both fields are trimmed first.
    pub fn set_variable_str(&mut self, name: &str, raw_value: &str) -> Result<f64, ContextError> {
        let name = name.trim();
        let raw_value = raw_value.trim();
        if name.is_empty() {
            return Err(ContextError::EmptyName);
        }
        let value = raw_value
            .parse::<f64>()
            .map_err(|_| ContextError::InvalidNumber(raw_value.to_string()))?;
        self.set_variable(name, value);
        Ok(value)
    }

    pub fn get_variable(&self, name: &str) -> Option<f64> {
        self.variables.get(&normalize(name)).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(&normalize(name))
    }

    pub fn remove_variable(&mut self, name: &str) -> Option<f64> {
        self.variables.remove(&normalize(name))
    }

    pub fn clear(&mut self) {
        self.variables.clear();
    }

    /// Read-only view of every binding, keyed by the upper-cased name.
    pub fn variables(&self) -> &HashMap<String, f64> {
        &self.variables
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

impl<K: AsRef<str>> Extend<(K, f64)> for Context {
    fn extend<I: IntoIterator<Item = (K, f64)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.set_variable(name.as_ref(), value);
        }
    }
}

impl<K: AsRef<str>> FromIterator<(K, f64)> for Context {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        let mut context = Context::new();
        context.extend(iter);
        context
    }
}

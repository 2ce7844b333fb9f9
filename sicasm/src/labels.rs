use indexmap::IndexMap;

use crate::error::{AsmError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Label {
    pub address: usize,
    pub line: usize,
}

/// The symbol table, kept in definition order.
#[derive(Debug, Clone, Default)]
pub struct Labels {
    labels: IndexMap<String, Label>,
}

impl Labels {
    pub fn new() -> Self {
        Self {
            labels: IndexMap::new(),
        }
    }

    /// Returns the previous definition if the label already existed.
    pub fn add(&mut self, key: String, value: Label) -> Option<Label> {
        self.labels.insert(key, value)
    }

    pub fn get(&self, key: &str) -> Option<Label> {
        self.labels.get(key).copied()
    }

    pub fn absolute(&self, key: &str, line: usize) -> Result<usize> {
        self.get(key)
            .map(|label| label.address)
            .ok_or_else(|| AsmError::UndefinedSymbol {
                line,
                symbol: key.to_owned(),
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Label)> {
        self.labels.iter().map(|(name, label)| (name.as_str(), label))
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

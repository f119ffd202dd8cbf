//! Resolving typed text to a catalog formula
//!
//! Matching is exact after normalization: whitespace is dropped and letters
//! are lower-cased. Symbols such as `√`, `π`, `²`, `^` and `*` are literal
//! characters, so every accepted spelling has to be listed in the catalog.

use std::collections::HashMap;

use crate::catalog::{FormulaDefinition, CATALOG};
use crate::error::CatalogError;

/// Strip all whitespace and case-fold
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Lookup table from normalized spelling to catalog entry
#[derive(Debug)]
pub struct FormulaMatcher {
    index: HashMap<String, &'static FormulaDefinition>,
}

impl FormulaMatcher {
    /// Index every canonical text and alias of `catalog`.
    ///
    /// Fails if two different formulas share a normalized spelling. A formula
    /// repeating one of its own spellings is harmless and accepted.
    pub fn new(catalog: &'static [FormulaDefinition]) -> Result<Self, CatalogError> {
        let mut index: HashMap<String, &'static FormulaDefinition> = HashMap::new();

        for def in catalog {
            for spelling in def.spellings() {
                let normalized = normalize(spelling);
                match index.get(&normalized) {
                    Some(existing) if existing.canonical != def.canonical => {
                        return Err(CatalogError::DuplicateSpelling {
                            spelling: spelling.to_string(),
                            first: existing.canonical,
                            second: def.canonical,
                        });
                    }
                    Some(_) => {}
                    None => {
                        index.insert(normalized, def);
                    }
                }
            }
        }

        Ok(Self { index })
    }

    /// Matcher over the built-in catalog
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::new(CATALOG)
    }

    /// The formula `input` spells, if any
    pub fn resolve(&self, input: &str) -> Option<&'static FormulaDefinition> {
        self.index.get(&normalize(input)).copied()
    }

    /// Number of distinct accepted spellings
    pub fn spelling_count(&self) -> usize {
        self.index.len()
    }
}

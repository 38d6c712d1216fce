//! Button catalog: the static table mapping keys to semantic presses.
//!
//! The catalog is loaded once and never mutated. The built-in table covers
//! the ten digits, `+ - * /`, `=`, `.` and a clear key; a replacement table
//! can be read from TOML (see [`ButtonCatalog::from_toml_str`]).

mod button;
mod config;

use std::collections::HashMap;
use std::path::PathBuf;

use thiserror::Error;

pub use button::{ButtonSpec, Operator, Press, SemanticType};
pub use config::default_catalog_path;

/// Built-in keypad in display order: (key, name, glyph, type).
const DEFAULT_BUTTONS: &[(&str, &str, &str, SemanticType)] = &[
    ("0", "zero", "0", SemanticType::Digit),
    ("1", "one", "1", SemanticType::Digit),
    ("2", "two", "2", SemanticType::Digit),
    ("3", "three", "3", SemanticType::Digit),
    ("4", "four", "4", SemanticType::Digit),
    ("5", "five", "5", SemanticType::Digit),
    ("6", "six", "6", SemanticType::Digit),
    ("7", "seven", "7", SemanticType::Digit),
    ("8", "eight", "8", SemanticType::Digit),
    ("9", "nine", "9", SemanticType::Digit),
    ("+", "add", "+", SemanticType::Operator),
    ("-", "subtract", "-", SemanticType::Operator),
    ("*", "multiply", "×", SemanticType::Operator),
    ("/", "divide", "/", SemanticType::Operator),
    ("=", "equals", "=", SemanticType::Evaluate),
    ("del", "clear", "del", SemanticType::Clear),
    (".", "decimal", ".", SemanticType::Decimal),
];

/// Errors raised while building or loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid catalog file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("button `{name}` has an empty key")]
    EmptyKey { name: String },
    #[error("key `{0}` is defined more than once")]
    DuplicateKey(String),
    #[error("key `{key}` cannot be a {kind} button")]
    KeyMismatch { key: String, kind: SemanticType },
    #[error("no button for digit {0}")]
    MissingDigit(u8),
    #[error("expected exactly one {kind} button, found {count}")]
    ButtonCount { kind: SemanticType, count: usize },
}

/// Ordered, validated set of buttons.
#[derive(Clone, Debug)]
pub struct ButtonCatalog {
    buttons: Vec<ButtonSpec>,
    presses: HashMap<String, Press>,
}

impl ButtonCatalog {
    /// Build a catalog from button records, validating every key.
    pub fn new(buttons: Vec<ButtonSpec>) -> Result<Self, CatalogError> {
        let mut presses = HashMap::with_capacity(buttons.len());

        for button in &buttons {
            if button.key.is_empty() {
                return Err(CatalogError::EmptyKey {
                    name: button.name.clone(),
                });
            }
            let press = button.press().ok_or_else(|| CatalogError::KeyMismatch {
                key: button.key.clone(),
                kind: button.semantic_type,
            })?;
            if presses.insert(button.key.clone(), press).is_some() {
                return Err(CatalogError::DuplicateKey(button.key.clone()));
            }
        }

        for digit in 0..=9u8 {
            if !presses.values().any(|p| *p == Press::Digit(digit)) {
                return Err(CatalogError::MissingDigit(digit));
            }
        }

        for kind in [SemanticType::Evaluate, SemanticType::Clear] {
            let count = buttons.iter().filter(|b| b.semantic_type == kind).count();
            if count != 1 {
                return Err(CatalogError::ButtonCount { kind, count });
            }
        }

        Ok(Self { buttons, presses })
    }

    /// Resolve a key to the press it stands for.
    pub fn resolve(&self, key: &str) -> Option<Press> {
        self.presses.get(key).copied()
    }

    /// Look up a button record by key.
    pub fn get(&self, key: &str) -> Option<&ButtonSpec> {
        self.buttons.iter().find(|b| b.key == key)
    }

    /// Key of the clear button.
    pub fn clear_key(&self) -> &str {
        self.buttons
            .iter()
            .find(|b| b.semantic_type == SemanticType::Clear)
            .map_or("", |b| b.key.as_str())
    }

    /// Buttons in display order.
    pub fn iter(&self) -> impl Iterator<Item = &ButtonSpec> {
        self.buttons.iter()
    }

    pub fn len(&self) -> usize {
        self.buttons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }
}

impl Default for ButtonCatalog {
    fn default() -> Self {
        let buttons: Vec<ButtonSpec> = DEFAULT_BUTTONS
            .iter()
            .map(|(key, name, display, kind)| ButtonSpec::new(*key, *name, *display, *kind))
            .collect();
        // The built-in table is well-formed, so every key resolves.
        let presses = buttons
            .iter()
            .filter_map(|b| b.press().map(|p| (b.key.clone(), p)))
            .collect();
        Self { buttons, presses }
    }
}

//! Button records and the presses they resolve to.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The role a button plays, independent of its glyph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SemanticType {
    Digit,
    Operator,
    Decimal,
    Evaluate,
    Clear,
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Digit => "digit",
            Self::Operator => "operator",
            Self::Decimal => "decimal",
            Self::Evaluate => "evaluate",
            Self::Clear => "clear",
        };
        f.write_str(name)
    }
}

/// Binary arithmetic operator. `Subtract` doubles as a leading minus.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    /// Parse an operator from the symbol the evaluator understands.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(Self::Add),
            "-" => Some(Self::Subtract),
            "*" => Some(Self::Multiply),
            "/" => Some(Self::Divide),
            _ => None,
        }
    }

    /// The symbol written into the expression buffer.
    pub fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '*',
            Self::Divide => '/',
        }
    }

    /// Whether the operator is held back until a digit has been entered.
    ///
    /// Minus is always available so a negative number can be started.
    pub fn requires_operand(self) -> bool {
        !matches!(self, Self::Subtract)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A semantic button press, resolved from a catalog key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Press {
    /// A digit `0`-`9`.
    Digit(u8),
    Operator(Operator),
    Decimal,
    Evaluate,
    Clear,
}

/// One button of the keypad.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonSpec {
    /// Unique key the view layer sends on press.
    pub key: String,
    /// Stable element name (e.g. `zero`, `add`).
    pub name: String,
    /// Glyph shown on the button face.
    pub display: String,
    /// Semantic role of the button.
    #[serde(rename = "kind")]
    pub semantic_type: SemanticType,
}

impl ButtonSpec {
    /// Create a button record.
    pub fn new(
        key: impl Into<String>,
        name: impl Into<String>,
        display: impl Into<String>,
        semantic_type: SemanticType,
    ) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            display: display.into(),
            semantic_type,
        }
    }

    /// Resolve the press this button produces.
    ///
    /// Returns `None` when the key cannot carry the declared semantic type,
    /// e.g. a digit button whose key is not a single ASCII digit.
    pub fn press(&self) -> Option<Press> {
        match self.semantic_type {
            SemanticType::Digit => match self.key.as_bytes() {
                [b] if b.is_ascii_digit() => Some(Press::Digit(b - b'0')),
                _ => None,
            },
            SemanticType::Operator => Operator::from_symbol(&self.key).map(Press::Operator),
            SemanticType::Decimal => (self.key == ".").then_some(Press::Decimal),
            SemanticType::Evaluate => Some(Press::Evaluate),
            SemanticType::Clear => Some(Press::Clear),
        }
    }
}

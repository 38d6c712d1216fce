//! Button-driven arithmetic input engine.
//!
//! The view layer sends key presses to an [`InputEngine`] and re-reads its
//! [`EngineState`] after each one. Expression evaluation is delegated to an
//! [`Evaluator`]; the keypad is described by a [`ButtonCatalog`].

pub mod calculator;
pub mod catalog;
pub mod engine;
pub mod view;

pub use calculator::{ArithmeticEvaluator, EvaluationError, Evaluator};
pub use catalog::{ButtonCatalog, ButtonSpec, CatalogError, Operator, Press, SemanticType};
pub use engine::{EngineState, Evaluation, IgnoreReason, InputEngine, PressOutcome, Token};
pub use view::DisplayLines;

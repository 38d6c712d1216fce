//! Expression evaluation for the input engine.
//!
//! This module provides functionality to:
//! - Evaluate a joined expression string using fasteval
//! - Round results to the display precision
//! - Format results the way the main display shows them

mod evaluation;

pub use evaluation::{
    ArithmeticEvaluator, EvaluationError, Evaluator, RESULT_PRECISION, format_result,
    round_result,
};

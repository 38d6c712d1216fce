//! Expression evaluation using fasteval.
//!
//! The engine only ever needs a number back from an expression string, so
//! evaluation sits behind the small [`Evaluator`] trait. [`ArithmeticEvaluator`]
//! is the default implementation.

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

/// Number of decimal places results are rounded to.
pub const RESULT_PRECISION: i32 = 4;

/// Reasons an expression could not be turned into a displayable number.
#[derive(Clone, Debug, Error, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EvaluationError {
    /// Nothing to evaluate.
    #[error("empty expression")]
    Empty,
    /// The evaluator could not parse the expression.
    #[error("cannot evaluate `{expression}`: {message}")]
    Syntax {
        /// The rejected expression.
        expression: String,
        /// Parser message.
        message: String,
    },
    /// The expression evaluated to NaN or an infinity (e.g. division by zero).
    #[error("`{expression}` does not evaluate to a finite number")]
    NonFinite {
        /// The rejected expression.
        expression: String,
    },
}

/// Capability that turns an expression string into a number.
///
/// Implementations must be pure: no I/O, and they return or fail immediately.
pub trait Evaluator {
    /// Evaluate `expression`, returning the unrounded value.
    fn evaluate(&self, expression: &str) -> Result<f64, EvaluationError>;
}

impl<F> Evaluator for F
where
    F: Fn(&str) -> Result<f64, EvaluationError>,
{
    fn evaluate(&self, expression: &str) -> Result<f64, EvaluationError> {
        self(expression)
    }
}

/// Default evaluator backed by fasteval.
#[derive(Clone, Copy, Debug, Default)]
pub struct ArithmeticEvaluator;

impl Evaluator for ArithmeticEvaluator {
    fn evaluate(&self, expression: &str) -> Result<f64, EvaluationError> {
        let expression = expression.trim();
        if expression.is_empty() {
            return Err(EvaluationError::Empty);
        }

        // Use an empty namespace (no custom variables)
        let mut namespace = BTreeMap::<String, f64>::new();

        let value = fasteval::ez_eval(expression, &mut namespace).map_err(|e| {
            EvaluationError::Syntax {
                expression: expression.to_string(),
                message: format!("{e:?}"),
            }
        })?;

        if value.is_finite() {
            Ok(value)
        } else {
            Err(EvaluationError::NonFinite {
                expression: expression.to_string(),
            })
        }
    }
}

/// Round a value to [`RESULT_PRECISION`] decimal places, half away from zero.
///
/// Negative zero is normalized so it never displays as `-0`.
pub fn round_result(value: f64) -> f64 {
    let scale = 10f64.powi(RESULT_PRECISION);
    let scaled = value * scale;
    let rounded = if scaled.is_finite() {
        scaled.round() / scale
    } else {
        value
    };

    if rounded == 0.0 { 0.0 } else { rounded }
}

/// Format a rounded result for the main display (raw number, no separators).
pub fn format_result(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        let formatted = format!("{:.*}", RESULT_PRECISION as usize, value);
        formatted
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    }
}

//! What a single press did to the engine.

use serde::Serialize;

use crate::calculator::EvaluationError;

/// A successful `=` press.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Evaluation {
    /// The expression string handed to the evaluator.
    pub expression: String,
    /// The rounded result.
    pub value: f64,
}

/// Why a press was dropped without touching the state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IgnoreReason {
    /// The key is not in the catalog.
    UnknownKey,
    /// `+`, `*` or `/` before any digit.
    OperatorsLocked,
    /// The current number already has a decimal point.
    DecimalBlocked,
    /// `=` while the expression does not end in a digit.
    IncompleteExpression,
    /// An operator with nothing before it.
    NothingToOperateOn,
}

/// Result of [`InputEngine::handle_press`](super::InputEngine::handle_press).
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "outcome", content = "detail", rename_all = "snake_case")]
pub enum PressOutcome {
    /// The press changed the buffers or flags.
    Applied,
    /// The press was dropped; the state is unchanged.
    Ignored(IgnoreReason),
    /// `=` produced a result.
    Evaluated(Evaluation),
    /// `=` was attempted but the evaluator rejected the expression.
    Failed(EvaluationError),
}

impl PressOutcome {
    /// Whether the press was accepted (including a failed evaluation attempt).
    pub fn is_accepted(&self) -> bool {
        !matches!(self, Self::Ignored(_))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

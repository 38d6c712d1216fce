//! Press dispatch.

use crate::calculator::{ArithmeticEvaluator, EvaluationError, Evaluator, round_result};
use crate::catalog::{ButtonCatalog, Operator, Press, SemanticType};

use super::outcome::{Evaluation, IgnoreReason, PressOutcome};
use super::state::{EngineState, Token};

/// Button-driven input state machine.
///
/// Presses run to completion one at a time (`handle_press` takes
/// `&mut self`), so at most one evaluation is ever in flight.
#[derive(Debug)]
pub struct InputEngine<E = ArithmeticEvaluator> {
    catalog: ButtonCatalog,
    evaluator: E,
    state: EngineState,
}

impl InputEngine {
    /// Engine with the built-in keypad and the fasteval evaluator.
    pub fn new() -> Self {
        Self::with_evaluator(ButtonCatalog::default(), ArithmeticEvaluator)
    }

    /// Engine with a custom keypad and the fasteval evaluator.
    pub fn with_catalog(catalog: ButtonCatalog) -> Self {
        Self::with_evaluator(catalog, ArithmeticEvaluator)
    }
}

impl Default for InputEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Evaluator> InputEngine<E> {
    pub fn with_evaluator(catalog: ButtonCatalog, evaluator: E) -> Self {
        Self {
            catalog,
            evaluator,
            state: EngineState::default(),
        }
    }

    /// Read-only view of the buffers and flags.
    pub fn snapshot(&self) -> &EngineState {
        &self.state
    }

    pub fn catalog(&self) -> &ButtonCatalog {
        &self.catalog
    }

    /// Apply one button press.
    ///
    /// Unknown keys and guarded presses are ignored and leave the state
    /// untouched. A rejected evaluation records the error in the state but
    /// leaves the buffers and logs as they were.
    pub fn handle_press(&mut self, key: &str) -> PressOutcome {
        let outcome = match self.catalog.resolve(key) {
            Some(press) => self.dispatch(press),
            None => PressOutcome::Ignored(IgnoreReason::UnknownKey),
        };

        match &outcome {
            PressOutcome::Applied => {
                self.state.set_error(None);
                tracing::debug!(key, expression = %self.state.expression_text(), "press applied");
            }
            PressOutcome::Evaluated(evaluation) => {
                self.state.set_error(None);
                tracing::info!(
                    expression = %evaluation.expression,
                    value = evaluation.value,
                    "expression evaluated"
                );
            }
            PressOutcome::Failed(error) => {
                self.state.set_error(Some(error.clone()));
                tracing::warn!(%error, "evaluation rejected");
            }
            PressOutcome::Ignored(reason) => {
                tracing::debug!(key, ?reason, "press ignored");
            }
        }

        outcome
    }

    /// Apply a sequence of presses in order.
    pub fn handle_presses<'a, I>(&mut self, keys: I) -> Vec<PressOutcome>
    where
        I: IntoIterator<Item = &'a str>,
    {
        keys.into_iter().map(|key| self.handle_press(key)).collect()
    }

    fn dispatch(&mut self, press: Press) -> PressOutcome {
        match press {
            Press::Clear => {
                self.state.reset();
                PressOutcome::Applied
            }
            Press::Evaluate => self.evaluate(),
            Press::Digit(digit) => {
                self.state.append(Token::Digit(digit));
                self.state.unlock_operators();
                PressOutcome::Applied
            }
            Press::Operator(op) => self.press_operator(op),
            Press::Decimal => {
                if self.state.decimal_blocked() {
                    return PressOutcome::Ignored(IgnoreReason::DecimalBlocked);
                }
                self.state.append(Token::Decimal);
                self.state.block_decimal();
                PressOutcome::Applied
            }
        }
    }

    fn press_operator(&mut self, op: Operator) -> PressOutcome {
        if op.requires_operand() {
            if self.state.operators_locked() {
                return PressOutcome::Ignored(IgnoreReason::OperatorsLocked);
            }
            if self.state.last_type() == Some(SemanticType::Operator) {
                // Last operator wins.
                self.state.truncate_to_operand();
            } else if self.state.history().is_empty() {
                return PressOutcome::Ignored(IgnoreReason::NothingToOperateOn);
            }
        }

        self.state.unblock_decimal();
        if self.state.is_result_displayed() {
            self.state.continue_from_result(op);
        } else {
            self.state.append(Token::Operator(op));
        }
        PressOutcome::Applied
    }

    fn evaluate(&mut self) -> PressOutcome {
        if self.state.last_type() != Some(SemanticType::Digit) {
            return PressOutcome::Ignored(IgnoreReason::IncompleteExpression);
        }

        let expression = self.state.expression_text();
        let value = match self.evaluator.evaluate(&expression) {
            Ok(value) if value.is_finite() => round_result(value),
            Ok(_) => return PressOutcome::Failed(EvaluationError::NonFinite { expression }),
            Err(error) => return PressOutcome::Failed(error),
        };

        self.state.record_result(expression.clone(), value);
        PressOutcome::Evaluated(Evaluation { expression, value })
    }
}

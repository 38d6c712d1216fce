//! Engine buffers and guard flags.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::calculator::{EvaluationError, format_result};
use crate::catalog::{Operator, SemanticType};

/// One atomic display unit in a buffer.
#[derive(Clone, Debug, PartialEq)]
pub enum Token {
    /// A single digit `0`-`9`.
    Digit(u8),
    Decimal,
    Operator(Operator),
    /// A rounded result standing in for the evaluated expression.
    Result(f64),
    /// History-only `=result` entry.
    Equals(f64),
    /// History-only marker.
    OpenParen,
    /// History-only marker.
    CloseParen,
}

impl Token {
    /// Semantic type of the button that produced this token.
    ///
    /// Results and history markers were not typed, so they have none.
    pub fn semantic_type(&self) -> Option<SemanticType> {
        match self {
            Self::Digit(_) => Some(SemanticType::Digit),
            Self::Decimal => Some(SemanticType::Decimal),
            Self::Operator(_) => Some(SemanticType::Operator),
            Self::Result(_) | Self::Equals(_) | Self::OpenParen | Self::CloseParen => None,
        }
    }

    /// Whether the token carries digits an operator can follow.
    pub fn is_operand(&self) -> bool {
        matches!(self, Self::Digit(_) | Self::Result(_))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Digit(d) => write!(f, "{d}"),
            Self::Decimal => f.write_str("."),
            Self::Operator(op) => write!(f, "{op}"),
            Self::Result(value) => f.write_str(&format_result(*value)),
            Self::Equals(value) => write!(f, "={}", format_result(*value)),
            Self::OpenParen => f.write_str("("),
            Self::CloseParen => f.write_str(")"),
        }
    }
}

impl Serialize for Token {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Everything the view layer reads after a press.
///
/// Only [`InputEngine`](super::InputEngine) mutates this. The two logs are
/// only ever pushed together, so they always have the same length.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EngineState {
    expression: Vec<Token>,
    history: Vec<Token>,
    expression_log: Vec<String>,
    result_log: Vec<f64>,
    is_result_displayed: bool,
    decimal_blocked: bool,
    operators_locked: bool,
    last_error: Option<EvaluationError>,
    /// `expression` length up to and including the most recent operand.
    #[serde(skip)]
    operand_end: usize,
}

impl Default for EngineState {
    fn default() -> Self {
        Self {
            expression: vec![Token::Digit(0)],
            history: Vec::new(),
            expression_log: Vec::new(),
            result_log: Vec::new(),
            is_result_displayed: false,
            decimal_blocked: false,
            operators_locked: true,
            last_error: None,
            operand_end: 1,
        }
    }
}

impl EngineState {
    /// Tokens of the expression being edited. Never empty.
    pub fn expression(&self) -> &[Token] {
        &self.expression
    }

    /// Cosmetic history tokens.
    pub fn history(&self) -> &[Token] {
        &self.history
    }

    /// Main display text: the expression tokens joined without separators.
    pub fn expression_text(&self) -> String {
        join(&self.expression)
    }

    /// History display text.
    pub fn history_text(&self) -> String {
        join(&self.history)
    }

    /// Every expression string that was evaluated successfully.
    pub fn expression_log(&self) -> &[String] {
        &self.expression_log
    }

    /// Results matching [`expression_log`](Self::expression_log) entry for entry.
    pub fn result_log(&self) -> &[f64] {
        &self.result_log
    }

    pub fn is_result_displayed(&self) -> bool {
        self.is_result_displayed
    }

    pub fn decimal_blocked(&self) -> bool {
        self.decimal_blocked
    }

    pub fn operators_locked(&self) -> bool {
        self.operators_locked
    }

    /// The rejection from the most recent `=` press, until the next accepted press.
    pub fn last_error(&self) -> Option<&EvaluationError> {
        self.last_error.as_ref()
    }

    /// Semantic type of the last token in the expression.
    pub fn last_type(&self) -> Option<SemanticType> {
        self.expression.last().and_then(Token::semantic_type)
    }

    /// Whether the buffers and guards match a freshly cleared engine.
    ///
    /// The evaluation logs are append-only and are not compared.
    pub fn is_cleared(&self) -> bool {
        let initial = Self::default();
        self.expression == initial.expression
            && self.history.is_empty()
            && !self.is_result_displayed
            && !self.decimal_blocked
            && self.operators_locked
            && self.last_error.is_none()
    }

    pub(super) fn reset(&mut self) {
        let expression_log = std::mem::take(&mut self.expression_log);
        let result_log = std::mem::take(&mut self.result_log);
        *self = Self {
            expression_log,
            result_log,
            ..Self::default()
        };
    }

    pub(super) fn unlock_operators(&mut self) {
        self.operators_locked = false;
    }

    pub(super) fn block_decimal(&mut self) {
        self.decimal_blocked = true;
    }

    pub(super) fn unblock_decimal(&mut self) {
        self.decimal_blocked = false;
    }

    pub(super) fn set_error(&mut self, error: Option<EvaluationError>) {
        self.last_error = error;
    }

    /// Append a typed token to both buffers.
    ///
    /// Anything but a decimal point replaces the placeholder `0` or a
    /// displayed result instead of extending it.
    pub(super) fn append(&mut self, token: Token) {
        if token != Token::Decimal && (self.is_placeholder() || self.is_result_displayed) {
            self.operand_end = usize::from(token.is_operand());
            self.expression = vec![token.clone()];
            self.history = vec![token];
            self.is_result_displayed = false;
            self.decimal_blocked = false;
        } else {
            if token.is_operand() {
                self.operand_end = self.expression.len() + 1;
            }
            self.expression.push(token.clone());
            self.history.push(token);
        }
    }

    /// Drop trailing tokens after the most recent operand.
    ///
    /// The history keeps its trail of pressed operators.
    pub(super) fn truncate_to_operand(&mut self) {
        self.expression.truncate(self.operand_end);
    }

    /// Continue algebraically from a displayed result.
    ///
    /// The history so far is wrapped in parentheses before the operator.
    pub(super) fn continue_from_result(&mut self, op: Operator) {
        self.expression.push(Token::Operator(op));

        let mut history = Vec::with_capacity(self.history.len() + 3);
        history.push(Token::OpenParen);
        history.append(&mut self.history);
        history.push(Token::CloseParen);
        history.push(Token::Operator(op));
        self.history = history;

        self.is_result_displayed = false;
    }

    /// Replace the expression with a rounded result and log it.
    pub(super) fn record_result(&mut self, expression: String, value: f64) {
        self.expression = vec![Token::Result(value)];
        self.operand_end = 1;
        self.history.push(Token::Equals(value));
        self.expression_log.push(expression);
        self.result_log.push(value);
        self.is_result_displayed = true;
        // A fractional result already carries the segment's decimal point.
        self.decimal_blocked = value.fract() != 0.0;
        self.operators_locked = false;
    }

    fn is_placeholder(&self) -> bool {
        matches!(self.expression.as_slice(), [Token::Digit(0)])
    }
}

fn join(tokens: &[Token]) -> String {
    tokens.iter().map(ToString::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = EngineState::default();
        assert_eq!(state.expression(), &[Token::Digit(0)]);
        assert!(state.history().is_empty());
        assert_eq!(state.expression_text(), "0");
        assert_eq!(state.history_text(), "");
        assert!(state.operators_locked());
        assert!(!state.decimal_blocked());
        assert!(!state.is_result_displayed());
        assert_eq!(state.last_type(), Some(SemanticType::Digit));
        assert!(state.is_cleared());
    }

    #[test]
    fn test_token_display() {
        assert_eq!(Token::Digit(7).to_string(), "7");
        assert_eq!(Token::Operator(Operator::Multiply).to_string(), "*");
        assert_eq!(Token::Result(0.3333).to_string(), "0.3333");
        assert_eq!(Token::Equals(20.0).to_string(), "=20");
        assert_eq!(Token::OpenParen.to_string(), "(");
    }

    #[test]
    fn test_append_replaces_placeholder() {
        let mut state = EngineState::default();
        state.append(Token::Digit(4));
        assert_eq!(state.expression_text(), "4");
        assert_eq!(state.history_text(), "4");
    }

    #[test]
    fn test_decimal_extends_placeholder() {
        let mut state = EngineState::default();
        state.append(Token::Decimal);
        assert_eq!(state.expression_text(), "0.");
        assert_eq!(state.history_text(), ".");
    }

    #[test]
    fn test_truncate_keeps_last_operand() {
        let mut state = EngineState::default();
        state.append(Token::Digit(1));
        state.append(Token::Digit(2));
        state.append(Token::Operator(Operator::Add));
        state.append(Token::Operator(Operator::Subtract));
        state.truncate_to_operand();
        assert_eq!(state.expression_text(), "12");
        assert_eq!(state.history_text(), "12+-");
    }

    #[test]
    fn test_record_and_continue() {
        let mut state = EngineState::default();
        state.append(Token::Digit(2));
        state.record_result("2".to_string(), 2.0);
        state.continue_from_result(Operator::Divide);
        assert_eq!(state.expression_text(), "2/");
        assert_eq!(state.history_text(), "(2=2)/");
        assert!(!state.is_result_displayed());
    }

    #[test]
    fn test_reset_keeps_logs() {
        let mut state = EngineState::default();
        state.append(Token::Digit(3));
        state.record_result("3".to_string(), 3.0);
        state.reset();
        assert!(state.is_cleared());
        assert_eq!(state.expression_log(), &["3".to_string()]);
        assert_eq!(state.result_log(), &[3.0]);
    }

    #[test]
    fn test_serialize_tokens_as_text() {
        let json = serde_json::to_value(EngineState::default()).unwrap();
        assert_eq!(json["expression"], serde_json::json!(["0"]));
        assert_eq!(json["operators_locked"], serde_json::json!(true));
        assert!(json.get("operand_end").is_none());
    }
}

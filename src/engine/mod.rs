//! The input state machine.
//!
//! [`InputEngine`] consumes button keys one at a time and keeps two buffers
//! in step: the expression that will be evaluated and a cosmetic history
//! line. Guards stop malformed input before it reaches the buffers:
//!
//! - `+`, `*` and `/` are locked until a digit has been entered (`-` never is,
//!   so negative numbers can be typed).
//! - Consecutive operators collapse into the last one pressed.
//! - Only one decimal point is accepted per number.
//! - `=` is only honoured after a digit.

mod input;
mod outcome;
mod state;

pub use input::InputEngine;
pub use outcome::{Evaluation, IgnoreReason, PressOutcome};
pub use state::{EngineState, Token};

//! Error types for sequence generation and rule evaluation
//!
//! This module defines the error taxonomy shared by the generator, the rule
//! parser, and the evaluator.

use thiserror::Error;

/// Errors produced while evaluating or compiling a custom rule expression
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    #[error("Parse error: {message}")]
    ParseError { message: String },

    #[error("Unknown variable '{name}' (only 'n' is available)")]
    UnknownVariable { name: String },

    #[error("Division by zero while evaluating rule at n = {value}")]
    DivisionByZero { value: i64 },

    #[error("Negative exponent {exponent} (integer rules require exponents >= 0)")]
    NegativeExponent { exponent: i64 },

    #[error("Arithmetic overflow during '{operation}' at n = {value}")]
    Overflow { operation: &'static str, value: i64 },
}

impl RuleError {
    /// Create a new parse error
    pub fn parse_error(message: impl Into<String>) -> Self {
        Self::ParseError {
            message: message.into(),
        }
    }

    /// Create a new unknown-variable error
    pub fn unknown_variable(name: impl Into<String>) -> Self {
        Self::UnknownVariable { name: name.into() }
    }

    /// Create a new overflow error
    pub fn overflow(operation: &'static str, value: i64) -> Self {
        Self::Overflow { operation, value }
    }
}

/// Errors produced by the sequence generator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExplorerError {
    #[error("Invalid starting value {value}: a positive integer is required")]
    InvalidStart { value: i64 },

    #[error("Rule evaluation failed: {0}")]
    RuleEvaluation(#[from] RuleError),
}

impl ExplorerError {
    /// Create a new invalid-start error
    pub fn invalid_start(value: i64) -> Self {
        Self::InvalidStart { value }
    }
}

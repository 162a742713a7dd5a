//! Errors raised while executing library functions.

use pfa_diagnostic::{Diagnostic, ErrorCode};

use crate::Value;

/// Result of running one library function.
pub type EvalResult = Result<Value, EvalError>;

/// A failure inside a library function.
///
/// `code` is the function's error-code base plus a per-condition offset, so
/// a host can tell which function failed and why without reading `message`.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message} in {function} (#{code}){}", .position.as_ref().map(|p| format!(" at {p}")).unwrap_or_default())]
pub struct RuntimeError {
    pub code: i32,
    pub function: String,
    pub message: String,
    pub position: Option<String>,
}

impl RuntimeError {
    pub fn new(code: i32, function: impl Into<String>, message: impl Into<String>) -> Self {
        RuntimeError {
            code,
            function: function.into(),
            message: message.into(),
            position: None,
        }
    }

    #[must_use]
    pub fn with_position(mut self, position: impl Into<String>) -> Self {
        self.position = Some(position.into());
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    /// Raised by host code or a user-defined function.
    #[error("{message}")]
    User { message: String, code: Option<i32> },

    /// A value does not have the shape its resolved type promises.
    #[error("{function} received a value that is not {expected}")]
    ValueMismatch {
        function: String,
        expected: &'static str,
    },

    #[error("{function} expects {expected} arguments, received {found}")]
    Arity {
        function: String,
        expected: usize,
        found: usize,
    },

    #[error("unknown function \"{name}\"")]
    UnknownFunction { name: String },
}

impl EvalError {
    pub fn user(message: impl Into<String>, code: Option<i32>) -> Self {
        EvalError::User {
            message: message.into(),
            code,
        }
    }

    /// The numeric failure code, when the error carries one.
    pub fn code(&self) -> Option<i32> {
        match self {
            EvalError::Runtime(err) => Some(err.code),
            EvalError::User { code, .. } => *code,
            EvalError::ValueMismatch { .. }
            | EvalError::Arity { .. }
            | EvalError::UnknownFunction { .. } => None,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            EvalError::Runtime(err) => {
                let diag = Diagnostic::error(ErrorCode::E6001)
                    .with_message(format!("{} in {}", err.message, err.function))
                    .with_note(format!("failure code {}", err.code));
                match &err.position {
                    Some(position) => diag.with_position(position.clone()),
                    None => diag,
                }
            }
            EvalError::User { message, code } => {
                let diag = Diagnostic::error(ErrorCode::E6002).with_message(message.clone());
                match code {
                    Some(code) => diag.with_note(format!("failure code {code}")),
                    None => diag,
                }
            }
            EvalError::ValueMismatch { .. } | EvalError::Arity { .. } => {
                Diagnostic::error(ErrorCode::E6001).with_message(self.to_string())
            }
            EvalError::UnknownFunction { .. } => {
                Diagnostic::error(ErrorCode::E2002).with_message(self.to_string())
            }
        }
    }
}

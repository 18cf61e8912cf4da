use crate::{
    message::{self, MessageProvider},
    model::FieldKind,
    operator::Operator,
    path::PathError,
};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt, sync::Arc};
use thiserror::Error as ThisError;

///
/// ResolveError
///
/// Outcome of a failed resolution pass. The variant decides the response
/// class; both carry the same structured body.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ResolveError {
    /// Client-supplied values could not be used.
    #[error("{0}")]
    Input(ErrorResponse),

    /// The declared policy or schema is broken.
    #[error("{0}")]
    Configuration(ErrorResponse),
}

impl ResolveError {
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::Input(_) => ErrorClass::Input,
            Self::Configuration(_) => ErrorClass::Configuration,
        }
    }

    /// HTTP-style status code for this outcome.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.class().status()
    }

    #[must_use]
    pub const fn response(&self) -> &ErrorResponse {
        match self {
            Self::Input(response) | Self::Configuration(response) => response,
        }
    }

    #[must_use]
    pub fn into_response(self) -> ErrorResponse {
        match self {
            Self::Input(response) | Self::Configuration(response) => response,
        }
    }
}

///
/// ErrorResponse
///
/// Structured error body: one entry per original field token, each with its
/// messages in the order they were recorded.
///

#[derive(Clone, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
#[display("{message}")]
pub struct ErrorResponse {
    pub message: String,
    pub errors: BTreeMap<String, Vec<String>>,
}

///
/// ErrorClass
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ErrorClass {
    Input,
    Configuration,
}

impl ErrorClass {
    #[must_use]
    pub const fn status(self) -> u16 {
        match self {
            Self::Input => 400,
            Self::Configuration => 500,
        }
    }
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Input => "input",
            Self::Configuration => "configuration",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorKind
///
/// Taxonomy of field-level failures.
/// `UnconfiguredField` is never pushed into an `ErrorSet`; unconfigured
/// wrappers are dropped and only reported through observability.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
pub enum ErrorKind {
    InputCast,
    PathResolution,
    Arity,
    UnsupportedOperator,
    UnconfiguredField,
}

impl ErrorKind {
    #[must_use]
    pub const fn class(self) -> ErrorClass {
        match self {
            Self::InputCast | Self::UnconfiguredField => ErrorClass::Input,
            Self::PathResolution | Self::Arity | Self::UnsupportedOperator => {
                ErrorClass::Configuration
            }
        }
    }
}

///
/// RejectedValue
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RejectedValue {
    Absent,
    Single(String),
    Many(Vec<String>),
}

impl RejectedValue {
    #[must_use]
    pub fn from_raw(raw: Option<&str>) -> Self {
        raw.map_or(Self::Absent, |raw| Self::Single(raw.to_string()))
    }

    #[must_use]
    pub fn from_values(values: &[String]) -> Self {
        match values {
            [] => Self::Absent,
            [single] => Self::Single(single.clone()),
            many => Self::Many(many.to_vec()),
        }
    }
}

impl fmt::Display for RejectedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => f.write_str("null"),
            Self::Single(value) => f.write_str(value),
            Self::Many(values) => write!(f, "[{}]", values.join(", ")),
        }
    }
}

///
/// FieldError
///
/// One field-level problem. `field_name` is always the original input token,
/// never the normalized path.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct FieldError {
    pub object_name: String,
    pub field_name: String,
    pub rejected_value: RejectedValue,
    pub message: String,
    pub kind: ErrorKind,
}

///
/// ErrorSet
///
/// Per-pass accumulator. Owned by exactly one resolution call; errors are
/// collected for every field before the pass decides how to fail.
///

pub struct ErrorSet {
    object_name: String,
    messages: Arc<dyn MessageProvider>,
    errors: Vec<FieldError>,
}

impl ErrorSet {
    #[must_use]
    pub fn new(object_name: impl Into<String>, messages: Arc<dyn MessageProvider>) -> Self {
        Self {
            object_name: object_name.into(),
            messages,
            errors: Vec::new(),
        }
    }

    #[must_use]
    pub fn object_name(&self) -> &str {
        &self.object_name
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn push(&mut self, error: FieldError) {
        crate::obs::sink::record(&crate::obs::ResolveEvent::FieldRejected {
            field: &error.field_name,
            kind: error.kind,
        });
        self.errors.push(error);
    }

    /// Render `key` through the message provider and record the error.
    pub fn reject(
        &mut self,
        kind: ErrorKind,
        field: &str,
        rejected_value: RejectedValue,
        key: &str,
        args: &[&str],
    ) {
        let message = self.messages.message(key, args);
        self.push(FieldError {
            object_name: self.object_name.clone(),
            field_name: field.to_string(),
            rejected_value,
            message,
            kind,
        });
    }

    pub(crate) fn cast_failed(&mut self, field: &str, raw: Option<&str>, target: &FieldKind) {
        let shown = raw.unwrap_or("null");
        let target = target.to_string();
        self.reject(
            ErrorKind::InputCast,
            field,
            RejectedValue::from_raw(raw),
            message::CAST_INVALID,
            &[shown, &target],
        );
    }

    pub(crate) fn path_failed(&mut self, field: &str, err: &PathError, values: &[String]) {
        let detail = err.to_string();
        self.reject(
            ErrorKind::PathResolution,
            field,
            RejectedValue::from_values(values),
            message::PATH_UNKNOWN,
            &[&detail],
        );
    }

    pub(crate) fn arity_violated(
        &mut self,
        field: &str,
        op: Operator,
        required: usize,
        values: &[String],
    ) {
        let required = required.to_string();
        let found = values.len().to_string();
        self.reject(
            ErrorKind::Arity,
            field,
            RejectedValue::from_values(values),
            message::OPERATOR_ARITY,
            &[op.token(), &required, &found],
        );
    }

    pub(crate) fn unsupported_operator(
        &mut self,
        field: &str,
        op: Operator,
        kind: &FieldKind,
        values: &[String],
    ) {
        let kind = kind.to_string();
        self.reject(
            ErrorKind::UnsupportedOperator,
            field,
            RejectedValue::from_values(values),
            message::OPERATOR_UNSUPPORTED,
            &[op.token(), &kind],
        );
    }

    /// Dominant class of the recorded errors, if any.
    ///
    /// Configuration wins over input: a broken policy makes the client
    /// diagnostics unreliable.
    #[must_use]
    pub fn class(&self) -> Option<ErrorClass> {
        if self.errors.is_empty() {
            return None;
        }

        let broken = self
            .errors
            .iter()
            .any(|err| err.kind.class() == ErrorClass::Configuration);

        Some(if broken {
            ErrorClass::Configuration
        } else {
            ErrorClass::Input
        })
    }

    /// Group messages by original field token.
    #[must_use]
    pub fn to_response(&self, message: impl Into<String>) -> ErrorResponse {
        let mut errors: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for err in &self.errors {
            errors
                .entry(err.field_name.clone())
                .or_default()
                .push(err.message.clone());
        }

        ErrorResponse {
            message: message.into(),
            errors,
        }
    }

    /// Finish the pass: `Ok` when nothing was recorded.
    pub fn into_result(self) -> Result<(), ResolveError> {
        match self.class() {
            None => Ok(()),
            Some(ErrorClass::Input) => {
                let message = self.messages.message(message::RESPONSE_INPUT, &[]);
                Err(ResolveError::Input(self.to_response(message)))
            }
            Some(ErrorClass::Configuration) => {
                let message = self.messages.message(message::RESPONSE_CONFIGURATION, &[]);
                Err(ResolveError::Configuration(self.to_response(message)))
            }
        }
    }
}

impl fmt::Debug for ErrorSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorSet")
            .field("object_name", &self.object_name)
            .field("errors", &self.errors)
            .finish_non_exhaustive()
    }
}

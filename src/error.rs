//! Error types for the dose calculation engine.
//!
//! Strict entry points return `DoseError`; the sanitized pipeline in
//! `dispense` absorbs these and reports zero instead.

use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DoseError {
    /// A unit label outside the closed enumeration of its family.
    #[error("Invalid unit for {family}: {value}")]
    InvalidUnit { family: String, value: String },

    #[error("Non-finite value for {field}: {value}")]
    NonFiniteInput { field: String, value: f64 },

    /// Zero concentration or zero doses per day.
    #[error("Division by zero: {divisor} is 0")]
    DivisionByZero { divisor: String },

    #[error("Could not parse quantity: {input}")]
    Unparseable { input: String },
}

impl DoseError {
    /// Stable machine-readable code for the JSON boundary.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidUnit { .. } => "INVALID_UNIT",
            Self::NonFiniteInput { .. } => "NON_FINITE_INPUT",
            Self::DivisionByZero { .. } => "DIVISION_BY_ZERO",
            Self::Unparseable { .. } => "UNPARSEABLE",
        }
    }
}

/// Structured error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
}

impl ErrorBody {
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            error: ErrorDetail {
                code,
                message: message.into(),
            },
        }
    }
}

impl From<&DoseError> for ErrorBody {
    fn from(err: &DoseError) -> Self {
        Self::new(err.code(), err.to_string())
    }
}

/// Reject NaN and infinities for a named input field.
pub fn ensure_finite(field: &str, value: f64) -> Result<f64, DoseError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(DoseError::NonFiniteInput {
            field: field.into(),
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_unit_message() {
        let err = DoseError::InvalidUnit {
            family: "WeightUnit".into(),
            value: "stone".into(),
        };
        assert_eq!(err.to_string(), "Invalid unit for WeightUnit: stone");
        assert_eq!(err.code(), "INVALID_UNIT");
    }

    #[test]
    fn error_body_serializes_code_and_message() {
        let err = DoseError::DivisionByZero {
            divisor: "concentration".into(),
        };
        let json = serde_json::to_value(ErrorBody::from(&err)).unwrap();
        assert_eq!(json["error"]["code"], "DIVISION_BY_ZERO");
        assert_eq!(json["error"]["message"], "Division by zero: concentration is 0");
    }

    #[test]
    fn ensure_finite_rejects_nan_and_infinity() {
        assert_eq!(ensure_finite("weight", 12.5), Ok(12.5));
        assert!(matches!(
            ensure_finite("weight", f64::NAN),
            Err(DoseError::NonFiniteInput { .. })
        ));
        assert!(ensure_finite("weight", f64::INFINITY).is_err());
        assert!(ensure_finite("weight", f64::NEG_INFINITY).is_err());
    }
}

//! Structured error handling for floodfis
//!
//! The inference engine itself cannot fail: degenerate shapes are guarded
//! and an empty aggregate yields an undefined crisp value. Errors only come
//! from the boundary around it:
//!
//! - `Validation` - rejected inputs (non-finite numbers, missing values)
//! - `Config` - configuration files and overrides
//! - `Output` - writing reports
//!
//! # Example
//!
//! ```rust,ignore
//! use floodfis::error::{ErrorCode, FloodError};
//!
//! fn check(rainfall: f64) -> Result<(), FloodError> {
//!     if !rainfall.is_finite() {
//!         return Err(FloodError::invalid_input("rainfall", rainfall)
//!             .with_hint("Pass a finite number in mm/h"));
//!     }
//!     Ok(())
//! }
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

// ============================================================================
// Error Codes
// ============================================================================

/// Error codes for programmatic handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Validation errors (1xxx)
    /// Input value is NaN or infinite
    NonFiniteInput = 1001,
    /// Required input missing
    MissingInput = 1002,

    // Config errors (2xxx)
    /// Generic config error
    ConfigError = 2000,
    /// Config file not found
    ConfigNotFound = 2001,
    /// Invalid config syntax
    InvalidConfigSyntax = 2002,
    /// Invalid config value
    InvalidConfigValue = 2003,

    // Output errors (3xxx)
    /// Generic output error
    OutputError = 3000,
    /// Writing a report failed
    WriteFailed = 3001,
    /// Report serialization failed
    SerializeFailed = 3002,

    // Internal errors (9xxx)
    /// Internal error
    InternalError = 9000,
}

impl ErrorCode {
    /// Numeric code value
    pub fn code(&self) -> u32 {
        *self as u32
    }

    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::NonFiniteInput => "Input is not a finite number",
            ErrorCode::MissingInput => "Missing required input",

            ErrorCode::ConfigError => "Configuration error",
            ErrorCode::ConfigNotFound => "Configuration file not found",
            ErrorCode::InvalidConfigSyntax => "Invalid configuration syntax",
            ErrorCode::InvalidConfigValue => "Invalid configuration value",

            ErrorCode::OutputError => "Output error",
            ErrorCode::WriteFailed => "Write failed",
            ErrorCode::SerializeFailed => "Serialization failed",

            ErrorCode::InternalError => "Internal error",
        }
    }

    /// Process exit status for the CLI
    pub fn exit_status(&self) -> i32 {
        match self.code() / 1000 {
            1 => 2,
            2 => 3,
            3 => 4,
            _ => 1,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

// ============================================================================
// Error Context
// ============================================================================

/// Additional context attached to an error
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorContext {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: BTreeMap<String, String>,
}

// ============================================================================
// Main Error Type
// ============================================================================

/// The error type for everything around the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloodError {
    pub code: ErrorCode,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<ErrorContext>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl FloodError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: None,
            hint: None,
        }
    }

    /// A named input that is NaN or infinite
    pub fn invalid_input(name: &str, value: f64) -> Self {
        Self::new(
            ErrorCode::NonFiniteInput,
            format!("{} must be a finite number, got {}", name, value),
        )
        .with_context("input", name)
    }

    pub fn missing_input(name: &str) -> Self {
        Self::new(ErrorCode::MissingInput, format!("{} is required", name))
            .with_context("input", name)
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    pub fn output(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::OutputError, message)
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = code;
        self
    }

    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let ctx = self.context.get_or_insert_with(ErrorContext::default);
        ctx.fields.insert(key.into(), value.into());
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn exit_status(&self) -> i32 {
        self.code.exit_status()
    }
}

impl fmt::Display for FloodError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.code(), self.message)?;

        if let Some(ref ctx) = self.context {
            if !ctx.fields.is_empty() {
                let fields: Vec<_> = ctx
                    .fields
                    .iter()
                    .map(|(k, v)| format!("{}={}", k, v))
                    .collect();
                write!(f, " ({})", fields.join(", "))?;
            }
        }

        if let Some(ref hint) = self.hint {
            write!(f, "\nHint: {}", hint)?;
        }

        Ok(())
    }
}

impl std::error::Error for FloodError {}

// ============================================================================
// Conversions
// ============================================================================

impl From<std::io::Error> for FloodError {
    fn from(err: std::io::Error) -> Self {
        FloodError::new(ErrorCode::WriteFailed, err.to_string())
            .with_context("kind", format!("{:?}", err.kind()))
    }
}

impl From<serde_json::Error> for FloodError {
    fn from(err: serde_json::Error) -> Self {
        FloodError::output(err.to_string())
            .with_code(ErrorCode::SerializeFailed)
            .with_context("format", "json")
    }
}

impl From<ConfigError> for FloodError {
    fn from(err: ConfigError) -> Self {
        let code = match &err {
            ConfigError::Io(..) => ErrorCode::ConfigNotFound,
            ConfigError::Parse(..) => ErrorCode::InvalidConfigSyntax,
            ConfigError::Serialize(_) => ErrorCode::InternalError,
            ConfigError::InvalidValue { .. } => ErrorCode::InvalidConfigValue,
        };
        FloodError::config(err.to_string()).with_code(code)
    }
}

pub type FloodResult<T> = Result<T, FloodError>;

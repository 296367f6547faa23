//! Error types for the rectifier crate.
//!
//! The rectifier model itself is total and never fails. [`RectifierError`]
//! covers everything around it: configuration loading, value parsing,
//! workspace editing and output.

use thiserror::Error;

/// Result type alias using [`RectifierError`].
pub type Result<T> = std::result::Result<T, RectifierError>;

/// Unified error type for all non-model operations.
#[derive(Error, Debug)]
pub enum RectifierError {
    // ============ Configuration Errors ============
    /// Error reading a configuration file
    #[error("Failed to read config file '{path}': {source}")]
    ConfigReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Error parsing configuration contents
    #[error("Failed to parse config: {message}")]
    ConfigParseError { message: String },

    /// A value string could not be parsed
    #[error("Invalid value '{text}': expected a number with optional suffix (p, n, u, m, k, M, G)")]
    InvalidValue { text: String },

    /// A setting lies outside its meaningful domain
    #[error("Invalid setting '{name}' = {value}: {message}")]
    InvalidSetting {
        name: String,
        value: f64,
        message: String,
    },

    // ============ Workspace Errors ============
    /// Unknown component kind identifier
    #[error("Unknown component type '{kind}'")]
    UnknownComponentType { kind: String },

    /// No component with the given id
    #[error("Component {id} not found in workspace")]
    ComponentNotFound { id: u64 },

    /// Wire endpoint index out of range
    #[error("Cannot wire component {index}: workspace has {count} components")]
    InvalidWireEndpoint { index: usize, count: usize },

    /// Property name not known for a component kind
    #[error("Component '{kind}' has no property '{property}'")]
    UnknownProperty { kind: String, property: String },

    /// Circuit cannot be evaluated as a rectifier
    #[error("Invalid circuit: {message}")]
    InvalidCircuit { message: String },

    // ============ Output Errors ============
    /// Error writing rendered output
    #[error("Failed to write output '{path}': {source}")]
    OutputError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Error formatting rendered output
    #[error("Render error: {message}")]
    RenderError { message: String },

    // ============ WASM Errors ============
    /// WASM-specific error
    #[cfg(feature = "wasm")]
    #[error("WASM error: {message}")]
    WasmError { message: String },
}

impl RectifierError {
    /// Create an invalid setting error
    pub fn invalid_setting(name: impl Into<String>, value: f64, message: impl Into<String>) -> Self {
        Self::InvalidSetting {
            name: name.into(),
            value,
            message: message.into(),
        }
    }

    /// Create an invalid circuit error
    pub fn invalid_circuit(message: impl Into<String>) -> Self {
        Self::InvalidCircuit {
            message: message.into(),
        }
    }

    /// Create an unknown property error
    pub fn unknown_property(kind: impl Into<String>, property: impl Into<String>) -> Self {
        Self::UnknownProperty {
            kind: kind.into(),
            property: property.into(),
        }
    }

    /// Create an output error for the given path
    pub fn output(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::OutputError {
            path: path.into(),
            source,
        }
    }
}

impl From<std::fmt::Error> for RectifierError {
    fn from(e: std::fmt::Error) -> Self {
        Self::RenderError {
            message: e.to_string(),
        }
    }
}

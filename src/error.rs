use thiserror::Error;

/// Errors raised by the host-side mechanisms: parameter lookup, input tag
/// parsing, pool binding and module registration.
#[derive(Error, Debug)]
pub enum MemError {
    #[error("Invalid input tag '{0}': expected 'module::parameter' or 'module::parameter/index'")]
    InvalidInputTag(String),

    #[error("Module '{module}' is missing parameter '{parameter}'")]
    MissingParameter { module: String, parameter: String },

    #[error("Module '{module}' has an invalid value for parameter '{parameter}': {source}")]
    InvalidParameter {
        module: String,
        parameter: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Output '{0}' is already produced by another module")]
    DuplicateOutput(String),

    #[error("Input '{0}' is not produced by any module")]
    UnresolvedInput(String),

    #[error("Slot '{slot}' does not hold a value of type {expected}")]
    TypeMismatch { slot: String, expected: &'static str },

    #[error("Unknown module type '{0}'")]
    UnknownModuleType(String),

    #[error("Module type '{0}' is already registered")]
    DuplicateModuleType(String),

    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type MemResult<T> = Result<T, MemError>;

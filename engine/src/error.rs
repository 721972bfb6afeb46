use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HaversineError {
    #[error("Usage: {0}")]
    Usage(String),

    #[error("Could not open file: {path:?}: {source}")]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O Error: {0}")]
    Io(#[from] std::io::Error),

    // أخطاء الماسح (Scanner Errors) - كلها نهائية، لا يوجد تعافٍ
    #[error("Expected {expected} but got {found:?} at byte {offset}")]
    LiteralMismatch { expected: String, found: char, offset: u64 },

    #[error("Unexpected key: {name:?} at byte {offset}")]
    UnknownField { name: String, offset: u64 },

    #[error("Unexpected character: {found:?} at byte {offset} (expected {expected})")]
    UnexpectedCharacter { found: char, expected: &'static str, offset: u64 },

    #[error("Unexpected end of input at byte {offset} (expected {expected})")]
    UnexpectedEof { expected: &'static str, offset: u64 },

    #[error("Invalid number literal {literal:?} at byte {offset}")]
    InvalidNumber { literal: String, offset: u64 },

    #[error("Duplicate field {field:?} at byte {offset}")]
    DuplicateField { field: &'static str, offset: u64 },

    #[error("Object closed at byte {offset} without field {field:?}")]
    MissingField { field: &'static str, offset: u64 },

    #[error("Undefined record count: no pairs were aggregated")]
    EmptyAggregate,

    #[error("Configuration Error: {0}")]
    Config(String),
}

impl From<config::ConfigError> for HaversineError {
    fn from(err: config::ConfigError) -> Self {
        HaversineError::Config(err.to_string())
    }
}

pub type HaversineResult<T> = Result<T, HaversineError>;

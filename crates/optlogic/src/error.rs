//! Error types for option declaration, parsing and rule enforcement.

use thiserror::Error;

/// Result type alias for fallible `optlogic` operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Any failure raised by the library.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("builder error: {0}")]
    Builder(#[from] BuilderError),

    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("extractor error: {0}")]
    Extractor(#[from] ExtractorError),

    #[error("logic error: {0}")]
    Logic(#[from] LogicError),
}

/// Option construction failed an invariant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuilderError {
    #[error("builder was already used to build an option")]
    Inactive,

    #[error("invalid short alias '{0}' (expected a single letter)")]
    InvalidShortAlias(String),

    #[error("invalid long alias '{0}' (expected a letter followed by letters or digits)")]
    InvalidLongAlias(String),

    #[error("alias '{0}' is already declared on this option")]
    DuplicateAlias(String),

    #[error("handler cannot be empty")]
    EmptyHandler,

    #[error("option has no aliases")]
    NoAliases,

    #[error("no handler was provided and it cannot be inferred from the aliases")]
    AmbiguousHandler,

    #[error("flag '{0}' cannot be required")]
    RequiredFlag(String),
}

/// An option could not be registered in an [`OptionSet`](crate::OptionSet).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("option '{0}' is already registered")]
    DuplicateOption(String),

    #[error("short alias '-{0}' is already registered")]
    ShortAliasTaken(String),

    #[error("long alias '--{0}' is already registered")]
    LongAliasTaken(String),

    #[error("handler '{0}' is already registered")]
    HandlerTaken(String),
}

/// The token stream does not fit the declared options.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid option: {0}")]
    InvalidOption(String),

    #[error("undefined option: {0}")]
    UndefinedOption(String),

    #[error("option found multiple times: {0}")]
    DuplicateOption(String),

    #[error("missing parameter for {0}, found end of arguments")]
    MissingParameter(String),

    #[error("missing mandatory option: {0}")]
    MissingMandatory(String),
}

/// A raw value could not be converted, or an extractor was misconfigured.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractorError {
    #[error("lower bound {min} must be smaller than upper bound {max}")]
    InvalidBounds { min: String, max: String },

    #[error("bounds cannot be NaN")]
    NanBound,

    #[error("list delimiter cannot be empty")]
    EmptyDelimiter,

    #[error("failed to extract integer from '{0}'")]
    NotAnInteger(String),

    #[error("failed to extract real number from '{0}'")]
    NotAReal(String),

    #[error("value '{value}' is out of bounds [{min}, {max}]")]
    OutOfBounds {
        value: String,
        min: String,
        max: String,
    },

    #[error("value '{0}' is not in the allowed domain")]
    NotInDomain(String),

    #[error("{0}")]
    Custom(String),
}

impl ExtractorError {
    /// Build an error for a user-defined extractor.
    pub fn custom(msg: impl Into<String>) -> Self {
        Self::Custom(msg.into())
    }
}

/// A registered rule did not hold for the parsed result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LogicError {
    #[error("rule is not satisfied: {0}")]
    RuleViolated(String),
}

impl Error {
    /// Whether the error came from the user's tokens rather than from the
    /// option declarations.
    pub fn is_usage_error(&self) -> bool {
        matches!(self, Self::Parse(_) | Self::Extractor(_) | Self::Logic(_))
    }
}

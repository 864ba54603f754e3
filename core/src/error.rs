//! Error types for option registration and parsing.
//!
//! Every failure aborts the registration or parse call that raised it.
//! Destinations already written by an earlier conversion keep their values.

use thiserror::Error;

/// Errors raised while registering options or parsing tokens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgError {
    /// An alias in a new declaration is already owned by another option.
    #[error("option already added: {0}")]
    DuplicateAlias(String),

    /// A data token appeared where an option name was expected.
    #[error("argument {0} is not an option or flag")]
    InvalidLeadingToken(String),

    /// The token looks like an option but no option declares that name.
    #[error("unidentified option: {0}")]
    UnknownOption(String),

    /// A process argument is not valid Unicode; carries its lossy rendering.
    #[error("argument {0} is not valid unicode")]
    InvalidEncoding(String),

    /// One option was named twice in the same parse pass.
    #[error("option {option} is parsed more than once")]
    DuplicateMatch {
        /// Comma-separated alias list of the option.
        option: String,
    },

    /// Fewer values were collected than the option has destinations.
    #[error("option {option} is not assigned properly starting from argument {index}")]
    MissingArguments {
        /// Comma-separated alias list of the option.
        option: String,
        /// 1-based index of the first missing value.
        index: usize,
    },

    /// A collected value could not be converted into its destination type.
    #[error("conversion failure on option {option} on argument {index}: `{token}` is not a valid {expected}")]
    ConversionFailure {
        /// Comma-separated alias list of the option.
        option: String,
        /// 1-based index of the failing destination.
        index: usize,
        /// The raw token that failed to convert.
        token: String,
        /// Type name of the destination.
        expected: String,
    },
}

/// Failure of a single [`assign_results`](crate::assign_results) call.
///
/// Carries no option name; [`ArgError`] adds it once the owning option is
/// known.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssignError {
    #[error("missing value starting from argument {index}")]
    Missing { index: usize },

    #[error("`{token}` is not a valid {expected} (argument {index})")]
    Conversion {
        index: usize,
        token: String,
        expected: &'static str,
    },
}

/// Convenience alias for results with [`ArgError`].
pub type Result<T> = std::result::Result<T, ArgError>;

//! Parser configuration.
//!
//! [`ParserConfig`] is plain serde data so tools can embed it in YAML or
//! JSON manifests. Every field has a default.
//!
//! # Example YAML
//!
//! ```yaml
//! name: mytool
//! help_token: --help
//! help_format: table
//! ```

use serde::{Deserialize, Serialize};

use crate::help::HelpFormat;

/// Token that triggers the help listing when it is the only argument.
pub const DEFAULT_HELP_TOKEN: &str = "--help";

/// Settings for an [`ArgParser`](crate::ArgParser).
///
/// # Examples
///
/// ```
/// use argbind_core::{HelpFormat, ParserConfig};
///
/// let config = ParserConfig::default();
/// assert_eq!(config.help_token, "--help");
/// assert_eq!(config.help_format, HelpFormat::Table);
/// assert!(config.name.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Program name shown in the help listing. When unset, `argv[0]` is used.
    pub name: Option<String>,
    /// Single-argument token that prints the help listing instead of parsing.
    pub help_token: String,
    /// Layout of the printed help listing.
    pub help_format: HelpFormat,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            name: None,
            help_token: DEFAULT_HELP_TOKEN.to_string(),
            help_format: HelpFormat::default(),
        }
    }
}

impl ParserConfig {
    /// Sets the program name.
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// Sets the help token.
    pub fn with_help_token(mut self, token: &str) -> Self {
        self.help_token = token.to_string();
        self
    }

    /// Sets the help layout.
    pub fn with_help_format(mut self, format: HelpFormat) -> Self {
        self.help_format = format;
        self
    }
}

//! Option manifests: declarations plus slot types, loaded from YAML or JSON.
//!
//! # Example YAML
//!
//! ```yaml
//! parser:
//!   name: demo
//! options:
//!   - declaration: "-n, --number"
//!     description: Specify two numbers
//!     slots: [int, float]
//!   - declaration: "-v, --verbose"
//!     flag: true
//! ```

use std::fmt;
use std::path::Path;

use argbind_core::{ParserConfig, Slot};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while loading a manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parsing failure.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML parsing failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Structurally valid file with unusable content.
    #[error("invalid manifest: {0}")]
    InvalidManifest(String),
}

/// Destination type of one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotKind {
    String,
    Int,
    Uint,
    Float,
    Bool,
    Char,
}

impl SlotKind {
    fn type_name(self) -> &'static str {
        match self {
            SlotKind::String => "string",
            SlotKind::Int => "int",
            SlotKind::Uint => "uint",
            SlotKind::Float => "float",
            SlotKind::Bool => "bool",
            SlotKind::Char => "char",
        }
    }
}

/// A converted slot value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BoundValue {
    String(String),
    Int(i64),
    Uint(u64),
    Float(f64),
    Bool(bool),
    Char(char),
    /// Not assigned during the pass.
    Unset,
}

impl BoundValue {
    fn assign(&mut self, kind: SlotKind, token: &str) -> bool {
        let parsed = match kind {
            SlotKind::String => Some(BoundValue::String(token.to_string())),
            SlotKind::Int => token.parse().ok().map(BoundValue::Int),
            SlotKind::Uint => token.parse().ok().map(BoundValue::Uint),
            SlotKind::Float => token.parse().ok().map(BoundValue::Float),
            SlotKind::Bool => token.parse().ok().map(BoundValue::Bool),
            SlotKind::Char => token.parse().ok().map(BoundValue::Char),
        };
        match parsed {
            Some(value) => {
                *self = value;
                true
            }
            None => false,
        }
    }
}

impl fmt::Display for BoundValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundValue::String(v) => write!(f, "{v:?}"),
            BoundValue::Int(v) => write!(f, "{v}"),
            BoundValue::Uint(v) => write!(f, "{v}"),
            BoundValue::Float(v) => write!(f, "{v}"),
            BoundValue::Bool(v) => write!(f, "{v}"),
            BoundValue::Char(v) => write!(f, "{v:?}"),
            BoundValue::Unset => f.write_str("-"),
        }
    }
}

/// One option declaration in a manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionSpec {
    /// Aliases, e.g. `"-o, --output"`.
    pub declaration: String,
    #[serde(default)]
    pub description: String,
    /// One entry per expected value; ignored for flags.
    #[serde(default)]
    pub slots: Vec<SlotKind>,
    /// Registers a flag instead of a valued option.
    #[serde(default)]
    pub flag: bool,
}

impl OptionSpec {
    /// Storage for the option's values, all unset.
    pub fn unset_values(&self) -> Vec<BoundValue> {
        if self.flag {
            Vec::new()
        } else {
            vec![BoundValue::Unset; self.slots.len()]
        }
    }

    /// Binds `values` (from [`unset_values`](Self::unset_values)) as slots.
    pub fn bind<'a>(&self, values: &'a mut [BoundValue]) -> Vec<Slot<'a>> {
        values
            .iter_mut()
            .zip(&self.slots)
            .map(|(value, &kind)| {
                Slot::from_fn(kind.type_name(), move |token: &str| {
                    value.assign(kind, token)
                })
            })
            .collect()
    }
}

/// A parser configuration plus the options to register.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub parser: ParserConfig,
    pub options: Vec<OptionSpec>,
}

impl Manifest {
    /// Loads a manifest, as JSON for `.json` files and YAML otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError`] when the file cannot be read or parsed, or
    /// when a flag declares slots.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let manifest: Manifest = if is_json {
            serde_json::from_str(&raw)?
        } else {
            serde_yaml::from_str(&raw)?
        };
        manifest.validate()?;
        Ok(manifest)
    }

    fn validate(&self) -> Result<(), ManifestError> {
        for option in &self.options {
            if option.flag && !option.slots.is_empty() {
                return Err(ManifestError::InvalidManifest(format!(
                    "flag '{}' cannot declare slots",
                    option.declaration
                )));
            }
        }
        Ok(())
    }
}

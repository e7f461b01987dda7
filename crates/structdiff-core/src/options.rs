//! Diff options and their configuration-file loaders.
//!
//! Field names on disk follow the public option names:
//!
//! ```toml
//! trackCircularReferences = true
//! arrayPolicy = "atomic"
//! arrayEquality = "reference"
//! keysToSkip = ["updatedAt"]
//! ```
//!
//! Every field is optional and falls back to [`DiffOptions::default`].

use crate::errors::{DiffError, Result};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// How array pairs are compared
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrayPolicy {
    /// Recurse per index, like an object keyed by integers
    #[default]
    Diff,
    /// Compare the whole array as one leaf
    Atomic,
    /// Skip array pairs and everything below them
    Ignore,
}

impl ArrayPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArrayPolicy::Diff => "diff",
            ArrayPolicy::Atomic => "atomic",
            ArrayPolicy::Ignore => "ignore",
        }
    }
}

impl fmt::Display for ArrayPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArrayPolicy {
    type Err = DiffError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "diff" => Ok(ArrayPolicy::Diff),
            "atomic" => Ok(ArrayPolicy::Atomic),
            "ignore" => Ok(ArrayPolicy::Ignore),
            other => Err(DiffError::UnknownArrayPolicy {
                value: other.to_string(),
            }),
        }
    }
}

/// Whole-array equality rule under [`ArrayPolicy::Atomic`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrayEquality {
    /// Same array allocation
    Reference,
    /// Same length and pairwise-equal elements, one level deep
    #[default]
    Shallow,
}

impl ArrayEquality {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArrayEquality::Reference => "reference",
            ArrayEquality::Shallow => "shallow",
        }
    }
}

impl fmt::Display for ArrayEquality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArrayEquality {
    type Err = DiffError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "reference" => Ok(ArrayEquality::Reference),
            "shallow" => Ok(ArrayEquality::Shallow),
            other => Err(DiffError::UnknownArrayEquality {
                value: other.to_string(),
            }),
        }
    }
}

/// Options for a single diff call
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct DiffOptions {
    /// Stop at container pairs already being compared higher up (default: true)
    pub track_circular_references: bool,
    pub array_policy: ArrayPolicy,
    /// Only consulted under [`ArrayPolicy::Atomic`]; unset means shallow
    pub array_equality: Option<ArrayEquality>,
    /// Object keys excluded from comparison; never applied to array indices
    pub keys_to_skip: BTreeSet<String>,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            track_circular_references: true,
            array_policy: ArrayPolicy::Diff,
            array_equality: None,
            keys_to_skip: BTreeSet::new(),
        }
    }
}

impl DiffOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_track_circular_references(mut self, track: bool) -> Self {
        self.track_circular_references = track;
        self
    }

    pub fn with_array_policy(mut self, policy: ArrayPolicy) -> Self {
        self.array_policy = policy;
        self
    }

    pub fn with_array_equality(mut self, equality: ArrayEquality) -> Self {
        self.array_equality = Some(equality);
        self
    }

    /// Add one object key to skip
    pub fn skip_key(mut self, key: impl Into<String>) -> Self {
        self.keys_to_skip.insert(key.into());
        self
    }

    pub fn with_keys_to_skip<I, K>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        self.keys_to_skip.extend(keys.into_iter().map(Into::into));
        self
    }

    pub fn is_skipped(&self, key: &str) -> bool {
        self.keys_to_skip.contains(key)
    }

    /// The array equality rule in force: `Some` only under the atomic policy,
    /// defaulting to shallow when unset.
    pub fn effective_array_equality(&self) -> Option<ArrayEquality> {
        match self.array_policy {
            ArrayPolicy::Atomic => Some(self.array_equality.unwrap_or_default()),
            ArrayPolicy::Diff | ArrayPolicy::Ignore => None,
        }
    }

    /// Parse options from JSON text.
    ///
    /// # Errors
    ///
    /// - `ConfigParse` if the JSON is malformed or holds an unknown field or value
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| DiffError::ConfigParse {
            format: "json".to_string(),
            reason: e.to_string(),
        })
    }

    /// Parse options from TOML text.
    ///
    /// # Errors
    ///
    /// - `ConfigParse` if the TOML is malformed or holds an unknown field or value
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| DiffError::ConfigParse {
            format: "toml".to_string(),
            reason: e.to_string(),
        })
    }

    /// Load options from a `.json` or `.toml` file.
    ///
    /// # Errors
    ///
    /// - `UnsupportedConfigFormat` for any other extension
    /// - `ReadFile` if the file cannot be read
    /// - `ConfigParse` if the contents do not parse
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let path = path.as_ref();
        let shown = path.display().to_string();

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        let parse: fn(&str) -> Result<Self> = match extension.as_deref() {
            Some("json") => Self::from_json_str,
            Some("toml") => Self::from_toml_str,
            _ => return Err(DiffError::UnsupportedConfigFormat { path: shown }),
        };

        let text = std::fs::read_to_string(path).map_err(|e| DiffError::ReadFile {
            path: shown.clone(),
            reason: e.to_string(),
        })?;
        tracing::debug!(path = %shown, "loading diff options");
        parse(&text)
    }
}

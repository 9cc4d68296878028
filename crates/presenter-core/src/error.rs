//! # Error Types
//!
//! Errors surfaced by the projection engine and by presenter configuration
//! loading. All errors use `thiserror` for derive-based `Display` and `Error`
//! implementations.
//!
//! An unknown strategy name is deliberately absent from this module: it
//! degrades to the default presentation instead of failing.

use std::path::PathBuf;

use thiserror::Error;

/// Error raised while presenting a model.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PresentError {
    /// A strategy, or a custom attribute through its context, referenced a
    /// custom attribute the presenter does not declare.
    #[error("unknown custom attribute '{name}'")]
    UnknownCustomAttribute {
        /// The name that could not be resolved.
        name: String,
    },

    /// Custom attributes depend on each other in a cycle.
    #[error("cyclic custom attribute dependency: {}", chain.join(" -> "))]
    CyclicDependency {
        /// The evaluation chain, ending with the re-entered name.
        chain: Vec<String>,
    },

    /// A custom attribute reported a failure of its own.
    #[error("custom attribute '{name}' failed: {message}")]
    Computation {
        /// The failing custom attribute.
        name: String,
        /// What went wrong.
        message: String,
    },

    /// The model is neither a record, a collection, null, nor absent.
    #[error("model must be a record, a collection of records or null; found {found}")]
    UnsupportedModel {
        /// JSON type name of the rejected value.
        found: &'static str,
    },

    /// A collection element is not a record.
    #[error("collection element {index} is not a record; found {found}")]
    NotARecord {
        /// Position of the element in the collection.
        index: usize,
        /// JSON type name of the rejected element.
        found: &'static str,
    },
}

impl PresentError {
    /// Build a [`PresentError::Computation`] from inside a custom attribute.
    pub fn computation(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Computation {
            name: name.into(),
            message: message.into(),
        }
    }
}

/// Error raised while loading a presenter configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The YAML document could not be parsed.
    #[error("invalid YAML presenter configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The JSON document could not be parsed.
    #[error("invalid JSON presenter configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// The configuration file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// The file that failed.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// A custom attribute template is malformed.
    #[error("invalid template for custom attribute '{name}': {message}")]
    Template {
        /// The custom attribute whose template failed to parse.
        name: String,
        /// Parser diagnostic.
        message: String,
    },
}

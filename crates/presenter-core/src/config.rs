//! # Presenter Configuration
//!
//! Strategies are plain data and can live in configuration files next to the
//! application, together with template-based custom attributes (see
//! [`crate::template`]). YAML is the primary format; JSON is accepted too.
//!
//! ```yaml
//! customAttributes:
//!   fullName: "{firstName} {lastName}"
//!   fullNameWithSalutation: "{@salutation}. {@fullName}"
//! strategies:
//!   stationery:
//!     whitelist: [firstName]
//!     customAttributes: [salutation, fullNameWithSalutation]
//! ```
//!
//! A configuration either builds a presenter on its own
//! ([`PresenterConfig::into_presenter`]) or is layered onto a builder that
//! already declares code-defined custom attributes
//! ([`PresenterConfig::apply`]). Configured entries replace same-named ones.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::presenter::{Presenter, PresenterBuilder};
use crate::strategy::Strategy;
use crate::template::Template;

/// Declarative presenter description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PresenterConfig {
    /// Custom attribute name to template source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_attributes: Option<BTreeMap<String, String>>,

    /// Strategy name to strategy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategies: Option<BTreeMap<String, Strategy>>,
}

impl PresenterConfig {
    pub fn from_yaml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(source)?)
    }

    pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(source)?)
    }

    /// Load a configuration file. `.json` files are parsed as JSON, anything
    /// else as YAML.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        tracing::debug!(path = %path.display(), "loading presenter configuration");

        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json_str(&source)
        } else {
            Self::from_yaml_str(&source)
        }
    }

    /// Layer this configuration onto `builder`.
    ///
    /// # Errors
    ///
    /// `ConfigError::Template` if a custom attribute template is malformed.
    pub fn apply(self, mut builder: PresenterBuilder) -> Result<PresenterBuilder, ConfigError> {
        if let Some(templates) = self.custom_attributes {
            let mut attributes = Vec::with_capacity(templates.len());
            for (name, source) in templates {
                let template = Template::parse(&source).map_err(|message| {
                    ConfigError::Template {
                        name: name.clone(),
                        message,
                    }
                })?;
                attributes.push((name, template.into_custom_attribute()));
            }
            tracing::debug!(count = attributes.len(), "configured custom attributes");
            builder = builder.custom_attributes(attributes);
        }

        if let Some(strategies) = self.strategies {
            tracing::debug!(count = strategies.len(), "configured strategies");
            builder = builder.strategies(strategies);
        }

        Ok(builder)
    }

    /// Build a presenter from this configuration alone.
    pub fn into_presenter(self) -> Result<Presenter, ConfigError> {
        Ok(self.apply(Presenter::builder())?.build())
    }
}

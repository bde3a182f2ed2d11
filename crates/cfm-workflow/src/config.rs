//! Step configuration

use crate::{Error, Result};
use cfm_mapping::CoercionPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Configuration of the XML processing step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingConfig {
    /// Reference of the content fragment template to instantiate
    pub content_fragment_template: String,

    /// Directories searched for the template when the reference is not a file
    #[serde(default)]
    pub template_search_paths: Vec<PathBuf>,

    /// Fixed fragment name (default: the asset's base name)
    #[serde(default)]
    pub fragment_name: Option<String>,

    /// Rendition MIME types accepted as XML
    #[serde(default = "default_xml_mime_types")]
    pub xml_mime_types: Vec<String>,

    /// What to do with text that does not parse as its field's type
    #[serde(default)]
    pub coercion_policy: CoercionPolicy,
}

fn default_xml_mime_types() -> Vec<String> {
    vec!["application/xml".to_string(), "text/xml".to_string()]
}

impl ProcessingConfig {
    /// Create a configuration with defaults for everything but the template
    pub fn new(content_fragment_template: impl Into<String>) -> Self {
        Self {
            content_fragment_template: content_fragment_template.into(),
            template_search_paths: Vec::new(),
            fragment_name: None,
            xml_mime_types: default_xml_mime_types(),
            coercion_policy: CoercionPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_fragment_name(mut self, name: impl Into<String>) -> Self {
        self.fragment_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_coercion_policy(mut self, policy: CoercionPolicy) -> Self {
        self.coercion_policy = policy;
        self
    }

    #[must_use]
    pub fn with_search_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.template_search_paths.push(path.into());
        self
    }

    /// Load and validate a configuration file (YAML, or JSON by extension)
    ///
    /// # Errors
    ///
    /// Returns an IO error, or [`Error::Config`] for unparseable or invalid
    /// configuration.
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading processing configuration from {:?}", path);
        let content = std::fs::read_to_string(path)?;

        let config = if path.extension().is_some_and(|e| e == "json") {
            Self::from_json(&content)?
        } else {
            Self::from_yaml(&content)?
        };
        Ok(config)
    }

    /// Parse and validate a YAML configuration
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for unparseable or invalid configuration.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)
            .map_err(|e| Error::Config(format!("YAML parse error: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON configuration
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for unparseable or invalid configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| Error::Config(format!("JSON parse error: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration for values the step cannot run with
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] describing the first problem found.
    pub fn validate(&self) -> Result<()> {
        if self.content_fragment_template.trim().is_empty() {
            return Err(Error::Config(
                "content_fragment_template must not be empty".to_string(),
            ));
        }
        if self.xml_mime_types.is_empty() {
            return Err(Error::Config(
                "xml_mime_types must list at least one MIME type".to_string(),
            ));
        }
        if let Some(name) = &self.fragment_name {
            if name.trim().is_empty() || name.contains('/') {
                return Err(Error::Config(format!("invalid fragment_name '{name}'")));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_defaults() {
        let config =
            ProcessingConfig::from_yaml("content_fragment_template: /conf/models/product\n")
                .unwrap();

        assert_eq!(config.content_fragment_template, "/conf/models/product");
        assert_eq!(config.xml_mime_types, vec!["application/xml", "text/xml"]);
        assert_eq!(config.coercion_policy, CoercionPolicy::Strict);
        assert!(config.fragment_name.is_none());
        assert!(config.template_search_paths.is_empty());
    }

    #[test]
    fn test_yaml_full() {
        let yaml = r"
content_fragment_template: product
template_search_paths: [templates]
fragment_name: newfragment
xml_mime_types: [text/xml]
coercion_policy: lenient
";
        let config = ProcessingConfig::from_yaml(yaml).unwrap();

        assert_eq!(config.fragment_name.as_deref(), Some("newfragment"));
        assert_eq!(config.template_search_paths, vec![PathBuf::from("templates")]);
        assert_eq!(config.coercion_policy, CoercionPolicy::Lenient);
    }

    #[test]
    fn test_json() {
        let config =
            ProcessingConfig::from_json(r#"{"content_fragment_template":"product"}"#).unwrap();
        assert_eq!(config, ProcessingConfig::new("product"));
    }

    #[test]
    fn test_missing_template_rejected() {
        assert!(matches!(
            ProcessingConfig::from_yaml("fragment_name: x\n"),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            ProcessingConfig::from_yaml("content_fragment_template: ' '\n"),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(ProcessingConfig::new("t").with_fragment_name("a/b").validate().is_err());
        let mut config = ProcessingConfig::new("t");
        config.xml_mime_types.clear();
        assert!(config.validate().is_err());
    }
}

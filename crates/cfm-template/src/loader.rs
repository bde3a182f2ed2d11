//! Template loader with search paths and caching

use crate::model::{FieldDescriptor, FragmentTemplate};
use crate::registry::TemplateRegistry;
use crate::{Error, Result};
use regex::Regex;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock};
use tracing::{debug, info, trace};

static FIELD_NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_.:-]*$").expect("field name pattern is valid")
});

const TEMPLATE_EXTENSIONS: [&str; 3] = ["yaml", "yml", "json"];

/// Serializable template format for loading from files
#[derive(Debug, Deserialize)]
struct TemplateFile {
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    fields: Vec<FieldDescriptor>,
}

/// Loads templates from YAML/JSON files and caches them by reference
pub struct TemplateLoader {
    registry: Arc<TemplateRegistry>,
    search_paths: Vec<PathBuf>,
}

impl TemplateLoader {
    /// Create a new template loader with the given search paths
    #[must_use]
    pub fn new(search_paths: Vec<PathBuf>) -> Self {
        Self {
            registry: Arc::new(TemplateRegistry::new()),
            search_paths,
        }
    }

    /// Create a new template loader with a pre-configured registry
    #[must_use]
    pub fn with_registry(registry: Arc<TemplateRegistry>, search_paths: Vec<PathBuf>) -> Self {
        Self {
            registry,
            search_paths,
        }
    }

    /// Add a search path
    pub fn add_path(&mut self, path: PathBuf) {
        self.search_paths.push(path);
    }

    /// Get the underlying registry
    #[must_use]
    pub fn registry(&self) -> &TemplateRegistry {
        &self.registry
    }

    /// Load a template by reference
    ///
    /// The reference is tried as a file path first, then relative to each
    /// search path with and without a template extension. Results are
    /// cached under the reference.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] when no file matches, or a format or
    /// validation error for the file that was found.
    pub fn load(&self, reference: &str) -> Result<Arc<FragmentTemplate>> {
        if let Some(cached) = self.registry.get(reference) {
            debug!("Cache hit for template: {}", reference);
            return Ok(cached);
        }

        trace!("Cache miss for template: {}", reference);

        let path = self.resolve(reference)?;
        let mut template = self.load_from_file(&path)?;
        template.reference = reference.to_string();

        info!(
            "Loaded template '{}' with {} fields from {}",
            template.title,
            template.fields.len(),
            path.display()
        );

        Ok(self.registry.register(reference, template))
    }

    /// Load a template from a specific file path (uncached)
    ///
    /// # Errors
    ///
    /// Returns an IO, format or validation error.
    pub fn load_from_file(&self, path: &Path) -> Result<FragmentTemplate> {
        trace!("Loading template from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;

        let mut template = if path.extension().is_some_and(|e| e == "json") {
            self.load_from_json(&content)?
        } else {
            self.load_from_yaml(&content)?
        };
        template.reference = path.to_string_lossy().to_string();
        Ok(template)
    }

    /// Load a template from a JSON string
    ///
    /// # Errors
    ///
    /// Returns a format or validation error.
    pub fn load_from_json(&self, json: &str) -> Result<FragmentTemplate> {
        let file: TemplateFile = serde_json::from_str(json)
            .map_err(|e| Error::InvalidFormat(format!("JSON parse error: {e}")))?;

        Self::convert_template_file(file)
    }

    /// Load a template from a YAML string
    ///
    /// # Errors
    ///
    /// Returns a format or validation error.
    pub fn load_from_yaml(&self, yaml: &str) -> Result<FragmentTemplate> {
        let file: TemplateFile = serde_yaml::from_str(yaml)
            .map_err(|e| Error::InvalidFormat(format!("YAML parse error: {e}")))?;

        Self::convert_template_file(file)
    }

    fn convert_template_file(file: TemplateFile) -> Result<FragmentTemplate> {
        let template = FragmentTemplate {
            reference: String::new(),
            title: file.title,
            description: file.description,
            fields: file.fields,
        };
        validate_template(&template)?;
        Ok(template)
    }

    /// Find the file backing a reference
    fn resolve(&self, reference: &str) -> Result<PathBuf> {
        let direct = PathBuf::from(reference);
        if direct.is_file() {
            return Ok(direct);
        }

        let relative = reference.trim_start_matches('/');
        for base in &self.search_paths {
            let candidate = base.join(relative);
            if candidate.is_file() {
                trace!("Found template file: {:?}", candidate);
                return Ok(candidate);
            }

            for extension in TEMPLATE_EXTENSIONS {
                let candidate = base.join(format!("{relative}.{extension}"));
                if candidate.is_file() {
                    trace!("Found template file: {:?}", candidate);
                    return Ok(candidate);
                }
            }
        }

        Err(Error::NotFound(format!(
            "{reference} (search paths: {:?})",
            self.search_paths
        )))
    }
}

impl Default for TemplateLoader {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

/// Check the structural rules every template must satisfy
///
/// # Errors
///
/// Returns [`Error::Validation`] for an empty title, an empty field list,
/// invalid field names, or duplicate field names.
pub fn validate_template(template: &FragmentTemplate) -> Result<()> {
    if template.title.trim().is_empty() {
        return Err(Error::validation(&template.reference, "title must not be empty"));
    }
    if template.fields.is_empty() {
        return Err(Error::validation(&template.title, "template declares no fields"));
    }

    let mut seen = HashSet::new();
    for field in &template.fields {
        if !FIELD_NAME_PATTERN.is_match(&field.name) {
            return Err(Error::validation(
                &template.title,
                format!("invalid field name '{}'", field.name),
            ));
        }
        if !seen.insert(field.name.as_str()) {
            return Err(Error::validation(
                &template.title,
                format!("duplicate field name '{}'", field.name),
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FieldType;

    const PRODUCT_YAML: &str = r"
title: Product
description: Product data imported from supplier feeds
fields:
  - name: name
    type: string
  - name: price
    type: double
    label: Price
  - name: stock
    type: long
  - name: launchDate
    type: calendar
";

    #[test]
    fn test_load_from_yaml() {
        let loader = TemplateLoader::default();
        let template = loader.load_from_yaml(PRODUCT_YAML).unwrap();

        assert_eq!(template.title, "Product");
        assert_eq!(template.fields.len(), 4);
        assert_eq!(template.fields[1].field_type, FieldType::FloatingPoint);
        assert_eq!(template.fields[2].field_type, FieldType::Integer);
        assert_eq!(
            template.fields[3].field_type,
            FieldType::Other("calendar".to_string())
        );
    }

    #[test]
    fn test_missing_type_defaults_to_text() {
        let loader = TemplateLoader::default();
        let template = loader
            .load_from_yaml("title: Color\nfields:\n  - name: color\n")
            .unwrap();
        assert_eq!(template.fields[0].field_type, FieldType::Text);
    }

    #[test]
    fn test_load_from_json() {
        let loader = TemplateLoader::default();
        let template = loader
            .load_from_json(
                r#"{"title":"Product","fields":[{"name":"sku","type":"string","source_path":"ids/sku"}]}"#,
            )
            .unwrap();
        assert_eq!(template.fields[0].source_path.as_deref(), Some("ids/sku"));
    }

    #[test]
    fn test_load_from_yaml_invalid() {
        let loader = TemplateLoader::default();
        let result = loader.load_from_yaml("title: [");
        assert!(matches!(result, Err(Error::InvalidFormat(_))));
    }

    #[test]
    fn test_duplicate_field_rejected() {
        let loader = TemplateLoader::default();
        let result =
            loader.load_from_yaml("title: T\nfields:\n  - name: a\n  - name: a\n");
        let err = result.unwrap_err().to_string();
        assert!(err.contains("duplicate field name 'a'"), "{err}");
    }

    #[test]
    fn test_invalid_field_name_rejected() {
        let loader = TemplateLoader::default();
        let result = loader.load_from_yaml("title: T\nfields:\n  - name: '1abc'\n");
        assert!(matches!(result, Err(Error::Validation { .. })));
    }

    #[test]
    fn test_empty_field_list_rejected() {
        let loader = TemplateLoader::default();
        assert!(loader.load_from_yaml("title: T\n").is_err());
    }

    #[test]
    fn test_not_found() {
        let loader = TemplateLoader::default();
        assert!(matches!(
            loader.load("/conf/missing/template"),
            Err(Error::NotFound(_))
        ));
    }
}

//! Template cache shared between workflow step instances

use crate::model::FragmentTemplate;
use dashmap::DashMap;
use std::sync::Arc;

/// Concurrent registry of loaded templates, keyed by reference
#[derive(Debug, Default)]
pub struct TemplateRegistry {
    templates: DashMap<String, Arc<FragmentTemplate>>,
}

impl TemplateRegistry {
    /// Create a new empty registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            templates: DashMap::new(),
        }
    }

    /// Register a template, replacing any previous entry for the reference
    pub fn register(&self, reference: impl Into<String>, template: FragmentTemplate) -> Arc<FragmentTemplate> {
        let template = Arc::new(template);
        self.templates.insert(reference.into(), Arc::clone(&template));
        template
    }

    /// Get a template by reference
    #[must_use]
    pub fn get(&self, reference: &str) -> Option<Arc<FragmentTemplate>> {
        self.templates.get(reference).map(|entry| Arc::clone(entry.value()))
    }

    /// Check if a template is cached
    #[must_use]
    pub fn contains(&self, reference: &str) -> bool {
        self.templates.contains_key(reference)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Drop all cached templates
    pub fn clear(&self) {
        self.templates.clear();
    }
}

//! Content fragments and the store that persists them

use crate::StoreError;
use cfm_ir::Value;
use cfm_mapping::FieldValueMapping;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A content fragment created from a template
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentFragment {
    pub path: String,
    pub name: String,
    pub title: String,
    /// Reference of the template the fragment was created from
    pub template: String,
    pub elements: FieldValueMapping,
    pub created_at: DateTime<Utc>,
}

/// Creation and persistence of content fragments
pub trait FragmentStore {
    /// Whether a fragment exists at `path`
    fn exists(&self, path: &str) -> bool;

    /// Persist a fragment
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::AlreadyExists`] when a fragment already lives at
    /// the fragment's path, or an IO/serialization error.
    fn commit(&self, fragment: &ContentFragment) -> Result<(), StoreError>;

    /// Create an uncommitted fragment under `parent`
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::AlreadyExists`] when the name is taken.
    fn create(
        &self,
        parent: &str,
        name: &str,
        title: &str,
        template: &str,
    ) -> Result<ContentFragment, StoreError> {
        let path = fragment_path(parent, name);
        if self.exists(&path) {
            return Err(StoreError::AlreadyExists { path });
        }

        Ok(ContentFragment {
            path,
            name: name.to_string(),
            title: title.to_string(),
            template: template.to_string(),
            elements: FieldValueMapping::new(),
            created_at: Utc::now(),
        })
    }
}

impl ContentFragment {
    /// Copy mapped values onto the fragment's elements
    pub fn apply(&mut self, mapping: &FieldValueMapping) {
        for (field, value) in mapping.iter() {
            self.elements.insert(field, value.clone());
        }
    }

    #[must_use]
    pub fn element(&self, name: &str) -> Option<&Value> {
        self.elements.get(name)
    }
}

/// Path of a fragment named `name` inside `parent`
#[must_use]
pub fn fragment_path(parent: &str, name: &str) -> String {
    let trimmed = parent.trim_end_matches('/');
    if !trimmed.is_empty() {
        format!("{trimmed}/{name}")
    } else if parent.starts_with('/') {
        format!("/{name}")
    } else {
        name.to_string()
    }
}

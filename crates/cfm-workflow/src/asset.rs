//! Assets, their renditions, and the store that serves them

use crate::StoreError;
use serde::{Deserialize, Serialize};

/// Path segment separating an asset from its renditions
pub const RENDITIONS_MARKER: &str = "/jcr:content/renditions/";

/// A digital asset with its renditions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub path: String,
    pub renditions: Vec<Rendition>,
}

/// An alternate representation of an asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rendition {
    pub name: String,
    pub path: String,
    pub mime_type: String,
}

/// Read access to assets and rendition content
pub trait AssetStore {
    /// Resolve a payload path (asset or rendition path) to its asset
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the backing storage fails; an unknown
    /// path is `Ok(None)`.
    fn resolve(&self, payload_path: &str) -> Result<Option<Asset>, StoreError>;

    /// Read the binary content of a rendition
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] for unknown renditions, or an IO error.
    fn read_rendition(&self, rendition: &Rendition) -> Result<Vec<u8>, StoreError>;
}

impl Asset {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            renditions: Vec::new(),
        }
    }

    /// Add a rendition; its path is derived from the asset path
    #[must_use]
    pub fn with_rendition(mut self, name: &str, mime_type: &str) -> Self {
        self.renditions.push(Rendition {
            name: name.to_string(),
            path: rendition_path(&self.path, name),
            mime_type: mime_type.to_string(),
        });
        self
    }

    /// Last path segment
    #[must_use]
    pub fn name(&self) -> &str {
        self.path
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or_default()
    }

    /// Name without its final extension
    #[must_use]
    pub fn base_name(&self) -> &str {
        let name = self.name();
        match name.rfind('.') {
            Some(idx) if idx > 0 => &name[..idx],
            _ => name,
        }
    }

    /// Path of the folder containing the asset
    #[must_use]
    pub fn parent_path(&self) -> &str {
        let trimmed = self.path.trim_end_matches('/');
        match trimmed.rfind('/') {
            Some(0) => "/",
            Some(idx) => &trimmed[..idx],
            None => "",
        }
    }

    /// First rendition whose MIME type is one of `mime_types`
    #[must_use]
    pub fn find_rendition(&self, mime_types: &[String]) -> Option<&Rendition> {
        self.renditions.iter().find(|rendition| {
            mime_types
                .iter()
                .any(|mime| mime.eq_ignore_ascii_case(&rendition.mime_type))
        })
    }
}

/// Build the path of a named rendition of an asset
#[must_use]
pub fn rendition_path(asset_path: &str, rendition: &str) -> String {
    format!("{}{RENDITIONS_MARKER}{rendition}", asset_path.trim_end_matches('/'))
}

/// Path of the asset owning `path`, which may itself be a rendition path
#[must_use]
pub fn owning_asset_path(path: &str) -> &str {
    match path.find(RENDITIONS_MARKER) {
        Some(idx) => &path[..idx],
        None => path,
    }
}

/// MIME type for a file name, by extension
#[must_use]
pub fn mime_type_for(name: &str) -> &'static str {
    let extension = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "xml" => "application/xml",
        "json" => "application/json",
        "txt" => "text/plain",
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "pdf" => "application/pdf",
        _ => "application/octet-stream",
    }
}

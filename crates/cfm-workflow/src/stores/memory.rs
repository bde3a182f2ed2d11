//! In-memory asset and fragment stores

use crate::asset::{owning_asset_path, Asset, AssetStore, Rendition};
use crate::fragment::{ContentFragment, FragmentStore};
use crate::StoreError;
use std::collections::HashMap;
use std::sync::RwLock;
use tracing::debug;

/// Assets and rendition content held in memory
#[derive(Debug, Default)]
pub struct InMemoryAssetStore {
    assets: HashMap<String, Asset>,
    content: HashMap<String, Vec<u8>>,
}

impl InMemoryAssetStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an asset
    pub fn insert(&mut self, asset: Asset) -> &mut Self {
        self.assets.insert(asset.path.clone(), asset);
        self
    }

    /// Set the content of a rendition, by rendition path
    pub fn set_content(&mut self, rendition_path: impl Into<String>, content: impl Into<Vec<u8>>) -> &mut Self {
        self.content.insert(rendition_path.into(), content.into());
        self
    }
}

impl AssetStore for InMemoryAssetStore {
    fn resolve(&self, payload_path: &str) -> Result<Option<Asset>, StoreError> {
        let asset_path = owning_asset_path(payload_path);
        Ok(self.assets.get(asset_path).cloned())
    }

    fn read_rendition(&self, rendition: &Rendition) -> Result<Vec<u8>, StoreError> {
        self.content
            .get(&rendition.path)
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                path: rendition.path.clone(),
            })
    }
}

/// Committed fragments held in memory
#[derive(Debug, Default)]
pub struct InMemoryFragmentStore {
    fragments: RwLock<HashMap<String, ContentFragment>>,
}

impl InMemoryFragmentStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a committed fragment by path
    #[must_use]
    pub fn get(&self, path: &str) -> Option<ContentFragment> {
        self.fragments
            .read()
            .ok()
            .and_then(|fragments| fragments.get(path).cloned())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fragments.read().map(|f| f.len()).unwrap_or_default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FragmentStore for InMemoryFragmentStore {
    fn exists(&self, path: &str) -> bool {
        self.fragments
            .read()
            .map(|fragments| fragments.contains_key(path))
            .unwrap_or(false)
    }

    fn commit(&self, fragment: &ContentFragment) -> Result<(), StoreError> {
        let mut fragments = self.fragments.write().map_err(|_| StoreError::Io {
            operation: "commit".to_string(),
            path: fragment.path.clone(),
            message: "fragment store lock poisoned".to_string(),
        })?;

        if fragments.contains_key(&fragment.path) {
            return Err(StoreError::AlreadyExists {
                path: fragment.path.clone(),
            });
        }

        debug!("Committed fragment {} in memory", fragment.path);
        fragments.insert(fragment.path.clone(), fragment.clone());
        Ok(())
    }
}

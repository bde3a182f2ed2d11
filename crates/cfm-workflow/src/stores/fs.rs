//! Filesystem-backed asset and fragment stores

use crate::asset::{mime_type_for, owning_asset_path, Asset, AssetStore, Rendition};
use crate::fragment::{ContentFragment, FragmentStore};
use crate::StoreError;
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Serves files as single-rendition assets
///
/// A payload path names a file (optionally under `root`); the asset's only
/// rendition is `original`, typed by the file extension.
#[derive(Debug, Clone, Default)]
pub struct FsAssetStore {
    root: PathBuf,
}

impl FsAssetStore {
    /// Store resolving payload paths as given
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store resolving payload paths relative to `root`
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn file_for(&self, path: &str) -> PathBuf {
        resolve_under(&self.root, path)
    }
}

impl AssetStore for FsAssetStore {
    fn resolve(&self, payload_path: &str) -> Result<Option<Asset>, StoreError> {
        let asset_path = owning_asset_path(payload_path);
        let file = self.file_for(asset_path);

        if !file.is_file() {
            debug!("No asset file at {:?}", file);
            return Ok(None);
        }

        let asset = Asset::new(asset_path);
        let mime_type = mime_type_for(asset.name());
        Ok(Some(asset.with_rendition("original", mime_type)))
    }

    fn read_rendition(&self, rendition: &Rendition) -> Result<Vec<u8>, StoreError> {
        let file = self.file_for(owning_asset_path(&rendition.path));
        std::fs::read(&file).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                StoreError::NotFound {
                    path: rendition.path.clone(),
                }
            } else {
                StoreError::io("read rendition", file.to_string_lossy(), &e)
            }
        })
    }
}

/// Writes committed fragments as pretty JSON files `<parent>/<name>.json`
#[derive(Debug, Clone, Default)]
pub struct FsFragmentStore {
    root: PathBuf,
}

impl FsFragmentStore {
    /// Store writing fragments at their paths as given
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store writing fragments below `root`
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// File a fragment at `fragment_path` is written to
    #[must_use]
    pub fn file_for(&self, fragment_path: &str) -> PathBuf {
        resolve_under(&self.root, &format!("{fragment_path}.json"))
    }
}

impl FragmentStore for FsFragmentStore {
    fn exists(&self, path: &str) -> bool {
        self.file_for(path).exists()
    }

    fn commit(&self, fragment: &ContentFragment) -> Result<(), StoreError> {
        let file = self.file_for(&fragment.path);
        let file_display = file.to_string_lossy().to_string();

        let json = serde_json::to_string_pretty(fragment).map_err(|e| StoreError::Serialization {
            path: fragment.path.clone(),
            message: e.to_string(),
        })?;

        if let Some(dir) = file.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)
                .map_err(|e| StoreError::io("create fragment folder", dir.to_string_lossy(), &e))?;
        }
        let mut out = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&file)
            .map_err(|e| {
                if e.kind() == ErrorKind::AlreadyExists {
                    StoreError::AlreadyExists {
                        path: fragment.path.clone(),
                    }
                } else {
                    StoreError::io("commit", file_display.as_str(), &e)
                }
            })?;
        out.write_all(json.as_bytes())
            .map_err(|e| StoreError::io("commit", file_display.as_str(), &e))?;

        info!("Committed fragment {} to {}", fragment.path, file_display);
        Ok(())
    }
}

/// Join a repository-style path onto `root`; an empty root keeps the path as is
fn resolve_under(root: &Path, path: &str) -> PathBuf {
    if root.as_os_str().is_empty() {
        PathBuf::from(path)
    } else {
        root.join(path.trim_start_matches('/'))
    }
}

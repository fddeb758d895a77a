//! Filesystem storage: one pretty-printed JSON file per document.

use super::{BoxFuture, Storage, StorageError, StorageResult};
use crate::canvas::CanvasModel;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct FileStorage {
    base_path: PathBuf,
}

impl FileStorage {
    /// Store documents under `base_path`, creating it if needed.
    pub fn new(base_path: PathBuf) -> StorageResult<Self> {
        fs::create_dir_all(&base_path).map_err(|source| StorageError::Io {
            path: base_path.clone(),
            source,
        })?;
        Ok(Self { base_path })
    }

    /// Store documents in the platform data directory.
    ///
    /// On Unix: `~/.local/share/inkmark/documents/`
    pub fn default_location() -> StorageResult<Self> {
        let base = dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .ok_or(StorageError::NoLocation)?;
        Self::new(base.join("inkmark").join("documents"))
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// File backing a document id. Characters outside `[A-Za-z0-9_-]` become `_`.
    pub fn document_path(&self, id: &str) -> PathBuf {
        let name: String = id
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.base_path.join(format!("{}.json", name))
    }
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> StorageError + '_ {
    move |source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    }
}

impl Storage for FileStorage {
    fn save(&self, id: &str, document: &CanvasModel) -> BoxFuture<'_, StorageResult<()>> {
        let path = self.document_path(id);
        let json = document.to_json().map_err(|source| StorageError::Document {
            id: id.to_string(),
            source,
        });
        Box::pin(async move {
            fs::write(&path, json?).map_err(io_error(&path))?;
            log::info!("Saved {}", path.display());
            Ok(())
        })
    }

    fn load(&self, id: &str) -> BoxFuture<'_, StorageResult<CanvasModel>> {
        let path = self.document_path(id);
        let id = id.to_string();
        Box::pin(async move {
            if !path.exists() {
                return Err(StorageError::NotFound(id));
            }
            let json = fs::read_to_string(&path).map_err(io_error(&path))?;
            CanvasModel::from_json(&json).map_err(|source| StorageError::Document { id, source })
        })
    }

    fn delete(&self, id: &str) -> BoxFuture<'_, StorageResult<()>> {
        let path = self.document_path(id);
        Box::pin(async move {
            if path.exists() {
                fs::remove_file(&path).map_err(io_error(&path))?;
            }
            Ok(())
        })
    }

    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>> {
        Box::pin(async move {
            let entries = fs::read_dir(&self.base_path).map_err(io_error(&self.base_path))?;
            let ids = entries
                .flatten()
                .map(|entry| entry.path())
                .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
                .filter_map(|path| path.file_stem().and_then(|s| s.to_str()).map(str::to_string))
                .collect();
            Ok(ids)
        })
    }

    fn exists(&self, id: &str) -> BoxFuture<'_, StorageResult<bool>> {
        let path = self.document_path(id);
        Box::pin(async move { Ok(path.exists()) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::ModelColor;
    use crate::shapes::ArrowModel;
    use crate::storage::block_on;
    use kurbo::Point;
    use tempfile::tempdir;

    #[test]
    fn test_file_round_trip() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("docs")).unwrap();
        let mut document = CanvasModel::new();
        document.append(ArrowModel::new(Point::ZERO, Point::new(60.0, 10.0), ModelColor::GREEN).into());

        block_on(storage.save("shot-1", &document)).unwrap();
        assert!(storage.document_path("shot-1").exists());
        assert_eq!(block_on(storage.load("shot-1")).unwrap(), document);
        assert_eq!(block_on(storage.list()).unwrap(), vec!["shot-1".to_string()]);

        block_on(storage.delete("shot-1")).unwrap();
        assert!(!block_on(storage.exists("shot-1")).unwrap());
    }

    #[test]
    fn test_missing_and_corrupt() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();
        assert!(matches!(block_on(storage.load("nope")), Err(StorageError::NotFound(_))));

        fs::write(storage.document_path("broken"), "{ not json").unwrap();
        assert!(matches!(block_on(storage.load("broken")), Err(StorageError::Document { .. })));
    }

    #[test]
    fn test_ids_are_sanitized() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();
        let path = storage.document_path("../etc/passwd");
        assert_eq!(path.parent(), Some(dir.path()));
        assert_eq!(path.file_name().and_then(|n| n.to_str()), Some("___etc_passwd.json"));
    }
}

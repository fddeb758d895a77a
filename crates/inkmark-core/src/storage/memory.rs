//! In-memory storage.

use super::{BoxFuture, Storage, StorageError, StorageResult};
use crate::canvas::CanvasModel;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Documents kept in a map, for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    documents: RwLock<HashMap<String, CanvasModel>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(err: PoisonError<T>) -> StorageError {
    StorageError::Poisoned(err.to_string())
}

impl Storage for MemoryStorage {
    fn save(&self, id: &str, document: &CanvasModel) -> BoxFuture<'_, StorageResult<()>> {
        let id = id.to_string();
        let document = document.clone();
        Box::pin(async move {
            self.documents.write().map_err(poisoned)?.insert(id, document);
            Ok(())
        })
    }

    fn load(&self, id: &str) -> BoxFuture<'_, StorageResult<CanvasModel>> {
        let id = id.to_string();
        Box::pin(async move {
            let documents = self.documents.read().map_err(poisoned)?;
            documents.get(&id).cloned().ok_or(StorageError::NotFound(id))
        })
    }

    fn delete(&self, id: &str) -> BoxFuture<'_, StorageResult<()>> {
        let id = id.to_string();
        Box::pin(async move {
            self.documents.write().map_err(poisoned)?.remove(&id);
            Ok(())
        })
    }

    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>> {
        Box::pin(async move { Ok(self.documents.read().map_err(poisoned)?.keys().cloned().collect()) })
    }

    fn exists(&self, id: &str) -> BoxFuture<'_, StorageResult<bool>> {
        let id = id.to_string();
        Box::pin(async move { Ok(self.documents.read().map_err(poisoned)?.contains_key(&id)) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::ModelColor;
    use crate::shapes::RectModel;
    use crate::storage::block_on;
    use kurbo::Point;

    fn document() -> CanvasModel {
        let mut model = CanvasModel::new();
        model.append(RectModel::new(Point::ZERO, Point::new(40.0, 40.0), ModelColor::YELLOW).into());
        model
    }

    #[test]
    fn test_save_load_delete() {
        let storage = MemoryStorage::new();
        block_on(storage.save("notes", &document())).unwrap();
        assert_eq!(block_on(storage.load("notes")).unwrap(), document());
        assert!(block_on(storage.exists("notes")).unwrap());

        block_on(storage.delete("notes")).unwrap();
        assert!(!block_on(storage.exists("notes")).unwrap());
        assert!(matches!(block_on(storage.load("notes")), Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_list() {
        let storage = MemoryStorage::new();
        block_on(storage.save("a", &document())).unwrap();
        block_on(storage.save("b", &CanvasModel::new())).unwrap();

        let mut ids = block_on(storage.list()).unwrap();
        ids.sort();
        assert_eq!(ids, vec!["a".to_string(), "b".to_string()]);
    }
}

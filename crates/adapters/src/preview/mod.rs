use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use swatchbook_application::{ApplicationError, PreviewStore};
use swatchbook_domain::{PreviewRef, UploadFile};
use tracing::debug;

/// Keeps uploaded bytes in memory until their preview is revoked.
#[derive(Default)]
pub struct InMemoryPreviewStore {
    next_id: AtomicU64,
    entries: Mutex<HashMap<u64, Arc<[u8]>>>,
}

impl InMemoryPreviewStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreviewStore for InMemoryPreviewStore {
    fn create(&self, file: UploadFile) -> Result<PreviewRef, ApplicationError> {
        if file.bytes.is_empty() {
            return Err(ApplicationError::InvalidInput(format!(
                "uploaded file is empty: {}",
                file.name
            )));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let size = file.bytes.len();
        self.entries
            .lock()
            .map_err(|_| ApplicationError::Io("preview store lock poisoned".to_string()))?
            .insert(id, Arc::from(file.bytes.into_boxed_slice()));
        debug!(id, size, file_name = %file.name, "preview created");

        Ok(PreviewRef {
            id,
            file_name: file.name,
        })
    }

    fn bytes(&self, preview: &PreviewRef) -> Result<Arc<[u8]>, ApplicationError> {
        self.entries
            .lock()
            .map_err(|_| ApplicationError::Io("preview store lock poisoned".to_string()))?
            .get(&preview.id)
            .cloned()
            .ok_or_else(|| {
                ApplicationError::NotFound(format!("preview revoked or unknown: {}", preview.id))
            })
    }

    fn revoke(&self, preview: &PreviewRef) {
        if let Ok(mut entries) = self.entries.lock() {
            if entries.remove(&preview.id).is_some() {
                debug!(id = preview.id, "preview revoked");
            }
        }
    }

    fn live_previews(&self) -> usize {
        self.entries.lock().map(|entries| entries.len()).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(name: &str, bytes: &[u8]) -> UploadFile {
        UploadFile {
            name: name.to_string(),
            bytes: bytes.to_vec(),
        }
    }

    #[test]
    fn create_resolve_and_revoke() {
        let store = InMemoryPreviewStore::new();
        let first = store.create(upload("a.png", b"abc")).expect("create");
        let second = store.create(upload("b.png", b"xyz")).expect("create");
        assert_ne!(first.id, second.id);
        assert_eq!(store.live_previews(), 2);
        assert_eq!(store.bytes(&first).expect("bytes").as_ref(), b"abc");

        store.revoke(&first);
        store.revoke(&first);
        assert_eq!(store.live_previews(), 1);
        assert!(matches!(
            store.bytes(&first),
            Err(ApplicationError::NotFound(_))
        ));
    }

    #[test]
    fn empty_uploads_are_rejected() {
        let store = InMemoryPreviewStore::new();
        let result = store.create(upload("empty.png", b""));
        assert!(matches!(result, Err(ApplicationError::InvalidInput(_))));
        assert_eq!(store.live_previews(), 0);
    }
}

//! Same-process object references (`blob:` URLs)

use bytes::Bytes;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use folio_core::constants::OBJECT_URL_PREFIX;

#[derive(Debug, Clone)]
struct ObjectEntry {
    mime_type: String,
    data: Bytes,
}

/// Registry of in-memory payloads addressable by an object URL.
///
/// Cloning shares the underlying registry.
#[derive(Clone, Default)]
pub struct ObjectUrlRegistry {
    entries: Arc<RwLock<HashMap<String, ObjectEntry>>>,
}

impl ObjectUrlRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_object_url(value: &str) -> bool {
        value.starts_with(OBJECT_URL_PREFIX)
    }

    /// Register bytes and return the object URL that resolves to them
    pub async fn create_object_url(
        &self,
        mime_type: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> String {
        let url = format!("{}{}", OBJECT_URL_PREFIX, Uuid::new_v4());
        let mut entries = self.entries.write().await;
        entries.insert(
            url.clone(),
            ObjectEntry {
                mime_type: mime_type.into(),
                data: data.into(),
            },
        );
        url
    }

    /// Release an object URL; returns whether it was registered
    pub async fn revoke_object_url(&self, url: &str) -> bool {
        let mut entries = self.entries.write().await;
        entries.remove(url).is_some()
    }

    /// Look up the MIME type and bytes behind an object URL
    pub async fn resolve(&self, url: &str) -> Option<(String, Bytes)> {
        let entries = self.entries.read().await;
        entries
            .get(url)
            .map(|entry| (entry.mime_type.clone(), entry.data.clone()))
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

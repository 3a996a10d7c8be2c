//! Local preview handles for selected files.
//!
//! A `PreviewHandle` stands in for a browser object URL. The store keeps
//! track of every live URL and a handle revokes its URL when dropped, so a
//! superseded selection or an unmounted form never leaks previews.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use sha2::{Digest, Sha256};

use crate::media::MediaFile;

/// Prefix for every preview URL.
pub const PREVIEW_URL_PREFIX: &str = "blob:cover-studio/";

#[derive(Debug, Default)]
struct Inner {
    live: Mutex<HashSet<String>>,
    seq: AtomicU64,
}

/// Issues and tracks preview URLs. Cheap to clone; clones share state.
#[derive(Debug, Clone, Default)]
pub struct PreviewStore {
    inner: Arc<Inner>,
}

impl PreviewStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a preview URL for `file`.
    pub fn create(&self, file: &MediaFile) -> PreviewHandle {
        let seq = self.inner.seq.fetch_add(1, Ordering::Relaxed);
        let url = format!("{}{}", PREVIEW_URL_PREFIX, Self::hash_file(file, seq));

        self.inner
            .live
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(url.clone());
        log::debug!("Created preview {} for {}", url, file.name);

        PreviewHandle {
            url,
            store: self.clone(),
        }
    }

    /// Number of preview URLs that have not been revoked.
    pub fn live_count(&self) -> usize {
        self.inner
            .live
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_live(&self, url: &str) -> bool {
        self.inner
            .live
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(url)
    }

    fn revoke(&self, url: &str) {
        self.inner
            .live
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(url);
        log::debug!("Revoked preview {}", url);
    }

    /// First 8 bytes of SHA256(name, size, seq), hex encoded.
    fn hash_file(file: &MediaFile, seq: u64) -> String {
        let mut hasher = Sha256::new();
        hasher.update(file.name.as_bytes());
        hasher.update(file.size().to_le_bytes());
        hasher.update(seq.to_le_bytes());
        let result = hasher.finalize();
        hex::encode(&result[..8])
    }
}

/// A live preview URL. Revoked on drop.
#[derive(Debug)]
pub struct PreviewHandle {
    url: String,
    store: PreviewStore,
}

impl PreviewHandle {
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Drop for PreviewHandle {
    fn drop(&mut self) {
        self.store.revoke(&self.url);
    }
}

//! File slots and drop zones backing the forms' upload inputs.

use crate::media::{Accept, MediaFile};
use crate::preview::{PreviewHandle, PreviewStore};

/// Rejected file selection.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SelectionError {
    #[error("{message}")]
    UnsupportedType {
        mime: String,
        message: &'static str,
    },
}

/// One file input: at most one selected file plus its preview.
#[derive(Debug)]
pub struct FileSlot {
    accept: Accept,
    previews: PreviewStore,
    current: Option<Selected>,
}

#[derive(Debug)]
struct Selected {
    file: MediaFile,
    preview: PreviewHandle,
}

impl FileSlot {
    pub fn new(accept: Accept, previews: PreviewStore) -> Self {
        Self {
            accept,
            previews,
            current: None,
        }
    }

    pub fn accept(&self) -> Accept {
        self.accept
    }

    /// Select `file`. A disallowed MIME type leaves the slot untouched.
    pub fn select(&mut self, file: MediaFile) -> Result<(), SelectionError> {
        if !self.accept.allows(&file.mime) {
            return Err(SelectionError::UnsupportedType {
                mime: file.mime,
                message: self.accept.rejection,
            });
        }

        // Old preview goes before the new one is created.
        self.current = None;
        let preview = self.previews.create(&file);
        self.current = Some(Selected { file, preview });
        Ok(())
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn file(&self) -> Option<&MediaFile> {
        self.current.as_ref().map(|s| &s.file)
    }

    pub fn preview_url(&self) -> Option<&str> {
        self.current.as_ref().map(|s| s.preview.url())
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }
}

/// Visual state of a drag-and-drop target.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DropZone {
    active: bool,
}

impl DropZone {
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn drag_enter(&mut self, file_count: usize) {
        if file_count > 0 {
            self.active = true;
        }
    }

    pub fn drag_over(&mut self, file_count: usize) {
        if file_count > 0 {
            self.active = true;
        }
    }

    pub fn drag_leave(&mut self) {
        self.active = false;
    }

    /// Clear the active state and hand back the first dropped file, if any.
    pub fn drop_files(&mut self, files: Vec<MediaFile>) -> Option<MediaFile> {
        self.active = false;
        files.into_iter().next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, mime: &str) -> MediaFile {
        MediaFile::new(name, mime, vec![0u8; 8])
    }

    #[test]
    fn test_select_accepted_file_creates_preview() {
        let store = PreviewStore::new();
        let mut slot = FileSlot::new(Accept::IMAGE, store.clone());

        slot.select(file("a.png", "image/png")).unwrap();

        assert_eq!(slot.file().map(|f| f.name.as_str()), Some("a.png"));
        assert!(slot.preview_url().is_some());
        assert_eq!(store.live_count(), 1);
    }

    #[test]
    fn test_select_rejected_keeps_previous_selection() {
        let store = PreviewStore::new();
        let mut slot = FileSlot::new(Accept::IMAGE, store.clone());
        slot.select(file("a.jpg", "image/jpeg")).unwrap();
        let url = slot.preview_url().unwrap().to_string();

        let err = slot.select(file("b.gif", "image/gif")).unwrap_err();

        assert_eq!(err.to_string(), "Only JPG and PNG images are supported");
        assert_eq!(slot.file().map(|f| f.name.as_str()), Some("a.jpg"));
        assert_eq!(slot.preview_url(), Some(url.as_str()));
        assert!(store.is_live(&url));
    }

    #[test]
    fn test_reselect_releases_previous_preview() {
        let store = PreviewStore::new();
        let mut slot = FileSlot::new(Accept::VIDEO, store.clone());
        slot.select(file("a.mp4", "video/mp4")).unwrap();
        let first = slot.preview_url().unwrap().to_string();

        slot.select(file("b.webm", "video/webm")).unwrap();

        assert!(!store.is_live(&first));
        assert_eq!(store.live_count(), 1);
        assert_ne!(slot.preview_url(), Some(first.as_str()));
    }

    #[test]
    fn test_clear_releases_preview() {
        let store = PreviewStore::new();
        let mut slot = FileSlot::new(Accept::IMAGE, store.clone());
        slot.select(file("a.png", "image/png")).unwrap();

        slot.clear();

        assert!(slot.is_empty());
        assert_eq!(store.live_count(), 0);
    }

    #[test]
    fn test_drop_zone_requires_files_to_activate() {
        let mut zone = DropZone::default();
        zone.drag_enter(0);
        assert!(!zone.is_active());
        zone.drag_over(0);
        assert!(!zone.is_active());
        zone.drag_enter(1);
        assert!(zone.is_active());
    }

    #[test]
    fn test_drop_zone_leave_and_drop_clear_active() {
        let mut zone = DropZone::default();
        zone.drag_over(2);
        zone.drag_leave();
        assert!(!zone.is_active());

        zone.drag_enter(1);
        let dropped = zone.drop_files(vec![file("a.png", "image/png"), file("b.png", "image/png")]);
        assert!(!zone.is_active());
        assert_eq!(dropped.map(|f| f.name), Some("a.png".to_string()));
    }

    #[test]
    fn test_drop_without_files() {
        let mut zone = DropZone::default();
        zone.drag_enter(1);
        assert!(zone.drop_files(Vec::new()).is_none());
        assert!(!zone.is_active());
    }
}

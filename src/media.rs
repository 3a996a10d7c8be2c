//! Selectable media files and the MIME allow-lists the forms enforce.

use std::path::Path;

/// Documented upload ceiling shown in drop-zone hints. Not enforced client-side.
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// MIME type used when the extension is unknown.
pub const FALLBACK_MIME: &str = "application/octet-stream";

/// A file chosen through the picker or dropped onto a drop zone.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaFile {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl MediaFile {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            bytes,
        }
    }

    /// Read a file from disk, deriving its MIME type from the extension.
    pub fn from_path(path: &Path) -> Result<Self, MediaError> {
        let bytes = std::fs::read(path).map_err(|source| MediaError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Ok(Self {
            mime: mime_for_path(path).to_string(),
            name,
            bytes,
        })
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Map a file extension to the MIME type a browser would report for it.
pub fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("mp4") => "video/mp4",
        Some("webm") => "video/webm",
        Some("mov") => "video/quicktime",
        _ => FALLBACK_MIME,
    }
}

/// MIME allow-list for a file input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Accept {
    pub types: &'static [&'static str],
    pub formats: &'static str,
    pub rejection: &'static str,
}

impl Accept {
    pub const IMAGE: Accept = Accept {
        types: &["image/jpeg", "image/png"],
        formats: "PNG, JPG",
        rejection: "Only JPG and PNG images are supported",
    };

    pub const VIDEO: Accept = Accept {
        types: &["video/mp4", "video/webm"],
        formats: "MP4, WebM",
        rejection: "Only MP4 and WebM videos are supported",
    };

    pub fn allows(&self, mime: &str) -> bool {
        self.types.contains(&mime)
    }

    /// Hint rendered under the drop zone, e.g. `PNG, JPG up to 10MB`.
    pub fn hint(&self) -> String {
        format!(
            "{} up to {}MB",
            self.formats,
            MAX_UPLOAD_BYTES / (1024 * 1024)
        )
    }
}

#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("Failed to read '{path}': {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_mime_for_known_extensions() {
        assert_eq!(mime_for_path(Path::new("a.JPG")), "image/jpeg");
        assert_eq!(mime_for_path(Path::new("a.jpeg")), "image/jpeg");
        assert_eq!(mime_for_path(Path::new("a.png")), "image/png");
        assert_eq!(mime_for_path(Path::new("clip.webm")), "video/webm");
        assert_eq!(mime_for_path(Path::new("clip.mp4")), "video/mp4");
        assert_eq!(mime_for_path(Path::new("anim.gif")), "image/gif");
    }

    #[test]
    fn test_mime_for_unknown_extension_falls_back() {
        assert_eq!(mime_for_path(Path::new("notes.txt")), FALLBACK_MIME);
        assert_eq!(mime_for_path(Path::new("no_extension")), FALLBACK_MIME);
    }

    #[test]
    fn test_accept_image_allow_list() {
        assert!(Accept::IMAGE.allows("image/jpeg"));
        assert!(Accept::IMAGE.allows("image/png"));
        assert!(!Accept::IMAGE.allows("image/gif"));
        assert!(!Accept::IMAGE.allows("video/mp4"));
    }

    #[test]
    fn test_accept_video_allow_list() {
        assert!(Accept::VIDEO.allows("video/mp4"));
        assert!(Accept::VIDEO.allows("video/webm"));
        assert!(!Accept::VIDEO.allows("video/quicktime"));
    }

    #[test]
    fn test_accept_hint() {
        assert_eq!(Accept::IMAGE.hint(), "PNG, JPG up to 10MB");
        assert_eq!(Accept::VIDEO.hint(), "MP4, WebM up to 10MB");
    }

    #[test]
    fn test_from_path_reads_bytes_and_mime() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lantern.png");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(b"\x89PNG").unwrap();

        let file = MediaFile::from_path(&path).unwrap();
        assert_eq!(file.name, "lantern.png");
        assert_eq!(file.mime, "image/png");
        assert_eq!(file.size(), 4);
    }

    #[test]
    fn test_from_path_missing_file() {
        let result = MediaFile::from_path(Path::new("/nonexistent/cover.png"));
        assert!(matches!(result, Err(MediaError::Read { .. })));
    }
}

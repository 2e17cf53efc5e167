//! Upload references
//!
//! The host application reads files chosen by the user and hands them over
//! as in-memory blobs. The engine never decodes audio or video content; it
//! only keeps the reference and its metadata.

use std::fmt;

use bytes::Bytes;

/// Broad media category of an upload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Image,
    Audio,
    Video,
    Other,
}

impl MediaKind {
    /// Classify a MIME type such as `image/png`
    pub fn from_media_type(media_type: &str) -> Self {
        match media_type.split('/').next().unwrap_or_default() {
            "image" => MediaKind::Image,
            "audio" => MediaKind::Audio,
            "video" => MediaKind::Video,
            _ => MediaKind::Other,
        }
    }
}

/// Reference to an uploaded blob
#[derive(Clone, PartialEq, Eq)]
pub struct UploadRef {
    /// Original file name
    pub name: String,
    /// MIME type reported by the picker
    pub media_type: String,
    /// Blob contents (cheaply cloneable)
    pub data: Bytes,
}

impl UploadRef {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, data: Bytes) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            data,
        }
    }

    pub fn kind(&self) -> MediaKind {
        MediaKind::from_media_type(&self.media_type)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl fmt::Debug for UploadRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadRef")
            .field("name", &self.name)
            .field("media_type", &self.media_type)
            .field("len", &self.data.len())
            .finish()
    }
}

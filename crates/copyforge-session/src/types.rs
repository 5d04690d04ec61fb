//! Core data types for selected files.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identity of a selected file.
///
/// Assigned by the [`Session`](crate::Session) when a file enters a
/// selection, from a counter that only ever increases. Two files picked
/// with identical names and timestamps still get distinct ids, so list
/// rendering can key on this value instead of on file metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FileId(u64);

impl FileId {
    /// Raw sequence number.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "file-{}", self.0)
    }
}

/// Monotonic source of [`FileId`]s.
#[derive(Debug, Default)]
pub(crate) struct FileIdSequence {
    next: u64,
}

impl FileIdSequence {
    pub(crate) const fn next_id(&mut self) -> FileId {
        let id = FileId(self.next);
        self.next += 1;
        id
    }
}

/// Which selection a file belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    /// Product image. Gets a preview handle.
    Image,
    /// Reference document. No preview.
    Generic,
}

impl FileKind {
    /// Noun used in status text, pluralized for `count`.
    #[must_use]
    pub const fn noun(self, count: usize) -> &'static str {
        match (self, count) {
            (Self::Image, 1) => "image",
            (Self::Image, _) => "images",
            (Self::Generic, 1) => "file",
            (Self::Generic, _) => "files",
        }
    }
}

/// A file as delivered by the file picker, before the session has
/// assigned it an identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickedFile<B> {
    /// File name including extension.
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// Last-modified timestamp in milliseconds since the Unix epoch.
    pub last_modified: u64,
    /// The file contents, opaque to the session.
    pub payload: B,
}

impl<B> PickedFile<B> {
    /// Convenience constructor.
    pub fn new(name: impl Into<String>, size: u64, last_modified: u64, payload: B) -> Self {
        Self {
            name: name.into(),
            size,
            last_modified,
            payload,
        }
    }
}

/// A file owned by one of the session's selections.
///
/// Immutable once chosen. Display code borrows it; it is never copied
/// out except by [`GenerationRequest`](crate::GenerationRequest)
/// snapshots, which clone the (cheaply clonable) payload handle.
#[derive(Debug, Clone)]
pub struct SelectedFile<B> {
    id: FileId,
    name: String,
    size: u64,
    last_modified: u64,
    payload: B,
}

impl<B> SelectedFile<B> {
    pub(crate) fn from_picked(id: FileId, picked: PickedFile<B>) -> Self {
        Self {
            id,
            name: picked.name,
            size: picked.size,
            last_modified: picked.last_modified,
            payload: picked.payload,
        }
    }

    #[must_use]
    pub const fn id(&self) -> FileId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn size(&self) -> u64 {
        self.size
    }

    #[must_use]
    pub const fn last_modified(&self) -> u64 {
        self.last_modified
    }

    #[must_use]
    pub const fn payload(&self) -> &B {
        &self.payload
    }
}

/// Format a byte count as kilobytes with two decimal places (`"1.50"`).
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_kb(bytes: u64) -> String {
    format!("{:.2}", bytes as f64 / 1024.0)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn id_sequence_is_monotonic() {
        let mut seq = FileIdSequence::default();
        let a = seq.next_id();
        let b = seq.next_id();
        let c = seq.next_id();
        assert!(a < b && b < c);
        assert_eq!(a.get(), 0);
        assert_eq!(c.get(), 2);
    }

    #[test]
    fn file_id_display() {
        let mut seq = FileIdSequence::default();
        seq.next_id();
        assert_eq!(seq.next_id().to_string(), "file-1");
    }

    #[test]
    fn format_kb_two_decimals() {
        assert_eq!(format_kb(0), "0.00");
        assert_eq!(format_kb(1024), "1.00");
        assert_eq!(format_kb(1536), "1.50");
        assert_eq!(format_kb(100), "0.10");
        assert_eq!(format_kb(5 * 1024 * 1024), "5120.00");
    }

    #[test]
    fn selected_file_keeps_picked_metadata() {
        let picked = PickedFile::new("a.png", 42, 1_700_000_000_000, "bytes");
        let file = SelectedFile::from_picked(FileIdSequence::default().next_id(), picked);
        assert_eq!(file.name(), "a.png");
        assert_eq!(file.size(), 42);
        assert_eq!(file.last_modified(), 1_700_000_000_000);
        assert_eq!(*file.payload(), "bytes");
    }

    #[test]
    fn kind_nouns_pluralize() {
        assert_eq!(FileKind::Image.noun(1), "image");
        assert_eq!(FileKind::Image.noun(2), "images");
        assert_eq!(FileKind::Generic.noun(1), "file");
        assert_eq!(FileKind::Generic.noun(0), "files");
    }

    #[test]
    fn kind_serializes_snake_case() {
        let json = serde_json::to_string(&FileKind::Generic).unwrap();
        assert_eq!(json, "\"generic\"");
    }
}

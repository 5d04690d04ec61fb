//! Ordered file selections.
//!
//! A [`Selection`] is an append-mostly list of [`SelectedFile`]s with a
//! revision counter. Every mutation bumps the revision, which is what the
//! preview lifecycle keys on to decide whether its handles are stale.

use crate::types::{FileId, FileKind, SelectedFile};

/// Errors from selection mutations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    /// Removal was requested for an index that does not exist.
    #[error("{kind:?} index {index} out of range for selection of {len}")]
    IndexOutOfRange {
        /// Which selection the removal targeted.
        kind: FileKind,
        /// The requested index.
        index: usize,
        /// Length of the selection at the time of the request.
        len: usize,
    },
    /// Removal was requested for a file that is no longer selected.
    #[error("{kind:?} {id} is not selected")]
    UnknownFile {
        /// Which selection the removal targeted.
        kind: FileKind,
        /// The requested file.
        id: FileId,
    },
}

/// An ordered sequence of selected files of one [`FileKind`].
#[derive(Debug, Clone)]
pub struct Selection<B> {
    kind: FileKind,
    files: Vec<SelectedFile<B>>,
    revision: u64,
}

impl<B> Selection<B> {
    #[must_use]
    pub const fn new(kind: FileKind) -> Self {
        Self {
            kind,
            files: Vec::new(),
            revision: 0,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> FileKind {
        self.kind
    }

    /// Files in selection order.
    #[must_use]
    pub fn files(&self) -> &[SelectedFile<B>] {
        &self.files
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&SelectedFile<B>> {
        self.files.get(index)
    }

    /// Position of the file with `id`, if present.
    #[must_use]
    pub fn position(&self, id: FileId) -> Option<usize> {
        self.files.iter().position(|f| f.id() == id)
    }

    /// Number of mutations applied so far.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Append `files` after the existing entries, keeping their order.
    ///
    /// Does nothing (and leaves the revision alone) if `files` is empty.
    pub(crate) fn extend(&mut self, files: impl IntoIterator<Item = SelectedFile<B>>) -> usize {
        let before = self.files.len();
        self.files.extend(files);
        let added = self.files.len() - before;
        if added > 0 {
            self.revision += 1;
        }
        added
    }

    /// Remove the entry at `index`, shifting later entries down by one.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::IndexOutOfRange`] without touching the
    /// selection if `index >= len`.
    pub(crate) fn remove(&mut self, index: usize) -> Result<SelectedFile<B>, SelectionError> {
        if index >= self.files.len() {
            return Err(SelectionError::IndexOutOfRange {
                kind: self.kind,
                index,
                len: self.files.len(),
            });
        }
        self.revision += 1;
        Ok(self.files.remove(index))
    }

    /// Remove every entry. Bumps the revision even if already empty so
    /// callers observing it always see a fresh, empty revision.
    pub(crate) fn clear(&mut self) {
        self.files.clear();
        self.revision += 1;
    }
}

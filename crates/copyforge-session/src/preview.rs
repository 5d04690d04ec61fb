//! Preview-handle lifecycle.
//!
//! Image previews are displayed through short-lived handles (object URLs
//! in the browser) that must be released explicitly. [`PreviewSet`]
//! keeps exactly one slot per image, positionally aligned with the
//! image [`Selection`], and swaps the whole set whenever the selection's
//! revision moves:
//!
//! 1. a fresh handle is created for every current image (handles are
//!    never carried over, even for images present in both revisions);
//! 2. the new set is installed;
//! 3. every handle of the previous revision is released.
//!
//! Installing before releasing means the page never renders a released
//! handle. Dropping the set releases whatever it still holds.

use std::fmt;
use std::marker::PhantomData;

use crate::selection::Selection;
use crate::types::{FileId, SelectedFile};

/// Creates and releases preview handles for selected files.
pub trait PreviewProvider<B> {
    /// A live preview reference, e.g. an object URL string.
    type Handle;
    type Error: fmt::Display;

    /// Create a handle for `file`.
    ///
    /// # Errors
    ///
    /// Returns the provider's error if no handle could be made. The
    /// file then has an empty slot.
    fn create(&self, file: &SelectedFile<B>) -> Result<Self::Handle, Self::Error>;

    /// Release a handle previously returned by [`create`](Self::create).
    /// Called exactly once per handle.
    fn release(&self, handle: Self::Handle);
}

/// One image's preview. `handle` is `None` if creation failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewSlot<H> {
    pub id: FileId,
    pub handle: Option<H>,
}

/// The set of live preview handles for one revision of the image
/// selection.
pub struct PreviewSet<B, P: PreviewProvider<B>> {
    provider: P,
    revision: Option<u64>,
    slots: Vec<PreviewSlot<P::Handle>>,
    _files: PhantomData<fn(&B)>,
}

impl<B, P: PreviewProvider<B>> PreviewSet<B, P> {
    pub const fn new(provider: P) -> Self {
        Self {
            provider,
            revision: None,
            slots: Vec::new(),
            _files: PhantomData,
        }
    }

    /// Bring the set in line with `selection`.
    ///
    /// Does nothing if the selection's revision has already been
    /// refreshed. Returns whether handles were swapped.
    pub fn refresh(&mut self, selection: &Selection<B>) -> bool {
        let revision = selection.revision();
        if self.revision == Some(revision) {
            return false;
        }

        let fresh: Vec<_> = selection
            .files()
            .iter()
            .map(|file| PreviewSlot {
                id: file.id(),
                handle: match self.provider.create(file) {
                    Ok(handle) => Some(handle),
                    Err(e) => {
                        tracing::warn!("no preview for {}: {e}", file.name());
                        None
                    }
                },
            })
            .collect();

        let stale = std::mem::replace(&mut self.slots, fresh);
        self.revision = Some(revision);
        let released = self.release_slots(stale);
        tracing::debug!(
            "preview revision {revision}: {} created, {released} released",
            self.slots.len()
        );
        true
    }

    /// Release every handle and forget the revision, so the next
    /// [`refresh`](Self::refresh) rebuilds from scratch.
    pub fn release_all(&mut self) {
        let stale = std::mem::take(&mut self.slots);
        self.revision = None;
        self.release_slots(stale);
    }

    #[must_use]
    pub fn slots(&self) -> &[PreviewSlot<P::Handle>] {
        &self.slots
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Revision of the selection the current handles were built for.
    #[must_use]
    pub const fn revision(&self) -> Option<u64> {
        self.revision
    }

    /// Handle for the image at `index`.
    #[must_use]
    pub fn handle_at(&self, index: usize) -> Option<&P::Handle> {
        self.slots.get(index).and_then(|s| s.handle.as_ref())
    }

    /// Handle for the image with `id`.
    #[must_use]
    pub fn handle_for(&self, id: FileId) -> Option<&P::Handle> {
        self.slots
            .iter()
            .find(|s| s.id == id)
            .and_then(|s| s.handle.as_ref())
    }

    fn release_slots(&self, slots: Vec<PreviewSlot<P::Handle>>) -> usize {
        let mut released = 0;
        for handle in slots.into_iter().filter_map(|s| s.handle) {
            self.provider.release(handle);
            released += 1;
        }
        released
    }
}

impl<B, P: PreviewProvider<B>> Drop for PreviewSet<B, P> {
    fn drop(&mut self) {
        self.release_all();
    }
}

impl<B, P: PreviewProvider<B>> fmt::Debug for PreviewSet<B, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreviewSet")
            .field("revision", &self.revision)
            .field("slots", &self.slots.len())
            .finish_non_exhaustive()
    }
}

//! The application state coordinator.
//!
//! [`Session`] owns both file selections, the processing flag and the
//! feedback slot. Every user action maps to one method here; the UI
//! layer only renders what the session holds.

use crate::feedback::Feedback;
use crate::generate::{GenerationError, GenerationRequest};
use crate::selection::{Selection, SelectionError};
use crate::trace::{self, Operation, Snapshot};
use crate::types::{FileId, FileIdSequence, FileKind, PickedFile, SelectedFile};

/// Selection and generation state for one page.
#[derive(Debug)]
pub struct Session<B> {
    ids: FileIdSequence,
    images: Selection<B>,
    files: Selection<B>,
    processing: bool,
    feedback: Option<Feedback>,
    last_result: Option<String>,
}

impl<B> Default for Session<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B> Session<B> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            ids: FileIdSequence::default(),
            images: Selection::new(FileKind::Image),
            files: Selection::new(FileKind::Generic),
            processing: false,
            feedback: None,
            last_result: None,
        }
    }

    #[must_use]
    pub const fn images(&self) -> &Selection<B> {
        &self.images
    }

    #[must_use]
    pub const fn generic_files(&self) -> &Selection<B> {
        &self.files
    }

    #[must_use]
    pub const fn is_processing(&self) -> bool {
        self.processing
    }

    #[must_use]
    pub const fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    /// Text produced by the most recent successful generation.
    #[must_use]
    pub fn last_result(&self) -> Option<&str> {
        self.last_result.as_deref()
    }

    /// Whether anything at all is selected.
    #[must_use]
    pub fn has_selection(&self) -> bool {
        !self.images.is_empty() || !self.files.is_empty()
    }

    /// Whether the generate control should be offered.
    #[must_use]
    pub fn can_generate(&self) -> bool {
        self.has_selection() && !self.processing
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            images: self.images.len(),
            files: self.files.len(),
            processing: self.processing,
        }
    }

    /// Append newly picked images. No-op for an empty pick (cancelled
    /// dialog).
    pub fn add_images(&mut self, picked: Vec<PickedFile<B>>) {
        self.add(FileKind::Image, picked);
    }

    /// Append newly picked reference files. No-op for an empty pick.
    pub fn add_generic_files(&mut self, picked: Vec<PickedFile<B>>) {
        self.add(FileKind::Generic, picked);
    }

    /// Remove the image at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::IndexOutOfRange`] if `index` does not
    /// name a current image; the session is left untouched.
    pub fn remove_image_at(&mut self, index: usize) -> Result<SelectedFile<B>, SelectionError> {
        self.remove(FileKind::Image, index)
    }

    /// Remove the reference file at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::IndexOutOfRange`] if `index` does not
    /// name a current file; the session is left untouched.
    pub fn remove_generic_file_at(
        &mut self,
        index: usize,
    ) -> Result<SelectedFile<B>, SelectionError> {
        self.remove(FileKind::Generic, index)
    }

    /// Remove the image with identity `id`, wherever it now sits.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::UnknownFile`] if `id` is not a current
    /// image; the session is left untouched.
    pub fn remove_image(&mut self, id: FileId) -> Result<SelectedFile<B>, SelectionError> {
        self.remove_id(FileKind::Image, id)
    }

    /// Remove the reference file with identity `id`.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::UnknownFile`] if `id` is not a current
    /// reference file; the session is left untouched.
    pub fn remove_generic_file(&mut self, id: FileId) -> Result<SelectedFile<B>, SelectionError> {
        self.remove_id(FileKind::Generic, id)
    }

    /// Drop every image and clear the status slot.
    pub fn clear_images(&mut self) {
        self.clear(FileKind::Image);
    }

    /// Drop every reference file and clear the status slot.
    pub fn clear_generic_files(&mut self) {
        self.clear(FileKind::Generic);
    }

    /// Open the generation interval.
    ///
    /// On success the processing flag is set and the returned request is
    /// a snapshot of both selections. Every `Ok` must be matched by one
    /// [`finish_generation`](Self::finish_generation).
    ///
    /// # Errors
    ///
    /// - [`GenerationError::EmptySelection`] if nothing is selected. The
    ///   status slot shows the error; nothing else changes.
    /// - [`GenerationError::InFlight`] if a generation is already open.
    ///   Nothing changes.
    pub fn begin_generation(&mut self) -> Result<GenerationRequest<B>, GenerationError>
    where
        B: Clone,
    {
        let span = trace::enter(Operation::BeginGeneration, self.snapshot());
        if self.processing {
            span.exit(self.snapshot(), "in_flight");
            return Err(GenerationError::InFlight);
        }
        if !self.has_selection() {
            self.feedback = Some(Feedback::EmptySelection);
            span.exit(self.snapshot(), "empty_selection");
            return Err(GenerationError::EmptySelection);
        }
        self.processing = true;
        self.last_result = None;
        self.feedback = Some(Feedback::Generating);
        let request = GenerationRequest::new(
            self.images.files().to_vec(),
            self.files.files().to_vec(),
        );
        span.exit(self.snapshot(), "ok");
        Ok(request)
    }

    /// Close the generation interval with its outcome.
    ///
    /// Always clears the processing flag. A failure is reported through
    /// the status slot, never returned.
    pub fn finish_generation(&mut self, outcome: Result<String, GenerationError>) {
        let span = trace::enter(Operation::FinishGeneration, self.snapshot());
        self.processing = false;
        let tag = match outcome {
            Ok(text) => {
                self.last_result = Some(text);
                self.feedback = Some(Feedback::Generated);
                "ok"
            }
            Err(e) => {
                tracing::warn!("generation failed: {e}");
                self.feedback = Some(Feedback::GenerationFailed(e.to_string()));
                "failed"
            }
        };
        span.exit(self.snapshot(), tag);
    }

    const fn selection_mut(&mut self, kind: FileKind) -> &mut Selection<B> {
        match kind {
            FileKind::Image => &mut self.images,
            FileKind::Generic => &mut self.files,
        }
    }

    fn add(&mut self, kind: FileKind, picked: Vec<PickedFile<B>>) {
        let op = match kind {
            FileKind::Image => Operation::AddImages,
            FileKind::Generic => Operation::AddGenericFiles,
        };
        let span = trace::enter(op, self.snapshot());
        if picked.is_empty() {
            span.exit(self.snapshot(), "noop");
            return;
        }
        let ids = &mut self.ids;
        let selected: Vec<_> = picked
            .into_iter()
            .map(|p| SelectedFile::from_picked(ids.next_id(), p))
            .collect();
        let count = self.selection_mut(kind).extend(selected);
        self.feedback = Some(Feedback::Selected { kind, count });
        span.exit(self.snapshot(), "ok");
    }

    fn remove(&mut self, kind: FileKind, index: usize) -> Result<SelectedFile<B>, SelectionError> {
        let op = match kind {
            FileKind::Image => Operation::RemoveImage,
            FileKind::Generic => Operation::RemoveGenericFile,
        };
        let span = trace::enter(op, self.snapshot());
        let selection = self.selection_mut(kind);
        let removed = match selection.remove(index) {
            Ok(removed) => removed,
            Err(e) => {
                span.exit(self.snapshot(), "rejected");
                return Err(e);
            }
        };
        let count = selection.len();
        self.feedback = (count > 0).then_some(Feedback::Remaining { kind, count });
        span.exit(self.snapshot(), "ok");
        Ok(removed)
    }

    fn remove_id(&mut self, kind: FileKind, id: FileId) -> Result<SelectedFile<B>, SelectionError> {
        let selection = match kind {
            FileKind::Image => &self.images,
            FileKind::Generic => &self.files,
        };
        let index = selection
            .position(id)
            .ok_or(SelectionError::UnknownFile { kind, id })?;
        self.remove(kind, index)
    }

    fn clear(&mut self, kind: FileKind) {
        let op = match kind {
            FileKind::Image => Operation::ClearImages,
            FileKind::Generic => Operation::ClearGenericFiles,
        };
        let span = trace::enter(op, self.snapshot());
        self.selection_mut(kind).clear();
        self.feedback = None;
        span.exit(self.snapshot(), "ok");
    }
}

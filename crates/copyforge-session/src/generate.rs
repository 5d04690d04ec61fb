//! The copy-generation call and its single-flight driver.
//!
//! A [`Generator`] turns a [`GenerationRequest`] into text. The remote
//! service that will eventually sit behind it has no defined contract
//! yet, so [`SimulatedGenerator`] stands in: it waits and then returns a
//! fixed result.
//!
//! [`run_generation`] owns the processing interval. It opens it on the
//! session, awaits the generator, and closes it again on every exit path,
//! including the future being dropped before it completes.

use std::cell::RefCell;
use std::future::Future;
use std::marker::PhantomData;
use std::pin::pin;

use futures::future::{Either, select};
use serde::Serialize;

use crate::session::Session;
use crate::types::{FileId, FileKind, SelectedFile};

/// Text returned by [`SimulatedGenerator`].
pub const SIMULATED_RESULT: &str = "Copy generated. (This is a simulated result.)";

/// Errors from a generation attempt.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    /// Nothing was selected.
    #[error("no images or files selected")]
    EmptySelection,

    /// A generation is already running.
    #[error("a generation is already in progress")]
    InFlight,

    /// The generation service reported a failure.
    #[error("generation service error: {0}")]
    Remote(String),

    /// The call did not finish before its deadline.
    #[error("generation timed out")]
    TimedOut,

    /// The call was abandoned before it finished.
    #[error("generation was cancelled")]
    Cancelled,
}

/// Snapshot of both selections taken when a generation starts.
#[derive(Debug, Clone)]
pub struct GenerationRequest<B> {
    images: Vec<SelectedFile<B>>,
    generic_files: Vec<SelectedFile<B>>,
}

impl<B> GenerationRequest<B> {
    pub(crate) const fn new(
        images: Vec<SelectedFile<B>>,
        generic_files: Vec<SelectedFile<B>>,
    ) -> Self {
        Self {
            images,
            generic_files,
        }
    }

    #[must_use]
    pub fn images(&self) -> &[SelectedFile<B>] {
        &self.images
    }

    #[must_use]
    pub fn generic_files(&self) -> &[SelectedFile<B>] {
        &self.generic_files
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty() && self.generic_files.is_empty()
    }

    /// Check the request before it is sent.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::EmptySelection`] if the request carries
    /// no files.
    pub fn validate(&self) -> Result<(), GenerationError> {
        if self.is_empty() {
            return Err(GenerationError::EmptySelection);
        }
        Ok(())
    }

    /// Serializable description of the request, without payloads.
    #[must_use]
    pub fn manifest(&self) -> RequestManifest {
        let entries = |files: &[SelectedFile<B>], kind: FileKind| -> Vec<ManifestEntry> {
            files
                .iter()
                .map(|f| ManifestEntry {
                    id: f.id(),
                    kind,
                    name: f.name().to_owned(),
                    size: f.size(),
                    last_modified: f.last_modified(),
                })
                .collect()
        };
        RequestManifest {
            images: entries(&self.images, FileKind::Image),
            files: entries(&self.generic_files, FileKind::Generic),
        }
    }
}

/// Metadata-only view of a [`GenerationRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestManifest {
    pub images: Vec<ManifestEntry>,
    pub files: Vec<ManifestEntry>,
}

/// One file in a [`RequestManifest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestEntry {
    pub id: FileId,
    pub kind: FileKind,
    pub name: String,
    pub size: u64,
    pub last_modified: u64,
}

/// Produces copy text from selected files.
#[allow(async_fn_in_trait)] // single-threaded; implementors need not be Send
pub trait Generator<B> {
    /// Generate text for `request`.
    ///
    /// # Errors
    ///
    /// Returns a [`GenerationError`] describing why no text was produced.
    async fn generate(&self, request: GenerationRequest<B>) -> Result<String, GenerationError>;
}

/// Placeholder generator: waits on a delay future, then succeeds with
/// [`SIMULATED_RESULT`].
///
/// `make_delay` builds a fresh delay per call, so the timer source is
/// up to the caller (a browser timeout in the app, an immediately ready
/// future in tests).
pub struct SimulatedGenerator<M> {
    make_delay: M,
}

impl<M> SimulatedGenerator<M> {
    pub const fn new(make_delay: M) -> Self {
        Self { make_delay }
    }
}

impl<B, M, D> Generator<B> for SimulatedGenerator<M>
where
    M: Fn() -> D,
    D: Future<Output = ()>,
{
    async fn generate(&self, request: GenerationRequest<B>) -> Result<String, GenerationError> {
        let manifest = request.manifest();
        match serde_json::to_string(&manifest) {
            Ok(json) => tracing::debug!("simulated generation request: {json}"),
            Err(e) => tracing::warn!("could not serialize request manifest: {e}"),
        }
        (self.make_delay)().await;
        Ok(SIMULATED_RESULT.to_owned())
    }
}

/// Wraps a generator so every call races a deadline.
pub struct WithDeadline<G, M> {
    inner: G,
    make_deadline: M,
}

impl<G, M> WithDeadline<G, M> {
    pub const fn new(inner: G, make_deadline: M) -> Self {
        Self {
            inner,
            make_deadline,
        }
    }
}

impl<B, G, M, D> Generator<B> for WithDeadline<G, M>
where
    G: Generator<B>,
    M: Fn() -> D,
    D: Future<Output = ()>,
{
    async fn generate(&self, request: GenerationRequest<B>) -> Result<String, GenerationError> {
        with_deadline(self.inner.generate(request), (self.make_deadline)()).await
    }
}

/// Await `work`, or fail with [`GenerationError::TimedOut`] if
/// `deadline` completes first.
///
/// # Errors
///
/// Returns `work`'s own error, or [`GenerationError::TimedOut`].
pub async fn with_deadline<F, D>(work: F, deadline: D) -> Result<String, GenerationError>
where
    F: Future<Output = Result<String, GenerationError>>,
    D: Future<Output = ()>,
{
    let work = pin!(work);
    let deadline = pin!(deadline);
    match select(work, deadline).await {
        Either::Left((outcome, _)) => outcome,
        Either::Right(((), _)) => Err(GenerationError::TimedOut),
    }
}

/// Shared access to a [`Session`] from async code.
///
/// Updates are short synchronous closures; no borrow is held across an
/// `.await`.
pub trait SessionStore<B> {
    fn update<R>(&self, f: impl FnOnce(&mut Session<B>) -> R) -> R;

    /// Like [`update`](Self::update) but gives up instead of failing when
    /// the session is unavailable (already borrowed, or torn down).
    fn try_update<R>(&self, f: impl FnOnce(&mut Session<B>) -> R) -> Option<R> {
        Some(self.update(f))
    }
}

impl<B> SessionStore<B> for RefCell<Session<B>> {
    fn update<R>(&self, f: impl FnOnce(&mut Session<B>) -> R) -> R {
        f(&mut *self.borrow_mut())
    }

    fn try_update<R>(&self, f: impl FnOnce(&mut Session<B>) -> R) -> Option<R> {
        self.try_borrow_mut().ok().map(|mut s| f(&mut *s))
    }
}

/// Closes the processing interval if the driver is dropped mid-flight.
struct FinishGuard<'a, B, S: SessionStore<B>> {
    store: &'a S,
    armed: bool,
    _session: PhantomData<fn(B)>,
}

impl<'a, B, S: SessionStore<B>> FinishGuard<'a, B, S> {
    const fn new(store: &'a S) -> Self {
        Self {
            store,
            armed: true,
            _session: PhantomData,
        }
    }

    fn finish(mut self, outcome: Result<String, GenerationError>) {
        self.armed = false;
        self.store.update(|s| s.finish_generation(outcome));
    }
}

impl<B, S: SessionStore<B>> Drop for FinishGuard<'_, B, S> {
    fn drop(&mut self) {
        if self.armed {
            let _ = self
                .store
                .try_update(|s| s.finish_generation(Err(GenerationError::Cancelled)));
        }
    }
}

/// Run one generation against `store`.
///
/// Opens the processing interval, validates and sends the request, and
/// closes the interval with the outcome. Generator failures end up in
/// the session's status slot, not in the return value.
///
/// # Errors
///
/// Returns the [`Session::begin_generation`] error if the interval could
/// not be opened (nothing selected, or already running).
#[allow(clippy::future_not_send)] // WASM is single-threaded; Send is not needed
pub async fn run_generation<B, S, G>(store: &S, generator: &G) -> Result<(), GenerationError>
where
    B: Clone,
    S: SessionStore<B>,
    G: Generator<B>,
{
    let request = store.update(Session::begin_generation)?;
    let guard = FinishGuard::new(store);
    let outcome = match request.validate() {
        Ok(()) => generator.generate(request).await,
        Err(e) => Err(e),
    };
    guard.finish(outcome);
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::Cell;

    use futures::FutureExt;
    use futures::executor::block_on;
    use futures::future::{pending, ready};

    use super::*;
    use crate::feedback::{Feedback, Tone};
    use crate::types::PickedFile;

    fn session_with_image() -> RefCell<Session<()>> {
        let mut s = Session::new();
        s.add_images(vec![PickedFile::new("a.png", 10, 5, ())]);
        RefCell::new(s)
    }

    /// Records whether the session was processing while it ran.
    struct Probe<'a> {
        store: &'a RefCell<Session<()>>,
        seen_processing: Cell<Option<bool>>,
        outcome: Result<String, GenerationError>,
    }

    impl Generator<()> for Probe<'_> {
        async fn generate(
            &self,
            _request: GenerationRequest<()>,
        ) -> Result<String, GenerationError> {
            self.seen_processing
                .set(Some(self.store.borrow().is_processing()));
            self.outcome.clone()
        }
    }

    struct Stalled;

    impl Generator<()> for Stalled {
        async fn generate(
            &self,
            _request: GenerationRequest<()>,
        ) -> Result<String, GenerationError> {
            pending::<()>().await;
            Ok(String::new())
        }
    }

    #[test]
    fn flag_is_set_only_while_generating() {
        let store = session_with_image();
        let probe = Probe {
            store: &store,
            seen_processing: Cell::new(None),
            outcome: Ok("done".into()),
        };
        assert!(!store.borrow().is_processing());
        block_on(run_generation(&store, &probe)).unwrap();
        assert_eq!(probe.seen_processing.get(), Some(true));
        assert!(!store.borrow().is_processing());
        assert_eq!(store.borrow().last_result(), Some("done"));
    }

    #[test]
    fn remote_failure_is_reported_not_returned() {
        let store = session_with_image();
        let probe = Probe {
            store: &store,
            seen_processing: Cell::new(None),
            outcome: Err(GenerationError::Remote("503".into())),
        };
        block_on(run_generation(&store, &probe)).unwrap();
        let s = store.borrow();
        assert!(!s.is_processing());
        assert_eq!(s.feedback().map(Feedback::tone), Some(Tone::Error));
        assert!(s.feedback().unwrap().to_string().contains("503"));
    }

    #[test]
    fn empty_session_never_starts() {
        let store = RefCell::new(Session::<()>::new());
        let probe = Probe {
            store: &store,
            seen_processing: Cell::new(None),
            outcome: Ok(String::new()),
        };
        let err = block_on(run_generation(&store, &probe)).unwrap_err();
        assert_eq!(err, GenerationError::EmptySelection);
        assert_eq!(probe.seen_processing.get(), None);
        assert!(!store.borrow().is_processing());
    }

    #[test]
    fn dropping_the_driver_resets_the_flag() {
        let store = session_with_image();
        // First poll opens the interval and parks on the stalled
        // generator; now_or_never then drops the future.
        assert!(run_generation(&store, &Stalled).now_or_never().is_none());
        let s = store.borrow();
        assert!(!s.is_processing());
        assert_eq!(
            s.feedback(),
            Some(&Feedback::GenerationFailed(
                GenerationError::Cancelled.to_string()
            ))
        );
    }

    #[test]
    fn deadline_wins_over_stalled_work() {
        let store = session_with_image();
        let generator = WithDeadline::new(Stalled, || ready(()));
        block_on(run_generation(&store, &generator)).unwrap();
        let s = store.borrow();
        assert!(!s.is_processing());
        assert_eq!(
            s.feedback(),
            Some(&Feedback::GenerationFailed(
                GenerationError::TimedOut.to_string()
            ))
        );
    }

    #[test]
    fn work_wins_over_pending_deadline() {
        let outcome = block_on(with_deadline(ready(Ok("ok".to_owned())), pending()));
        assert_eq!(outcome.unwrap(), "ok");
    }

    #[test]
    fn simulated_generator_returns_fixed_text() {
        let store = session_with_image();
        let generator = SimulatedGenerator::new(|| ready(()));
        block_on(run_generation(&store, &generator)).unwrap();
        let s = store.borrow();
        assert_eq!(s.last_result(), Some(SIMULATED_RESULT));
        assert_eq!(s.feedback(), Some(&Feedback::Generated));
    }

    #[test]
    fn manifest_lists_both_selections() {
        let mut s = Session::new();
        s.add_images(vec![PickedFile::new("a.png", 10, 1, ())]);
        s.add_generic_files(vec![PickedFile::new("b.pdf", 20, 2, ())]);
        let request = s.begin_generation().unwrap();
        let manifest = request.manifest();
        assert_eq!(manifest.images.len(), 1);
        assert_eq!(manifest.files[0].name, "b.pdf");
        assert_eq!(manifest.files[0].kind, FileKind::Generic);

        let json = serde_json::to_value(&manifest).unwrap();
        assert_eq!(json["images"][0]["kind"], "image");
        assert_eq!(json["files"][0]["size"], 20);
    }

    #[test]
    fn validate_rejects_empty_request() {
        let request = GenerationRequest::<()>::new(Vec::new(), Vec::new());
        assert_eq!(request.validate(), Err(GenerationError::EmptySelection));
    }
}

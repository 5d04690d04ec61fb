//! Integration test: drive a session through the user-facing scenarios
//! end to end, with an in-memory preview provider and the simulated
//! generator.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use copyforge_session::{
    Feedback, FileKind, GenerationError, PickedFile, PreviewProvider, PreviewSet, SelectedFile,
    Session, SimulatedGenerator, Tone, run_generation,
};
use futures::executor::block_on;
use futures::future::ready;

type Bytes = Rc<[u8]>;

/// Hands out `mem:<n>` URLs and tracks which are still live.
#[derive(Clone, Default)]
struct MemoryUrls {
    live: Rc<RefCell<HashSet<String>>>,
    next: Rc<RefCell<u64>>,
}

impl PreviewProvider<Bytes> for MemoryUrls {
    type Handle = String;
    type Error = std::convert::Infallible;

    fn create(&self, file: &SelectedFile<Bytes>) -> Result<String, Self::Error> {
        let mut next = self.next.borrow_mut();
        let url = format!("mem:{}:{}", *next, file.name());
        *next += 1;
        self.live.borrow_mut().insert(url.clone());
        Ok(url)
    }

    fn release(&self, handle: String) {
        assert!(self.live.borrow_mut().remove(&handle));
    }
}

fn png(name: &str) -> PickedFile<Bytes> {
    let bytes: Bytes = Rc::from(&b"\x89PNG"[..]);
    PickedFile::new(name, 4, 1_700_000_000_000, bytes)
}

fn names(session: &Session<Bytes>) -> Vec<&str> {
    session
        .images()
        .files()
        .iter()
        .map(SelectedFile::name)
        .collect()
}

#[test]
fn add_remove_clear_images() {
    let urls = MemoryUrls::default();
    let mut previews = PreviewSet::new(urls.clone());
    let mut session = Session::new();

    session.add_images(vec![png("a.png"), png("b.png")]);
    previews.refresh(session.images());
    assert_eq!(names(&session), ["a.png", "b.png"]);
    let feedback = session.feedback().expect("feedback after add");
    assert_eq!(
        feedback,
        &Feedback::Selected {
            kind: FileKind::Image,
            count: 2
        }
    );
    assert!(feedback.to_string().contains('2'));
    assert_eq!(previews.len(), 2);

    session.remove_image_at(0).unwrap();
    previews.refresh(session.images());
    assert_eq!(names(&session), ["b.png"]);
    let feedback = session.feedback().expect("feedback after remove");
    assert!(feedback.to_string().contains('1'));
    assert_eq!(feedback.tone(), Tone::Info);
    assert_eq!(previews.len(), 1);
    assert!(previews.handle_at(0).unwrap().ends_with("b.png"));

    session.clear_images();
    previews.refresh(session.images());
    assert!(session.images().is_empty());
    assert_eq!(session.feedback(), None);
    assert!(previews.is_empty());
    assert!(urls.live.borrow().is_empty());
}

#[test]
fn generate_with_nothing_selected() {
    let store = RefCell::new(Session::<Bytes>::new());
    let generator = SimulatedGenerator::new(|| ready(()));

    let err = block_on(run_generation(&store, &generator)).unwrap_err();
    assert_eq!(err, GenerationError::EmptySelection);

    let session = store.borrow();
    assert!(!session.is_processing());
    assert_eq!(session.feedback(), Some(&Feedback::EmptySelection));
    assert_eq!(session.feedback().map(Feedback::tone), Some(Tone::Error));
}

#[test]
fn generate_with_files_succeeds_once() {
    let mut session: Session<Bytes> = Session::new();
    session.add_generic_files(vec![PickedFile::new(
        "spec-sheet.pdf",
        2_048,
        0,
        Rc::from(&b"%PDF"[..]),
    )]);
    let store = RefCell::new(session);
    let generator = SimulatedGenerator::new(|| ready(()));

    block_on(run_generation(&store, &generator)).unwrap();

    let session = store.borrow();
    assert!(!session.is_processing());
    assert_eq!(session.feedback().map(Feedback::tone), Some(Tone::Success));
    assert!(session.last_result().is_some());
}

#[test]
fn removal_keeps_earlier_identities() {
    let mut session = Session::new();
    session.add_images(vec![png("a.png"), png("b.png"), png("c.png"), png("d.png")]);
    let before: Vec<_> = session
        .images()
        .files()
        .iter()
        .map(SelectedFile::id)
        .collect();

    session.remove_image_at(2).unwrap();

    let after: Vec<_> = session
        .images()
        .files()
        .iter()
        .map(SelectedFile::id)
        .collect();
    assert_eq!(after, [before[0], before[1], before[3]]);
}

#[test]
fn teardown_releases_every_preview() {
    let urls = MemoryUrls::default();
    {
        let mut previews = PreviewSet::new(urls.clone());
        let mut session = Session::new();
        session.add_images(vec![png("a.png")]);
        previews.refresh(session.images());
        session.add_images(vec![png("b.png")]);
        previews.refresh(session.images());
        assert_eq!(urls.live.borrow().len(), 2);
    }
    assert!(urls.live.borrow().is_empty());
}

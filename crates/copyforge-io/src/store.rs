//! Signal-backed session storage.

use copyforge_session::{Session, SessionStore};
use dioxus::prelude::*;

use crate::Payload;

/// A [`Session`] living in a Dioxus signal, usable by
/// [`run_generation`](copyforge_session::run_generation).
#[derive(Clone, Copy)]
pub struct SignalStore(pub Signal<Session<Payload>>);

impl SessionStore<Payload> for SignalStore {
    fn update<R>(&self, f: impl FnOnce(&mut Session<Payload>) -> R) -> R {
        let mut signal = self.0;
        let mut session = signal.write();
        f(&mut *session)
    }

    // The signal may already be gone if the owning component unmounted
    // while a generation was in flight.
    fn try_update<R>(&self, f: impl FnOnce(&mut Session<Payload>) -> R) -> Option<R> {
        let mut signal = self.0;
        let mut session = signal.try_write().ok()?;
        Some(f(&mut *session))
    }
}

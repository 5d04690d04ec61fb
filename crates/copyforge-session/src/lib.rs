//! copyforge-session: File-selection state for copyforge (sans-IO).
//!
//! Holds the two file selections (product images and reference files),
//! the preview-handle lifecycle for images, the single status slot, and
//! the single-flight generation driver.
//!
//! This crate has **no browser dependencies** -- file payloads are an
//! opaque type parameter, preview handles come from a
//! [`PreviewProvider`], and timers are plain futures supplied by the
//! caller. All browser interaction lives in `copyforge-io`.

pub mod config;
pub mod feedback;
pub mod generate;
pub mod preview;
pub mod selection;
pub mod session;
pub mod trace;
pub mod types;

pub use config::GenerationConfig;
pub use feedback::{Feedback, Tone};
pub use generate::{
    GenerationError, GenerationRequest, Generator, RequestManifest, SIMULATED_RESULT,
    SessionStore, SimulatedGenerator, WithDeadline, run_generation, with_deadline,
};
pub use preview::{PreviewProvider, PreviewSet, PreviewSlot};
pub use selection::{Selection, SelectionError};
pub use session::Session;
pub use types::{FileId, FileKind, PickedFile, SelectedFile, format_kb};

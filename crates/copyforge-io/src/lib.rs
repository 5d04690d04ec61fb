//! copyforge-io: Browser I/O and Dioxus component library.
//!
//! Handles reading picked files, object-URL previews, console logging,
//! the browser generation timers, and provides the reusable UI
//! components for the copyforge web application.

use std::rc::Rc;

pub mod components;
pub mod generator;
pub mod logging;
pub mod object_url;
pub mod picker;
pub mod store;

pub use components::{
    Card, FeedbackBanner, FileDisplay, FileUploadTrigger, ImagePreviews, use_image_previews,
};
pub use generator::browser_generator;
pub use object_url::ObjectUrlProvider;
pub use store::SignalStore;

/// Bytes of a picked file, shared cheaply between the session and
/// generation requests.
pub type Payload = Rc<[u8]>;

//! Dioxus UI components for copyforge.
//!
//! Provides the file-selection trigger, per-file display, titled card,
//! status banner and the image preview hook.

mod card;
mod feedback;
mod file_display;
mod previews;
mod upload;

pub use card::Card;
pub use feedback::FeedbackBanner;
pub use file_display::FileDisplay;
pub use previews::{ImagePreviews, use_image_previews};
pub use upload::FileUploadTrigger;

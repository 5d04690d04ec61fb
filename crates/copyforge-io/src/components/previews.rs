//! Hook binding the image preview set to a session signal.

use copyforge_session::{PreviewSet, Session};
use dioxus::prelude::*;

use crate::Payload;
use crate::object_url::ObjectUrlProvider;

/// Object-URL previews for the images in `session`.
pub type ImagePreviews = PreviewSet<Payload, ObjectUrlProvider>;

/// Keep an [`ImagePreviews`] set in step with the session's images.
///
/// The set is rebuilt only when the image selection's revision changes
/// (adding reference files or updating the status slot leaves it
/// alone). New URLs are installed before the previous revision's are
/// revoked. All URLs are revoked when the calling component is
/// destroyed.
pub fn use_image_previews(session: Signal<Session<Payload>>) -> Signal<ImagePreviews> {
    let mut previews = use_signal(|| PreviewSet::new(ObjectUrlProvider));
    let image_revision = use_memo(move || session.read().images().revision());

    use_effect(move || {
        // Subscribe to the revision only; read the files without tracking.
        let _ = image_revision();
        previews.write().refresh(session.peek().images());
    });

    use_drop(move || {
        if let Ok(mut set) = previews.try_write() {
            set.release_all();
        }
    });

    previews
}

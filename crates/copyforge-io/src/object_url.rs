//! Object URLs for image previews.
//!
//! Wraps the selected file's bytes in a typed `Blob` and hands out
//! `blob:` URLs via the Web API. Every URL created here is revoked
//! exactly once by the [`PreviewSet`](copyforge_session::PreviewSet)
//! that owns it.

use copyforge_session::{PreviewProvider, SelectedFile};
use wasm_bindgen::JsValue;
use web_sys::BlobPropertyBag;

use crate::Payload;

/// Errors that can occur while creating an object URL.
#[derive(Debug, thiserror::Error)]
pub enum PreviewError {
    /// A browser API call returned an error.
    #[error("browser API error: {0}")]
    JsError(String),
}

impl From<JsValue> for PreviewError {
    fn from(value: JsValue) -> Self {
        Self::JsError(format!("{value:?}"))
    }
}

/// Guess a MIME type from a file name's extension.
///
/// Unknown extensions get `application/octet-stream`; browsers still
/// sniff common image formats from the bytes.
#[must_use]
pub fn mime_for(name: &str) -> &'static str {
    let Some((_, ext)) = name.rsplit_once('.') else {
        return "application/octet-stream";
    };
    match ext.to_ascii_lowercase().as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        "avif" => "image/avif",
        _ => "application/octet-stream",
    }
}

/// Create an object URL for `bytes` with the given MIME type.
///
/// The returned URL must be revoked via [`revoke_object_url`] when no
/// longer needed to avoid memory leaks.
///
/// # Errors
///
/// Returns [`PreviewError::JsError`] if Blob or URL creation fails.
pub fn create_object_url(bytes: &[u8], mime_type: &str) -> Result<String, PreviewError> {
    let uint8_array = js_sys::Uint8Array::from(bytes);
    let parts = js_sys::Array::new();
    parts.push(&uint8_array);

    let opts = BlobPropertyBag::new();
    opts.set_type(mime_type);
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &opts)?;

    let url = web_sys::Url::create_object_url_with_blob(&blob)?;
    Ok(url)
}

/// Revoke an object URL previously created by [`create_object_url`].
pub fn revoke_object_url(url: &str) {
    if let Err(e) = web_sys::Url::revoke_object_url(url) {
        tracing::warn!("failed to revoke {url}: {e:?}");
    }
}

/// [`PreviewProvider`] backed by browser object URLs.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectUrlProvider;

impl PreviewProvider<Payload> for ObjectUrlProvider {
    type Handle = String;
    type Error = PreviewError;

    fn create(&self, file: &SelectedFile<Payload>) -> Result<String, PreviewError> {
        create_object_url(file.payload(), mime_for(file.name()))
    }

    fn release(&self, handle: String) {
        revoke_object_url(&handle);
    }
}

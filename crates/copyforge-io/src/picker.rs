//! Native file-picker plumbing.
//!
//! The trigger component renders a hidden `<input type="file">`. This
//! module reads what the user picked into [`PickedFile`]s and pokes the
//! input element directly for the two things Dioxus has no API for:
//! clearing its value after a pick and opening it from the keyboard.
//!
//! Functions that touch the DOM require a browser environment
//! (`wasm32-unknown-unknown` target).

use std::rc::Rc;

use copyforge_session::PickedFile;
use dioxus::html::FileData;
use wasm_bindgen::JsCast;

use crate::Payload;

/// `accept` filter for the product image picker.
pub const IMAGE_ACCEPT: &str = "image/*";

/// `accept` filter for the reference document picker.
pub const DOCUMENT_ACCEPT: &str = ".pdf,.doc,.docx,.txt,.md";

/// Errors that can occur when reaching the picker's input element.
#[derive(Debug, thiserror::Error)]
pub enum PickerError {
    /// A browser API call returned an error or a required object was missing.
    #[error("browser API error: {0}")]
    JsError(String),

    /// No `<input>` element with the given id is mounted.
    #[error("no file input with id {0:?}")]
    MissingInput(String),
}

/// Read every picked file's bytes.
///
/// Files that cannot be read are logged and skipped, so the result may
/// be shorter than `files`. An empty `files` (cancelled dialog) yields an
/// empty result.
#[allow(clippy::future_not_send)] // WASM is single-threaded; FileData is !Send
pub async fn read_picked(files: Vec<FileData>) -> Vec<PickedFile<Payload>> {
    let mut picked = Vec::with_capacity(files.len());
    for file in files {
        let name = file.name();
        let last_modified = u64::try_from(file.last_modified()).unwrap_or_default();
        match file.read_bytes().await {
            Ok(bytes) => {
                let payload: Payload = Rc::from(bytes.to_vec());
                let size = u64::try_from(payload.len()).unwrap_or(u64::MAX);
                picked.push(PickedFile::new(name, size, last_modified, payload));
            }
            Err(e) => tracing::warn!("skipping {name}: failed to read file: {e}"),
        }
    }
    picked
}

/// Clear the input's value so picking the same file again still fires
/// `change`.
///
/// # Errors
///
/// Returns [`PickerError`] if the document or the input is unavailable.
pub fn reset_input(id: &str) -> Result<(), PickerError> {
    find_input(id)?.set_value("");
    Ok(())
}

/// Open the platform file dialog by clicking the hidden input.
///
/// # Errors
///
/// Returns [`PickerError`] if the document or the input is unavailable.
pub fn open_picker(id: &str) -> Result<(), PickerError> {
    find_input(id)?.click();
    Ok(())
}

fn find_input(id: &str) -> Result<web_sys::HtmlInputElement, PickerError> {
    let window = web_sys::window().ok_or_else(|| PickerError::JsError("no global window".into()))?;
    let document = window
        .document()
        .ok_or_else(|| PickerError::JsError("no document".into()))?;
    document
        .get_element_by_id(id)
        .ok_or_else(|| PickerError::MissingInput(id.to_owned()))?
        .dyn_into::<web_sys::HtmlInputElement>()
        .map_err(|e| PickerError::JsError(format!("failed to cast element: {e:?}")))
}

//! File-selection trigger: a focusable drop-zone style label around a
//! hidden multi-file input.

use copyforge_session::{FileKind, PickedFile};
use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::{LdFileText, LdImage};

use crate::Payload;
use crate::picker;

/// Props for the [`FileUploadTrigger`] component.
#[derive(Props, Clone, PartialEq)]
pub struct FileUploadTriggerProps {
    /// DOM id of the hidden input. Must be unique on the page.
    #[props(into)]
    id: String,
    /// `accept` filter passed to the file dialog.
    #[props(into)]
    accept: String,
    /// Call-to-action text.
    #[props(into)]
    label: String,
    /// Hint shown under the label.
    #[props(into)]
    description: String,
    /// Which icon to show.
    kind: FileKind,
    /// Called with the picked files after every dialog close. Empty when
    /// the user cancelled.
    on_select: EventHandler<Vec<PickedFile<Payload>>>,
}

/// A clickable, keyboard-activatable area that opens the file dialog.
///
/// After each pick the files' bytes are read and forwarded to
/// `on_select`, then the input is cleared so that picking the same file
/// again is still reported.
#[component]
pub fn FileUploadTrigger(props: FileUploadTriggerProps) -> Element {
    let on_select = props.on_select;

    let handle_change = {
        let input_id = props.id.clone();
        move |evt: FormEvent| {
            let input_id = input_id.clone();
            async move {
                let picked = picker::read_picked(evt.files()).await;
                on_select.call(picked);
                if let Err(e) = picker::reset_input(&input_id) {
                    tracing::warn!("could not reset file input: {e}");
                }
            }
        }
    };

    let handle_key = {
        let input_id = props.id.clone();
        move |evt: KeyboardEvent| {
            let activate = match evt.key() {
                Key::Enter => true,
                Key::Character(c) => c == " ",
                _ => false,
            };
            if activate {
                evt.prevent_default();
                if let Err(e) = picker::open_picker(&input_id) {
                    tracing::warn!("could not open file dialog: {e}");
                }
            }
        }
    };

    let icon = match props.kind {
        FileKind::Image => rsx! {
            Icon { width: 40, height: 40, icon: LdImage }
        },
        FileKind::Generic => rsx! {
            Icon { width: 40, height: 40, icon: LdFileText }
        },
    };

    rsx! {
        label {
            class: "trigger",
            r#for: "{props.id}",
            tabindex: "0",
            onkeydown: handle_key,

            div { class: "trigger-icon", {icon} }
            span { class: "trigger-label", "{props.label}" }
            input {
                id: "{props.id}",
                name: "{props.id}",
                r#type: "file",
                class: "sr-only",
                accept: "{props.accept}",
                multiple: true,
                onchange: handle_change,
            }
            p { class: "trigger-description", "{props.description}" }
        }
    }
}

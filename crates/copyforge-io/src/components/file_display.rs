//! One selected file: name, size, optional preview and a clear button.

use copyforge_session::{FileKind, format_kb};
use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::{LdFileText, LdImage};

/// Props for the [`FileDisplay`] component.
#[derive(Props, Clone, PartialEq)]
pub struct FileDisplayProps {
    /// File name, shown truncated with the full name as a tooltip.
    #[props(into)]
    name: String,
    /// Size in bytes.
    size: u64,
    kind: FileKind,
    /// Object URL for the image preview, if one could be created.
    preview_url: Option<String>,
    /// Fired when the clear button is pressed. No button without it.
    on_clear: Option<EventHandler<()>>,
}

/// Renders a selected file.
///
/// Images with a preview URL get a thumbnail and an enlarged preview;
/// images without one and generic files get an icon instead.
#[component]
pub fn FileDisplay(props: FileDisplayProps) -> Element {
    let size_kb = format_kb(props.size);
    let name = &props.name;
    let preview = match props.kind {
        FileKind::Image => props.preview_url.as_deref(),
        FileKind::Generic => None,
    };

    let leading = match (props.kind, preview) {
        (FileKind::Image, Some(url)) => rsx! {
            img { class: "thumb", src: "{url}", alt: "{name}" }
        },
        (FileKind::Image, None) => rsx! {
            Icon { width: 40, height: 40, icon: LdImage }
        },
        (FileKind::Generic, _) => rsx! {
            Icon { width: 40, height: 40, icon: LdFileText }
        },
    };

    rsx! {
        div { class: "file",
            div { class: "file-row",
                div { class: "file-meta",
                    {leading}
                    div { class: "file-text",
                        p { class: "file-name", title: "{name}", "{name}" }
                        p { class: "file-size", "{size_kb} KB" }
                    }
                }
                if let Some(on_clear) = props.on_clear {
                    button {
                        r#type: "button",
                        class: "file-clear",
                        aria_label: "Clear {name}",
                        onclick: move |_| on_clear.call(()),
                        "Clear"
                    }
                }
            }
            if let Some(url) = preview {
                div { class: "file-preview",
                    img { src: "{url}", alt: "Preview of {name}" }
                }
            }
        }
    }
}

use copyforge_io::picker::{DOCUMENT_ACCEPT, IMAGE_ACCEPT};
use copyforge_io::{
    Card, FeedbackBanner, FileDisplay, FileUploadTrigger, Payload, SignalStore, browser_generator,
    logging, use_image_previews,
};
use copyforge_session::{FileId, FileKind, GenerationConfig, PickedFile, Session, run_generation};
use dioxus::prelude::*;

fn main() {
    logging::init(logging::default_level());
    dioxus::launch(app);
}

/// What the file lists need from one selected file.
#[derive(Clone, PartialEq)]
struct Row {
    id: FileId,
    name: String,
    size: u64,
}

fn rows(session: &Session<Payload>, kind: FileKind) -> Vec<Row> {
    let selection = match kind {
        FileKind::Image => session.images(),
        FileKind::Generic => session.generic_files(),
    };
    selection
        .files()
        .iter()
        .map(|f| Row {
            id: f.id(),
            name: f.name().to_owned(),
            size: f.size(),
        })
        .collect()
}

/// Root application component.
///
/// Owns the session signal and the image preview set, and wires the
/// two upload cards, the generate button and the status banner to
/// session operations.
#[allow(clippy::too_many_lines)]
fn app() -> Element {
    // --- Application state ---
    let mut session = use_signal(Session::<Payload>::new);
    let previews = use_image_previews(session);
    let config = GenerationConfig::default();

    // --- Derived view state ---
    let (images, files, processing, feedback, last_result, can_generate) = {
        let s = session.read();
        (
            rows(&s, FileKind::Image),
            rows(&s, FileKind::Generic),
            s.is_processing(),
            s.feedback().cloned(),
            s.last_result().map(str::to_owned),
            s.can_generate(),
        )
    };
    let show_placeholders = !feedback.as_ref().is_some_and(|f| f.is_selection_notice());
    let show_generate = can_generate || processing;
    let year = js_sys::Date::new_0().get_full_year();

    // --- Selection handlers ---
    let on_images = move |picked: Vec<PickedFile<Payload>>| {
        session.write().add_images(picked);
    };
    let on_files = move |picked: Vec<PickedFile<Payload>>| {
        session.write().add_generic_files(picked);
    };

    // --- Generation ---
    // The button is disabled while a run is open, so at most one
    // generation is in flight.
    let on_generate = move |_| {
        spawn(async move {
            let generator = browser_generator(config);
            if let Err(e) = run_generation(&SignalStore(session), &generator).await {
                tracing::info!("generation not started: {e}");
            }
        });
    };

    // --- Layout ---
    rsx! {
        style { dangerous_inner_html: include_str!("../assets/main.css") }

        div { class: "page",
            header { class: "page-header",
                h1 { "E-commerce ", span { class: "accent", "Copy Assistant" } }
                p { class: "subtitle",
                    "Upload product images and reference files, and let AI draft compelling listing copy."
                }
            }

            main { class: "cards",
                Card { title: "Product images (multiple allowed)",
                    FileUploadTrigger {
                        id: "image-upload",
                        accept: IMAGE_ACCEPT,
                        label: "Click to choose images",
                        description: "PNG, JPG, GIF, WebP and more. 800x800px or larger recommended.",
                        kind: FileKind::Image,
                        on_select: on_images,
                    }

                    if !images.is_empty() {
                        div { class: "file-list",
                            for row in images.iter().cloned() {
                                FileDisplay {
                                    key: "{row.id}",
                                    name: row.name,
                                    size: row.size,
                                    kind: FileKind::Image,
                                    preview_url: previews.read().handle_for(row.id).cloned(),
                                    on_clear: move |()| {
                                        if let Err(e) = session.write().remove_image(row.id) {
                                            tracing::warn!("{e}");
                                        }
                                    },
                                }
                            }
                        }
                        button {
                            r#type: "button",
                            class: "clear-all",
                            aria_label: "Clear all selected images",
                            onclick: move |_| session.write().clear_images(),
                            "Clear all images"
                        }
                    } else if show_placeholders {
                        p { class: "placeholder", "No images selected." }
                    }
                }

                Card { title: "Reference files (multiple allowed)",
                    FileUploadTrigger {
                        id: "file-upload",
                        accept: DOCUMENT_ACCEPT,
                        label: "Click to choose files",
                        description: "PDF, DOC, TXT and more. Keep each file under 5MB.",
                        kind: FileKind::Generic,
                        on_select: on_files,
                    }

                    if !files.is_empty() {
                        div { class: "file-list",
                            for row in files.iter().cloned() {
                                FileDisplay {
                                    key: "{row.id}",
                                    name: row.name,
                                    size: row.size,
                                    kind: FileKind::Generic,
                                    on_clear: move |()| {
                                        if let Err(e) = session.write().remove_generic_file(row.id) {
                                            tracing::warn!("{e}");
                                        }
                                    },
                                }
                            }
                        }
                        button {
                            r#type: "button",
                            class: "clear-all",
                            aria_label: "Clear all selected files",
                            onclick: move |_| session.write().clear_generic_files(),
                            "Clear all files"
                        }
                    } else if show_placeholders {
                        p { class: "placeholder", "No reference files selected." }
                    }
                }
            }

            if show_generate {
                div { class: "actions",
                    button {
                        r#type: "button",
                        class: "generate",
                        disabled: processing,
                        onclick: on_generate,
                        if processing { "Generating..." } else { "Generate copy" }
                    }
                }
            }

            if let Some(ref notice) = feedback {
                FeedbackBanner { feedback: notice.clone() }
            }

            if let Some(ref text) = last_result {
                div { class: "result",
                    h2 { "Generated copy" }
                    p { "{text}" }
                }
            }

            footer { class: "page-footer",
                p { "© {year} E-commerce Copy Assistant. All rights reserved." }
                p { "Powered by Rust & Dioxus" }
            }
        }
    }
}

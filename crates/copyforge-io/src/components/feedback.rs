//! Status banner for the session's feedback slot.

use copyforge_session::Feedback;
use dioxus::prelude::*;

/// Props for the [`FeedbackBanner`] component.
#[derive(Props, Clone, PartialEq)]
pub struct FeedbackBannerProps {
    feedback: Feedback,
}

/// Renders a [`Feedback`] notice styled by its tone.
#[component]
pub fn FeedbackBanner(props: FeedbackBannerProps) -> Element {
    let tone = props.feedback.tone().as_str();
    let text = props.feedback.to_string();
    rsx! {
        div { class: "feedback feedback-{tone}", role: "alert", "{text}" }
    }
}

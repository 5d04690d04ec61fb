//! Titled panel wrapper.

use dioxus::prelude::*;

/// Props for the [`Card`] component.
#[derive(Props, Clone, PartialEq)]
pub struct CardProps {
    #[props(into)]
    title: String,
    children: Element,
}

/// A titled card grouping one upload section.
#[component]
pub fn Card(props: CardProps) -> Element {
    rsx! {
        section { class: "card",
            h2 { class: "card-title", "{props.title}" }
            {props.children}
        }
    }
}

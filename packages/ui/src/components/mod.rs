//! Small form primitives shared by the views.

use dioxus::prelude::*;

const COMPONENTS_CSS: Asset = asset!("/src/components/components.css");

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Outline,
    Ghost,
    Destructive,
}

impl ButtonVariant {
    fn class(self) -> &'static str {
        match self {
            Self::Primary => "button button--primary",
            Self::Outline => "button button--outline",
            Self::Ghost => "button button--ghost",
            Self::Destructive => "button button--destructive",
        }
    }
}

#[component]
pub fn Button(
    #[props(default)] variant: ButtonVariant,
    #[props(default)] class: String,
    #[props(default)] title: String,
    onclick: EventHandler<MouseEvent>,
    children: Element,
) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: COMPONENTS_CSS }
        button {
            class: "{variant.class()} {class}",
            title: title,
            onclick: move |evt| onclick.call(evt),
            {children}
        }
    }
}

/// Single-line text input. `inputmode` picks the on-screen keyboard on mobile.
#[component]
pub fn Input(
    id: String,
    value: String,
    oninput: EventHandler<FormEvent>,
    #[props(default)] class: String,
    #[props(default = "text".to_string())] r#type: String,
    #[props(default)] placeholder: String,
    #[props(default = "text".to_string())] inputmode: String,
) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: COMPONENTS_CSS }
        input {
            id: id,
            class: "input {class}",
            r#type: r#type,
            placeholder: placeholder,
            "inputmode": inputmode,
            autocomplete: "off",
            value: value,
            oninput: move |evt| oninput.call(evt),
        }
    }
}

#[component]
pub fn Label(html_for: String, children: Element) -> Element {
    rsx! {
        label {
            class: "label",
            r#for: html_for,
            {children}
        }
    }
}

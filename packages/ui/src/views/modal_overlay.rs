use dioxus::prelude::*;

/// A full-screen scrim that slides its children up in a bottom sheet.
/// Tapping the scrim triggers `on_close`.
#[component]
pub fn ModalOverlay(on_close: EventHandler<()>, children: Element) -> Element {
    rsx! {
        div {
            class: "sheet-scrim",
            onclick: move |_| on_close.call(()),
            div {
                class: "sheet",
                role: "dialog",
                onclick: move |evt: Event<MouseData>| evt.stop_propagation(),
                {children}
            }
        }
    }
}

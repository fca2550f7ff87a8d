//! One row of the users list.

use dioxus::prelude::*;
use store::User;

use crate::components::{Button, ButtonVariant};
use crate::icons::FaTrashCan;
use crate::Icon;

/// Username, email and age of a single user.
///
/// A long press (or right click) opens the row's menu, whose only entry removes
/// the user. The row never edits the list itself; `on_remove` receives the id.
#[component]
pub fn UserRow(user: User, on_remove: EventHandler<String>) -> Element {
    let mut menu_open = use_signal(|| false);

    let (age_class, age_label) = if user.is_adult {
        ("user-age adult", "Adult")
    } else {
        ("user-age minor", "Minor")
    };
    let id = user.id.clone();

    rsx! {
        li {
            class: "user-row",
            oncontextmenu: move |evt: MouseEvent| {
                evt.prevent_default();
                menu_open.toggle();
            },
            div { class: "user-name", "{user.username}" }
            div { class: "user-email", "{user.email}" }
            div { class: "{age_class}", "Age: {user.age} ({age_label})" }

            if menu_open() {
                div {
                    class: "user-menu",
                    Button {
                        variant: ButtonVariant::Destructive,
                        onclick: move |_| {
                            menu_open.set(false);
                            on_remove.call(id.clone());
                        },
                        Icon { icon: FaTrashCan, width: 12, height: 12 }
                        "Remove"
                    }
                }
            }
        }
    }
}

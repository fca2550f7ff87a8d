use dioxus::prelude::*;
use store::UserDraft;

use crate::components::{Button, ButtonVariant, Input, Label};

/// Form sheet for a new user.
///
/// Save hands the draft to `on_save`, which answers whether it was accepted. An
/// invalid age (or an empty name or email) keeps the sheet open without a message.
/// An accepted draft is written by whoever owns `on_save`, and the sheet closes at
/// once without waiting for the write.
#[component]
pub fn AddUserView(on_save: Callback<UserDraft, bool>, on_dismiss: EventHandler<()>) -> Element {
    let mut username = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut age = use_signal(String::new);

    let handle_save = move |_| {
        if on_save.call(UserDraft::new(username(), email(), age())) {
            on_dismiss.call(());
        }
    };

    rsx! {
        div {
            class: "add-user",
            div {
                class: "add-user-bar",
                Button {
                    variant: ButtonVariant::Ghost,
                    onclick: move |_| on_dismiss.call(()),
                    "Cancel"
                }
                h2 { class: "add-user-title", "Add User" }
                Button {
                    variant: ButtonVariant::Ghost,
                    class: "add-user-save",
                    onclick: handle_save,
                    "Save"
                }
            }

            section {
                class: "add-user-section",
                h3 { class: "add-user-section-title", "User Details" }

                div {
                    class: "add-user-field",
                    Label { html_for: "add-user-username", "Username" }
                    Input {
                        id: "add-user-username",
                        placeholder: "Username",
                        value: username(),
                        oninput: move |evt: FormEvent| username.set(evt.value()),
                    }
                }

                div {
                    class: "add-user-field",
                    Label { html_for: "add-user-email", "Email" }
                    Input {
                        id: "add-user-email",
                        r#type: "email",
                        placeholder: "Email",
                        value: email(),
                        oninput: move |evt: FormEvent| email.set(evt.value()),
                    }
                }

                div {
                    class: "add-user-field",
                    Label { html_for: "add-user-age", "Age" }
                    Input {
                        id: "add-user-age",
                        r#type: "number",
                        inputmode: "numeric",
                        placeholder: "Age",
                        value: age(),
                        oninput: move |evt: FormEvent| age.set(evt.value()),
                    }
                }
            }
        }
    }
}

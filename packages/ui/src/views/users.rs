use dioxus::prelude::*;
use futures::StreamExt;
use store::{ListSync, Phase, Roster, RosterEvent, UiDispatcher};

use super::{AddUserView, ModalOverlay, VIEWS_CSS};
use crate::directory::{use_directory, use_submit_user};
use crate::icons::FaPlus;
use crate::{Icon, UserRow};

/// The users list: fetched on appear, long-press to remove, "+" opens the add sheet.
#[component]
pub fn UsersView() -> Element {
    let directory = use_directory();
    let mut roster = use_signal(Roster::default);
    let mut show_add_user = use_signal(|| false);

    // Only this coroutine writes to `roster`.
    let events = use_coroutine(move |mut rx: UnboundedReceiver<RosterEvent>| async move {
        while let Some(event) = rx.next().await {
            roster.write().apply(event);
        }
    });

    // The add sheet unmounts on Save; its write has to live in this scope.
    let submit_user = use_submit_user(directory.clone());

    let list_sync = use_hook(|| ListSync::new(directory, UiDispatcher::new(events.tx())));

    let sync = list_sync.clone();
    use_effect(move || {
        let sync = sync.clone();
        spawn(async move { sync.refresh().await });
    });

    let on_remove = use_callback(move |id: String| {
        let sync = list_sync.clone();
        spawn(async move { sync.remove(id).await });
    });

    let users = roster.read().users().to_vec();
    let status = match roster.read().phase() {
        _ if !users.is_empty() => None,
        Phase::Loading => Some("Loading..."),
        Phase::Populated => Some("No users"),
        Phase::Empty => None,
    };

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        div {
            class: "users-screen",
            header {
                class: "users-toolbar",
                h1 { class: "users-title", "Users" }
                button {
                    class: "users-add",
                    title: "Add User",
                    onclick: move |_| show_add_user.set(true),
                    Icon { icon: FaPlus, width: 18, height: 18 }
                }
            }

            if let Some(status) = status {
                p { class: "users-status", "{status}" }
            }

            ul {
                class: "users-list",
                for user in users {
                    UserRow {
                        key: "{user.id}",
                        user: user.clone(),
                        on_remove,
                    }
                }
            }
        }

        if show_add_user() {
            ModalOverlay {
                on_close: move |_| show_add_user.set(false),
                AddUserView {
                    on_save: submit_user,
                    on_dismiss: move |_| show_add_user.set(false),
                }
            }
        }
    }
}

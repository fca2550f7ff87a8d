use dioxus::prelude::*;

#[component]
pub fn Users() -> Element {
    rsx! {
        ui::views::UsersView {}
    }
}

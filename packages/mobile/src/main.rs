use dioxus::prelude::*;
use views::Users;

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Users {},
}

fn main() {
    dioxus::logger::initialize_default();
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    let directory: ui::Directory = use_context_provider(ui::make_directory);
    use_hook(|| {
        tracing::info!(
            list = %directory.collections().list,
            add = %directory.collections().add,
            remote = directory.store().is_remote(),
            "users directory ready"
        );
    });

    rsx! {
        Router::<Route> {}
    }
}

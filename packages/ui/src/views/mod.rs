mod modal_overlay;
pub use modal_overlay::ModalOverlay;

mod add_user;
pub use add_user::AddUserView;

mod users;
pub use users::UsersView;

use dioxus::prelude::*;

pub const VIEWS_CSS: Asset = asset!("/src/views/users.css");

//! Page objects for the storefront under test.

mod inventory;
mod login;

pub use inventory::InventoryPage;
pub use login::{LoginOutcome, LoginPage};

pub mod selectors {
	pub use super::inventory::{CART_BADGE, CART_LINK, add_to_cart_selector, product_slug, remove_selector};
	pub use super::login::{ERROR_MESSAGE, LOGIN_BUTTON, PASSWORD_INPUT, USERNAME_INPUT};
}

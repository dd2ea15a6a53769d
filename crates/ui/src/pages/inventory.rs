use tracing::{info, warn};

use crate::actions::PageActions;
use crate::error::Result;

pub const CART_BADGE: &str = ".shopping_cart_badge";
pub const CART_LINK: &str = "#shopping_cart_container";

/// Product name as used in `data-test` attributes: lowercase, whitespace
/// runs replaced by `-`.
pub fn product_slug(name: &str) -> String {
	name.split_whitespace()
		.map(str::to_lowercase)
		.collect::<Vec<_>>()
		.join("-")
}

pub fn add_to_cart_selector(name: &str) -> String {
	format!("[data-test=\"add-to-cart-{}\"]", product_slug(name))
}

pub fn remove_selector(name: &str) -> String {
	format!("[data-test=\"remove-{}\"]", product_slug(name))
}

/// Leading run of digits, ignoring surrounding whitespace (`"3 items"` is 3).
fn leading_count(text: &str) -> Option<u32> {
	let text = text.trim_start();
	let end = text.find(|c: char| !c.is_ascii_digit()).unwrap_or(text.len());
	text[..end].parse().ok()
}

#[derive(Debug, Clone)]
pub struct InventoryPage {
	actions: PageActions,
}

impl InventoryPage {
	pub fn new(actions: PageActions) -> Self {
		Self { actions }
	}

	pub fn actions(&self) -> &PageActions {
		&self.actions
	}

	pub async fn add_item_to_cart(&self, item_name: &str) -> Result<()> {
		self.actions.click(&add_to_cart_selector(item_name)).await?;
		info!("Added item to cart: \"{item_name}\"");
		Ok(())
	}

	pub async fn remove_item_from_cart(&self, item_name: &str) -> Result<()> {
		self.actions.click(&remove_selector(item_name)).await?;
		info!("Removed item from cart: \"{item_name}\"");
		Ok(())
	}

	/// Number shown on the cart badge. The badge is absent for an empty cart.
	pub async fn cart_item_count(&self) -> Result<u32> {
		let count = match self.actions.get_text(CART_BADGE).await? {
			None => 0,
			Some(text) => leading_count(&text).unwrap_or_else(|| {
				warn!("Unreadable cart badge text: {text:?}");
				0
			}),
		};
		info!("Current cart item count: {count}");
		Ok(count)
	}

	pub async fn open_cart(&self) -> Result<()> {
		self.actions.click(CART_LINK).await
	}
}

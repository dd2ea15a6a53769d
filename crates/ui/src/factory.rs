//! Name-keyed construction of page objects.

use pwkit_common::factory_registry;

use crate::actions::PageActions;
use crate::error::{Result, UiError};
use crate::pages::{InventoryPage, LoginPage};

factory_registry! {
	/// Registered page object.
	id: PageId,
	/// A freshly built page object.
	product: AppPage,
	context: PageActions,
	entries: {
		Login => LoginPage { names: ["LoginPage"] },
		Inventory => InventoryPage { names: ["InventoryPage"] },
	}
}

impl AppPage {
	pub fn actions(&self) -> &PageActions {
		match self {
			AppPage::Login(page) => page.actions(),
			AppPage::Inventory(page) => page.actions(),
		}
	}

	pub fn into_login(self) -> Option<LoginPage> {
		match self {
			AppPage::Login(page) => Some(page),
			_ => None,
		}
	}

	pub fn into_inventory(self) -> Option<InventoryPage> {
		match self {
			AppPage::Inventory(page) => Some(page),
			_ => None,
		}
	}
}

/// Builds the page object registered as `name` on top of `actions`.
pub fn get_page(name: &str, actions: PageActions) -> Result<AppPage> {
	PageId::lookup(name)
		.map(|id| id.build(actions))
		.ok_or_else(|| UiError::PageNotFound(name.to_string()))
}

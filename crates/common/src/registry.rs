//! Name-keyed construction tables.
//!
//! Both factories (API clients and page objects) share one shape: a string key
//! selects a concrete type, and every lookup builds a fresh instance from a
//! caller supplied context. [`factory_registry!`] generates that table once so
//! the two factories cannot drift apart.

/// Generates an id enum, a product enum and the lookup/build glue.
///
/// Every registered type must expose `fn new(ctx: Context) -> Self`.
///
/// ```rust,ignore
/// factory_registry! {
///   id: PageId,
///   product: AppPage,
///   context: PageActions,
///   entries: {
///     Login => LoginPage { names: ["LoginPage"] },
///     Inventory => InventoryPage { names: ["InventoryPage", "inventory"] },
///   }
/// }
/// ```
#[macro_export]
macro_rules! factory_registry {
	(
		$(#[$id_meta:meta])*
		id: $id:ident,
		$(#[$product_meta:meta])*
		product: $product:ident,
		context: $ctx:ty,
		entries: {
			$(
				$variant:ident => $ty:ty { names: [ $($name:literal),+ $(,)? ] }
			),+ $(,)?
		} $(,)?
	) => {
		$(#[$id_meta])*
		#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
		pub enum $id { $($variant),+ }

		$(#[$product_meta])*
		#[derive(Debug)]
		pub enum $product { $($variant($ty)),+ }

		impl $id {
			/// Every registered entry, in declaration order.
			pub const ALL: &'static [$id] = &[$($id::$variant),+];

			/// Maps a registered name to its id.
			pub fn lookup(name: &str) -> Option<Self> {
				match name {
					$(
						$($name)|+ => Some($id::$variant),
					)+
					_ => None,
				}
			}

			/// Canonical (first) registered name.
			pub fn name(self) -> &'static str {
				match self {
					$(
						$id::$variant => $crate::__first_name!($($name),+),
					)+
				}
			}

			/// Constructs a new instance; nothing is cached between calls.
			pub fn build(self, ctx: $ctx) -> $product {
				match self {
					$(
						$id::$variant => $product::$variant(<$ty>::new(ctx)),
					)+
				}
			}
		}
	};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __first_name {
	($first:literal $(, $rest:literal)*) => {
		$first
	};
}

#[cfg(test)]
mod tests {
	use std::sync::atomic::{AtomicUsize, Ordering};

	static BUILT: AtomicUsize = AtomicUsize::new(0);

	#[derive(Debug)]
	pub struct Alpha(u32);

	impl Alpha {
		fn new(seed: u32) -> Self {
			BUILT.fetch_add(1, Ordering::SeqCst);
			Self(seed)
		}
	}

	#[derive(Debug)]
	pub struct Beta(u32);

	impl Beta {
		fn new(seed: u32) -> Self {
			Self(seed * 2)
		}
	}

	crate::factory_registry! {
		id: ThingId,
		product: Thing,
		context: u32,
		entries: {
			Alpha => Alpha { names: ["Alpha", "alpha"] },
			Beta => Beta { names: ["Beta"] },
		}
	}

	#[test]
	fn lookup_matches_every_alias() {
		assert_eq!(ThingId::lookup("Alpha"), Some(ThingId::Alpha));
		assert_eq!(ThingId::lookup("alpha"), Some(ThingId::Alpha));
		assert_eq!(ThingId::lookup("Beta"), Some(ThingId::Beta));
		assert_eq!(ThingId::lookup("Gamma"), None);
	}

	#[test]
	fn name_is_first_alias() {
		assert_eq!(ThingId::Alpha.name(), "Alpha");
		assert_eq!(ThingId::ALL.len(), 2);
	}

	#[test]
	fn build_constructs_fresh_instances() {
		let before = BUILT.load(Ordering::SeqCst);
		let first = ThingId::Alpha.build(3);
		let second = ThingId::Alpha.build(4);
		assert!(BUILT.load(Ordering::SeqCst) >= before + 2);
		assert!(matches!(first, Thing::Alpha(Alpha(3))));
		assert!(matches!(second, Thing::Alpha(Alpha(4))));
		assert!(matches!(ThingId::Beta.build(5), Thing::Beta(Beta(10))));
	}
}

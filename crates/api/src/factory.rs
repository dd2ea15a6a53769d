//! Name-keyed construction of API clients.

use pwkit_common::factory_registry;

use crate::client::ApiContext;
use crate::error::{ApiError, Result};
use crate::user_api::UserApi;

factory_registry! {
	/// Registered API client.
	id: ApiId,
	/// A freshly built API client.
	product: ApiClient,
	context: ApiContext,
	entries: {
		User => UserApi { names: ["UserApi"] },
	}
}

impl ApiClient {
	pub fn into_user_api(self) -> Option<UserApi> {
		match self {
			ApiClient::User(api) => Some(api),
		}
	}
}

/// Builds the client registered as `name`.
pub fn get_api(name: &str, ctx: ApiContext) -> Result<ApiClient> {
	ApiId::lookup(name)
		.map(|id| id.build(ctx))
		.ok_or_else(|| ApiError::NotFound(name.to_string()))
}

pub fn user_api(ctx: ApiContext) -> UserApi {
	UserApi::new(ctx)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::ApiEnvironment;

	fn ctx() -> ApiContext {
		ApiContext::new(ApiEnvironment::default()).unwrap()
	}

	#[test]
	fn builds_registered_clients() {
		let client = get_api("UserApi", ctx()).unwrap();
		assert!(client.into_user_api().is_some());
		assert_eq!(ApiId::User.name(), "UserApi");
	}

	#[test]
	fn unknown_key_is_not_found() {
		let err = get_api("UnknownApi", ctx()).unwrap_err();
		assert!(matches!(&err, ApiError::NotFound(name) if name == "UnknownApi"));
		assert!(err.to_string().contains("UnknownApi"));
	}

	#[test]
	fn lookup_is_case_sensitive() {
		assert_eq!(ApiId::lookup("userapi"), None);
	}
}

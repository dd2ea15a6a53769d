//! REST API test framework.
//!
//! Tests obtain a client from the [`factory`], call an endpoint, and hand the
//! raw JSON body to a [`validators`] function which either returns the typed
//! model or fails on the first violated rule.
//!
//! ```rust,ignore
//! let ctx = ApiContext::new(ApiEnvironment::current())?;
//! let users = factory::user_api(ctx);
//! let response = users.list_users(1).await?;
//! let list = validators::validate_user_list(&response.json()?)?;
//! assert_eq!(list.page, 1);
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod factory;
pub mod models;
pub mod user_api;
pub mod validators;

pub use client::{ApiContext, ApiResponse};
pub use config::ApiEnvironment;
pub use error::{ApiError, Result, ValidationError, ValidationKind};
pub use factory::{ApiClient, ApiId, get_api, user_api};
pub use models::{
	AuthResponse, CreateUserRequest, ErrorResponse, LoginRequest, RegisterRequest, Support, UpdateUserRequest, User,
	UserList, UserMutation,
};
pub use user_api::UserApi;

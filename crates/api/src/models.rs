//! Request payloads and validated response models for the ReqRes-style API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user record as served by `/api/users`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
	pub id: u64,
	pub email: String,
	pub first_name: String,
	pub last_name: String,
	/// Absolute `http(s)` URL of the avatar image.
	pub avatar: String,
}

/// Support banner attached to list responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Support {
	pub url: String,
	pub text: String,
}

/// One page of users. `data` keeps server order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserList {
	pub page: u64,
	pub per_page: u64,
	pub total: u64,
	pub total_pages: u64,
	pub data: Vec<User>,
	pub support: Support,
}

/// Body of a successful login or registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
	pub token: String,
	/// Only present on registration.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<u64>,
}

/// Error body, e.g. `{"error": "Missing password"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
	pub error: String,
}

/// Echo returned by create and update calls.
///
/// Mutation ids are strings while fetched users carry numeric ids; both
/// shapes are kept as the server reports them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserMutation {
	pub name: String,
	pub job: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub created_at: Option<DateTime<Utc>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateUserRequest {
	pub name: String,
	pub job: String,
}

impl CreateUserRequest {
	pub fn new(name: impl Into<String>, job: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			job: job.into(),
		}
	}
}

/// Partial update; absent fields are left untouched by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateUserRequest {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub job: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
	pub email: String,
	pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
	pub email: String,
	pub password: String,
}

//! Client for the `/api/users`, `/api/login` and `/api/register` endpoints.

use reqwest::Method;
use tracing::info;

use crate::client::{ApiContext, ApiResponse};
use crate::error::Result;
use crate::models::{CreateUserRequest, LoginRequest, RegisterRequest, UpdateUserRequest};

#[derive(Debug, Clone)]
pub struct UserApi {
	ctx: ApiContext,
}

impl UserApi {
	pub fn new(ctx: ApiContext) -> Self {
		Self { ctx }
	}

	pub fn context(&self) -> &ApiContext {
		&self.ctx
	}

	/// `GET /api/users?page={page}`
	pub async fn list_users(&self, page: u32) -> Result<ApiResponse> {
		let response = self.ctx.send::<()>(Method::GET, &format!("/api/users?page={page}"), None).await?;
		info!("Listed users for page: {page}");
		Ok(response)
	}

	/// `GET /api/users/{id}`
	pub async fn get_user(&self, id: u64) -> Result<ApiResponse> {
		self.ctx.send::<()>(Method::GET, &format!("/api/users/{id}"), None).await
	}

	/// `POST /api/users`
	pub async fn create_user(&self, request: &CreateUserRequest) -> Result<ApiResponse> {
		let response = self.ctx.send(Method::POST, "/api/users", Some(request)).await?;
		info!("Created user: {}", request.name);
		Ok(response)
	}

	/// `PUT /api/users/{id}`
	pub async fn update_user(&self, id: u64, request: &UpdateUserRequest) -> Result<ApiResponse> {
		self.ctx.send(Method::PUT, &format!("/api/users/{id}"), Some(request)).await
	}

	/// `DELETE /api/users/{id}`
	pub async fn delete_user(&self, id: u64) -> Result<ApiResponse> {
		let response = self.ctx.send::<()>(Method::DELETE, &format!("/api/users/{id}"), None).await?;
		info!("Deleted user: {id}");
		Ok(response)
	}

	/// `POST /api/login`
	pub async fn login(&self, request: &LoginRequest) -> Result<ApiResponse> {
		self.ctx.send(Method::POST, "/api/login", Some(request)).await
	}

	/// `POST /api/register`
	pub async fn register(&self, request: &RegisterRequest) -> Result<ApiResponse> {
		self.ctx.send(Method::POST, "/api/register", Some(request)).await
	}
}

// handlers/public/auth.rs - POST /auth/login and POST /auth/register

use axum::extract::State;
use serde::{Deserialize, Serialize};

use crate::auth::{generate_jwt, hash_password_async, verify_login, Claims};
use crate::config;
use crate::database::models::{NewUser, Service, UserProfile};
use crate::database::repository::{LookupRepository, UserRepository};
use crate::error::ApiError;
use crate::middleware::{ApiJson, ApiResponse, ApiResult};
use crate::state::AppState;
use crate::validation::{validate_email, validate_password, validate_selected, validate_username, Form};

pub const ADMIN_BOARD: &str = "/board/admin";
pub const EMPLOYEE_BOARD: &str = "/board/employee";

const BAD_CREDENTIALS: &str = "Verify you email / password combination is incorrect.";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_in: i64,
    pub user: UserProfile,
    pub admin: bool,
    pub redirect_to: &'static str,
}

/// POST /auth/login - Exchange email and password for a JWT
///
/// Expected Input:
/// ```json
/// { "email": "jane@example.com", "password": "secret" }
/// ```
///
/// Expected Output (Success):
/// ```json
/// {
///   "success": true,
///   "data": {
///     "token": "eyJhbGciOiJIUzI1NiI...",
///     "expires_in": 604800,
///     "user": { "id": "...", "username": "jane", "email": "jane@example.com", "service": "Accounting" },
///     "admin": false,
///     "redirect_to": "/board/employee"
///   }
/// }
/// ```
pub async fn login(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> ApiResult<LoginResponse> {
    let email = payload.email.trim();
    let form = Form::new()
        .field("email", email, validate_email(email))
        .secret("password", validate_password(&payload.password))
        .check()?;

    let user = UserRepository::new(state.pool.clone()).find_by_email(email).await?;
    let stored_hash = user.as_ref().map(|u| u.password_hash.clone());
    let verified = verify_login(payload.password.clone(), stored_hash).await?;
    let user = match user {
        Some(user) if verified => user,
        _ => {
            tracing::info!("Rejected login for {}", email);
            return Err(form.reject(BAD_CREDENTIALS));
        }
    };

    let claims = Claims::for_user(&user);
    let token = generate_jwt(&claims)?;
    let redirect_to = if claims.admin { ADMIN_BOARD } else { EMPLOYEE_BOARD };
    tracing::info!("User {} logged in", user.username);

    Ok(ApiResponse::success(LoginResponse {
        token,
        expires_in: claims.expires_in(),
        admin: claims.admin,
        user: user.into(),
        redirect_to,
    }))
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub service: String,
}

/// POST /auth/register - Create an employee account
///
/// The service must be an existing one and cannot be the administrator service;
/// administrators are created with `desk user create`.
pub async fn register(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RegisterRequest>,
) -> ApiResult<UserProfile> {
    let username = payload.username.trim();
    let email = payload.email.trim();
    let service = payload.service.trim();
    let form = Form::new()
        .field("username", username, validate_username(username))
        .field("email", email, validate_email(email))
        .secret("password", validate_password(&payload.password))
        .field("service", service, validate_selected("service", service))
        .check()?;

    if service == config::config().desk.admin_service {
        return Err(ApiError::forbidden(
            "Administrator accounts cannot be self-registered",
        ));
    }

    let services = LookupRepository::<Service>::new(state.pool.clone());
    if services.find_by_label(service).await?.is_none() {
        return Err(form.reject(format!("Service '{}' does not exist", service)));
    }

    let users = UserRepository::new(state.pool.clone());
    if users.exists(username, email).await? {
        return Err(ApiError::conflict("Username or email is already registered"));
    }

    let user = users
        .create(NewUser {
            username: username.to_string(),
            email: email.to_string(),
            password_hash: hash_password_async(payload.password.clone()).await?,
            service: service.to_string(),
        })
        .await?;
    tracing::info!("Registered user {} in {}", user.username, user.service);

    Ok(ApiResponse::created(user.into()))
}

//! Account endpoints: signup, login, current user

use axum::{Extension, extract::State, http::StatusCode};
use shared::error::{ApiResponse, AppError, ErrorCode};
use shared::models::{AuthResponse, LoginRequest, Role, SignupRequest, User, UserProfile};

use crate::auth::CurrentUser;
use crate::auth::jwt::create_token;
use crate::db;
use crate::error::ServiceError;
use crate::state::AppState;
use crate::util::{hash_password, verify_password};

use super::ApiResult;
use super::extract::Json;

const MIN_PASSWORD_LEN: usize = 8;

fn required<'a>(value: &'a str, field: &str) -> Result<&'a str, AppError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::required(field));
    }
    Ok(value)
}

fn issue_token(state: &AppState, user: &User) -> Result<String, AppError> {
    create_token(user, &state.jwt_secret, state.jwt_expiry_hours).map_err(|e| {
        tracing::error!("JWT creation failed: {e}");
        AppError::new(ErrorCode::InternalError)
    })
}

/// POST /api/auth/signup
pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<(StatusCode, ApiResponse<AuthResponse>), ServiceError> {
    let firstname = required(&req.firstname, "firstname")?;
    let email = required(&req.email, "email")?.to_lowercase();
    let mobile = required(&req.mobile, "mobile")?;
    if req.password.is_empty() {
        return Err(AppError::required("password").into());
    }
    if !email.contains('@') {
        return Err(AppError::with_message(ErrorCode::InvalidFormat, "Invalid email address")
            .with_detail("field", "email")
            .into());
    }
    if req.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::new(ErrorCode::PasswordTooShort).into());
    }

    let hashed = hash_password(&req.password).map_err(|e| {
        tracing::error!("Password hashing failed: {e}");
        AppError::new(ErrorCode::InternalError)
    })?;

    // Self-registered accounts are always patrons
    let new_user = db::users::NewUser {
        firstname,
        email: &email,
        mobile,
        hashed_password: &hashed,
        role: Role::Patron,
    };
    let user = db::users::create(&state.pool, &new_user, shared::util::now_millis())
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::EmailAlreadyRegistered))?;

    let token = issue_token(&state, &user)?;
    tracing::info!(user_id = user.id, "User registered");

    Ok((
        StatusCode::CREATED,
        ApiResponse::success_with_message(
            "User registered successfully",
            AuthResponse {
                token,
                user: user.profile(),
            },
        ),
    ))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<AuthResponse> {
    let email = required(&req.email, "email")?.to_lowercase();
    if req.password.is_empty() {
        return Err(AppError::required("password").into());
    }

    let user = db::users::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(AppError::invalid_credentials)?;

    if !verify_password(&req.password, &user.hashed_password) {
        tracing::info!(user_id = user.id, "Login failed: wrong password");
        return Err(AppError::invalid_credentials().into());
    }

    let token = issue_token(&state, &user)?;
    tracing::info!(user_id = user.id, role = %user.role(), "User logged in");

    Ok(ApiResponse::success_with_message(
        "Login successful",
        AuthResponse {
            token,
            user: user.profile(),
        },
    ))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> ApiResult<UserProfile> {
    let user = db::users::find_by_id(&state.pool, current.id)
        .await?
        .ok_or_else(|| AppError::not_found("User"))?;
    Ok(ApiResponse::success(user.profile()))
}

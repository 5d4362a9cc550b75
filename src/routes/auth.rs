use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::Json, Extension};
use sea_orm::{
    ActiveEnum, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    QueryFilter, Set,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::entities::user::{self, Entity as User, Role};
use crate::error::AppError;
use crate::middleware::auth::CurrentUser;
use crate::routes::users::UserProfile;
use crate::services::credentials;
use crate::validation::{is_valid_email, require_non_empty};

#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
    #[serde(default)]
    user_type: String,
    bio: Option<String>,
    location: Option<String>,
    website: Option<String>,
    specialization: Option<Vec<String>>,
}

#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created, profile + token returned"),
        (status = 400, description = "Missing field, malformed email, or unknown user type"),
        (status = 409, description = "Email already registered")
    ),
    tag = "Authentication"
)]
pub async fn register(
    State(db): State<Arc<DatabaseConnection>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    require_non_empty("name", &payload.name)?;
    require_non_empty("email", &payload.email)?;
    require_non_empty("password", &payload.password)?;
    require_non_empty("userType", &payload.user_type)?;

    if !is_valid_email(&payload.email) {
        return Err(AppError::BadRequest("Invalid email format".to_string()));
    }
    let user_type = Role::try_from_value(&payload.user_type)
        .map_err(|_| AppError::BadRequest("Invalid user type".to_string()))?;

    // Advisory fast path; the unique index below is the authoritative check.
    let existing = User::find()
        .filter(user::Column::Email.eq(&payload.email))
        .one(db.as_ref())
        .await?;
    if existing.is_some() {
        return Err(AppError::Conflict(
            "User already exists with this email".to_string(),
        ));
    }

    let password_hash = credentials::hash_password(&payload.password)?;
    let now = chrono::Utc::now().naive_utc();

    let new_user = user::ActiveModel {
        name: Set(payload.name),
        email: Set(payload.email),
        password: Set(Some(password_hash)),
        user_type: Set(user_type),
        bio: Set(payload.bio),
        location: Set(payload.location),
        website: Set(payload.website),
        specialization: Set(Some(json!(payload.specialization.unwrap_or_default()))),
        is_verified: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let created = new_user.insert(db.as_ref()).await.map_err(|e| {
        AppError::conflict_on_unique(e, "User already exists with this email")
    })?;

    let token = credentials::issue_token(created.id, created.user_type, &created.email)?;
    tracing::info!(user_id = created.id, "user registered");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "User registered successfully",
            "user": UserProfile::from(created),
            "token": token,
        })),
    ))
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful, profile + token returned"),
        (status = 400, description = "Missing email or password"),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "Authentication"
)]
pub async fn login(
    State(db): State<Arc<DatabaseConnection>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<Value>, AppError> {
    if payload.email.trim().is_empty() || payload.password.is_empty() {
        return Err(AppError::BadRequest(
            "Email and password are required".to_string(),
        ));
    }

    let user = User::find()
        .filter(user::Column::Email.eq(&payload.email))
        .one(db.as_ref())
        .await?;

    // One message for both unknown email and wrong password, so the
    // endpoint cannot be used to enumerate accounts.
    let user = match user {
        Some(u)
            if u.password
                .as_deref()
                .is_some_and(|hash| credentials::verify_password(&payload.password, hash)) =>
        {
            u
        }
        _ => {
            return Err(AppError::Unauthorized(
                "Invalid email or password".to_string(),
            ))
        }
    };

    let mut active = user.clone().into_active_model();
    active.last_login = Set(Some(chrono::Utc::now().naive_utc()));
    let user = active.update(db.as_ref()).await?;

    let token = credentials::issue_token(user.id, user.user_type, &user.email)?;
    tracing::info!(user_id = user.id, "user logged in");

    Ok(Json(json!({
        "success": true,
        "message": "Login successful",
        "user": UserProfile::from(user),
        "token": token,
    })))
}

#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SocialLoginRequest {
    #[serde(default)]
    provider: String,
    #[serde(default)]
    provider_id: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    name: String,
    user_type: Option<String>,
    avatar: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/auth/social-login",
    request_body = SocialLoginRequest,
    responses(
        (status = 200, description = "Existing federated identity logged in"),
        (status = 201, description = "New pre-verified account created"),
        (status = 409, description = "Email already registered with another identity")
    ),
    tag = "Authentication"
)]
pub async fn social_login(
    State(db): State<Arc<DatabaseConnection>>,
    Json(payload): Json<SocialLoginRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    require_non_empty("provider", &payload.provider)?;
    require_non_empty("providerId", &payload.provider_id)?;
    require_non_empty("email", &payload.email)?;
    require_non_empty("name", &payload.name)?;

    let known = User::find()
        .filter(user::Column::SocialProvider.eq(&payload.provider))
        .filter(user::Column::SocialProviderId.eq(&payload.provider_id))
        .one(db.as_ref())
        .await?;

    if let Some(user) = known {
        let mut active = user.into_active_model();
        active.last_login = Set(Some(chrono::Utc::now().naive_utc()));
        let user = active.update(db.as_ref()).await?;

        let token = credentials::issue_token(user.id, user.user_type, &user.email)?;
        return Ok((
            StatusCode::OK,
            Json(json!({
                "success": true,
                "message": "Login successful",
                "user": UserProfile::from(user),
                "token": token,
            })),
        ));
    }

    let email_taken = User::find()
        .filter(user::Column::Email.eq(&payload.email))
        .one(db.as_ref())
        .await?;
    if email_taken.is_some() {
        return Err(AppError::Conflict(
            "User already exists with this email".to_string(),
        ));
    }

    let user_type = match payload.user_type.as_deref() {
        Some(raw) => Role::try_from_value(&raw.to_string())
            .map_err(|_| AppError::BadRequest("Invalid user type".to_string()))?,
        None => Role::Filmmaker,
    };
    let now = chrono::Utc::now().naive_utc();

    let new_user = user::ActiveModel {
        name: Set(payload.name),
        email: Set(payload.email),
        user_type: Set(user_type),
        avatar: Set(payload.avatar),
        social_provider: Set(Some(payload.provider)),
        social_provider_id: Set(Some(payload.provider_id)),
        // Federated identities arrive verified by their provider.
        is_verified: Set(true),
        last_login: Set(Some(now)),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let created = new_user.insert(db.as_ref()).await.map_err(|e| {
        AppError::conflict_on_unique(e, "User already exists with this email")
    })?;

    let token = credentials::issue_token(created.id, created.user_type, &created.email)?;
    tracing::info!(user_id = created.id, "social account created");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "User registered and logged in successfully",
            "user": UserProfile::from(created),
            "token": token,
        })),
    ))
}

#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Stateless acknowledgment"),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = [])),
    tag = "Authentication"
)]
pub async fn logout(Extension(CurrentUser(_user)): Extension<CurrentUser>) -> Json<Value> {
    // Tokens are stateless; nothing to revoke server-side.
    Json(json!({
        "success": true,
        "message": "Logged out successfully"
    }))
}

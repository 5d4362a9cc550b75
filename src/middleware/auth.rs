use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use sea_orm::{DatabaseConnection, EntityTrait};

use crate::entities::user::{self, Entity as User};
use crate::error::AppError;
use crate::services::credentials;

/// Authenticated user row, injected into request extensions for handlers
/// behind `auth_middleware`.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub user::Model);

pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::to_string)
}

pub async fn auth_middleware(
    State(db): State<Arc<DatabaseConnection>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(req.headers())
        .ok_or_else(|| AppError::Unauthorized("Token is missing".to_string()))?;

    let claims = credentials::verify_token(&token)
        .ok_or_else(|| AppError::Unauthorized("Token is invalid or expired".to_string()))?;

    // Token may outlive the account; treat a missing row as unauthorized.
    let user = User::find_by_id(claims.user_id)
        .one(db.as_ref())
        .await?
        .ok_or_else(|| AppError::Unauthorized("User not found".to_string()))?;

    req.extensions_mut().insert(CurrentUser(user));
    Ok(next.run(req).await)
}

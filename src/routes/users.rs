use std::sync::Arc;

use axum::{extract::State, response::Json, Extension};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, Set,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::entities::course_enrollment::{self, Entity as CourseEnrollment};
use crate::entities::portfolio::{self, Entity as Portfolio};
use crate::entities::{decode_json_or_default, user};
use crate::error::AppError;
use crate::middleware::auth::CurrentUser;

#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub followers: i32,
    pub following: i32,
    pub projects: u64,
    pub awards: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enrolled_courses: Option<u64>,
}

#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub user_type: user::Role,
    pub bio: String,
    pub location: String,
    pub website: String,
    pub avatar: String,
    pub specialization: Vec<String>,
    pub is_verified: bool,
    pub stats: UserStats,
    pub created_at: chrono::NaiveDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login: Option<chrono::NaiveDateTime>,
}

impl From<user::Model> for UserProfile {
    fn from(user: user::Model) -> Self {
        UserProfile {
            id: user.id,
            name: user.name,
            email: user.email,
            user_type: user.user_type,
            bio: user.bio.unwrap_or_default(),
            location: user.location.unwrap_or_default(),
            website: user.website.unwrap_or_default(),
            avatar: user.avatar.unwrap_or_default(),
            specialization: decode_json_or_default(user.specialization),
            is_verified: user.is_verified,
            stats: UserStats {
                followers: user.followers,
                following: user.following,
                projects: user.projects as u64,
                awards: user.awards,
                enrolled_courses: None,
            },
            created_at: user.created_at,
            last_login: user.last_login,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/users/profile",
    responses(
        (status = 200, description = "Own profile with live counters", body = UserProfile),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn get_profile(
    State(db): State<Arc<DatabaseConnection>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<Value>, AppError> {
    let enrolled_courses = CourseEnrollment::find()
        .filter(course_enrollment::Column::UserId.eq(user.id))
        .count(db.as_ref())
        .await?;
    let portfolios = Portfolio::find()
        .filter(portfolio::Column::UserId.eq(user.id))
        .count(db.as_ref())
        .await?;

    let mut profile = UserProfile::from(user);
    profile.stats.projects = portfolios;
    profile.stats.enrolled_courses = Some(enrolled_courses);

    Ok(Json(json!({ "success": true, "user": profile })))
}

/// Partial update over the fixed set of mutable profile columns; every
/// other key in the request body is ignored.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct UpdateProfileRequest {
    name: Option<String>,
    bio: Option<String>,
    location: Option<String>,
    website: Option<String>,
    specialization: Option<Vec<String>>,
}

impl UpdateProfileRequest {
    fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.bio.is_none()
            && self.location.is_none()
            && self.website.is_none()
            && self.specialization.is_none()
    }
}

#[utoipa::path(
    put,
    path = "/api/users/profile",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated"),
        (status = 400, description = "No updatable field present"),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn update_profile(
    State(db): State<Arc<DatabaseConnection>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<Value>, AppError> {
    if payload.is_empty() {
        return Err(AppError::BadRequest("No valid fields to update".to_string()));
    }

    let mut active = user.into_active_model();
    if let Some(name) = payload.name {
        active.name = Set(name);
    }
    if let Some(bio) = payload.bio {
        active.bio = Set(Some(bio));
    }
    if let Some(location) = payload.location {
        active.location = Set(Some(location));
    }
    if let Some(website) = payload.website {
        active.website = Set(Some(website));
    }
    if let Some(specialization) = payload.specialization {
        active.specialization = Set(Some(json!(specialization)));
    }
    active.updated_at = Set(chrono::Utc::now().naive_utc());
    active.update(db.as_ref()).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Profile updated successfully"
    })))
}

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::Json,
    Extension,
};
use sea_orm::{
    ActiveEnum, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::entities::decode_json_or_default;
use crate::entities::mentorship::{self, Entity as Mentorship, Session, Status};
use crate::entities::user::{self, Entity as User, Role};
use crate::error::AppError;
use crate::middleware::auth::CurrentUser;

/// The other party of a mentorship, keyed as `mentor` or `mentee` in the
/// response depending on which side the caller is on.
#[derive(Serialize, Default, Clone, utoipa::ToSchema)]
pub struct Counterpart {
    pub name: String,
    pub email: String,
    pub avatar: Option<String>,
}

#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MentorshipResponse {
    pub id: i32,
    pub mentor_id: i32,
    pub mentee_id: i32,
    pub status: Status,
    pub specialties: Vec<String>,
    pub bio: Option<String>,
    pub years_experience: Option<i32>,
    pub available_slots: i32,
    pub sessions: Vec<Session>,
    pub created_at: chrono::NaiveDateTime,
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct UpdateMentorshipStatusRequest {
    pub status: String,
}

#[utoipa::path(
    get,
    path = "/api/mentorships",
    responses(
        (status = 200, description = "Mentorships for the caller, enriched with the other party's identity", body = [MentorshipResponse]),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = [])),
    tag = "Mentorships"
)]
pub async fn list_mentorships(
    State(db): State<Arc<DatabaseConnection>>,
    Extension(CurrentUser(caller)): Extension<CurrentUser>,
) -> Result<Json<Value>, AppError> {
    let is_mentor = caller.user_type == Role::Mentor;
    let own_side = if is_mentor {
        mentorship::Column::MentorId
    } else {
        mentorship::Column::MenteeId
    };

    let mentorships = Mentorship::find()
        .filter(own_side.eq(caller.id))
        .order_by_desc(mentorship::Column::CreatedAt)
        .all(db.as_ref())
        .await?;

    // One batched lookup for every counterpart on the other side.
    let counterpart_ids: Vec<i32> = mentorships
        .iter()
        .map(|m| if is_mentor { m.mentee_id } else { m.mentor_id })
        .collect();
    let counterparts: HashMap<i32, Counterpart> = User::find()
        .filter(user::Column::Id.is_in(counterpart_ids))
        .all(db.as_ref())
        .await?
        .into_iter()
        .map(|u| {
            (
                u.id,
                Counterpart {
                    name: u.name,
                    email: u.email,
                    avatar: u.avatar,
                },
            )
        })
        .collect();

    let counterpart_key = if is_mentor { "mentee" } else { "mentor" };
    let items: Vec<Value> = mentorships
        .into_iter()
        .map(|m| {
            let other_id = if is_mentor { m.mentee_id } else { m.mentor_id };
            let other = counterparts.get(&other_id).cloned().unwrap_or_default();
            let body = MentorshipResponse {
                id: m.id,
                mentor_id: m.mentor_id,
                mentee_id: m.mentee_id,
                status: m.status,
                specialties: decode_json_or_default(m.specialties),
                bio: m.bio,
                years_experience: m.years_experience,
                available_slots: m.available_slots,
                sessions: decode_json_or_default(m.sessions),
                created_at: m.created_at,
            };
            let mut value = json!(body);
            value[counterpart_key] = json!(other);
            value
        })
        .collect();

    Ok(Json(json!({
        "success": true,
        "mentorships": items
    })))
}

#[utoipa::path(
    put,
    path = "/api/mentorships/{id}/status",
    params(("id" = i32, Path, description = "Mentorship ID")),
    request_body = UpdateMentorshipStatusRequest,
    responses(
        (status = 200, description = "Status updated"),
        (status = 400, description = "Unknown status or illegal transition"),
        (status = 401, description = "Caller is not a participant"),
        (status = 404, description = "Mentorship not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Mentorships"
)]
pub async fn update_status(
    State(db): State<Arc<DatabaseConnection>>,
    Extension(CurrentUser(caller)): Extension<CurrentUser>,
    Path(mentorship_id): Path<i32>,
    Json(payload): Json<UpdateMentorshipStatusRequest>,
) -> Result<Json<Value>, AppError> {
    let next = Status::try_from_value(&payload.status)
        .map_err(|_| AppError::BadRequest("Invalid status".to_string()))?;

    let mentorship = Mentorship::find_by_id(mentorship_id)
        .one(db.as_ref())
        .await?
        .ok_or_else(|| AppError::NotFound("Mentorship not found".to_string()))?;

    if caller.id != mentorship.mentor_id && caller.id != mentorship.mentee_id {
        return Err(AppError::Unauthorized(
            "Not authorized to update this mentorship".to_string(),
        ));
    }
    if !mentorship.status.can_transition_to(next) {
        return Err(AppError::BadRequest("Invalid status transition".to_string()));
    }

    let mut active = mentorship.into_active_model();
    active.status = Set(next);
    active.updated_at = Set(chrono::Utc::now().naive_utc());
    active.update(db.as_ref()).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Mentorship status updated"
    })))
}

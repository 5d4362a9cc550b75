use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    Extension,
};
use sea_orm::sea_query::{extension::postgres::PgExpr, Expr};
use sea_orm::{
    ActiveEnum, ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::entities::decode_json_or_default;
use crate::entities::opportunity::{self, Entity as Opportunity, Kind};
use crate::entities::opportunity_application::{
    self, Entity as OpportunityApplication, Status as ApplicationStatus,
};
use crate::entities::user::Role;
use crate::error::AppError;
use crate::middleware::auth::CurrentUser;
use crate::pagination::{PageMeta, Pagination};
use crate::validation::require_non_empty;

#[derive(Deserialize, utoipa::IntoParams)]
pub struct ListOpportunitiesQuery {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub search: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OpportunityResponse {
    pub id: i32,
    #[serde(rename = "type")]
    pub kind: Kind,
    pub title: String,
    pub company: String,
    pub description: String,
    pub details: Map<String, Value>,
    pub funding: Option<String>,
    pub location: Option<String>,
    pub category: Option<String>,
    pub deadline: chrono::NaiveDateTime,
    pub is_active: bool,
    pub applications_count: i32,
    pub created_at: chrono::NaiveDateTime,
}

impl From<opportunity::Model> for OpportunityResponse {
    fn from(model: opportunity::Model) -> Self {
        OpportunityResponse {
            id: model.id,
            kind: model.kind,
            title: model.title,
            company: model.company,
            description: model.description,
            details: decode_json_or_default(model.details),
            funding: model.funding,
            location: model.location,
            category: model.category,
            deadline: model.deadline,
            is_active: model.is_active,
            applications_count: model.applications_count,
            created_at: model.created_at,
        }
    }
}

#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplyRequest {
    #[serde(default)]
    pub cover_letter: String,
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct UpdateStatusRequest {
    pub status: String,
}

fn opportunity_filters(query: &ListOpportunitiesQuery) -> Result<Condition, AppError> {
    // Expired and deactivated postings never show up in listings.
    let mut cond = Condition::all()
        .add(opportunity::Column::IsActive.eq(true))
        .add(opportunity::Column::Deadline.gt(chrono::Utc::now().naive_utc()));

    if let Some(raw) = &query.kind {
        let kind = Kind::try_from_value(raw)
            .map_err(|_| AppError::BadRequest("Invalid opportunity type".to_string()))?;
        cond = cond.add(opportunity::Column::Kind.eq(kind));
    }
    if let Some(category) = query.category.as_deref().filter(|s| !s.is_empty()) {
        cond = cond.add(opportunity::Column::Category.eq(category));
    }
    if let Some(location) = query.location.as_deref().filter(|s| !s.is_empty()) {
        let pattern = format!("%{}%", location);
        cond = cond.add(Expr::col(opportunity::Column::Location).ilike(pattern));
    }
    if let Some(search) = query.search.as_deref().filter(|s| !s.trim().is_empty()) {
        let pattern = format!("%{}%", search.trim());
        cond = cond.add(
            Condition::any()
                .add(Expr::col(opportunity::Column::Title).ilike(pattern.clone()))
                .add(Expr::col(opportunity::Column::Description).ilike(pattern.clone()))
                .add(Expr::col(opportunity::Column::Company).ilike(pattern)),
        );
    }

    Ok(cond)
}

#[utoipa::path(
    get,
    path = "/api/opportunities",
    params(ListOpportunitiesQuery),
    responses(
        (status = 200, description = "Active opportunities ordered by nearest deadline", body = [OpportunityResponse]),
        (status = 400, description = "Unknown type filter")
    ),
    tag = "Opportunities"
)]
pub async fn list_opportunities(
    State(db): State<Arc<DatabaseConnection>>,
    Query(query): Query<ListOpportunitiesQuery>,
) -> Result<Json<Value>, AppError> {
    let pagination = Pagination {
        page: query.page,
        limit: query.limit,
    };
    let cond = opportunity_filters(&query)?;

    let total = Opportunity::find().filter(cond.clone()).count(db.as_ref()).await?;
    let opportunities = Opportunity::find()
        .filter(cond)
        .order_by_asc(opportunity::Column::Deadline)
        .limit(pagination.limit())
        .offset(pagination.offset())
        .all(db.as_ref())
        .await?;

    let items: Vec<OpportunityResponse> = opportunities
        .into_iter()
        .map(OpportunityResponse::from)
        .collect();
    let meta = PageMeta::new(pagination.page(), pagination.limit(), total);

    Ok(Json(json!({
        "success": true,
        "opportunities": items,
        "pagination": meta.into_json("totalOpportunities", total),
    })))
}

#[utoipa::path(
    post,
    path = "/api/opportunities/{id}/apply",
    params(("id" = i32, Path, description = "Opportunity ID")),
    request_body = ApplyRequest,
    responses(
        (status = 201, description = "Application submitted"),
        (status = 400, description = "Missing cover letter or deadline passed"),
        (status = 404, description = "Opportunity not found or inactive"),
        (status = 409, description = "Duplicate application")
    ),
    security(("bearer_auth" = [])),
    tag = "Opportunities"
)]
pub async fn apply(
    State(db): State<Arc<DatabaseConnection>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(opportunity_id): Path<i32>,
    Json(payload): Json<ApplyRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    require_non_empty("Cover letter", &payload.cover_letter)?;

    let opportunity = Opportunity::find_by_id(opportunity_id)
        .filter(opportunity::Column::IsActive.eq(true))
        .one(db.as_ref())
        .await?
        .ok_or_else(|| AppError::NotFound("Opportunity not found or inactive".to_string()))?;

    if opportunity.deadline < chrono::Utc::now().naive_utc() {
        return Err(AppError::BadRequest(
            "Application deadline has passed".to_string(),
        ));
    }

    let existing = OpportunityApplication::find()
        .filter(opportunity_application::Column::UserId.eq(user.id))
        .filter(opportunity_application::Column::OpportunityId.eq(opportunity_id))
        .one(db.as_ref())
        .await?;
    if existing.is_some() {
        return Err(AppError::Conflict(
            "Already applied to this opportunity".to_string(),
        ));
    }

    let txn = db.begin().await?;

    let application = opportunity_application::ActiveModel {
        user_id: Set(user.id),
        opportunity_id: Set(opportunity_id),
        cover_letter: Set(payload.cover_letter.trim().to_string()),
        status: Set(ApplicationStatus::Pending),
        applied_at: Set(chrono::Utc::now().naive_utc()),
        updated_at: Set(chrono::Utc::now().naive_utc()),
        ..Default::default()
    };
    application.insert(&txn).await.map_err(|e| {
        AppError::conflict_on_unique(e, "Already applied to this opportunity")
    })?;

    Opportunity::update_many()
        .col_expr(
            opportunity::Column::ApplicationsCount,
            Expr::col(opportunity::Column::ApplicationsCount).add(1),
        )
        .filter(opportunity::Column::Id.eq(opportunity_id))
        .exec(&txn)
        .await?;

    txn.commit().await?;
    tracing::info!(user_id = user.id, opportunity_id, "application submitted");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Application submitted successfully"
        })),
    ))
}

#[utoipa::path(
    put,
    path = "/api/applications/{id}/status",
    params(("id" = i32, Path, description = "Application ID")),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Status updated"),
        (status = 400, description = "Unknown status or illegal transition"),
        (status = 401, description = "Caller is not a sponsor"),
        (status = 404, description = "Application not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Opportunities"
)]
pub async fn update_application_status(
    State(db): State<Arc<DatabaseConnection>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(application_id): Path<i32>,
    Json(payload): Json<UpdateStatusRequest>,
) -> Result<Json<Value>, AppError> {
    if user.user_type != Role::Sponsor {
        return Err(AppError::Unauthorized(
            "Not authorized to review applications".to_string(),
        ));
    }

    let next = ApplicationStatus::try_from_value(&payload.status)
        .map_err(|_| AppError::BadRequest("Invalid status".to_string()))?;

    let application = OpportunityApplication::find_by_id(application_id)
        .one(db.as_ref())
        .await?
        .ok_or_else(|| AppError::NotFound("Application not found".to_string()))?;

    if !application.status.can_transition_to(next) {
        return Err(AppError::BadRequest("Invalid status transition".to_string()));
    }

    let mut active = application.into_active_model();
    active.status = Set(next);
    active.updated_at = Set(chrono::Utc::now().naive_utc());
    active.update(db.as_ref()).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Application status updated"
    })))
}

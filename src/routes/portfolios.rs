use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    Extension,
};
use sea_orm::sea_query::{extension::postgres::PgExpr, Expr};
use sea_orm::{
    ActiveEnum, ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::entities::decode_json_or_default;
use crate::entities::portfolio::{self, Category, Entity as Portfolio};
use crate::entities::user;
use crate::error::AppError;
use crate::middleware::auth::CurrentUser;
use crate::pagination::{PageMeta, Pagination};
use crate::validation::require_non_empty;

#[derive(Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListPortfoliosQuery {
    pub category: Option<String>,
    pub user_id: Option<i32>,
    pub search: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

/// Portfolio item joined with its owner's public identity.
#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioResponse {
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    pub description: String,
    pub thumbnail: Option<String>,
    pub video_url: Option<String>,
    pub tags: Vec<String>,
    pub category: Category,
    pub views: i32,
    pub created_at: chrono::NaiveDateTime,
    pub user: PortfolioOwner,
}

#[derive(Serialize, Default, utoipa::ToSchema)]
pub struct PortfolioOwner {
    pub name: String,
    pub avatar: Option<String>,
}

impl PortfolioResponse {
    fn from_model(model: portfolio::Model, owner: Option<user::Model>) -> Self {
        PortfolioResponse {
            id: model.id,
            user_id: model.user_id,
            title: model.title,
            description: model.description,
            thumbnail: model.thumbnail,
            video_url: model.video_url,
            tags: decode_json_or_default(model.tags),
            category: model.category,
            views: model.views,
            created_at: model.created_at,
            user: owner
                .map(|u| PortfolioOwner {
                    name: u.name,
                    avatar: u.avatar,
                })
                .unwrap_or_default(),
        }
    }
}

#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePortfolioRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    pub thumbnail: Option<String>,
    pub video_url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

fn portfolio_filters(query: &ListPortfoliosQuery) -> Result<Condition, AppError> {
    let mut cond = Condition::all();

    if let Some(raw) = &query.category {
        let category = Category::try_from_value(raw)
            .map_err(|_| AppError::BadRequest("Invalid category".to_string()))?;
        cond = cond.add(portfolio::Column::Category.eq(category));
    }
    if let Some(user_id) = query.user_id {
        cond = cond.add(portfolio::Column::UserId.eq(user_id));
    }
    if let Some(search) = query.search.as_deref().filter(|s| !s.trim().is_empty()) {
        let pattern = format!("%{}%", search.trim());
        cond = cond.add(
            Condition::any()
                .add(Expr::col(portfolio::Column::Title).ilike(pattern.clone()))
                .add(Expr::col(portfolio::Column::Description).ilike(pattern)),
        );
    }

    Ok(cond)
}

#[utoipa::path(
    get,
    path = "/api/portfolios",
    params(ListPortfoliosQuery),
    responses(
        (status = 200, description = "Paginated portfolio gallery", body = [PortfolioResponse]),
        (status = 400, description = "Unknown category filter")
    ),
    tag = "Portfolios"
)]
pub async fn list_portfolios(
    State(db): State<Arc<DatabaseConnection>>,
    Query(query): Query<ListPortfoliosQuery>,
) -> Result<Json<Value>, AppError> {
    let pagination = Pagination {
        page: query.page,
        limit: query.limit,
    };
    let cond = portfolio_filters(&query)?;

    let total = Portfolio::find().filter(cond.clone()).count(db.as_ref()).await?;
    let rows = Portfolio::find()
        .find_also_related(user::Entity)
        .filter(cond)
        .order_by_desc(portfolio::Column::CreatedAt)
        .limit(pagination.limit())
        .offset(pagination.offset())
        .all(db.as_ref())
        .await?;

    let items: Vec<PortfolioResponse> = rows
        .into_iter()
        .map(|(model, owner)| PortfolioResponse::from_model(model, owner))
        .collect();
    let meta = PageMeta::new(pagination.page(), pagination.limit(), total);

    Ok(Json(json!({
        "success": true,
        "portfolios": items,
        "pagination": meta.into_json("totalPortfolios", total),
    })))
}

#[utoipa::path(
    post,
    path = "/api/portfolios",
    request_body = CreatePortfolioRequest,
    responses(
        (status = 201, description = "Portfolio created"),
        (status = 400, description = "Missing required field or unknown category")
    ),
    security(("bearer_auth" = [])),
    tag = "Portfolios"
)]
pub async fn create_portfolio(
    State(db): State<Arc<DatabaseConnection>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(payload): Json<CreatePortfolioRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    require_non_empty("Title", &payload.title)?;
    require_non_empty("Description", &payload.description)?;
    require_non_empty("Category", &payload.category)?;

    let category = Category::try_from_value(&payload.category)
        .map_err(|_| AppError::BadRequest("Invalid category".to_string()))?;

    let now = chrono::Utc::now().naive_utc();
    let item = portfolio::ActiveModel {
        user_id: Set(user.id),
        title: Set(payload.title.trim().to_string()),
        description: Set(payload.description.trim().to_string()),
        thumbnail: Set(payload.thumbnail),
        video_url: Set(payload.video_url),
        tags: Set(Some(serde_json::json!(payload.tags))),
        category: Set(category),
        views: Set(0),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    let inserted = item.insert(db.as_ref()).await?;
    tracing::info!(user_id = user.id, portfolio_id = inserted.id, "portfolio created");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Portfolio created successfully",
            "portfolioId": inserted.id
        })),
    ))
}

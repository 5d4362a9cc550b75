use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::Json,
};
use sea_orm::sea_query::{extension::postgres::PgExpr, Expr};
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};
use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::entities::course::{self, Entity as Course};
use crate::entities::opportunity::{self, Entity as Opportunity};
use crate::entities::portfolio::{self, Entity as Portfolio};
use crate::entities::user::{self, Entity as User};
use crate::error::AppError;
use crate::pagination::Pagination;

const SEARCH_DEFAULT_LIMIT: u64 = 20;

#[derive(Deserialize, utoipa::IntoParams)]
pub struct SearchQuery {
    pub q: Option<String>,
    /// `all` (default) or one of `courses`, `opportunities`, `portfolios`, `users`.
    pub category: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

fn ilike_any<C: ColumnTrait>(columns: &[C], pattern: &str) -> Condition {
    columns.iter().fold(Condition::any(), |cond, col| {
        cond.add(Expr::col(*col).ilike(pattern.to_string()))
    })
}

async fn search_courses(
    db: &DatabaseConnection,
    pattern: &str,
    limit: u64,
    offset: u64,
) -> Result<Vec<Value>, AppError> {
    let rows = Course::find()
        .filter(ilike_any(
            &[course::Column::Title, course::Column::Description],
            pattern,
        ))
        .order_by_desc(course::Column::CreatedAt)
        .limit(limit)
        .offset(offset)
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .map(|c| {
            json!({
                "type": "course",
                "id": c.id,
                "title": c.title,
                "description": c.description,
                "category": c.category,
                "level": c.level,
                "price": c.price,
                "image": c.image,
                "createdAt": c.created_at,
            })
        })
        .collect())
}

async fn search_opportunities(
    db: &DatabaseConnection,
    pattern: &str,
    limit: u64,
    offset: u64,
) -> Result<Vec<Value>, AppError> {
    let cond = Condition::all()
        .add(opportunity::Column::IsActive.eq(true))
        .add(opportunity::Column::Deadline.gt(chrono::Utc::now().naive_utc()))
        .add(ilike_any(
            &[
                opportunity::Column::Title,
                opportunity::Column::Description,
                opportunity::Column::Company,
            ],
            pattern,
        ));

    let rows = Opportunity::find()
        .filter(cond)
        .order_by_asc(opportunity::Column::Deadline)
        .limit(limit)
        .offset(offset)
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .map(|o| {
            json!({
                "type": "opportunity",
                "id": o.id,
                "opportunityType": o.kind,
                "title": o.title,
                "company": o.company,
                "description": o.description,
                "deadline": o.deadline,
                "createdAt": o.created_at,
            })
        })
        .collect())
}

async fn search_portfolios(
    db: &DatabaseConnection,
    pattern: &str,
    limit: u64,
    offset: u64,
) -> Result<Vec<Value>, AppError> {
    let rows = Portfolio::find()
        .find_also_related(User)
        .filter(ilike_any(
            &[portfolio::Column::Title, portfolio::Column::Description],
            pattern,
        ))
        .order_by_desc(portfolio::Column::CreatedAt)
        .limit(limit)
        .offset(offset)
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(p, owner)| {
            json!({
                "type": "portfolio",
                "id": p.id,
                "title": p.title,
                "description": p.description,
                "category": p.category,
                "thumbnail": p.thumbnail,
                "views": p.views,
                "userName": owner.map(|u| u.name),
                "createdAt": p.created_at,
            })
        })
        .collect())
}

async fn search_users(
    db: &DatabaseConnection,
    pattern: &str,
    limit: u64,
    offset: u64,
) -> Result<Vec<Value>, AppError> {
    let rows = User::find()
        .filter(ilike_any(
            &[
                user::Column::Name,
                user::Column::Bio,
                user::Column::Location,
            ],
            pattern,
        ))
        .order_by_desc(user::Column::Followers)
        .limit(limit)
        .offset(offset)
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .map(|u| {
            json!({
                "type": "user",
                "id": u.id,
                "name": u.name,
                "userType": u.user_type,
                "bio": u.bio,
                "location": u.location,
                "avatar": u.avatar,
                "followers": u.followers,
                "createdAt": u.created_at,
            })
        })
        .collect())
}

#[utoipa::path(
    get,
    path = "/api/search",
    params(SearchQuery),
    responses(
        (status = 200, description = "Case-insensitive substring matches grouped per entity"),
        (status = 400, description = "Empty query or unknown category")
    ),
    tag = "Search"
)]
pub async fn search(
    State(db): State<Arc<DatabaseConnection>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Value>, AppError> {
    let q = query
        .q
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::BadRequest("Search query is required".to_string()))?;
    let pattern = format!("%{}%", q);

    let scope = query.category.as_deref().unwrap_or("all");
    let pagination = Pagination {
        page: query.page,
        limit: query.limit,
    };
    let limit = pagination.limit_or(SEARCH_DEFAULT_LIMIT);
    // A combined search splits the limit evenly and always starts at the top.
    let (per_entity, offset) = if scope == "all" {
        ((limit / 4).max(1), 0)
    } else {
        (limit, (pagination.page() - 1) * limit)
    };

    let mut results = Map::new();
    if matches!(scope, "all" | "courses") {
        results.insert(
            "courses".to_string(),
            Value::Array(search_courses(&db, &pattern, per_entity, offset).await?),
        );
    }
    if matches!(scope, "all" | "opportunities") {
        results.insert(
            "opportunities".to_string(),
            Value::Array(search_opportunities(&db, &pattern, per_entity, offset).await?),
        );
    }
    if matches!(scope, "all" | "portfolios") {
        results.insert(
            "portfolios".to_string(),
            Value::Array(search_portfolios(&db, &pattern, per_entity, offset).await?),
        );
    }
    if matches!(scope, "all" | "users") {
        results.insert(
            "users".to_string(),
            Value::Array(search_users(&db, &pattern, per_entity, offset).await?),
        );
    }
    if results.is_empty() {
        return Err(AppError::BadRequest("Invalid search category".to_string()));
    }

    let total_results: usize = results
        .values()
        .filter_map(|v| v.as_array().map(|a| a.len()))
        .sum();

    Ok(Json(json!({
        "success": true,
        "query": q,
        "category": scope,
        "results": results,
        "totalResults": total_results,
        "pagination": {
            "currentPage": pagination.page(),
            "hasNext": total_results as u64 == limit,
            "hasPrev": pagination.page() > 1,
        }
    })))
}

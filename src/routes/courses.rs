use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::Json,
    Extension,
};
use sea_orm::sea_query::{extension::postgres::PgExpr, Expr};
use sea_orm::{
    ActiveEnum, ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::entities::course::{self, Category, Entity as Course, Instructor, Lesson, Level};
use crate::entities::course_enrollment::{self, Entity as CourseEnrollment};
use crate::entities::decode_json_or_default;
use crate::error::AppError;
use crate::middleware::auth::{bearer_token, CurrentUser};
use crate::pagination::{PageMeta, Pagination};
use crate::services::credentials;

#[derive(Deserialize, utoipa::IntoParams)]
pub struct ListCoursesQuery {
    pub category: Option<String>,
    pub level: Option<String>,
    pub search: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseResponse {
    pub id: i32,
    pub title: String,
    pub category: Category,
    pub instructor: Instructor,
    pub description: String,
    pub image: Option<String>,
    pub duration: Option<String>,
    pub level: Level,
    pub price: f64,
    pub lessons: Vec<Lesson>,
    pub is_published: bool,
    pub enrolled_students: i32,
    pub created_at: chrono::NaiveDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_enrolled: Option<bool>,
}

impl From<course::Model> for CourseResponse {
    fn from(model: course::Model) -> Self {
        CourseResponse {
            id: model.id,
            title: model.title,
            category: model.category,
            instructor: decode_json_or_default(model.instructor),
            description: model.description,
            image: model.image,
            duration: model.duration,
            level: model.level,
            price: model.price,
            lessons: decode_json_or_default(model.lessons),
            is_published: model.is_published,
            enrolled_students: model.enrolled_count,
            created_at: model.created_at,
            is_enrolled: None,
        }
    }
}

fn course_filters(query: &ListCoursesQuery) -> Result<Condition, AppError> {
    let mut cond = Condition::all();

    if let Some(raw) = &query.category {
        let category = Category::try_from_value(raw)
            .map_err(|_| AppError::BadRequest("Invalid category".to_string()))?;
        cond = cond.add(course::Column::Category.eq(category));
    }
    if let Some(raw) = &query.level {
        let level = Level::try_from_value(raw)
            .map_err(|_| AppError::BadRequest("Invalid level".to_string()))?;
        cond = cond.add(course::Column::Level.eq(level));
    }
    if let Some(search) = query.search.as_deref().filter(|s| !s.trim().is_empty()) {
        let pattern = format!("%{}%", search.trim());
        cond = cond.add(
            Condition::any()
                .add(Expr::col(course::Column::Title).ilike(pattern.clone()))
                .add(Expr::col(course::Column::Description).ilike(pattern)),
        );
    }

    Ok(cond)
}

#[utoipa::path(
    get,
    path = "/api/courses",
    params(ListCoursesQuery),
    responses(
        (status = 200, description = "Paginated course catalog", body = [CourseResponse]),
        (status = 400, description = "Unknown category or level filter")
    ),
    tag = "Courses"
)]
pub async fn list_courses(
    State(db): State<Arc<DatabaseConnection>>,
    Query(query): Query<ListCoursesQuery>,
) -> Result<Json<Value>, AppError> {
    let pagination = Pagination {
        page: query.page,
        limit: query.limit,
    };
    let cond = course_filters(&query)?;

    let total = Course::find().filter(cond.clone()).count(db.as_ref()).await?;
    let courses = Course::find()
        .filter(cond)
        .order_by_desc(course::Column::CreatedAt)
        .limit(pagination.limit())
        .offset(pagination.offset())
        .all(db.as_ref())
        .await?;

    let items: Vec<CourseResponse> = courses.into_iter().map(CourseResponse::from).collect();
    let meta = PageMeta::new(pagination.page(), pagination.limit(), total);

    Ok(Json(json!({
        "success": true,
        "courses": items,
        "pagination": meta.into_json("totalCourses", total),
    })))
}

#[utoipa::path(
    get,
    path = "/api/courses/{id}",
    params(("id" = i32, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course detail; includes isEnrolled for authenticated callers", body = CourseResponse),
        (status = 404, description = "Course not found")
    ),
    tag = "Courses"
)]
pub async fn get_course(
    State(db): State<Arc<DatabaseConnection>>,
    Path(course_id): Path<i32>,
    headers: HeaderMap,
) -> Result<Json<Value>, AppError> {
    let course = Course::find_by_id(course_id)
        .one(db.as_ref())
        .await?
        .ok_or_else(|| AppError::NotFound("Course not found".to_string()))?;

    let mut response = CourseResponse::from(course);

    // Auth is optional here; a valid token just adds the enrollment flag.
    if let Some(claims) = bearer_token(&headers).and_then(|t| credentials::verify_token(&t)) {
        let enrolled = CourseEnrollment::find()
            .filter(course_enrollment::Column::UserId.eq(claims.user_id))
            .filter(course_enrollment::Column::CourseId.eq(course_id))
            .one(db.as_ref())
            .await?;
        response.is_enrolled = Some(enrolled.is_some());
    }

    Ok(Json(json!({ "success": true, "course": response })))
}

#[utoipa::path(
    post,
    path = "/api/courses/{id}/enroll",
    params(("id" = i32, Path, description = "Course ID")),
    responses(
        (status = 201, description = "Enrollment created"),
        (status = 404, description = "Course not found"),
        (status = 409, description = "Already enrolled")
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
pub async fn enroll(
    State(db): State<Arc<DatabaseConnection>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(course_id): Path<i32>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    Course::find_by_id(course_id)
        .one(db.as_ref())
        .await?
        .ok_or_else(|| AppError::NotFound("Course not found".to_string()))?;

    // Advisory check; the unique (user, course) index is authoritative.
    let existing = CourseEnrollment::find()
        .filter(course_enrollment::Column::UserId.eq(user.id))
        .filter(course_enrollment::Column::CourseId.eq(course_id))
        .one(db.as_ref())
        .await?;
    if existing.is_some() {
        return Err(AppError::Conflict(
            "Already enrolled in this course".to_string(),
        ));
    }

    let txn = db.begin().await?;

    let enrollment = course_enrollment::ActiveModel {
        user_id: Set(user.id),
        course_id: Set(course_id),
        progress: Set(0),
        enrolled_at: Set(chrono::Utc::now().naive_utc()),
        ..Default::default()
    };
    enrollment.insert(&txn).await.map_err(|e| {
        AppError::conflict_on_unique(e, "Already enrolled in this course")
    })?;

    Course::update_many()
        .col_expr(
            course::Column::EnrolledCount,
            Expr::col(course::Column::EnrolledCount).add(1),
        )
        .filter(course::Column::Id.eq(course_id))
        .exec(&txn)
        .await?;

    txn.commit().await?;
    tracing::info!(user_id = user.id, course_id, "course enrollment created");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Successfully enrolled in course"
        })),
    ))
}

mod auth;
mod courses;
mod home;
mod mentorships;
mod opportunities;
mod portfolios;
mod search;
mod upload;
mod users;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    middleware,
    routing::{get, post, put},
    Router,
};
use sea_orm::DatabaseConnection;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::get_config;
use crate::error::AppError;
use crate::middleware::auth::auth_middleware;

// Define the OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // General endpoints
        home::root,
        home::health,
        // Authentication endpoints
        auth::register,
        auth::login,
        auth::social_login,
        auth::logout,
        // Profile endpoints
        users::get_profile,
        users::update_profile,
        // Course endpoints
        courses::list_courses,
        courses::get_course,
        courses::enroll,
        // Opportunity endpoints
        opportunities::list_opportunities,
        opportunities::apply,
        opportunities::update_application_status,
        // Portfolio endpoints
        portfolios::list_portfolios,
        portfolios::create_portfolio,
        // Mentorship endpoints
        mentorships::list_mentorships,
        mentorships::update_status,
        // Search and upload
        search::search,
        upload::upload_file,
    ),
    components(
        schemas(
            // Auth schemas
            auth::RegisterRequest,
            auth::LoginRequest,
            auth::SocialLoginRequest,
            // Profile schemas
            users::UserProfile,
            users::UserStats,
            users::UpdateProfileRequest,
            // Course schemas
            courses::CourseResponse,
            crate::entities::course::Category,
            crate::entities::course::Level,
            crate::entities::course::Instructor,
            crate::entities::course::Lesson,
            // Opportunity schemas
            opportunities::OpportunityResponse,
            opportunities::ApplyRequest,
            opportunities::UpdateStatusRequest,
            crate::entities::opportunity::Kind,
            crate::entities::opportunity_application::Status,
            // Portfolio schemas
            portfolios::PortfolioResponse,
            portfolios::PortfolioOwner,
            portfolios::CreatePortfolioRequest,
            crate::entities::portfolio::Category,
            // Mentorship schemas
            mentorships::MentorshipResponse,
            mentorships::Counterpart,
            mentorships::UpdateMentorshipStatusRequest,
            crate::entities::mentorship::Status,
            crate::entities::mentorship::Session,
            crate::entities::user::Role,
        )
    ),
    tags(
        (name = "Home", description = "Service banner and health check"),
        (name = "Authentication", description = "Registration, login and social login"),
        (name = "Users", description = "Profile management"),
        (name = "Courses", description = "Course catalog and enrollment"),
        (name = "Opportunities", description = "Grants, jobs and applications"),
        (name = "Portfolios", description = "Filmmaker portfolio gallery"),
        (name = "Mentorships", description = "Mentor/mentee relationships"),
        (name = "Search", description = "Cross-entity search"),
        (name = "Upload", description = "Media file uploads")
    ),
    info(
        title = "Cinda API",
        version = "0.1.0",
        description = "A Rust/Axum backend for a filmmaker community platform: accounts, courses, opportunities, portfolios and mentorships",
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

// Add security scheme for JWT Bearer tokens
struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.as_mut().unwrap();
        components.add_security_scheme(
            "bearer_auth",
            utoipa::openapi::security::SecurityScheme::Http(
                utoipa::openapi::security::Http::new(
                    utoipa::openapi::security::HttpAuthScheme::Bearer,
                ),
            ),
        );
    }
}

fn cors_layer() -> CorsLayer {
    let config = get_config();
    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    // allow_credentials rules out wildcard origins/headers, so everything
    // is listed explicitly.
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
}

async fn unknown_route() -> AppError {
    AppError::NotFound("Endpoint not found".to_string())
}

async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed("Method not allowed".to_string())
}

pub fn create_routes(db: DatabaseConnection) -> Router {
    let config = get_config();
    let db = Arc::new(db);

    // Swagger UI (stateless)
    let swagger_router: Router = SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
        .into();

    // Protected routes that require auth
    let protected_routes = Router::new()
        .route("/api/auth/logout", post(auth::logout))
        .route(
            "/api/users/profile",
            get(users::get_profile).put(users::update_profile),
        )
        .route("/api/courses/{id}/enroll", post(courses::enroll))
        .route("/api/opportunities/{id}/apply", post(opportunities::apply))
        .route(
            "/api/applications/{id}/status",
            put(opportunities::update_application_status),
        )
        .route("/api/portfolios", post(portfolios::create_portfolio))
        .route("/api/mentorships", get(mentorships::list_mentorships))
        .route("/api/mentorships/{id}/status", put(mentorships::update_status))
        .route("/api/upload", post(upload::upload_file))
        .layer(middleware::from_fn_with_state(db.clone(), auth_middleware));

    // Public routes (no auth required) and merge all together
    let app_routes = Router::new()
        .route("/", get(home::root))
        .route("/api/health", get(home::health))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/social-login", post(auth::social_login))
        .route("/api/courses", get(courses::list_courses))
        .route("/api/courses/{id}", get(courses::get_course))
        .route("/api/opportunities", get(opportunities::list_opportunities))
        .route("/api/portfolios", get(portfolios::list_portfolios))
        .route("/api/search", get(search::search))
        .merge(protected_routes)
        .fallback(unknown_route)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(DefaultBodyLimit::max(config.max_file_size))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(db);

    // Merge Swagger UI (which has no state) with the rest; uploaded files
    // are served back under /uploads.
    Router::new()
        .merge(swagger_router)
        .merge(app_routes)
        .nest_service("/uploads", ServeDir::new(&config.upload_dir))
}

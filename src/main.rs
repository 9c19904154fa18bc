mod auth;
mod config;
mod db;
mod posts;

use std::sync::Arc;

use axum::{
    extract::FromRef,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use auth::{AuthService, TokenService, UserRepository};
use config::AppConfig;
use posts::{CommentsRepository, PostService, PostsRepository};

/// OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        auth::handlers::register_handler,
        auth::handlers::login_handler,
        posts::handlers::list_posts_handler,
        posts::handlers::create_post_handler,
        posts::handlers::create_comment_handler,
    ),
    components(
        schemas(
            auth::models::RegisterRequest,
            auth::models::RegisterResponse,
            auth::models::LoginRequest,
            auth::models::LoginResponse,
            posts::models::CreatePostRequest,
            posts::models::CreatePostResponse,
            posts::models::CreateCommentRequest,
            posts::models::CommentCreatedResponse,
            posts::models::PostResponse,
            posts::models::CommentResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "User registration and login endpoints"),
        (name = "posts", description = "Post and comment endpoints")
    ),
    info(
        title = "Blog API",
        version = "1.0.0",
        description = "RESTful JSON API for a minimal blog platform"
    )
)]
struct ApiDoc;

/// Registers the bearer-token security scheme referenced by protected paths
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};

        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Application state shared across handlers
#[derive(Clone)]
struct AppState {
    auth_service: AuthService,
    post_service: PostService,
    token_service: Arc<TokenService>,
}

impl FromRef<AppState> for Arc<TokenService> {
    fn from_ref(state: &AppState) -> Self {
        state.token_service.clone()
    }
}

/// Creates and configures the application router
/// Maps all API endpoints to their handlers and adds CORS middleware
fn create_router(db: PgPool, token_service: Arc<TokenService>) -> Router {
    use tower_http::cors::{Any, CorsLayer};

    let user_repo = UserRepository::new(db.clone());
    let auth_service = AuthService::new(user_repo, token_service.clone());

    let posts_repo = PostsRepository::new(db.clone());
    let comments_repo = CommentsRepository::new(db);
    let post_service = PostService::new(posts_repo, comments_repo);

    let state = AppState {
        auth_service,
        post_service,
        token_service,
    };

    // Configure CORS to allow all origins, methods, and headers
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // API routes
        .route("/api/auth/register", post(auth::handlers::register_handler))
        .route("/api/auth/login", post(auth::handlers::login_handler))
        .route("/api/posts", get(posts::handlers::list_posts_handler))
        .route("/api/posts", post(posts::handlers::create_post_handler))
        .route(
            "/api/posts/:post_id/comments",
            post(posts::handlers::create_comment_handler),
        )
        .layer(cors)
        .with_state(state)
}

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    tracing::info!("Blog API - Starting...");

    // Load configuration; a missing JWT_SECRET or DATABASE_URL aborts startup
    let config = AppConfig::from_env().unwrap_or_else(|e| {
        tracing::error!("Configuration error: {}", e);
        std::process::exit(1);
    });

    // Create database connection pool
    tracing::info!("Connecting to database...");
    let db_pool = db::create_pool(&config.database_url)
        .await
        .expect("Failed to create database pool");

    // Run SQLx migrations on startup
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Migrations completed successfully");

    // The signing secret is fixed here for the process lifetime
    let token_service = Arc::new(TokenService::new(config.jwt_secret.clone()));

    // Create the application router
    let app = create_router(db_pool, token_service);

    // Start the Axum server
    let addr = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Blog API is running on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);

    axum::serve(listener, app)
        .await
        .expect("Server error");
}

#[cfg(test)]
mod tests;

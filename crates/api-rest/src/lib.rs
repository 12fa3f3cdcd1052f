//! # API REST
//!
//! REST API implementation for Folio.
//!
//! Handles:
//! - the page CRUD endpoints under `/api` with axum
//! - OpenAPI/Swagger documentation
//! - serving the editor front end from a static directory
//! - REST-specific concerns (JSON bodies, status codes, CORS, request logging)
//!
//! Uses `api-shared` for request/response types and `folio-core` for the page lifecycle.

#![warn(rust_2018_idioms)]

mod error;
mod handlers;

pub use error::ApiError;

use api_shared::{CreatePageReq, DeletePageRes, ErrorRes, HealthRes, HealthService, UpdatePageReq};
use axum::{
    handler::HandlerWithoutStateExt,
    routing::get,
    Router,
};
use folio_core::{Page, PageService};
use std::path::Path;
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Application state shared across REST API handlers.
#[derive(Clone)]
pub struct AppState {
    pages: PageService,
    health: HealthService,
}

impl AppState {
    pub fn new(pages: PageService) -> Self {
        Self {
            pages,
            health: HealthService::new(),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health,
        handlers::list_pages,
        handlers::get_page,
        handlers::create_page,
        handlers::update_page,
        handlers::delete_page,
    ),
    components(schemas(
        HealthRes,
        Page,
        CreatePageReq,
        UpdatePageReq,
        DeletePageRes,
        ErrorRes,
    ))
)]
pub struct ApiDoc;

/// Builds the full application router.
///
/// `/api/*` carries the JSON API (unmatched API paths answer 404 with a JSON error), Swagger UI
/// lives at `/swagger-ui`, and every other path is served from `frontend_dir`, with `/` mapping
/// to `index.html`.
pub fn router(state: AppState, frontend_dir: &Path) -> Router {
    let api = Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/pages",
            get(handlers::list_pages).post(handlers::create_page),
        )
        .route(
            "/pages/:id",
            get(handlers::get_page)
                .put(handlers::update_page)
                .delete(handlers::delete_page),
        )
        .fallback(handlers::not_found);

    let frontend = ServeDir::new(frontend_dir).not_found_service(handlers::not_found.into_service());

    Router::new()
        .nest("/api", api)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback_service(frontend)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

//! REST handlers.
//!
//! Each handler is a thin translation between JSON bodies and one `PageService` call.

use crate::error::{ApiError, MSG_ROUTE_NOT_FOUND};
use crate::AppState;
use api_shared::{CreatePageReq, DeletePageRes, ErrorRes, HealthRes, UpdatePageReq};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json,
};
use folio_core::Page;

#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Reports status `"OK"`, the current time and the process uptime in seconds. Used for
/// monitoring and by the test suite to confirm the server is up.
#[axum::debug_handler]
pub(crate) async fn health(State(state): State<AppState>) -> Json<HealthRes> {
    Json(state.health.check_health())
}

#[utoipa::path(
    get,
    path = "/api/pages",
    responses(
        (status = 200, description = "Every page in collection order", body = [Page]),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// List all pages
///
/// Returns the whole collection exactly as stored.
///
/// # Errors
/// Returns `500 Internal Server Error` if the collection cannot be loaded.
#[axum::debug_handler]
pub(crate) async fn list_pages(State(state): State<AppState>) -> Result<Json<Vec<Page>>, ApiError> {
    Ok(Json(state.pages.list()?))
}

#[utoipa::path(
    get,
    path = "/api/pages/{id}",
    params(("id" = String, Path, description = "Page id")),
    responses(
        (status = 200, description = "The page", body = Page),
        (status = 404, description = "Page not found", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub(crate) async fn get_page(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Page>, ApiError> {
    Ok(Json(state.pages.get(&id)?))
}

#[utoipa::path(
    post,
    path = "/api/pages",
    request_body = CreatePageReq,
    responses(
        (status = 201, description = "Page created", body = Page),
        (status = 400, description = "Title or content required", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Create a new page
///
/// The page gets a generated id and both timestamps. A missing title becomes the configured
/// default title.
///
/// # Errors
/// Returns `400 Bad Request` if title and content are both missing or empty, or if the body is not
/// valid JSON.
#[axum::debug_handler]
pub(crate) async fn create_page(
    State(state): State<AppState>,
    body: Result<Json<CreatePageReq>, JsonRejection>,
) -> Result<(StatusCode, Json<Page>), ApiError> {
    let Json(req) = body?;
    let page = state.pages.create(req.title, req.content)?;
    Ok((StatusCode::CREATED, Json(page)))
}

#[utoipa::path(
    put,
    path = "/api/pages/{id}",
    params(("id" = String, Path, description = "Page id")),
    request_body = UpdatePageReq,
    responses(
        (status = 200, description = "Page updated", body = Page),
        (status = 400, description = "Bad request", body = ErrorRes),
        (status = 404, description = "Page not found", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Update a page
///
/// Fields missing from the body keep their stored values; an empty title is ignored while an
/// empty content clears the body. `updatedAt` is always refreshed.
#[axum::debug_handler]
pub(crate) async fn update_page(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<UpdatePageReq>, JsonRejection>,
) -> Result<Json<Page>, ApiError> {
    let Json(req) = body?;
    Ok(Json(state.pages.update(&id, req.title, req.content)?))
}

#[utoipa::path(
    delete,
    path = "/api/pages/{id}",
    params(("id" = String, Path, description = "Page id")),
    responses(
        (status = 200, description = "Page deleted", body = DeletePageRes),
        (status = 404, description = "Page not found", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub(crate) async fn delete_page(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeletePageRes>, ApiError> {
    let page = state.pages.delete(&id)?;
    Ok(Json(DeletePageRes {
        message: "Page deleted".into(),
        page,
    }))
}

pub(crate) async fn not_found() -> ApiError {
    ApiError::NotFound(MSG_ROUTE_NOT_FOUND)
}

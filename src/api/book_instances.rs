//! Book instance (copy) endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};

use super::{DeleteRequest, FormBody};
use crate::{
    error::AppResult,
    models::{
        book_instance::{BookInstanceDetailResponse, BookInstanceResponse, BookInstanceShort},
        BookInstanceForm,
    },
    AppState,
};

/// List all copies
#[utoipa::path(
    get,
    path = "/bookinstances",
    tag = "bookinstances",
    responses(
        (status = 200, description = "All copies with their book title", body = Vec<BookInstanceShort>)
    )
)]
pub async fn list_book_instances(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<BookInstanceShort>>> {
    let instances = state.services.book_instances.list().await?;
    Ok(Json(instances))
}

/// Get a copy with its book
#[utoipa::path(
    get,
    path = "/bookinstance/{id}",
    tag = "bookinstances",
    params(
        ("id" = String, Path, description = "Book instance ID")
    ),
    responses(
        (status = 200, description = "Copy details", body = BookInstanceDetailResponse),
        (status = 404, description = "Book copy not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_book_instance(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<BookInstanceDetailResponse>> {
    let detail = state.services.book_instances.detail(&id).await?;
    Ok(Json(detail))
}

/// Create a copy
#[utoipa::path(
    post,
    path = "/bookinstance/create",
    tag = "bookinstances",
    request_body = BookInstanceForm,
    responses(
        (status = 200, description = "Copy created", body = BookInstanceResponse),
        (status = 400, description = "Invalid fields, unsaved copy echoed back")
    )
)]
pub async fn create_book_instance(
    State(state): State<AppState>,
    FormBody(form): FormBody<BookInstanceForm>,
) -> AppResult<Json<BookInstanceResponse>> {
    let book_instance = state.services.book_instances.create(form).await?;
    Ok(Json(BookInstanceResponse { book_instance }))
}

/// Delete a copy
#[utoipa::path(
    post,
    path = "/bookinstance/delete",
    tag = "bookinstances",
    request_body = DeleteRequest,
    responses(
        (status = 200, description = "Copy deleted")
    )
)]
pub async fn delete_book_instance(
    State(state): State<AppState>,
    FormBody(request): FormBody<DeleteRequest>,
) -> AppResult<Json<Value>> {
    state.services.book_instances.delete(&request.id).await?;
    Ok(Json(json!({ "bookInstance": "Book copy has been deleted" })))
}

/// Update a copy
#[utoipa::path(
    post,
    path = "/bookinstance/{id}/update",
    tag = "bookinstances",
    params(
        ("id" = String, Path, description = "Book instance ID")
    ),
    request_body = BookInstanceForm,
    responses(
        (status = 200, description = "Copy updated", body = BookInstanceResponse),
        (status = 400, description = "Invalid fields"),
        (status = 404, description = "Book copy not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_book_instance(
    State(state): State<AppState>,
    Path(id): Path<String>,
    FormBody(form): FormBody<BookInstanceForm>,
) -> AppResult<Json<BookInstanceResponse>> {
    let book_instance = state.services.book_instances.update(&id, form).await?;
    Ok(Json(BookInstanceResponse { book_instance }))
}

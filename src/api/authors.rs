//! Author endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};

use super::{DeleteRequest, FormBody};
use crate::{
    error::AppResult,
    models::{
        author::{AuthorDetailResponse, AuthorResponse, AuthorShort},
        AuthorForm,
    },
    AppState,
};

/// List all authors
#[utoipa::path(
    get,
    path = "/authors",
    tag = "authors",
    responses(
        (status = 200, description = "Authors in store order", body = Vec<AuthorShort>)
    )
)]
pub async fn list_authors(State(state): State<AppState>) -> AppResult<Json<Vec<AuthorShort>>> {
    let authors = state.services.authors.list().await?;
    Ok(Json(authors))
}

/// Get an author with their books
#[utoipa::path(
    get,
    path = "/author/{id}",
    tag = "authors",
    params(
        ("id" = String, Path, description = "Author ID")
    ),
    responses(
        (status = 200, description = "Author details", body = AuthorDetailResponse),
        (status = 404, description = "Author not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_author(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<AuthorDetailResponse>> {
    let detail = state.services.authors.detail(&id).await?;
    Ok(Json(detail))
}

/// Create an author
#[utoipa::path(
    post,
    path = "/author/create",
    tag = "authors",
    request_body = AuthorForm,
    responses(
        (status = 200, description = "Author created", body = AuthorResponse),
        (status = 400, description = "Invalid fields, unsaved author echoed back")
    )
)]
pub async fn create_author(
    State(state): State<AppState>,
    FormBody(form): FormBody<AuthorForm>,
) -> AppResult<Json<AuthorResponse>> {
    let author = state.services.authors.create(form).await?;
    Ok(Json(AuthorResponse { author }))
}

/// Delete an author that has no books
#[utoipa::path(
    post,
    path = "/author/delete",
    tag = "authors",
    request_body = DeleteRequest,
    responses(
        (status = 200, description = "Author deleted"),
        (status = 400, description = "Author still has books")
    )
)]
pub async fn delete_author(
    State(state): State<AppState>,
    FormBody(request): FormBody<DeleteRequest>,
) -> AppResult<Json<Value>> {
    state.services.authors.delete(&request.id).await?;
    Ok(Json(json!({ "author": "Author deleted" })))
}

/// Update an author
#[utoipa::path(
    post,
    path = "/author/{id}/update",
    tag = "authors",
    params(
        ("id" = String, Path, description = "Author ID")
    ),
    request_body = AuthorForm,
    responses(
        (status = 200, description = "Author updated", body = AuthorResponse),
        (status = 400, description = "Invalid fields"),
        (status = 404, description = "Author not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_author(
    State(state): State<AppState>,
    Path(id): Path<String>,
    FormBody(form): FormBody<AuthorForm>,
) -> AppResult<Json<AuthorResponse>> {
    let author = state.services.authors.update(&id, form).await?;
    Ok(Json(AuthorResponse { author }))
}

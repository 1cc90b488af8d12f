//! Genre endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};

use super::{DeleteRequest, FormBody};
use crate::{
    error::AppResult,
    models::{
        genre::{GenreDetailResponse, GenreResponse},
        CreateGenre, Genre, UpdateGenre,
    },
    AppState,
};

/// List all genres
#[utoipa::path(
    get,
    path = "/genres",
    tag = "genres",
    responses(
        (status = 200, description = "All genres", body = Vec<Genre>)
    )
)]
pub async fn list_genres(State(state): State<AppState>) -> AppResult<Json<Vec<Genre>>> {
    let genres = state.services.genres.list().await?;
    Ok(Json(genres))
}

/// Get a genre with the books filed under it
#[utoipa::path(
    get,
    path = "/genre/{id}",
    tag = "genres",
    params(
        ("id" = String, Path, description = "Genre ID")
    ),
    responses(
        (status = 200, description = "Genre details", body = GenreDetailResponse),
        (status = 404, description = "Genre not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_genre(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<GenreDetailResponse>> {
    let detail = state.services.genres.detail(&id).await?;
    Ok(Json(detail))
}

/// Create a genre
#[utoipa::path(
    post,
    path = "/genre/create",
    tag = "genres",
    request_body = CreateGenre,
    responses(
        (status = 200, description = "Genre created", body = GenreResponse),
        (status = 400, description = "Invalid name"),
        (status = 409, description = "Genre already exists")
    )
)]
pub async fn create_genre(
    State(state): State<AppState>,
    FormBody(form): FormBody<CreateGenre>,
) -> AppResult<Json<GenreResponse>> {
    let genre = state.services.genres.create(form).await?;
    Ok(Json(GenreResponse { genre }))
}

/// Delete a genre no book is filed under
#[utoipa::path(
    post,
    path = "/genre/delete",
    tag = "genres",
    request_body = DeleteRequest,
    responses(
        (status = 200, description = "Genre deleted"),
        (status = 400, description = "Genre still has books")
    )
)]
pub async fn delete_genre(
    State(state): State<AppState>,
    FormBody(request): FormBody<DeleteRequest>,
) -> AppResult<Json<Value>> {
    state.services.genres.delete(&request.id).await?;
    Ok(Json(json!({ "genre": "Genre deleted" })))
}

/// Rename a genre
#[utoipa::path(
    post,
    path = "/genre/{id}/update",
    tag = "genres",
    params(
        ("id" = String, Path, description = "Genre ID")
    ),
    request_body = UpdateGenre,
    responses(
        (status = 200, description = "Genre updated", body = GenreResponse),
        (status = 400, description = "Invalid name"),
        (status = 404, description = "Genre not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_genre(
    State(state): State<AppState>,
    Path(id): Path<String>,
    FormBody(form): FormBody<UpdateGenre>,
) -> AppResult<Json<GenreResponse>> {
    let genre = state.services.genres.update(&id, form).await?;
    Ok(Json(GenreResponse { genre }))
}

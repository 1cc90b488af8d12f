//! Book endpoints and the catalog home

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};

use super::{DeleteRequest, FormBody};
use crate::{
    error::AppResult,
    models::{
        book::{BookDetailResponse, BookResponse, BookShort},
        BookForm, CatalogCounts,
    },
    AppState,
};

/// Catalog home: record counts
#[utoipa::path(
    get,
    path = "/",
    tag = "books",
    responses(
        (status = 200, description = "Record counts", body = CatalogCounts)
    )
)]
pub async fn index(State(state): State<AppState>) -> AppResult<Json<CatalogCounts>> {
    let counts = state.services.books.counts().await?;
    Ok(Json(counts))
}

/// List all books, sorted by title
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    responses(
        (status = 200, description = "Books sorted by title", body = Vec<BookShort>)
    )
)]
pub async fn list_books(State(state): State<AppState>) -> AppResult<Json<Vec<BookShort>>> {
    let books = state.services.books.list().await?;
    Ok(Json(books))
}

/// Get a book with its author, genres and copies
#[utoipa::path(
    get,
    path = "/book/{id}",
    tag = "books",
    params(
        ("id" = String, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book details", body = BookDetailResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<BookDetailResponse>> {
    let detail = state.services.books.detail(&id).await?;
    Ok(Json(detail))
}

/// Create a book
#[utoipa::path(
    post,
    path = "/book/create",
    tag = "books",
    request_body = BookForm,
    responses(
        (status = 200, description = "Book created", body = BookResponse),
        (status = 400, description = "Invalid fields, unsaved book echoed back")
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    FormBody(form): FormBody<BookForm>,
) -> AppResult<Json<BookResponse>> {
    let book = state.services.books.create(form).await?;
    Ok(Json(BookResponse { book }))
}

/// Delete a book that has no copies
#[utoipa::path(
    post,
    path = "/book/delete",
    tag = "books",
    request_body = DeleteRequest,
    responses(
        (status = 200, description = "Book deleted"),
        (status = 400, description = "Book still has copies")
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    FormBody(request): FormBody<DeleteRequest>,
) -> AppResult<Json<Value>> {
    state.services.books.delete(&request.id).await?;
    Ok(Json(json!({ "book": "Book deleted" })))
}

/// Update a book
#[utoipa::path(
    post,
    path = "/book/{id}/update",
    tag = "books",
    params(
        ("id" = String, Path, description = "Book ID")
    ),
    request_body = BookForm,
    responses(
        (status = 200, description = "Book updated", body = BookResponse),
        (status = 400, description = "Invalid fields"),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
    FormBody(form): FormBody<BookForm>,
) -> AppResult<Json<BookResponse>> {
    let book = state.services.books.update(&id, form).await?;
    Ok(Json(BookResponse { book }))
}

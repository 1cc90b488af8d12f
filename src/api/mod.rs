//! API handlers for the catalog REST endpoints

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod genres;
pub mod health;
pub mod openapi;

use axum::{
    extract::FromRequest,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::ToSchema;

use crate::{error::AppError, AppState};

/// JSON request body whose rejections answer with the JSON error body
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct FormBody<T>(pub T);

/// Body of the delete endpoints
#[derive(Debug, Deserialize, ToSchema)]
pub struct DeleteRequest {
    /// Id of the record to delete
    #[serde(default)]
    pub id: String,
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let catalog = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Books
        .route("/", get(books::index))
        .route("/books", get(books::list_books))
        .route("/book/create", post(books::create_book))
        .route("/book/delete", post(books::delete_book))
        .route("/book/:id", get(books::get_book))
        .route("/book/:id/update", post(books::update_book))
        // Authors
        .route("/authors", get(authors::list_authors))
        .route("/author/create", post(authors::create_author))
        .route("/author/delete", post(authors::delete_author))
        .route("/author/:id", get(authors::get_author))
        .route("/author/:id/update", post(authors::update_author))
        // Genres
        .route("/genres", get(genres::list_genres))
        .route("/genre/create", post(genres::create_genre))
        .route("/genre/delete", post(genres::delete_genre))
        .route("/genre/:id", get(genres::get_genre))
        .route("/genre/:id/update", post(genres::update_genre))
        // Book instances
        .route("/bookinstances", get(book_instances::list_book_instances))
        .route("/bookinstance/create", post(book_instances::create_book_instance))
        .route("/bookinstance/delete", post(book_instances::delete_book_instance))
        .route("/bookinstance/:id", get(book_instances::get_book_instance))
        .route("/bookinstance/:id/update", post(book_instances::update_book_instance))
        .with_state(state);

    Router::new()
        .merge(catalog)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

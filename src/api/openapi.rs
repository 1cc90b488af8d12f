//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{authors, book_instances, books, genres, health};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Local Library Catalog API",
        version = "1.0.0",
        description = "Catalog of books, authors, genres and physical copies",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Books
        books::index,
        books::list_books,
        books::get_book,
        books::create_book,
        books::delete_book,
        books::update_book,
        // Authors
        authors::list_authors,
        authors::get_author,
        authors::create_author,
        authors::delete_author,
        authors::update_author,
        // Genres
        genres::list_genres,
        genres::get_genre,
        genres::create_genre,
        genres::delete_genre,
        genres::update_genre,
        // Book instances
        book_instances::list_book_instances,
        book_instances::get_book_instance,
        book_instances::create_book_instance,
        book_instances::delete_book_instance,
        book_instances::update_book_instance,
    ),
    components(
        schemas(
            // Books
            crate::models::book::BookForm,
            crate::models::book::BookView,
            crate::models::book::BookResponse,
            crate::models::book::BookShort,
            crate::models::book::AuthorName,
            crate::models::book::AuthorLink,
            crate::models::book::GenreLink,
            crate::models::book::BookDetail,
            crate::models::book::BookCopy,
            crate::models::book::BookDetailResponse,
            crate::models::book::CatalogCounts,
            // Authors
            crate::models::author::AuthorForm,
            crate::models::author::AuthorView,
            crate::models::author::AuthorResponse,
            crate::models::author::AuthorShort,
            crate::models::author::AuthorDetail,
            crate::models::author::AuthorBook,
            crate::models::author::AuthorDetailResponse,
            // Genres
            crate::models::genre::Genre,
            crate::models::genre::CreateGenre,
            crate::models::genre::UpdateGenre,
            crate::models::genre::GenreResponse,
            crate::models::genre::GenreDetail,
            crate::models::genre::GenreBook,
            crate::models::genre::GenreDetailResponse,
            // Book instances
            crate::models::book_instance::BookInstanceStatus,
            crate::models::book_instance::BookInstanceForm,
            crate::models::book_instance::BookInstanceView,
            crate::models::book_instance::BookInstanceResponse,
            crate::models::book_instance::BookTitle,
            crate::models::book_instance::BookInstanceShort,
            crate::models::book_instance::BookLink,
            crate::models::book_instance::BookInstanceDetail,
            crate::models::book_instance::BookInstanceDetailResponse,
            // Requests
            crate::api::DeleteRequest,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "books", description = "Books and the catalog home"),
        (name = "authors", description = "Author management"),
        (name = "genres", description = "Genre management"),
        (name = "bookinstances", description = "Physical copies of books")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_catalog_paths() {
        let doc = ApiDoc::openapi();
        for path in ["/", "/books", "/book/{id}", "/author/delete", "/bookinstance/{id}/update"] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }
}

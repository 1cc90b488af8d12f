//! Repository layer: the catalog store and its backends

pub mod memory;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Author, Book, BookInstance, BookInstanceStatus, Genre},
};

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Persistence for the four catalog record kinds.
///
/// References between records are plain ids; the store never expands them.
/// `*_update` and `*_delete` report whether a record with that id existed.
/// Lists come back in insertion order.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Cheap round-trip used by the readiness probe
    async fn ping(&self) -> AppResult<()>;

    // Authors
    async fn authors_list(&self) -> AppResult<Vec<Author>>;
    async fn authors_get(&self, id: Uuid) -> AppResult<Option<Author>>;
    async fn authors_get_many(&self, ids: &[Uuid]) -> AppResult<Vec<Author>>;
    async fn authors_insert(&self, author: &Author) -> AppResult<()>;
    async fn authors_update(&self, author: &Author) -> AppResult<bool>;
    async fn authors_delete(&self, id: Uuid) -> AppResult<bool>;
    async fn authors_count(&self) -> AppResult<i64>;

    // Genres
    async fn genres_list(&self) -> AppResult<Vec<Genre>>;
    async fn genres_get(&self, id: Uuid) -> AppResult<Option<Genre>>;
    async fn genres_get_many(&self, ids: &[Uuid]) -> AppResult<Vec<Genre>>;
    async fn genres_find_by_name(&self, name: &str) -> AppResult<Option<Genre>>;
    async fn genres_insert(&self, genre: &Genre) -> AppResult<()>;
    async fn genres_update(&self, genre: &Genre) -> AppResult<bool>;
    async fn genres_delete(&self, id: Uuid) -> AppResult<bool>;
    async fn genres_count(&self) -> AppResult<i64>;

    // Books
    async fn books_list(&self) -> AppResult<Vec<Book>>;
    async fn books_get(&self, id: Uuid) -> AppResult<Option<Book>>;
    async fn books_get_many(&self, ids: &[Uuid]) -> AppResult<Vec<Book>>;
    async fn books_by_author(&self, author_id: Uuid) -> AppResult<Vec<Book>>;
    async fn books_by_genre(&self, genre_id: Uuid) -> AppResult<Vec<Book>>;
    async fn books_insert(&self, book: &Book) -> AppResult<()>;
    async fn books_update(&self, book: &Book) -> AppResult<bool>;
    async fn books_delete(&self, id: Uuid) -> AppResult<bool>;
    async fn books_count(&self) -> AppResult<i64>;

    // Book instances
    async fn book_instances_list(&self) -> AppResult<Vec<BookInstance>>;
    async fn book_instances_get(&self, id: Uuid) -> AppResult<Option<BookInstance>>;
    async fn book_instances_by_book(&self, book_id: Uuid) -> AppResult<Vec<BookInstance>>;
    async fn book_instances_insert(&self, instance: &BookInstance) -> AppResult<()>;
    async fn book_instances_update(&self, instance: &BookInstance) -> AppResult<bool>;
    async fn book_instances_delete(&self, id: Uuid) -> AppResult<bool>;
    async fn book_instances_count(&self) -> AppResult<i64>;
    async fn book_instances_count_by_status(&self, status: BookInstanceStatus) -> AppResult<i64>;
}

/// Shared handle to whichever store backend is configured
pub type Repository = Arc<dyn CatalogStore>;

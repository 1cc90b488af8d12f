//! In-process store, used for development runs and tests

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::CatalogStore;
use crate::{
    error::AppResult,
    models::{Author, Book, BookInstance, BookInstanceStatus, Genre},
};

#[derive(Default)]
struct Tables {
    authors: Vec<Author>,
    genres: Vec<Genre>,
    books: Vec<Book>,
    book_instances: Vec<BookInstance>,
}

/// Keeps every record in insertion order behind a single lock
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

trait Record: Clone {
    fn id(&self) -> Uuid;
}

macro_rules! impl_record {
    ($($ty:ty),*) => {
        $(impl Record for $ty {
            fn id(&self) -> Uuid {
                self.id
            }
        })*
    };
}

impl_record!(Author, Genre, Book, BookInstance);

fn find<T: Record>(rows: &[T], id: Uuid) -> Option<T> {
    rows.iter().find(|r| r.id() == id).cloned()
}

fn find_many<T: Record>(rows: &[T], ids: &[Uuid]) -> Vec<T> {
    rows.iter().filter(|r| ids.contains(&r.id())).cloned().collect()
}

fn replace<T: Record>(rows: &mut [T], record: &T) -> bool {
    match rows.iter_mut().find(|r| r.id() == record.id()) {
        Some(slot) => {
            *slot = record.clone();
            true
        }
        None => false,
    }
}

fn remove<T: Record>(rows: &mut Vec<T>, id: Uuid) -> bool {
    let before = rows.len();
    rows.retain(|r| r.id() != id);
    rows.len() != before
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }

    async fn authors_list(&self) -> AppResult<Vec<Author>> {
        Ok(self.tables.read().await.authors.clone())
    }

    async fn authors_get(&self, id: Uuid) -> AppResult<Option<Author>> {
        Ok(find(&self.tables.read().await.authors, id))
    }

    async fn authors_get_many(&self, ids: &[Uuid]) -> AppResult<Vec<Author>> {
        Ok(find_many(&self.tables.read().await.authors, ids))
    }

    async fn authors_insert(&self, author: &Author) -> AppResult<()> {
        self.tables.write().await.authors.push(author.clone());
        Ok(())
    }

    async fn authors_update(&self, author: &Author) -> AppResult<bool> {
        Ok(replace(&mut self.tables.write().await.authors, author))
    }

    async fn authors_delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(remove(&mut self.tables.write().await.authors, id))
    }

    async fn authors_count(&self) -> AppResult<i64> {
        Ok(self.tables.read().await.authors.len() as i64)
    }

    async fn genres_list(&self) -> AppResult<Vec<Genre>> {
        Ok(self.tables.read().await.genres.clone())
    }

    async fn genres_get(&self, id: Uuid) -> AppResult<Option<Genre>> {
        Ok(find(&self.tables.read().await.genres, id))
    }

    async fn genres_get_many(&self, ids: &[Uuid]) -> AppResult<Vec<Genre>> {
        Ok(find_many(&self.tables.read().await.genres, ids))
    }

    async fn genres_find_by_name(&self, name: &str) -> AppResult<Option<Genre>> {
        let tables = self.tables.read().await;
        Ok(tables.genres.iter().find(|g| g.name == name).cloned())
    }

    async fn genres_insert(&self, genre: &Genre) -> AppResult<()> {
        self.tables.write().await.genres.push(genre.clone());
        Ok(())
    }

    async fn genres_update(&self, genre: &Genre) -> AppResult<bool> {
        Ok(replace(&mut self.tables.write().await.genres, genre))
    }

    async fn genres_delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(remove(&mut self.tables.write().await.genres, id))
    }

    async fn genres_count(&self) -> AppResult<i64> {
        Ok(self.tables.read().await.genres.len() as i64)
    }

    async fn books_list(&self) -> AppResult<Vec<Book>> {
        Ok(self.tables.read().await.books.clone())
    }

    async fn books_get(&self, id: Uuid) -> AppResult<Option<Book>> {
        Ok(find(&self.tables.read().await.books, id))
    }

    async fn books_get_many(&self, ids: &[Uuid]) -> AppResult<Vec<Book>> {
        Ok(find_many(&self.tables.read().await.books, ids))
    }

    async fn books_by_author(&self, author_id: Uuid) -> AppResult<Vec<Book>> {
        let tables = self.tables.read().await;
        Ok(tables.books.iter().filter(|b| b.author == author_id).cloned().collect())
    }

    async fn books_by_genre(&self, genre_id: Uuid) -> AppResult<Vec<Book>> {
        let tables = self.tables.read().await;
        let genre_id = genre_id.to_string();
        Ok(tables.books.iter().filter(|b| b.genre.contains(&genre_id)).cloned().collect())
    }

    async fn books_insert(&self, book: &Book) -> AppResult<()> {
        self.tables.write().await.books.push(book.clone());
        Ok(())
    }

    async fn books_update(&self, book: &Book) -> AppResult<bool> {
        Ok(replace(&mut self.tables.write().await.books, book))
    }

    async fn books_delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(remove(&mut self.tables.write().await.books, id))
    }

    async fn books_count(&self) -> AppResult<i64> {
        Ok(self.tables.read().await.books.len() as i64)
    }

    async fn book_instances_list(&self) -> AppResult<Vec<BookInstance>> {
        Ok(self.tables.read().await.book_instances.clone())
    }

    async fn book_instances_get(&self, id: Uuid) -> AppResult<Option<BookInstance>> {
        Ok(find(&self.tables.read().await.book_instances, id))
    }

    async fn book_instances_by_book(&self, book_id: Uuid) -> AppResult<Vec<BookInstance>> {
        let tables = self.tables.read().await;
        Ok(tables.book_instances.iter().filter(|i| i.book == book_id).cloned().collect())
    }

    async fn book_instances_insert(&self, instance: &BookInstance) -> AppResult<()> {
        self.tables.write().await.book_instances.push(instance.clone());
        Ok(())
    }

    async fn book_instances_update(&self, instance: &BookInstance) -> AppResult<bool> {
        Ok(replace(&mut self.tables.write().await.book_instances, instance))
    }

    async fn book_instances_delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(remove(&mut self.tables.write().await.book_instances, id))
    }

    async fn book_instances_count(&self) -> AppResult<i64> {
        Ok(self.tables.read().await.book_instances.len() as i64)
    }

    async fn book_instances_count_by_status(&self, status: BookInstanceStatus) -> AppResult<i64> {
        let tables = self.tables.read().await;
        Ok(tables.book_instances.iter().filter(|i| i.status == status).count() as i64)
    }
}

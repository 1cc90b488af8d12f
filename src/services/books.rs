//! Book service, including the catalog home counts

use std::collections::HashMap;

use uuid::Uuid;

use super::rejected;
use crate::{
    error::{AppError, AppResult},
    models::{
        book::{
            AuthorLink, AuthorName, BookCopy, BookDetail, BookDetailResponse, BookShort, BookView,
            GenreLink,
        },
        Author, Book, BookForm, BookInstanceStatus, CatalogCounts,
    },
    repository::Repository,
    validation::{check, parse_id},
};

const NOT_FOUND: &str = "Book not found";
const HAS_COPIES: &str = "Unable to delete book, this book has copies";

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Record counts for the catalog home page
    pub async fn counts(&self) -> AppResult<CatalogCounts> {
        let (books, instances, available, authors, genres) = tokio::try_join!(
            self.repository.books_count(),
            self.repository.book_instances_count(),
            self.repository
                .book_instances_count_by_status(BookInstanceStatus::Available),
            self.repository.authors_count(),
            self.repository.genres_count(),
        )?;

        Ok(CatalogCounts {
            book_count: books,
            book_instance_count: instances,
            book_instance_available_count: available,
            author_count: authors,
            genre_count: genres,
        })
    }

    /// All books with their author's name, ordered by title ignoring case
    pub async fn list(&self) -> AppResult<Vec<BookShort>> {
        let mut books = self.repository.books_list().await?;

        let mut author_ids: Vec<Uuid> = books.iter().map(|b| b.author).collect();
        author_ids.sort_unstable();
        author_ids.dedup();
        let authors: HashMap<Uuid, Author> = self
            .repository
            .authors_get_many(&author_ids)
            .await?
            .into_iter()
            .map(|a| (a.id, a))
            .collect();

        // Stable: titles equal ignoring case keep store order
        books.sort_by(|a, b| a.title.to_uppercase().cmp(&b.title.to_uppercase()));

        books
            .into_iter()
            .map(|book| -> AppResult<BookShort> {
                let author = authors
                    .get(&book.author)
                    .ok_or_else(|| missing_author(&book))?;
                Ok(BookShort {
                    id: book.id,
                    title: book.title,
                    author: AuthorName { name: author.name() },
                })
            })
            .collect()
    }

    /// Book with author and genres expanded, plus its copies
    pub async fn detail(&self, id: &str) -> AppResult<BookDetailResponse> {
        let id = parse_id(id)?;
        let (book, instances) = tokio::try_join!(
            self.repository.books_get(id),
            self.repository.book_instances_by_book(id),
        )?;
        let book = book.ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))?;

        let genre_ids = book.genre_ids();
        let (author, genres) = tokio::try_join!(
            self.repository.authors_get(book.author),
            self.repository.genres_get_many(&genre_ids),
        )?;
        let author = author.ok_or_else(|| missing_author(&book))?;

        // Keep the book's own genre order
        let genre = genre_ids
            .iter()
            .filter_map(|gid| genres.iter().find(|g| g.id == *gid))
            .map(|g| GenreLink {
                id: g.id,
                url: g.url(),
                name: g.name.clone(),
            })
            .collect();

        Ok(BookDetailResponse {
            book: BookDetail {
                id: book.id,
                url: book.url(),
                title: book.title,
                author: AuthorLink {
                    id: author.id,
                    url: author.url(),
                    name: author.name(),
                },
                summary: book.summary,
                isbn: book.isbn,
                genre,
            },
            book_instances: instances
                .iter()
                .map(|i| BookCopy {
                    id: i.id,
                    status: i.status,
                    imprint: i.imprint.clone(),
                    due_back: i.due_back,
                    url: i.url(),
                })
                .collect(),
        })
    }

    pub async fn create(&self, form: BookForm) -> AppResult<BookView> {
        let form = form.normalized();
        let id = Uuid::new_v4();
        if let Err(errors) = check(&form) {
            return Err(rejected("book", form.echo(id), errors));
        }

        let book = form.into_book(id)?;
        self.repository.books_insert(&book).await?;
        tracing::info!("Created book {} ({})", book.id, book.title);
        Ok(BookView::from(&book))
    }

    pub async fn update(&self, id: &str, form: BookForm) -> AppResult<BookView> {
        let id = parse_id(id)?;
        let form = form.normalized();
        if let Err(errors) = check(&form) {
            return Err(rejected("book", form.echo(id), errors));
        }

        let book = form.into_book(id)?;
        if !self.repository.books_update(&book).await? {
            return Err(AppError::NotFound(NOT_FOUND.to_string()));
        }
        tracing::info!("Updated book {}", id);

        let updated = self
            .repository
            .books_get(id)
            .await?
            .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))?;
        Ok(BookView::from(&updated))
    }

    /// Remove a book that has no copies
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let id = parse_id(id)?;
        let copies = self.repository.book_instances_by_book(id).await?;
        if !copies.is_empty() {
            return Err(AppError::HasDependents {
                entity: "book",
                message: HAS_COPIES.to_string(),
            });
        }

        self.repository.books_delete(id).await?;
        tracing::info!("Deleted book {}", id);
        Ok(())
    }
}

fn missing_author(book: &Book) -> AppError {
    AppError::Store(format!(
        "book {} references missing author {}",
        book.id, book.author
    ))
}

//! Author service

use uuid::Uuid;

use super::rejected;
use crate::{
    error::{AppError, AppResult},
    models::{
        author::{AuthorBook, AuthorDetail, AuthorDetailResponse, AuthorShort, AuthorView},
        AuthorForm,
    },
    repository::Repository,
    validation::{check, parse_id},
};

const NOT_FOUND: &str = "Author not found";
const HAS_BOOKS: &str = "Unable to delete author, Author has books associated with it";

#[derive(Clone)]
pub struct AuthorsService {
    repository: Repository,
}

impl AuthorsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<AuthorShort>> {
        let authors = self.repository.authors_list().await?;
        Ok(authors.iter().map(AuthorShort::from).collect())
    }

    /// Author with the titles they wrote
    pub async fn detail(&self, id: &str) -> AppResult<AuthorDetailResponse> {
        let id = parse_id(id)?;
        let (author, books) = tokio::try_join!(
            self.repository.authors_get(id),
            self.repository.books_by_author(id),
        )?;
        let author = author.ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))?;

        Ok(AuthorDetailResponse {
            author: AuthorDetail::from(&author),
            author_books: books
                .into_iter()
                .map(|b| AuthorBook {
                    id: b.id,
                    title: b.title,
                    summary: b.summary,
                })
                .collect(),
        })
    }

    pub async fn create(&self, form: AuthorForm) -> AppResult<AuthorView> {
        let form = form.normalized();
        let id = Uuid::new_v4();
        if let Err(errors) = check(&form) {
            return Err(rejected("author", form.echo(id), errors));
        }

        let author = form.into_author(id);
        self.repository.authors_insert(&author).await?;
        tracing::info!("Created author {} ({})", author.id, author.name());
        Ok(AuthorView::from(&author))
    }

    /// Replace the author's fields, keeping its id, and return the stored result
    pub async fn update(&self, id: &str, form: AuthorForm) -> AppResult<AuthorView> {
        let id = parse_id(id)?;
        let form = form.normalized();
        if let Err(errors) = check(&form) {
            return Err(rejected("author", form.echo(id), errors));
        }

        let author = form.into_author(id);
        if !self.repository.authors_update(&author).await? {
            return Err(AppError::NotFound(NOT_FOUND.to_string()));
        }
        tracing::info!("Updated author {}", id);

        let updated = self
            .repository
            .authors_get(id)
            .await?
            .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))?;
        Ok(AuthorView::from(&updated))
    }

    /// Remove an author that no book refers to
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let id = parse_id(id)?;
        let books = self.repository.books_by_author(id).await?;
        if !books.is_empty() {
            return Err(AppError::HasDependents {
                entity: "author",
                message: HAS_BOOKS.to_string(),
            });
        }

        self.repository.authors_delete(id).await?;
        tracing::info!("Deleted author {}", id);
        Ok(())
    }
}

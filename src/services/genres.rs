//! Genre service

use uuid::Uuid;

use super::rejected;
use crate::{
    error::{AppError, AppResult},
    models::{
        genre::{genre_from_name, GenreBook, GenreDetail, GenreDetailResponse},
        CreateGenre, Genre, UpdateGenre,
    },
    repository::Repository,
    validation::{check, parse_id},
};

const NOT_FOUND: &str = "Genre not found";
const ALREADY_EXISTS: &str = "Genre Already exists";
const HAS_BOOKS: &str = "Unable to delete genre, Genre has books associated with it";

#[derive(Clone)]
pub struct GenresService {
    repository: Repository,
}

impl GenresService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Genre>> {
        self.repository.genres_list().await
    }

    pub async fn detail(&self, id: &str) -> AppResult<GenreDetailResponse> {
        let id = parse_id(id)?;
        let (genre, books) = tokio::try_join!(
            self.repository.genres_get(id),
            self.repository.books_by_genre(id),
        )?;
        let genre = genre.ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))?;

        Ok(GenreDetailResponse {
            genre: GenreDetail {
                id: genre.id,
                url: genre.url(),
                name: genre.name,
            },
            genre_books: books
                .into_iter()
                .map(|b| GenreBook {
                    id: b.id,
                    url: b.url(),
                    title: b.title,
                    summary: b.summary,
                })
                .collect(),
        })
    }

    /// Create a genre unless one with the same name already exists
    pub async fn create(&self, form: CreateGenre) -> AppResult<Genre> {
        let form = form.normalized();
        let genre = genre_from_name(Uuid::new_v4(), &form.name);
        if let Err(errors) = check(&form) {
            return Err(rejected("genre", genre, errors));
        }

        if let Some(existing) = self.repository.genres_find_by_name(&genre.name).await? {
            tracing::warn!("Genre {:?} already exists as {}", genre.name, existing.id);
            return Err(AppError::Conflict {
                field: "name",
                message: ALREADY_EXISTS.to_string(),
            });
        }

        self.repository.genres_insert(&genre).await?;
        tracing::info!("Created genre {} ({})", genre.id, genre.name);
        Ok(genre)
    }

    /// Rename a genre. The name is not checked against other genres here.
    pub async fn update(&self, id: &str, form: UpdateGenre) -> AppResult<Genre> {
        let id = parse_id(id)?;
        let form = form.normalized();
        let genre = genre_from_name(id, &form.name);
        if let Err(errors) = check(&form) {
            return Err(rejected("genre", genre, errors));
        }

        if !self.repository.genres_update(&genre).await? {
            return Err(AppError::NotFound(NOT_FOUND.to_string()));
        }
        tracing::info!("Updated genre {}", id);

        self.repository
            .genres_get(id)
            .await?
            .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))
    }

    /// Remove a genre that no book is filed under
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let id = parse_id(id)?;
        let books = self.repository.books_by_genre(id).await?;
        if !books.is_empty() {
            return Err(AppError::HasDependents {
                entity: "genre",
                message: HAS_BOOKS.to_string(),
            });
        }

        self.repository.genres_delete(id).await?;
        tracing::info!("Deleted genre {}", id);
        Ok(())
    }
}

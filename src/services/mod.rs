//! Business logic services

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod genres;

use std::collections::BTreeMap;

use serde::Serialize;

use crate::{error::AppError, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub authors: authors::AuthorsService,
    pub books: books::BooksService,
    pub genres: genres::GenresService,
    pub book_instances: book_instances::BookInstancesService,
    pub repository: Repository,
}

impl Services {
    /// Create all services over the given store
    pub fn new(repository: Repository) -> Self {
        Self {
            authors: authors::AuthorsService::new(repository.clone()),
            books: books::BooksService::new(repository.clone()),
            genres: genres::GenresService::new(repository.clone()),
            book_instances: book_instances::BookInstancesService::new(repository.clone()),
            repository,
        }
    }
}

/// Validation failure carrying the unsaved entity back to the client
pub(crate) fn rejected<T: Serialize>(
    entity: &'static str,
    echo: T,
    errors: BTreeMap<String, String>,
) -> AppError {
    tracing::debug!("Rejected {} form: {:?}", entity, errors);
    AppError::Validation {
        entity,
        echo: serde_json::to_value(echo).unwrap_or_default(),
        errors,
    }
}

//! Book instance (copy) service

use std::collections::HashMap;

use uuid::Uuid;

use super::rejected;
use crate::{
    error::{AppError, AppResult},
    models::{
        book_instance::{
            BookInstanceDetail, BookInstanceDetailResponse, BookInstanceShort, BookInstanceView,
            BookLink,
        },
        dates::format_iso,
        Book, BookInstance, BookInstanceForm,
    },
    repository::Repository,
    validation::{check, parse_id},
};

const NOT_FOUND: &str = "Book copy not found";

#[derive(Clone)]
pub struct BookInstancesService {
    repository: Repository,
}

impl BookInstancesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// All copies with the title of the book they belong to
    pub async fn list(&self) -> AppResult<Vec<BookInstanceShort>> {
        let instances = self.repository.book_instances_list().await?;

        let mut book_ids: Vec<Uuid> = instances.iter().map(|i| i.book).collect();
        book_ids.sort_unstable();
        book_ids.dedup();
        let titles: HashMap<Uuid, String> = self
            .repository
            .books_get_many(&book_ids)
            .await?
            .into_iter()
            .map(|b| (b.id, b.title))
            .collect();

        instances
            .iter()
            .map(|instance| -> AppResult<BookInstanceShort> {
                let title = titles
                    .get(&instance.book)
                    .ok_or_else(|| missing_book(instance))?;
                Ok(BookInstanceShort::new(instance, title))
            })
            .collect()
    }

    pub async fn detail(&self, id: &str) -> AppResult<BookInstanceDetailResponse> {
        let id = parse_id(id)?;
        let instance = self
            .repository
            .book_instances_get(id)
            .await?
            .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))?;
        let book: Book = self
            .repository
            .books_get(instance.book)
            .await?
            .ok_or_else(|| missing_book(&instance))?;

        Ok(BookInstanceDetailResponse {
            book_instance: BookInstanceDetail {
                id: instance.id,
                url: instance.url(),
                book: BookLink {
                    id: book.id,
                    url: book.url(),
                    title: book.title,
                },
                imprint: instance.imprint,
                status: instance.status,
                due_back: format_iso(instance.due_back),
            },
        })
    }

    pub async fn create(&self, form: BookInstanceForm) -> AppResult<BookInstanceView> {
        let form = form.normalized();
        let id = Uuid::new_v4();
        if let Err(errors) = check(&form) {
            return Err(rejected("bookInstance", form.echo(id), errors));
        }

        let instance = form.into_instance(id)?;
        self.repository.book_instances_insert(&instance).await?;
        tracing::info!(
            "Created copy {} of book {} ({})",
            instance.id,
            instance.book,
            instance.status
        );
        Ok(BookInstanceView::from(&instance))
    }

    pub async fn update(&self, id: &str, form: BookInstanceForm) -> AppResult<BookInstanceView> {
        let id = parse_id(id)?;
        let form = form.normalized();
        if let Err(errors) = check(&form) {
            return Err(rejected("bookInstance", form.echo(id), errors));
        }

        let instance = form.into_instance(id)?;
        if !self.repository.book_instances_update(&instance).await? {
            return Err(AppError::NotFound(NOT_FOUND.to_string()));
        }
        tracing::info!("Updated copy {}", id);

        let updated = self
            .repository
            .book_instances_get(id)
            .await?
            .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))?;
        Ok(BookInstanceView::from(&updated))
    }

    /// Copies have no dependents and are always removable
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let id = parse_id(id)?;
        self.repository.book_instances_delete(id).await?;
        tracing::info!("Deleted copy {}", id);
        Ok(())
    }
}

fn missing_book(instance: &BookInstance) -> AppError {
    AppError::Store(format!(
        "copy {} references missing book {}",
        instance.id, instance.book
    ))
}

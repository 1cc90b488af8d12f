//! Book model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_with::{formats::PreferMany, serde_as, OneOrMany};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::book_instance::BookInstanceStatus;
use crate::{
    error::AppResult,
    validation::{parse_id, trim},
};

/// Book record as stored. `author` and `genre` hold references only.
///
/// Genre references are kept as submitted text (canonicalized when they are
/// ids); references that do not resolve are skipped on expansion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub summary: String,
    pub isbn: String,
    pub author: Uuid,
    pub genre: Vec<String>,
}

impl Book {
    pub fn url(&self) -> String {
        format!("/book/{}", self.id)
    }

    /// Genre references that are well-formed ids
    pub fn genre_ids(&self) -> Vec<Uuid> {
        self.genre
            .iter()
            .filter_map(|g| Uuid::parse_str(g).ok())
            .collect()
    }
}

/// Canonical form of a submitted genre reference
pub fn genre_ref(value: &str) -> String {
    let value = value.trim();
    match Uuid::parse_str(value) {
        Ok(id) => id.to_string(),
        Err(_) => value.to_string(),
    }
}

/// Create / update book form. `genre` accepts a single id or a list.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct BookForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "Title must not be empty."))]
    pub title: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Summary must not be empty."))]
    pub summary: String,
    /// Author id
    #[serde(default)]
    #[validate(length(min = 1, message = "Select an author"))]
    pub author: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "ISBN must not be empty"))]
    pub isbn: String,
    /// Genre ids
    #[serde_as(as = "OneOrMany<_, PreferMany>")]
    #[serde(default)]
    #[schema(value_type = Vec<String>)]
    pub genre: Vec<String>,
}

impl BookForm {
    pub fn normalized(self) -> Self {
        Self {
            title: trim(&self.title),
            summary: trim(&self.summary),
            author: trim(&self.author),
            isbn: trim(&self.isbn),
            genre: self.genre,
        }
    }

    /// Build the storable record. A malformed author id is a store error.
    pub fn into_book(self, id: Uuid) -> AppResult<Book> {
        let author = parse_id(&self.author)?;
        Ok(Book {
            id,
            title: self.title,
            summary: self.summary,
            isbn: self.isbn,
            author,
            genre: self.genre.iter().map(|g| genre_ref(g)).collect(),
        })
    }

    pub fn echo(&self, id: Uuid) -> BookView {
        BookView {
            id,
            title: self.title.clone(),
            author: self.author.clone(),
            summary: self.summary.clone(),
            isbn: self.isbn.clone(),
            genre: self.genre.clone(),
        }
    }
}

/// Book as returned by create and update
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookView {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub summary: String,
    pub isbn: String,
    pub genre: Vec<String>,
}

impl From<&Book> for BookView {
    fn from(b: &Book) -> Self {
        Self {
            id: b.id,
            title: b.title.clone(),
            author: b.author.to_string(),
            summary: b.summary.clone(),
            isbn: b.isbn.clone(),
            genre: b.genre.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuthorName {
    pub name: String,
}

/// Book list entry
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookShort {
    pub id: Uuid,
    pub title: String,
    pub author: AuthorName,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuthorLink {
    pub id: Uuid,
    pub url: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GenreLink {
    pub id: Uuid,
    pub url: String,
    pub name: String,
}

/// Book with author and genres expanded
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookDetail {
    pub id: Uuid,
    pub url: String,
    pub title: String,
    pub author: AuthorLink,
    pub summary: String,
    pub isbn: String,
    pub genre: Vec<GenreLink>,
}

/// A copy of the book as listed on the book's detail page
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookCopy {
    pub id: Uuid,
    pub status: BookInstanceStatus,
    pub imprint: String,
    pub due_back: Option<NaiveDate>,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookDetailResponse {
    pub book: BookDetail,
    pub book_instances: Vec<BookCopy>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookResponse {
    pub book: BookView,
}

/// Catalog home page counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CatalogCounts {
    pub book_count: i64,
    pub book_instance_count: i64,
    pub book_instance_available_count: i64,
    pub author_count: i64,
    pub genre_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::AppError, validation::check};

    #[test]
    fn test_genre_scalar_becomes_list() {
        let form: BookForm = serde_json::from_str(
            r#"{"title":"Dune","summary":"Spice","author":"a","isbn":"9780441013593","genre":"SciFi"}"#,
        )
        .unwrap();
        assert_eq!(form.genre, vec!["SciFi".to_string()]);
    }

    #[test]
    fn test_genre_missing_becomes_empty() {
        let form: BookForm = serde_json::from_str(r#"{"title":"Dune"}"#).unwrap();
        assert!(form.genre.is_empty());
    }

    #[test]
    fn test_genre_list_kept() {
        let form: BookForm = serde_json::from_str(r#"{"genre":["a","b"]}"#).unwrap();
        assert_eq!(form.genre, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_required_fields() {
        let form = BookForm {
            title: "  ".into(),
            ..Default::default()
        }
        .normalized();
        let errors = check(&form).unwrap_err();
        assert_eq!(errors["title"], "Title must not be empty.");
        assert_eq!(errors["summary"], "Summary must not be empty.");
        assert_eq!(errors["author"], "Select an author");
        assert_eq!(errors["isbn"], "ISBN must not be empty");
        assert!(!errors.contains_key("genre"));
    }

    #[test]
    fn test_genre_refs_canonicalized() {
        let id = Uuid::new_v4();
        let form = BookForm {
            title: "Dune".into(),
            summary: "Spice".into(),
            author: Uuid::nil().to_string(),
            isbn: "9780441013593".into(),
            genre: vec![id.to_string().to_uppercase(), "SciFi".into()],
        };
        let book = form.into_book(Uuid::new_v4()).unwrap();
        assert_eq!(book.genre, vec![id.to_string(), "SciFi".to_string()]);
        assert_eq!(book.genre_ids(), vec![id]);
    }

    #[test]
    fn test_into_book_rejects_malformed_author() {
        let form = BookForm {
            title: "Dune".into(),
            summary: "Spice".into(),
            author: "frank".into(),
            isbn: "1".into(),
            genre: vec![],
        };
        assert!(matches!(form.into_book(Uuid::nil()), Err(AppError::Store(_))));
    }
}

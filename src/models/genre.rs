//! Genre model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::validation::{escape, trim};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Genre {
    pub id: Uuid,
    pub name: String,
}

impl Genre {
    pub fn url(&self) -> String {
        format!("/genre/{}", self.id)
    }
}

/// Create genre request
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct CreateGenre {
    #[serde(default)]
    #[validate(length(min = 2, message = "Genre name required and min length 2"))]
    pub name: String,
}

/// Update genre request
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateGenre {
    #[serde(default)]
    #[validate(length(min = 1, message = "Genre name required"))]
    pub name: String,
}

impl CreateGenre {
    pub fn normalized(self) -> Self {
        Self { name: trim(&self.name) }
    }
}

impl UpdateGenre {
    pub fn normalized(self) -> Self {
        Self { name: trim(&self.name) }
    }
}

/// Constructs the genre record a sanitized form describes
pub fn genre_from_name(id: Uuid, name: &str) -> Genre {
    Genre { id, name: escape(name) }
}

/// Genre section of the detail page
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GenreDetail {
    pub id: Uuid,
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GenreBook {
    pub id: Uuid,
    pub title: String,
    pub summary: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenreDetailResponse {
    pub genre: GenreDetail,
    pub genre_books: Vec<GenreBook>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GenreResponse {
    pub genre: Genre,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::check;

    #[test]
    fn test_create_needs_two_chars() {
        let form = CreateGenre { name: "  F ".into() }.normalized();
        let errors = check(&form).unwrap_err();
        assert_eq!(errors["name"], "Genre name required and min length 2");
    }

    #[test]
    fn test_update_accepts_one_char() {
        let form = UpdateGenre { name: " F ".into() }.normalized();
        assert!(check(&form).is_ok());
        let form = UpdateGenre { name: "   ".into() }.normalized();
        assert_eq!(check(&form).unwrap_err()["name"], "Genre name required");
    }

    #[test]
    fn test_name_is_escaped() {
        let genre = genre_from_name(Uuid::nil(), "Sci-Fi & Fantasy");
        assert_eq!(genre.name, "Sci-Fi &amp; Fantasy");
    }
}

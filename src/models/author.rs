//! Author model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::dates::{echo_input, format_iso, parse_iso8601};
use crate::validation::{escape, trim, trim_optional, validate_iso8601, ALPHANUMERIC};

/// Author record as stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Author {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

impl Author {
    /// "Last, First", empty unless both parts are known
    pub fn name(&self) -> String {
        if self.first_name.is_empty() || self.last_name.is_empty() {
            return String::new();
        }
        format!("{}, {}", self.last_name, self.first_name)
    }

    pub fn url(&self) -> String {
        format!("/author/{}", self.id)
    }

    pub fn lifespan(&self) -> String {
        if self.date_of_birth.is_none() && self.date_of_death.is_none() {
            return String::new();
        }
        format!(
            "{} - {}",
            format_iso(self.date_of_birth),
            format_iso(self.date_of_death)
        )
    }
}

/// Create / update author form
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct AuthorForm {
    #[serde(default)]
    #[validate(
        length(min = 1, message = "First name must be specified."),
        regex(path = *ALPHANUMERIC, message = "First name has non-alphanumeric characters.")
    )]
    pub first_name: String,
    #[serde(default)]
    #[validate(
        length(min = 1, message = "Last name must be specified."),
        regex(path = *ALPHANUMERIC, message = "Last name has non-alphanumeric characters.")
    )]
    pub last_name: String,
    /// ISO-8601 date
    #[validate(
        required(message = "Invalid date of birth"),
        custom(function = "validate_iso8601", message = "Invalid date of birth")
    )]
    pub date_of_birth: Option<String>,
    /// ISO-8601 date, optional
    #[validate(custom(function = "validate_iso8601", message = "Invalid date of death"))]
    pub date_of_death: Option<String>,
}

impl AuthorForm {
    pub fn normalized(self) -> Self {
        Self {
            first_name: trim(&self.first_name),
            last_name: trim(&self.last_name),
            date_of_birth: trim_optional(self.date_of_birth),
            date_of_death: trim_optional(self.date_of_death),
        }
    }

    /// Build the record this form describes. Dates that fail to parse are dropped;
    /// callers only persist forms that passed validation.
    pub fn into_author(self, id: Uuid) -> Author {
        Author {
            id,
            first_name: escape(&self.first_name),
            last_name: escape(&self.last_name),
            date_of_birth: self.date_of_birth.as_deref().and_then(parse_iso8601),
            date_of_death: self.date_of_death.as_deref().and_then(parse_iso8601),
        }
    }

    /// The unsaved author echoed back alongside field errors
    pub fn echo(&self, id: Uuid) -> AuthorView {
        AuthorView {
            id,
            first_name: escape(&self.first_name),
            last_name: escape(&self.last_name),
            date_of_birth: echo_input(self.date_of_birth.as_deref()),
            date_of_death: echo_input(self.date_of_death.as_deref()),
        }
    }
}

/// Author as returned by create and update
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuthorView {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    /// YYYY-MM-DD
    pub date_of_birth: String,
    /// YYYY-MM-DD, empty when unknown
    pub date_of_death: String,
}

impl From<&Author> for AuthorView {
    fn from(a: &Author) -> Self {
        Self {
            id: a.id,
            first_name: a.first_name.clone(),
            last_name: a.last_name.clone(),
            date_of_birth: format_iso(a.date_of_birth),
            date_of_death: format_iso(a.date_of_death),
        }
    }
}

/// Author list entry
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuthorShort {
    pub id: Uuid,
    pub name: String,
    pub url: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
    pub lifespan: String,
}

impl From<&Author> for AuthorShort {
    fn from(a: &Author) -> Self {
        Self {
            id: a.id,
            name: a.name(),
            url: a.url(),
            date_of_birth: a.date_of_birth,
            date_of_death: a.date_of_death,
            lifespan: a.lifespan(),
        }
    }
}

/// Author section of the detail page
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuthorDetail {
    pub id: Uuid,
    pub name: String,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: String,
    pub date_of_death: String,
    pub lifespan: String,
}

impl From<&Author> for AuthorDetail {
    fn from(a: &Author) -> Self {
        Self {
            id: a.id,
            name: a.name(),
            first_name: a.first_name.clone(),
            last_name: a.last_name.clone(),
            date_of_birth: format_iso(a.date_of_birth),
            date_of_death: format_iso(a.date_of_death),
            lifespan: a.lifespan(),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuthorBook {
    pub id: Uuid,
    pub title: String,
    pub summary: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuthorDetailResponse {
    pub author: AuthorDetail,
    pub author_books: Vec<AuthorBook>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuthorResponse {
    pub author: AuthorView,
}

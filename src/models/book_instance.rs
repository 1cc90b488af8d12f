//! Book instance (physical copy) model

use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::dates::{echo_input, format_iso, format_long, parse_iso8601};
use crate::{
    error::AppResult,
    validation::{escape, parse_id, trim, trim_optional, validate_iso8601},
};

/// Availability of a copy. No transition rules apply between states.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema, sqlx::Type,
)]
#[sqlx(type_name = "book_instance_status")]
pub enum BookInstanceStatus {
    Available,
    #[default]
    Maintenance,
    Loaned,
    Reserved,
}

impl FromStr for BookInstanceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Available" => Ok(Self::Available),
            "Maintenance" => Ok(Self::Maintenance),
            "Loaned" => Ok(Self::Loaned),
            "Reserved" => Ok(Self::Reserved),
            other => Err(format!("unknown status {:?}", other)),
        }
    }
}

impl fmt::Display for BookInstanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Available => "Available",
            Self::Maintenance => "Maintenance",
            Self::Loaned => "Loaned",
            Self::Reserved => "Reserved",
        };
        write!(f, "{}", label)
    }
}

pub fn validate_status(value: &str) -> Result<(), ValidationError> {
    escape(value)
        .parse::<BookInstanceStatus>()
        .map(|_| ())
        .map_err(|_| ValidationError::new("status"))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct BookInstance {
    pub id: Uuid,
    pub book: Uuid,
    pub imprint: String,
    pub status: BookInstanceStatus,
    pub due_back: Option<NaiveDate>,
}

impl BookInstance {
    pub fn url(&self) -> String {
        format!("/bookinstance/{}", self.id)
    }
}

/// Create / update book instance form
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct BookInstanceForm {
    /// Book id
    #[serde(default)]
    #[validate(length(min = 1, message = "Book must be specified"))]
    pub book: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Imprint must be specified"))]
    pub imprint: String,
    /// Defaults to Maintenance
    #[validate(custom(function = "validate_status", message = "Invalid status"))]
    pub status: Option<String>,
    /// ISO-8601 date, optional
    #[validate(custom(function = "validate_iso8601", message = "Invalid date"))]
    pub due_back: Option<String>,
}

impl BookInstanceForm {
    pub fn normalized(self) -> Self {
        Self {
            book: trim(&self.book),
            imprint: trim(&self.imprint),
            status: trim_optional(self.status),
            due_back: trim_optional(self.due_back),
        }
    }

    fn status(&self) -> BookInstanceStatus {
        self.status
            .as_deref()
            .and_then(|s| escape(s).parse().ok())
            .unwrap_or_default()
    }

    pub fn into_instance(self, id: Uuid) -> AppResult<BookInstance> {
        let status = self.status();
        Ok(BookInstance {
            id,
            book: parse_id(&self.book)?,
            imprint: escape(&self.imprint),
            status,
            due_back: self.due_back.as_deref().and_then(parse_iso8601),
        })
    }

    pub fn echo(&self, id: Uuid) -> BookInstanceView {
        BookInstanceView {
            id,
            book: escape(&self.book),
            imprint: escape(&self.imprint),
            status: self
                .status
                .as_deref()
                .map(escape)
                .unwrap_or_else(|| BookInstanceStatus::default().to_string()),
            due_back: echo_input(self.due_back.as_deref()),
        }
    }
}

/// Book instance as returned by create and update
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookInstanceView {
    pub id: Uuid,
    pub book: String,
    pub imprint: String,
    pub status: String,
    pub due_back: String,
}

impl From<&BookInstance> for BookInstanceView {
    fn from(i: &BookInstance) -> Self {
        Self {
            id: i.id,
            book: i.book.to_string(),
            imprint: i.imprint.clone(),
            status: i.status.to_string(),
            due_back: format_iso(i.due_back),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookTitle {
    pub title: String,
}

/// Book instance list entry
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookInstanceShort {
    pub id: Uuid,
    pub url: String,
    pub book: BookTitle,
    pub imprint: String,
    pub status: BookInstanceStatus,
    /// Long form, e.g. "June 1st 2021"
    pub due_back: String,
}

impl BookInstanceShort {
    pub fn new(instance: &BookInstance, title: &str) -> Self {
        Self {
            id: instance.id,
            url: instance.url(),
            book: BookTitle { title: title.to_string() },
            imprint: instance.imprint.clone(),
            status: instance.status,
            due_back: format_long(instance.due_back),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookLink {
    pub id: Uuid,
    pub url: String,
    pub title: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookInstanceDetail {
    pub id: Uuid,
    pub url: String,
    pub book: BookLink,
    pub imprint: String,
    pub status: BookInstanceStatus,
    /// YYYY-MM-DD
    pub due_back: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookInstanceDetailResponse {
    pub book_instance: BookInstanceDetail,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookInstanceResponse {
    pub book_instance: BookInstanceView,
}

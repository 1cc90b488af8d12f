//! Data models for the catalog

pub mod author;
pub mod book;
pub mod book_instance;
pub mod dates;
pub mod genre;

// Re-export commonly used types
pub use author::{Author, AuthorForm};
pub use book::{Book, BookForm, CatalogCounts};
pub use book_instance::{BookInstance, BookInstanceForm, BookInstanceStatus};
pub use genre::{CreateGenre, Genre, UpdateGenre};

//! # Folio Core
//!
//! Core business logic for the Folio note-taking application.
//!
//! This crate contains the page entity and its lifecycle:
//! - [`Page`]: the note record, its shape validation and its mutators
//! - [`PageStore`]: whole-collection load/save, with a JSON file and an in-memory implementation
//! - [`PageService`]: create/read/update/delete semantics over a store
//!
//! **No API concerns**: HTTP routing, status codes and response shapes belong in `api-rest` and
//! `api-shared`.

pub mod config;
pub mod constants;
pub mod error;
pub mod page;
pub mod pages;
pub mod store;

pub use config::CoreConfig;
pub use error::{PageError, PageResult};
pub use folio_types::NonEmptyText;
pub use folio_uuid::{IdGenerator, PageId, RandomIdGenerator, SequentialIdGenerator};
pub use page::{Page, Validation};
pub use pages::PageService;
pub use store::{InMemoryStore, JsonFileStore, PageStore};

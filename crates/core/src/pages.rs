//! Page lifecycle operations.
//!
//! [`PageService`] turns each CRUD operation into one load/modify/save cycle against a
//! [`PageStore`]. It owns the creation defaults and the update merge rules; the HTTP layer and
//! the CLI only translate their inputs into calls on this service.
//!
//! ## Pure Data Operations
//!
//! This module contains **only** data operations: no HTTP status codes, no request parsing, no
//! response shapes. Those belong in `api-rest` and `api-shared`.

use crate::config::CoreConfig;
use crate::constants::MAX_ID_ATTEMPTS;
use crate::page::Page;
use crate::store::{JsonFileStore, PageStore};
use crate::{PageError, PageResult};
use folio_uuid::{IdGenerator, PageId, RandomIdGenerator};
use std::sync::Arc;

/// Service for creating, reading, updating and deleting pages.
#[derive(Clone)]
pub struct PageService {
    cfg: Arc<CoreConfig>,
    store: Arc<dyn PageStore>,
    ids: Arc<dyn IdGenerator>,
}

impl PageService {
    /// Creates a service over `store` that allocates random ids.
    pub fn new(cfg: Arc<CoreConfig>, store: Arc<dyn PageStore>) -> Self {
        Self {
            cfg,
            store,
            ids: Arc::new(RandomIdGenerator),
        }
    }

    /// Creates a service over the collection file named in `cfg`.
    pub fn with_file_store(cfg: Arc<CoreConfig>) -> Self {
        let store = Arc::new(JsonFileStore::new(cfg.data_file()));
        Self::new(cfg, store)
    }

    /// Replaces the id generator.
    pub fn with_id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    pub fn config(&self) -> &CoreConfig {
        &self.cfg
    }

    /// Returns the whole collection as stored.
    pub fn list(&self) -> PageResult<Vec<Page>> {
        self.store.load_all()
    }

    /// Returns the page with `id`.
    ///
    /// # Errors
    ///
    /// Returns `PageError::NotFound` if no page has that id.
    pub fn get(&self, id: &str) -> PageResult<Page> {
        self.store
            .load_all()?
            .into_iter()
            .find(|p| p.id == id)
            .ok_or_else(|| PageError::NotFound(id.to_string()))
    }

    /// Creates a page and appends it to the collection.
    ///
    /// A missing or empty title becomes the configured default title, and missing content becomes
    /// the empty string. At least one of the two must be non-empty.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - both `title` and `content` are missing or empty (`MissingTitleAndContent`),
    /// - no unused id could be generated (`IdAllocation`),
    /// - the collection cannot be loaded or saved.
    pub fn create(&self, title: Option<String>, content: Option<String>) -> PageResult<Page> {
        let title = title.filter(|t| !t.is_empty());
        let content = content.filter(|c| !c.is_empty());
        if title.is_none() && content.is_none() {
            return Err(PageError::MissingTitleAndContent);
        }

        let mut pages = self.store.load_all()?;
        let id = self.allocate_id(&pages)?;
        let page = Page::new(
            id,
            title.unwrap_or_else(|| self.cfg.default_title().to_string()),
            content.unwrap_or_default(),
        );

        pages.push(page.clone());
        self.store.save_all(&pages)?;

        tracing::info!(page_id = %page.id, "created page");
        Ok(page)
    }

    /// Merges `title` and `content` into an existing page.
    ///
    /// See [`Page::apply_update`] for the merge rules. `updatedAt` is refreshed even when neither
    /// field is supplied.
    ///
    /// # Errors
    ///
    /// Returns `PageError::NotFound` if no page has that id, or a storage error.
    pub fn update(
        &self,
        id: &str,
        title: Option<String>,
        content: Option<String>,
    ) -> PageResult<Page> {
        let page = self.modify(id, |page| page.apply_update(title, content))?;
        tracing::info!(page_id = %page.id, "updated page");
        Ok(page)
    }

    /// Removes a page from the collection and returns it.
    ///
    /// Other pages that list it as a child or parent are left untouched.
    ///
    /// # Errors
    ///
    /// Returns `PageError::NotFound` if no page has that id, or a storage error.
    pub fn delete(&self, id: &str) -> PageResult<Page> {
        let mut pages = self.store.load_all()?;
        let index = position(&pages, id)?;
        let removed = pages.remove(index);
        self.store.save_all(&pages)?;

        tracing::info!(page_id = %removed.id, "deleted page");
        Ok(removed)
    }

    /// Applies `f` to one page and saves the collection.
    ///
    /// This is the general form of every single-page mutation, used for tags, children, parent
    /// and archive changes.
    ///
    /// # Errors
    ///
    /// Returns `PageError::NotFound` if no page has that id, or a storage error.
    pub fn modify<F>(&self, id: &str, f: F) -> PageResult<Page>
    where
        F: FnOnce(&mut Page),
    {
        let mut pages = self.store.load_all()?;
        let index = position(&pages, id)?;
        f(&mut pages[index]);
        let page = pages[index].clone();
        self.store.save_all(&pages)?;
        Ok(page)
    }

    fn allocate_id(&self, pages: &[Page]) -> PageResult<PageId> {
        // Generators are not required to be collision-free.
        for _attempt in 0..MAX_ID_ATTEMPTS {
            let id = self.ids.generate();
            if !pages.iter().any(|p| p.id == id.as_str()) {
                return Ok(id);
            }
            tracing::warn!(page_id = %id, "generated page id already in use");
        }
        Err(PageError::IdAllocation(MAX_ID_ATTEMPTS))
    }
}

fn position(pages: &[Page], id: &str) -> PageResult<usize> {
    pages
        .iter()
        .position(|p| p.id == id)
        .ok_or_else(|| PageError::NotFound(id.to_string()))
}

//! In-process implementations of the platform and store seams.
//!
//! Used by native tests and as the offline fallback when no backend project is
//! configured. All of them are cheap `Rc` handles: clones share state.

#[cfg(test)]
#[path = "memory_test.rs"]
mod memory_test;

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use async_trait::async_trait;

use crate::document::{CollectionPath, DocPath, Document, DocumentStore, Fields, Filter, WriteMode};
use crate::error::{StoreError, SyncError};
use crate::platform::{LocalStore, ThemeSurface};
use crate::theme::Theme;

// =============================================================================
// DOCUMENT STORE
// =============================================================================

/// Document store held entirely in memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryDocumentStore {
    docs: Rc<RefCell<BTreeMap<String, (DocPath, Fields)>>>,
}

impl MemoryDocumentStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed or replace a document directly.
    pub fn insert(&self, path: &DocPath, fields: Fields) {
        self.docs.borrow_mut().insert(path.to_string(), (path.clone(), fields));
    }

    /// Add a document with a generated id and return its path.
    pub fn add(&self, collection: &CollectionPath, fields: Fields) -> DocPath {
        let path = collection.doc(&uuid::Uuid::new_v4().simple().to_string());
        self.insert(&path, fields);
        path
    }

    /// Snapshot of a document's fields.
    #[must_use]
    pub fn fields(&self, path: &DocPath) -> Option<Fields> {
        self.docs.borrow().get(&path.to_string()).map(|(_, fields)| fields.clone())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.docs.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.docs.borrow().is_empty()
    }
}

#[async_trait(?Send)]
impl DocumentStore for MemoryDocumentStore {
    async fn get(&self, path: &DocPath) -> Result<Option<Document>, StoreError> {
        Ok(self.fields(path).map(|fields| Document { id: path.id().to_owned(), fields }))
    }

    async fn set(&self, path: &DocPath, fields: Fields, mode: WriteMode) -> Result<(), StoreError> {
        let key = path.to_string();
        let mut docs = self.docs.borrow_mut();
        match mode {
            WriteMode::CreateOnly if docs.contains_key(&key) => return Err(StoreError::Conflict(key)),
            WriteMode::CreateOnly | WriteMode::Overwrite => {
                docs.insert(key, (path.clone(), fields));
            }
            WriteMode::Merge => {
                let entry = docs.entry(key).or_insert_with(|| (path.clone(), Fields::new()));
                entry.1.extend(fields);
            }
        }
        Ok(())
    }

    async fn query(&self, collection: &CollectionPath, filters: &[Filter]) -> Result<Vec<Document>, StoreError> {
        let docs = self.docs.borrow();
        Ok(docs
            .values()
            .filter(|(path, fields)| path.collection() == collection && filters.iter().all(|f| f.matches(fields)))
            .map(|(path, fields)| Document { id: path.id().to_owned(), fields: fields.clone() })
            .collect())
    }
}

// =============================================================================
// LOCAL STORE
// =============================================================================

/// Key-value store standing in for browser `localStorage`.
#[derive(Clone, Debug, Default)]
pub struct MemoryLocalStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryLocalStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with one entry.
    #[must_use]
    pub fn with(key: &str, value: &str) -> Self {
        let store = Self::new();
        store.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
        store
    }
}

impl LocalStore for MemoryLocalStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SyncError> {
        self.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

// =============================================================================
// THEME SURFACE
// =============================================================================

/// Surface that records every applied theme.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    prefers_dark: Rc<Cell<bool>>,
    applied: Rc<RefCell<Vec<Theme>>>,
}

impl RecordingSurface {
    #[must_use]
    pub fn new(prefers_dark: bool) -> Self {
        let surface = Self::default();
        surface.prefers_dark.set(prefers_dark);
        surface
    }

    pub fn set_prefers_dark(&self, prefers_dark: bool) {
        self.prefers_dark.set(prefers_dark);
    }

    /// Theme currently presented, if any was applied.
    #[must_use]
    pub fn current(&self) -> Option<Theme> {
        self.applied.borrow().last().copied()
    }

    #[must_use]
    pub fn history(&self) -> Vec<Theme> {
        self.applied.borrow().clone()
    }
}

impl ThemeSurface for RecordingSurface {
    fn prefers_dark(&self) -> bool {
        self.prefers_dark.get()
    }

    fn apply(&self, theme: Theme) {
        self.applied.borrow_mut().push(theme);
    }
}

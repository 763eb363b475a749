//! Remote document model and the store boundary.
//!
//! DESIGN
//! ======
//! Documents are flat maps of typed field values addressed by slash-separated
//! paths, mirroring the hosted store. The [`DocumentStore`] trait is the only
//! way the core reaches the network; `?Send` because the browser transport is
//! single-threaded.
//!
//! SCHEMA
//! ======
//! `users/{uid}` holds the profile and the embedded `theme` field. Categories
//! and budgets live in per-user subcollections (`users/{uid}/categories`,
//! `users/{uid}/budgets`), so every query is scoped by path.

#[cfg(test)]
#[path = "document_test.rs"]
mod document_test;

use std::collections::BTreeMap;
use std::fmt;

use async_trait::async_trait;
use time::OffsetDateTime;

use crate::error::StoreError;

pub const USERS: &str = "users";
pub const CATEGORIES: &str = "categories";
pub const BUDGETS: &str = "budgets";

/// Field name of the embedded theme preference on the user document.
pub const THEME_FIELD: &str = "theme";

/// Field map of a document, ordered for stable encoding.
pub type Fields = BTreeMap<String, FieldValue>;

/// A typed document field.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Integer(i64),
    Double(f64),
    String(String),
    Timestamp(OffsetDateTime),
    Array(Vec<FieldValue>),
    Map(Fields),
}

impl FieldValue {
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Double(value)
    }
}

impl From<OffsetDateTime> for FieldValue {
    fn from(value: OffsetDateTime) -> Self {
        Self::Timestamp(value)
    }
}

/// A stored document: its id (last path segment) and fields.
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    pub id: String,
    pub fields: Fields,
}

impl Document {
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    #[must_use]
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(FieldValue::as_str)
    }
}

/// Path of a collection, optionally nested under a parent document.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CollectionPath {
    parent: Option<DocPath>,
    id: String,
}

impl CollectionPath {
    #[must_use]
    pub fn root(id: &str) -> Self {
        Self { parent: None, id: id.to_owned() }
    }

    #[must_use]
    pub fn nested(parent: DocPath, id: &str) -> Self {
        Self { parent: Some(parent), id: id.to_owned() }
    }

    /// `users/{uid}/categories`.
    #[must_use]
    pub fn categories(uid: &str) -> Self {
        Self::nested(DocPath::user(uid), CATEGORIES)
    }

    /// `users/{uid}/budgets`.
    #[must_use]
    pub fn budgets(uid: &str) -> Self {
        Self::nested(DocPath::user(uid), BUDGETS)
    }

    #[must_use]
    pub fn parent(&self) -> Option<&DocPath> {
        self.parent.as_ref()
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Address of a document inside this collection.
    #[must_use]
    pub fn doc(&self, id: &str) -> DocPath {
        DocPath { collection: Box::new(self.clone()), id: id.to_owned() }
    }
}

impl fmt::Display for CollectionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.parent {
            Some(parent) => write!(f, "{parent}/{}", self.id),
            None => f.write_str(&self.id),
        }
    }
}

/// Path of a single document.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DocPath {
    collection: Box<CollectionPath>,
    id: String,
}

impl DocPath {
    /// `users/{uid}`: profile and theme preference.
    #[must_use]
    pub fn user(uid: &str) -> Self {
        CollectionPath::root(USERS).doc(uid)
    }

    #[must_use]
    pub fn collection(&self) -> &CollectionPath {
        &self.collection
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for DocPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.collection, self.id)
    }
}

/// Equality filter on a single field.
#[derive(Clone, Debug, PartialEq)]
pub struct Filter {
    pub field: String,
    pub value: FieldValue,
}

impl Filter {
    #[must_use]
    pub fn equals(field: &str, value: impl Into<FieldValue>) -> Self {
        Self { field: field.to_owned(), value: value.into() }
    }

    #[must_use]
    pub fn matches(&self, fields: &Fields) -> bool {
        fields.get(&self.field) == Some(&self.value)
    }
}

/// How [`DocumentStore::set`] treats an existing document.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WriteMode {
    /// Update only the given fields; keep the rest.
    Merge,
    /// Replace the whole document.
    Overwrite,
    /// Write only if absent; an existing document yields [`StoreError::Conflict`].
    CreateOnly,
}

/// The hosted document database as seen by the client.
#[async_trait(?Send)]
pub trait DocumentStore {
    /// Fetch one document. `Ok(None)` when it does not exist.
    async fn get(&self, path: &DocPath) -> Result<Option<Document>, StoreError>;

    async fn set(&self, path: &DocPath, fields: Fields, mode: WriteMode) -> Result<(), StoreError>;

    /// Documents of `collection` matching every filter.
    async fn query(&self, collection: &CollectionPath, filters: &[Filter]) -> Result<Vec<Document>, StoreError>;

    /// Whether at least one document matches. Answer is valid at call time only.
    /// Remote stores should override this to fetch a single row.
    async fn any_match(&self, collection: &CollectionPath, filters: &[Filter]) -> Result<bool, StoreError> {
        Ok(!self.query(collection, filters).await?.is_empty())
    }
}

//! Existence checks backing form validation.
//!
//! Each check issues one filtered query under the signed-in user's document and
//! reports whether anything matched. Answers are point-in-time: nothing is
//! cached or subscribed.

#[cfg(test)]
#[path = "validation_test.rs"]
mod validation_test;

use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use tracing::debug;

use crate::cell::StateCell;
use crate::document::{CollectionPath, DocumentStore, Filter};
use crate::error::SyncError;
use crate::session::Session;

pub const NAME_FIELD: &str = "name";
pub const TYPE_FIELD: &str = "type";
pub const CATEGORY_ID_FIELD: &str = "categoryId";

/// Whether a category tracks money in or out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CategoryType {
    Income,
    Expense,
}

impl CategoryType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for CategoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(format!("unknown category type: {other}")),
        }
    }
}

/// Existence checks scoped to the session in `session`.
#[derive(Clone)]
pub struct Validator {
    store: Rc<dyn DocumentStore>,
    session: Rc<dyn StateCell<Option<Session>>>,
}

impl Validator {
    #[must_use]
    pub fn new(store: Rc<dyn DocumentStore>, session: Rc<dyn StateCell<Option<Session>>>) -> Self {
        Self { store, session }
    }

    fn uid(&self) -> Result<String, SyncError> {
        self.session.get().map(|s| s.uid).ok_or(SyncError::NoSession)
    }

    /// Does the user already have a category with this name and type?
    ///
    /// # Errors
    ///
    /// [`SyncError::NoSession`] when signed out; store failures otherwise.
    pub async fn category_exists(&self, name: &str, kind: CategoryType) -> Result<bool, SyncError> {
        let uid = self.uid()?;
        let filters = [Filter::equals(NAME_FIELD, name), Filter::equals(TYPE_FIELD, kind.as_str())];
        let found = self.store.any_match(&CollectionPath::categories(&uid), &filters).await?;
        debug!(%uid, name, kind = %kind, found, "category existence check");
        Ok(found)
    }

    /// Is any budget allocated against `category_id`?
    ///
    /// # Errors
    ///
    /// [`SyncError::NoSession`] when signed out; store failures otherwise.
    pub async fn is_budget_allocated(&self, category_id: &str) -> Result<bool, SyncError> {
        let uid = self.uid()?;
        let filters = [Filter::equals(CATEGORY_ID_FIELD, category_id)];
        let found = self.store.any_match(&CollectionPath::budgets(&uid), &filters).await?;
        debug!(%uid, category_id, found, "budget allocation check");
        Ok(found)
    }
}

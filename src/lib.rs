//! # pocketbook
//!
//! Client core for the Pocketbook personal-finance app (budgets, categories,
//! themes). Platform-independent: the browser crate in `client/` supplies the
//! storage, DOM and network adapters; everything here builds and tests natively.
//!
//! SYSTEM CONTEXT
//! ==============
//! Authentication and persistence are delegated to hosted services. This crate
//! owns the glue that reconciles them with local UI state:
//!
//! - [`sync`] mirrors auth-provider sessions into an application-owned cell,
//!   provisions profile documents and keeps the theme preference in step across
//!   memory, local storage and the remote user document.
//! - [`validation`] answers "does this already exist?" questions for forms.
//! - [`lookup`] maps categories and budget statuses to icons and style classes.
//! - [`document`] and [`firestore`] describe the remote store and its REST wire
//!   format; [`memory`] provides in-process implementations.

pub mod cell;
pub mod config;
pub mod document;
pub mod error;
pub mod firestore;
pub mod lookup;
pub mod memory;
pub mod platform;
pub mod profile;
pub mod session;
pub mod sync;
pub mod theme;
pub mod validation;

pub use cell::{LocalCell, StateCell};
pub use config::ClientConfig;
pub use document::{CollectionPath, DocPath, Document, DocumentStore, FieldValue, Fields, Filter, WriteMode};
pub use error::{ConfigError, StoreError, SyncError, ThemeError};
pub use session::{AuthFeed, Session};
pub use sync::{Operation, SyncCells, SyncDeps, SyncEngine, SyncFailure, SyncSettings, ThemeHandle};
pub use theme::{Theme, ThemePreference};

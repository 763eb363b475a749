//! Network and provider bridges.
//!
//! SYSTEM CONTEXT
//! ==============
//! `firestore` carries document-store calls over the REST API and
//! `auth_bridge` forwards the hosted auth provider's callbacks into the core.

pub mod auth_bridge;
pub mod firestore;

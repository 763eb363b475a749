//! Lazy provisioning of the per-user profile document.
//!
//! INVARIANT
//! =========
//! Provisioning never overwrites an existing profile. The existence check is
//! followed by a create-only write, so a profile created concurrently by
//! another client surfaces as a conflict and is treated as already present.
//!
//! A document without `createdAt` was never provisioned (a theme merge can
//! create `users/{uid}` on its own). It is completed with a merge write of the
//! missing profile fields, leaving everything else in place.

#[cfg(test)]
#[path = "profile_test.rs"]
mod profile_test;

use tracing::{debug, info};

use crate::document::{DocPath, Document, DocumentStore, FieldValue, Fields, WriteMode};
use crate::error::StoreError;
use crate::session::Session;

pub const EMAIL_FIELD: &str = "email";
pub const CREATED_AT_FIELD: &str = "createdAt";

/// What provisioning did for a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProvisionOutcome {
    Created,
    /// A partial document existed and its missing profile fields were added.
    Completed,
    AlreadyPresent,
}

/// Fields of a freshly created profile.
#[must_use]
pub fn profile_fields(session: &Session, created_at: time::OffsetDateTime) -> Fields {
    let mut fields = Fields::new();
    let email = session.email.clone().map_or(FieldValue::Null, FieldValue::String);
    fields.insert(EMAIL_FIELD.to_owned(), email);
    fields.insert(CREATED_AT_FIELD.to_owned(), FieldValue::Timestamp(created_at));
    fields
}

/// Ensure `users/{uid}` exists, creating it from the session if absent.
///
/// # Errors
///
/// Propagates store failures other than a create conflict.
pub async fn ensure_profile(
    store: &dyn DocumentStore,
    session: &Session,
    created_at: time::OffsetDateTime,
) -> Result<ProvisionOutcome, StoreError> {
    let path = DocPath::user(&session.uid);
    if let Some(existing) = store.get(&path).await? {
        return complete_profile(store, session, created_at, &existing).await;
    }

    match store.set(&path, profile_fields(session, created_at), WriteMode::CreateOnly).await {
        Ok(()) => {
            info!(uid = %session.uid, "profile created");
            Ok(ProvisionOutcome::Created)
        }
        Err(StoreError::Conflict(_)) => {
            debug!(uid = %session.uid, "profile created concurrently");
            match store.get(&path).await? {
                Some(existing) => complete_profile(store, session, created_at, &existing).await,
                None => Ok(ProvisionOutcome::AlreadyPresent),
            }
        }
        Err(e) => Err(e),
    }
}

/// Merge in whichever profile fields `existing` lacks.
async fn complete_profile(
    store: &dyn DocumentStore,
    session: &Session,
    created_at: time::OffsetDateTime,
    existing: &Document,
) -> Result<ProvisionOutcome, StoreError> {
    if existing.get(CREATED_AT_FIELD).is_some() {
        debug!(uid = %session.uid, "profile already present");
        return Ok(ProvisionOutcome::AlreadyPresent);
    }

    let mut missing = profile_fields(session, created_at);
    missing.retain(|key, _| existing.get(key).is_none());
    store.set(&DocPath::user(&session.uid), missing, WriteMode::Merge).await?;
    info!(uid = %session.uid, "partial profile completed");
    Ok(ProvisionOutcome::Completed)
}

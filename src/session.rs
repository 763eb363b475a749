//! Auth sessions and the ordered event feed into the sync engine.
//!
//! SYSTEM CONTEXT
//! ==============
//! The hosted auth provider pushes session changes through a callback. The
//! browser bridge forwards each one into an [`AuthFeed`]; theme edits share the
//! same channel so the engine sees every input in arrival order.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use futures::channel::mpsc::UnboundedSender;
use serde::{Deserialize, Serialize};

use crate::error::SyncError;
use crate::theme::ThemePreference;

/// Identity claims issued by the auth provider.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Stable user identifier; keys the profile document.
    pub uid: String,
    #[serde(default)]
    pub email: Option<String>,
    /// Bearer credential for document-store requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_token: Option<String>,
}

impl Session {
    #[must_use]
    pub fn new(uid: &str, email: &str) -> Self {
        Self { uid: uid.to_owned(), email: Some(email.to_owned()), id_token: None }
    }
}

/// One input to the sync engine.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum SyncEvent {
    /// Provider reported a session (or its absence).
    Auth(Option<Session>),
    /// The user picked a theme.
    ThemeSelected(ThemePreference),
}

/// Sending half for auth-provider notifications.
#[derive(Clone, Debug)]
pub struct AuthFeed {
    tx: UnboundedSender<SyncEvent>,
}

impl AuthFeed {
    pub(crate) fn new(tx: UnboundedSender<SyncEvent>) -> Self {
        Self { tx }
    }

    /// Forward a provider notification. Fails once the engine has shut down.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::AuthUnavailable`] if the feed is closed.
    pub fn publish(&self, session: Option<Session>) -> Result<(), SyncError> {
        self.tx
            .unbounded_send(SyncEvent::Auth(session))
            .map_err(|e| SyncError::AuthUnavailable(e.to_string()))
    }

    /// Close the feed for every sender. The engine finishes in-flight work and
    /// returns from [`crate::SyncEngine::run`].
    pub fn close(&self) {
        self.tx.close_channel();
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

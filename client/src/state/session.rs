//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! The sync engine is the only writer; components read the signal to render
//! identity-dependent UI, and the Firestore transport reads the bearer token.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::rc::Rc;

use leptos::prelude::*;
use pocketbook::{Session, StateCell};

use super::signal_cell::SignalCell;

/// Current session, or `None` when signed out.
#[derive(Clone, Copy, Debug)]
pub struct SessionState {
    pub session: RwSignal<Option<Session>>,
}

impl SessionState {
    pub fn new() -> Self {
        Self { session: RwSignal::new(None) }
    }

    /// Engine-facing handle onto the same signal.
    pub fn cell(&self) -> Rc<dyn StateCell<Option<Session>>> {
        Rc::new(SignalCell(self.session))
    }

    /// Tracked label for the header.
    pub fn label(&self) -> String {
        account_label(self.session.get().as_ref())
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

/// Display label for a session: email, then uid, then "Signed out".
pub fn account_label(session: Option<&Session>) -> String {
    match session {
        Some(Session { email: Some(email), .. }) if !email.is_empty() => email.clone(),
        Some(session) => session.uid.clone(),
        None => "Signed out".to_owned(),
    }
}

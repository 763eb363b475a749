//! Bridge from the hosted auth provider to the core's [`AuthFeed`].
//!
//! The host page exposes `window.pocketbookAuth.subscribe(callback)`, which
//! returns an unsubscribe function. The callback fires once with the initial
//! state and then on every transition, with either `null` or
//! `{ uid, email, idToken }`. Each payload is forwarded in order; dropping the
//! [`AuthSubscription`] unsubscribes.

#[cfg(test)]
#[path = "auth_bridge_test.rs"]
mod auth_bridge_test;

use pocketbook::{AuthFeed, Session, SyncError};

#[cfg(feature = "csr")]
use wasm_bindgen::JsValue;

#[cfg(feature = "csr")]
mod provider {
    use wasm_bindgen::prelude::*;

    #[wasm_bindgen]
    extern "C" {
        #[wasm_bindgen(js_namespace = pocketbookAuth, js_name = subscribe, catch)]
        pub fn subscribe(callback: &js_sys::Function) -> Result<js_sys::Function, JsValue>;
    }
}

/// Decode one provider payload (JSON `null` or a session object).
///
/// # Errors
///
/// Returns [`SyncError::AuthUnavailable`] if the payload is not a session.
pub fn parse_session(raw: &str) -> Result<Option<Session>, SyncError> {
    serde_json::from_str::<Option<Session>>(raw)
        .map_err(|err| SyncError::AuthUnavailable(format!("bad session payload: {err}")))
}

#[cfg(feature = "csr")]
fn session_from_js(payload: &JsValue) -> Result<Option<Session>, SyncError> {
    if payload.is_null() || payload.is_undefined() {
        return Ok(None);
    }
    let raw = js_sys::JSON::stringify(payload)
        .map_err(|err| SyncError::AuthUnavailable(format!("unserializable session payload: {err:?}")))?;
    parse_session(&String::from(raw))
}

/// Live provider subscription. Unsubscribes on drop.
pub struct AuthSubscription {
    #[cfg(feature = "csr")]
    unsubscribe: js_sys::Function,
    #[cfg(feature = "csr")]
    _callback: wasm_bindgen::closure::Closure<dyn FnMut(JsValue)>,
}

#[cfg(feature = "csr")]
impl Drop for AuthSubscription {
    fn drop(&mut self) {
        if let Err(err) = self.unsubscribe.call0(&JsValue::NULL) {
            log::warn!("auth unsubscribe failed: {err:?}");
        }
    }
}

/// Subscribe to the host auth provider, forwarding every payload into `feed`.
///
/// Without a browser there is no provider: the feed receives a single
/// signed-out event.
///
/// # Errors
///
/// Returns [`SyncError::AuthUnavailable`] if the provider is missing or the
/// feed is already closed.
pub fn subscribe(feed: AuthFeed) -> Result<AuthSubscription, SyncError> {
    #[cfg(feature = "csr")]
    {
        use wasm_bindgen::JsCast;
        use wasm_bindgen::closure::Closure;

        let callback = Closure::<dyn FnMut(JsValue)>::new(move |payload: JsValue| {
            if let Err(err) = session_from_js(&payload).and_then(|session| feed.publish(session)) {
                log::warn!("auth event dropped: {err}");
            }
        });
        let unsubscribe = provider::subscribe(callback.as_ref().unchecked_ref())
            .map_err(|err| SyncError::AuthUnavailable(format!("pocketbookAuth.subscribe failed: {err:?}")))?;
        Ok(AuthSubscription { unsubscribe, _callback: callback })
    }
    #[cfg(not(feature = "csr"))]
    {
        feed.publish(None)?;
        Ok(AuthSubscription {})
    }
}

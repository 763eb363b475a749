//! Firestore REST transport for the core's [`DocumentStore`] seam.
//!
//! Request shaping and response decoding live in `pocketbook::firestore`; this
//! module only moves bytes with `gloo-net` and attaches the session's bearer
//! token.
//!
//! ERROR HANDLING
//! ==============
//! Transport failures map to `StoreError::Unreachable`, non-success statuses go
//! through `status_error`, and undecodable bodies are `StoreError::Malformed`.
//! Outside the browser every call is `Unreachable`.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "firestore_test.rs"]
mod firestore_test;

use std::rc::Rc;

use async_trait::async_trait;
use pocketbook::firestore::FirestoreEndpoint;
use pocketbook::{CollectionPath, DocPath, Document, DocumentStore, Fields, Filter, Session, StateCell, StoreError, WriteMode};

#[cfg(feature = "csr")]
use pocketbook::firestore::{decode_document, decode_query_response, encode_document, run_query_body, status_error};
#[cfg(feature = "csr")]
use serde_json::Value;

/// Document store backed by the Firestore REST API.
#[derive(Clone)]
pub struct FirestoreStore {
    endpoint: FirestoreEndpoint,
    session: Rc<dyn StateCell<Option<Session>>>,
}

impl FirestoreStore {
    pub fn new(endpoint: FirestoreEndpoint, session: Rc<dyn StateCell<Option<Session>>>) -> Self {
        Self { endpoint, session }
    }

    /// `Authorization` header value for the current session, if it has a token.
    pub fn bearer(&self) -> Option<String> {
        self.session.get().and_then(|s| s.id_token).map(|token| format!("Bearer {token}"))
    }

    #[cfg(feature = "csr")]
    fn authorize(&self, request: gloo_net::http::RequestBuilder) -> gloo_net::http::RequestBuilder {
        match self.bearer() {
            Some(value) => request.header("Authorization", &value),
            None => request,
        }
    }

    #[cfg_attr(not(feature = "csr"), allow(unused_variables))]
    async fn run_query(
        &self,
        collection: &CollectionPath,
        filters: &[Filter],
        limit: Option<u32>,
    ) -> Result<Vec<Document>, StoreError> {
        let url = self.endpoint.run_query_url(collection);
        #[cfg(feature = "csr")]
        {
            let body = run_query_body(collection, filters, limit)?;
            let request = self
                .authorize(gloo_net::http::Request::post(&url))
                .json(&body)
                .map_err(|err| StoreError::Malformed(err.to_string()))?;
            match finish(request.send().await).await? {
                Some(rows) => decode_query_response(&rows),
                None => Err(StoreError::Rejected { status: 404, message: format!("{collection} not found") }),
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            Err(self.offline(&format!("{url} ({} filters)", filters.len())))
        }
    }

    #[cfg(not(feature = "csr"))]
    fn offline(&self, url: &str) -> StoreError {
        StoreError::Unreachable(format!("no browser transport for {url}"))
    }
}

/// Read a response: `Ok(None)` for 404, the parsed JSON body on success.
#[cfg(feature = "csr")]
async fn finish(sent: Result<gloo_net::http::Response, gloo_net::Error>) -> Result<Option<Value>, StoreError> {
    let response = sent.map_err(|err| StoreError::Unreachable(err.to_string()))?;
    let status = response.status();
    let body = response.text().await.map_err(|err| StoreError::Malformed(err.to_string()))?;
    if status == 404 {
        return Ok(None);
    }
    if !(200..300).contains(&status) {
        return Err(status_error(status, &body));
    }
    if body.trim().is_empty() {
        return Ok(Some(Value::Null));
    }
    serde_json::from_str(&body)
        .map(Some)
        .map_err(|err| StoreError::Malformed(err.to_string()))
}

#[async_trait(?Send)]
impl DocumentStore for FirestoreStore {
    async fn get(&self, path: &DocPath) -> Result<Option<Document>, StoreError> {
        let url = self.endpoint.document_url(path);
        #[cfg(feature = "csr")]
        {
            let sent = self.authorize(gloo_net::http::Request::get(&url)).send().await;
            match finish(sent).await? {
                Some(body) => decode_document(&body).map(Some),
                None => Ok(None),
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            Err(self.offline(&url))
        }
    }

    async fn set(&self, path: &DocPath, fields: Fields, mode: WriteMode) -> Result<(), StoreError> {
        let url = self.endpoint.write_url(path, &fields, mode);
        #[cfg(feature = "csr")]
        {
            let body = encode_document(&fields)?;
            let request = self
                .authorize(gloo_net::http::Request::patch(&url))
                .json(&body)
                .map_err(|err| StoreError::Malformed(err.to_string()))?;
            match finish(request.send().await).await? {
                Some(_) => Ok(()),
                None => Err(StoreError::Rejected { status: 404, message: format!("{path} not found") }),
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            Err(self.offline(&url))
        }
    }

    async fn query(&self, collection: &CollectionPath, filters: &[Filter]) -> Result<Vec<Document>, StoreError> {
        self.run_query(collection, filters, None).await
    }

    /// Asks the backend for a single row instead of every match.
    async fn any_match(&self, collection: &CollectionPath, filters: &[Filter]) -> Result<bool, StoreError> {
        Ok(!self.run_query(collection, filters, Some(1)).await?.is_empty())
    }
}

use super::*;
use crate::document::FieldValue;

fn fields(pairs: &[(&str, &str)]) -> Fields {
    pairs.iter().map(|(k, v)| ((*k).to_owned(), FieldValue::from(*v))).collect()
}

// =============================================================
// MemoryDocumentStore
// =============================================================

#[tokio::test]
async fn get_missing_document_is_none() {
    let store = MemoryDocumentStore::new();
    assert_eq!(store.get(&DocPath::user("nobody")).await.unwrap(), None);
}

#[tokio::test]
async fn merge_keeps_unspecified_fields() {
    let store = MemoryDocumentStore::new();
    let path = DocPath::user("u1");
    store.insert(&path, fields(&[("email", "a@example.com"), ("theme", "lofi")]));

    store.set(&path, fields(&[("theme", "dracula")]), WriteMode::Merge).await.unwrap();

    let doc = store.get(&path).await.unwrap().unwrap();
    assert_eq!(doc.id, "u1");
    assert_eq!(doc.get_str("theme"), Some("dracula"));
    assert_eq!(doc.get_str("email"), Some("a@example.com"));
}

#[tokio::test]
async fn merge_creates_missing_document() {
    let store = MemoryDocumentStore::new();
    let path = DocPath::user("u1");
    store.set(&path, fields(&[("theme", "dark")]), WriteMode::Merge).await.unwrap();
    assert_eq!(store.fields(&path), Some(fields(&[("theme", "dark")])));
}

#[tokio::test]
async fn overwrite_drops_previous_fields() {
    let store = MemoryDocumentStore::new();
    let path = DocPath::user("u1");
    store.insert(&path, fields(&[("email", "a@example.com")]));
    store.set(&path, fields(&[("theme", "dark")]), WriteMode::Overwrite).await.unwrap();
    assert_eq!(store.fields(&path), Some(fields(&[("theme", "dark")])));
}

#[tokio::test]
async fn create_only_conflicts_on_existing_document() {
    let store = MemoryDocumentStore::new();
    let path = DocPath::user("u1");
    store.insert(&path, fields(&[("email", "first@example.com")]));

    let err = store
        .set(&path, fields(&[("email", "second@example.com")]), WriteMode::CreateOnly)
        .await
        .unwrap_err();

    assert_eq!(err, StoreError::Conflict("users/u1".to_owned()));
    assert_eq!(store.fields(&path), Some(fields(&[("email", "first@example.com")])));
}

#[tokio::test]
async fn query_is_scoped_to_collection_and_filters() {
    let store = MemoryDocumentStore::new();
    store.add(&CollectionPath::categories("u1"), fields(&[("name", "Rent"), ("type", "expense")]));
    store.add(&CollectionPath::categories("u1"), fields(&[("name", "Rent"), ("type", "income")]));
    store.add(&CollectionPath::categories("u2"), fields(&[("name", "Rent"), ("type", "expense")]));

    let filters = [Filter::equals("name", "Rent"), Filter::equals("type", "expense")];
    let hits = store.query(&CollectionPath::categories("u1"), &filters).await.unwrap();

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].get_str("type"), Some("expense"));
    assert!(store.any_match(&CollectionPath::categories("u2"), &filters).await.unwrap());
    assert!(!store.any_match(&CollectionPath::budgets("u1"), &[]).await.unwrap());
}

#[test]
fn add_generates_distinct_ids() {
    let store = MemoryDocumentStore::new();
    let a = store.add(&CollectionPath::budgets("u1"), Fields::new());
    let b = store.add(&CollectionPath::budgets("u1"), Fields::new());
    assert_ne!(a, b);
    assert_eq!(store.len(), 2);
    assert!(!store.is_empty());
}

// =============================================================
// MemoryLocalStore / RecordingSurface
// =============================================================

#[test]
fn local_store_round_trips_values() {
    let store = MemoryLocalStore::with("theme", "dark");
    assert_eq!(store.get("theme").as_deref(), Some("dark"));
    store.set("theme", "lofi").unwrap();
    assert_eq!(store.clone().get("theme").as_deref(), Some("lofi"));
    assert_eq!(store.get("other"), None);
}

#[test]
fn recording_surface_tracks_applications() {
    let surface = RecordingSurface::new(true);
    assert!(surface.prefers_dark());
    assert_eq!(surface.current(), None);

    surface.apply(Theme::Dark);
    surface.apply(Theme::Lofi);
    surface.set_prefers_dark(false);

    assert!(!surface.prefers_dark());
    assert_eq!(surface.current(), Some(Theme::Lofi));
    assert_eq!(surface.history(), vec![Theme::Dark, Theme::Lofi]);
}

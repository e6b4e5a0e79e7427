use serde_json::json;

use printigo_core::testutil::doc;
use printigo_core::{Catalog, Collection, DocumentStore, FindQuery, RecordId, SortDirection};

use crate::integration::common::setup_test_db;

#[tokio::test]
#[ignore = "needs a Docker daemon"]
async fn insert_and_find_one() {
    let (db, _container) = setup_test_db().await;
    let store = db.document_store();

    let payload = doc(json!({"title": "Business cards", "price": 25, "date": "2022-11-02"}));
    let inserted = store
        .insert_one(Collection::Services, payload.clone())
        .await
        .unwrap();
    assert!(inserted.acknowledged);

    let record = store
        .find_one(Collection::Services, inserted.inserted_id)
        .await
        .unwrap()
        .expect("Should find the service");
    assert_eq!(record.id, inserted.inserted_id);
    assert_eq!(record.fields, payload);

    let missing = store
        .find_one(Collection::Services, RecordId::new())
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
#[ignore = "needs a Docker daemon"]
async fn find_sorts_by_date_with_insertion_tie_break() {
    let (db, _container) = setup_test_db().await;
    let store = db.document_store();

    for (title, date) in [
        ("old", json!("2022-01-01")),
        ("undated", serde_json::Value::Null),
        ("new-a", json!("2022-06-01")),
        ("new-b", json!("2022-06-01")),
    ] {
        let mut fields = doc(json!({"title": title}));
        if !date.is_null() {
            fields.insert("date".into(), date);
        }
        store.insert_one(Collection::Services, fields).await.unwrap();
    }

    let query = FindQuery::all().sort_by("date", SortDirection::Descending);
    let titles: Vec<_> = store
        .find(Collection::Services, query)
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.fields["title"].clone())
        .collect();
    assert_eq!(titles, vec![json!("new-a"), json!("new-b"), json!("old"), json!("undated")]);

    let query = FindQuery::all()
        .sort_by("date", SortDirection::Descending)
        .limit(3);
    assert_eq!(store.find(Collection::Services, query).await.unwrap().len(), 3);
}

#[tokio::test]
#[ignore = "needs a Docker daemon"]
async fn filter_matches_strings_exactly() {
    let (db, _container) = setup_test_db().await;
    let store = db.document_store();

    for service_id in [json!("s1"), json!("s2"), json!(1)] {
        store
            .insert_one(Collection::Reviews, doc(json!({"serviceId": service_id})))
            .await
            .unwrap();
    }

    let query = FindQuery::all().where_eq("serviceId", "s1");
    assert_eq!(store.find(Collection::Reviews, query).await.unwrap().len(), 1);

    let query = FindQuery::all().where_eq("serviceId", "1");
    assert!(store.find(Collection::Reviews, query).await.unwrap().is_empty());
}

#[tokio::test]
#[ignore = "needs a Docker daemon"]
async fn update_reports_matched_and_modified() {
    let (db, _container) = setup_test_db().await;
    let store = db.document_store();

    let inserted = store
        .insert_one(
            Collection::Reviews,
            doc(json!({"serviceId": "s1", "email": "alice@example.com", "ratings": 3})),
        )
        .await
        .unwrap();
    let id = inserted.inserted_id;

    let set = doc(json!({"ratings": 5, "details": "great", "date": null}));
    let result = store
        .update_one(Collection::Reviews, id, set.clone())
        .await
        .unwrap();
    assert_eq!((result.matched_count, result.modified_count), (1, 1));

    let again = store.update_one(Collection::Reviews, id, set).await.unwrap();
    assert_eq!((again.matched_count, again.modified_count), (1, 0));

    let review = store
        .find_one(Collection::Reviews, id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(review.fields["email"], "alice@example.com");
    assert_eq!(review.fields["serviceId"], "s1");
    assert_eq!(review.fields["ratings"], 5);

    let none = store
        .update_one(Collection::Reviews, RecordId::new(), doc(json!({"ratings": 1})))
        .await
        .unwrap();
    assert_eq!((none.matched_count, none.modified_count), (0, 0));
}

#[tokio::test]
#[ignore = "needs a Docker daemon"]
async fn delete_is_idempotent() {
    let (db, _container) = setup_test_db().await;
    let catalog = Catalog::new(std::sync::Arc::new(db.document_store()));

    let inserted = catalog
        .create_review(doc(json!({"email": "alice@example.com"})))
        .await
        .unwrap();

    let first = catalog.delete_review(inserted.inserted_id).await.unwrap();
    assert_eq!(first.deleted_count, 1);
    assert!(catalog.get_review(inserted.inserted_id).await.unwrap().is_none());

    let second = catalog.delete_review(inserted.inserted_id).await.unwrap();
    assert_eq!(second.deleted_count, 0);
}

#[tokio::test]
#[ignore = "needs a Docker daemon"]
async fn ping_succeeds() {
    let (db, _container) = setup_test_db().await;
    db.document_store().ping().await.unwrap();
}

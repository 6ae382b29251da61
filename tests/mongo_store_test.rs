//! Runs the repository against a live MongoDB.
//!
//! Ignored by default. Run with:
//! `MONGODB_URI=mongodb://localhost:27017 cargo test --test mongo_store_test -- --ignored`

use card_service::{Card, CardError, CardRepository, CardUpdate, MongoCardStore};
use std::sync::Arc;
use std::time::Duration;

async fn repository(collection: &str) -> Option<CardRepository> {
    let uri = std::env::var("MONGODB_URI").ok()?;
    let store = MongoCardStore::connect(
        &uri,
        "card_service_test",
        collection,
        Duration::from_secs(5),
    )
    .await
    .unwrap();
    Some(CardRepository::new(Arc::new(store)))
}

#[tokio::test]
#[ignore]
async fn test_mongo_crud_cycle() {
    let collection = format!("cards_{}", std::process::id());
    let Some(repo) = repository(&collection).await else {
        eprintln!("MONGODB_URI not set, skipping");
        return;
    };

    let created = repo
        .create(Card {
            id: None,
            name: "Mongo Ace".to_string(),
            number: 1,
        })
        .await
        .unwrap();
    let id = created.id.clone().unwrap();
    assert_eq!(repo.get(&id).await.unwrap(), created);

    let duplicate = repo
        .create(Card {
            id: None,
            name: "Mongo Ace".to_string(),
            number: 2,
        })
        .await
        .unwrap_err();
    assert!(matches!(duplicate, CardError::Conflict { .. }));

    let updated = repo
        .update(
            &id,
            CardUpdate {
                name: None,
                number: Some(5),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "Mongo Ace");
    assert_eq!(updated.number, 5);

    assert_eq!(repo.list().await.unwrap().len(), 1);
    assert_eq!(repo.delete(&id).await.unwrap(), 1);
    assert!(matches!(repo.get(&id).await.unwrap_err(), CardError::NotFound));
}

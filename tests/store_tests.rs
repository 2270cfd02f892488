mod common;

use common::{memory_store, new_movie};
use reelrank::store::{MovieChanges, StoreError};

#[tokio::test]
async fn create_starts_unrated() {
    let store = memory_store().await;

    let movie = store.create(new_movie("Inception")).await.unwrap();

    assert!(movie.id > 0);
    assert_eq!(movie.title, "Inception");
    assert_eq!(movie.year, Some(2010));
    assert_eq!(movie.rating, 0.0);
    assert_eq!(movie.ranking, 0);
    assert_eq!(movie.review, "");
    assert_eq!(store.get(movie.id).await.unwrap(), movie);
}

#[tokio::test]
async fn duplicate_title_is_a_conflict() {
    let store = memory_store().await;
    let original = store.create(new_movie("Inception")).await.unwrap();

    let mut dup = new_movie("Inception");
    dup.description = "someone else's synopsis".to_string();
    let err = store.create(dup).await.unwrap_err();

    assert!(matches!(err, StoreError::Conflict(ref t) if t == "Inception"), "got {err:?}");
    assert_eq!(store.count().await.unwrap(), 1);
    assert_eq!(store.get(original.id).await.unwrap().description, "Inception synopsis");
}

#[tokio::test]
async fn get_unknown_id_is_not_found() {
    let store = memory_store().await;
    assert!(matches!(store.get(42).await, Err(StoreError::NotFound(42))));
}

#[tokio::test]
async fn update_touches_only_given_fields() {
    let store = memory_store().await;
    let movie = store.create(new_movie("Arrival")).await.unwrap();

    let updated = store
        .update(movie.id, MovieChanges { rating: Some(7.5), ..Default::default() })
        .await
        .unwrap();
    assert_eq!(updated.rating, 7.5);
    assert_eq!(updated.review, "");

    let updated = store
        .update(
            movie.id,
            MovieChanges { review: Some("Heptapods!".to_string()), ..Default::default() },
        )
        .await
        .unwrap();
    assert_eq!(updated.rating, 7.5);
    assert_eq!(updated.review, "Heptapods!");
    assert_eq!(store.get(movie.id).await.unwrap().rating, 7.5);
}

#[tokio::test]
async fn update_unknown_id_is_not_found() {
    let store = memory_store().await;
    let err = store.update(7, MovieChanges { rating: Some(1.0), ..Default::default() }).await;
    assert!(matches!(err, Err(StoreError::NotFound(7))));
}

#[tokio::test]
async fn delete_removes_once() {
    let store = memory_store().await;
    let movie = store.create(new_movie("Heat")).await.unwrap();
    store.create(new_movie("Ronin")).await.unwrap();

    store.delete(movie.id).await.unwrap();
    assert_eq!(store.count().await.unwrap(), 1);
    assert!(matches!(store.get(movie.id).await, Err(StoreError::NotFound(_))));

    assert!(matches!(store.delete(movie.id).await, Err(StoreError::NotFound(_))));
    assert_eq!(store.count().await.unwrap(), 1);
}

#[tokio::test]
async fn delete_unknown_id_leaves_store_alone() {
    let store = memory_store().await;
    store.create(new_movie("Heat")).await.unwrap();

    assert!(matches!(store.delete(999).await, Err(StoreError::NotFound(999))));
    assert_eq!(store.count().await.unwrap(), 1);
}

#[tokio::test]
async fn listing_orders() {
    let store = memory_store().await;
    let zodiac = store.create(new_movie("Zodiac")).await.unwrap();
    let alien = store.create(new_movie("Alien")).await.unwrap();
    let memento = store.create(new_movie("Memento")).await.unwrap();
    let brazil = store.create(new_movie("Brazil")).await.unwrap();

    for (id, rating) in [(zodiac.id, 6.0), (alien.id, 9.5), (memento.id, 8.0), (brazil.id, 8.0)] {
        store.update(id, MovieChanges { rating: Some(rating), ..Default::default() }).await.unwrap();
    }

    let by_title: Vec<_> =
        store.list_all().await.unwrap().into_iter().map(|m| m.title).collect();
    assert_eq!(by_title, vec!["Alien", "Brazil", "Memento", "Zodiac"]);

    // Memento and Brazil tie; insertion order decides.
    let by_rating: Vec<_> =
        store.list_by_rating_desc().await.unwrap().into_iter().map(|m| m.title).collect();
    assert_eq!(by_rating, vec!["Alien", "Memento", "Brazil", "Zodiac"]);
}

#[tokio::test]
async fn set_ranking_on_missing_row_is_not_found() {
    let store = memory_store().await;
    assert!(matches!(store.set_ranking(3, 1).await, Err(StoreError::NotFound(3))));
}

#![allow(dead_code)]

use std::sync::Arc;

use reelrank::{
    config::Config,
    db,
    ranking::RankingMode,
    store::{MovieStore, NewMovie},
};

pub async fn memory_store() -> MovieStore {
    let db = db::connect_and_migrate("sqlite::memory:").await.expect("in-memory database");
    MovieStore::new(db)
}

pub fn new_movie(title: &str) -> NewMovie {
    NewMovie {
        title: title.to_string(),
        year: Some(2010),
        description: format!("{title} synopsis"),
        img_url: format!("https://img.test/{}.jpg", title.to_lowercase()),
    }
}

pub fn test_config(ranking_mode: RankingMode) -> Arc<Config> {
    Arc::new(Config {
        addr: "127.0.0.1:0".parse().unwrap(),
        tmdb_access_token: "test-token".to_string(),
        tmdb_base_url: "http://127.0.0.1:9".to_string(),
        tmdb_image_base_url: "https://image.test/w500".to_string(),
        database_url: "sqlite::memory:".to_string(),
        tmdb_rps: 50,
        ranking_mode,
    })
}

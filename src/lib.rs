pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod forms;
pub mod ranking;
pub mod routes;
pub mod store;
pub mod templates;
pub mod tmdb;

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::{config::Config, store::MovieStore, tmdb::MovieLookup};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: MovieStore,
    pub lookup: Arc<dyn MovieLookup>,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::list))
        .route("/add", get(routes::add_form).post(routes::add_search))
        .route("/append_movie", get(routes::append_movie))
        .route("/edit", get(routes::edit_form).post(routes::edit_submit))
        .route("/delete", get(routes::delete).post(routes::delete))
        .with_state(Arc::new(state))
        .layer(TraceLayer::new_for_http())
}

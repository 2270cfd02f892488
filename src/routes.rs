use std::sync::Arc;

use axum::{
    extract::{Form, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::info;

use crate::{
    AppState,
    error::{AppError, AppResult},
    forms::{RateForm, SearchForm},
    ranking::{self, RankingMode},
    store::{MovieChanges, NewMovie, StoreError},
    templates,
    tmdb::poster_url,
};

#[derive(Debug, Deserialize)]
pub struct IdQuery {
    id: i32,
}

#[derive(Debug, Deserialize)]
pub struct AppendQuery {
    id_m: i64,
}

pub async fn list(State(state): State<Arc<AppState>>) -> AppResult<Html<String>> {
    if state.config.ranking_mode == RankingMode::OnRead {
        ranking::recompute(&state.store).await?;
    }
    let movies = state.store.list_by_rating_desc().await?;
    Ok(Html(templates::list_page(&movies)))
}

pub async fn add_form() -> Html<String> {
    Html(templates::add_page("", None))
}

pub async fn add_search(
    State(state): State<Arc<AppState>>,
    Form(form): Form<SearchForm>,
) -> AppResult<Response> {
    let query = match form.validate() {
        Ok(query) => query,
        Err(errors) => {
            let message = errors.first().map(|e| e.message.as_str());
            let body = templates::add_page(&form.title, message);
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(body)).into_response());
        },
    };

    let candidates = state.lookup.search(&query).await?;
    Ok(Html(templates::select_page(&query, &candidates)).into_response())
}

pub async fn append_movie(
    State(state): State<Arc<AppState>>,
    Query(q): Query<AppendQuery>,
) -> AppResult<Response> {
    let detail = state.lookup.fetch_detail(q.id_m).await?;
    let new = NewMovie {
        img_url: poster_url(&state.config.tmdb_image_base_url, detail.poster_path.as_deref()),
        title: detail.title,
        year: detail.year,
        description: detail.description,
    };

    let movie = match state.store.create(new).await {
        Ok(movie) => movie,
        Err(err @ StoreError::Conflict(_)) => {
            let message = err.to_string();
            tracing::warn!(external_id = q.id_m, error = %message, "duplicate movie");
            let body = templates::add_page("", Some(&message));
            return Ok((StatusCode::CONFLICT, Html(body)).into_response());
        },
        Err(err) => return Err(err.into()),
    };

    info!(id = movie.id, external_id = q.id_m, title = %movie.title, "movie added");
    after_write(&state).await?;
    Ok(Redirect::to(&format!("/edit?id={}", movie.id)).into_response())
}

pub async fn edit_form(
    State(state): State<Arc<AppState>>,
    Query(q): Query<IdQuery>,
) -> AppResult<Html<String>> {
    let movie = state.store.get(q.id).await?;
    let form = RateForm { rating: movie.rating.to_string(), review: movie.review.clone() };
    Ok(Html(templates::edit_page(&movie, &form, &[])))
}

pub async fn edit_submit(
    State(state): State<Arc<AppState>>,
    Query(q): Query<IdQuery>,
    Form(form): Form<RateForm>,
) -> AppResult<Response> {
    let movie = state.store.get(q.id).await?;

    let cmd = match form.validate() {
        Ok(cmd) => cmd,
        Err(errors) => {
            tracing::warn!(id = q.id, error = %AppError::Validation(errors.clone()), "rating rejected");
            let body = templates::edit_page(&movie, &form, &errors);
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(body)).into_response());
        },
    };

    state
        .store
        .update(
            q.id,
            MovieChanges { rating: Some(cmd.rating), review: Some(cmd.review), ranking: None },
        )
        .await?;

    after_write(&state).await?;
    Ok(Redirect::to("/").into_response())
}

pub async fn delete(
    State(state): State<Arc<AppState>>,
    Query(q): Query<IdQuery>,
) -> AppResult<Redirect> {
    state.store.delete(q.id).await?;
    info!(id = q.id, "movie removed");
    after_write(&state).await?;
    Ok(Redirect::to("/"))
}

async fn after_write(state: &AppState) -> AppResult<()> {
    if state.config.ranking_mode == RankingMode::OnWrite {
        ranking::recompute(&state.store).await?;
    }
    Ok(())
}

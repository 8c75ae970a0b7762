use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

use crate::api::error::{ApiError, MessageResponse};
use crate::logic::MovieValidator;
use crate::model::{Id, Movie};
use crate::store::traits::MovieStore;

/// Everything a handler needs: the collection and the schema it is checked against
pub struct AppContext<S> {
    pub store: S,
    pub validator: Arc<dyn MovieValidator>,
}

impl<S> AppContext<S> {
    pub fn new(store: S, validator: Arc<dyn MovieValidator>) -> Self {
        Self { store, validator }
    }
}

pub type AppState<S> = Arc<AppContext<S>>;

/// Simple health check endpoint
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

// Bodies are parsed here rather than through the Json extractor so that
// malformed JSON surfaces as the same 400 `{error}` shape as schema failures.
fn parse_body(body: &Bytes) -> Result<Value, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(serde_json::Map::new()));
    }
    serde_json::from_slice(body)
        .map_err(|e| ApiError::Validation(format!("Malformed JSON body: {}", e)))
}

pub async fn list_movies<S: MovieStore>(
    State(state): State<AppState<S>>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<Movie>>, ApiError> {
    // Pairs rather than a struct so a repeated `genre` cannot fail the request; the first one wins
    let genre = params
        .iter()
        .find(|(key, _)| key == "genre")
        .map(|(_, value)| value.as_str())
        .filter(|g| !g.is_empty());
    let movies = state.store.list_movies(genre).await?;
    Ok(Json(movies))
}

pub async fn get_movie<S: MovieStore>(
    State(state): State<AppState<S>>,
    Path(id): Path<Id>,
) -> Result<Json<Movie>, ApiError> {
    match state.store.get_movie(&id).await? {
        Some(movie) => Ok(Json(movie)),
        None => Err(ApiError::MovieNotFound),
    }
}

pub async fn create_movie<S: MovieStore>(
    State(state): State<AppState<S>>,
    body: Bytes,
) -> Result<(StatusCode, Json<Movie>), ApiError> {
    let input = parse_body(&body)?;
    let new_movie = state.validator.validate_full(&input).map_err(|e| {
        log::debug!("Rejected movie: {}", e);
        ApiError::from(e)
    })?;

    let movie = Movie::new(new_movie);
    state.store.insert_movie(movie.clone()).await?;
    log::info!("Created movie {} ({})", movie.id, movie.title);

    Ok((StatusCode::CREATED, Json(movie)))
}

pub async fn update_movie<S: MovieStore>(
    State(state): State<AppState<S>>,
    Path(id): Path<Id>,
    body: Bytes,
) -> Result<Json<Movie>, ApiError> {
    let input = parse_body(&body)?;
    let patch = state.validator.validate_partial(&input).map_err(|e| {
        log::debug!("Rejected update for movie {}: {}", id, e);
        ApiError::from(e)
    })?;

    match state.store.update_movie(&id, patch).await? {
        Some(movie) => {
            log::info!("Updated movie {}", movie.id);
            Ok(Json(movie))
        }
        None => Err(ApiError::MovieNotFound),
    }
}

pub async fn delete_movie<S: MovieStore>(
    State(state): State<AppState<S>>,
    Path(id): Path<Id>,
) -> Result<Json<MessageResponse>, ApiError> {
    if state.store.delete_movie(&id).await? {
        log::info!("Deleted movie {}", id);
        Ok(Json(MessageResponse::new("Movie deleted")))
    } else {
        Err(ApiError::MovieNotFound)
    }
}

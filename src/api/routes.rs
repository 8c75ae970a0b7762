use axum::{
    middleware,
    routing::{delete, get, patch, post},
    Router,
};
use std::sync::Arc;

use crate::api::cors::{cors_layer, origin_guard};
use crate::api::handlers::{self, AppState};
use crate::config::CorsConfig;
use crate::store::traits::MovieStore;

pub fn create_router<S: MovieStore + 'static>(cors: &CorsConfig) -> Router<AppState<S>> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Movie collection
        .route("/movies", get(handlers::list_movies::<S>))
        .route("/movies", post(handlers::create_movie::<S>))
        .route("/movies/:id", get(handlers::get_movie::<S>))
        .route("/movies/:id", patch(handlers::update_movie::<S>))
        .route("/movies/:id", delete(handlers::delete_movie::<S>))
        // The guard is the outermost layer so rejected origins never reach CORS or handlers
        .layer(cors_layer(cors))
        .layer(middleware::from_fn_with_state(
            Arc::new(cors.clone()),
            origin_guard,
        ))
}

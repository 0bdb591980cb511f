use std::sync::Arc;

use axum::{
    http::{header::CONTENT_TYPE, Method},
    routing::{get, patch},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::handler::{
    create_match_handler, delete_match_handler, get_match_by_id_handler, get_matches_handler,
    increment_goals_handler, increment_red_cards_handler, increment_yellow_cards_handler,
    method_not_allowed, set_extra_time_handler, unmatched_route_handler, update_match_handler,
};
use crate::AppState;

/// The full route table.
///
/// ```text
/// GET    /matches                 -> list
/// POST   /matches                 -> create
/// GET    /matches/{id}            -> read
/// PUT    /matches/{id}            -> replace teams and date
/// DELETE /matches/{id}            -> delete
/// PATCH  /matches/{id}/goals      -> goals + 1
/// PATCH  /matches/{id}/yellowcards
/// PATCH  /matches/{id}/redcards
/// PATCH  /matches/{id}/extratime  -> replace extra time
/// *      /matches/{anything else} -> 400 invalid id
/// ```
pub fn create_router(state: Arc<AppState>) -> Router {
    // Every OPTIONS request is answered by this layer with 200 and no body.
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_origin(Any)
        .allow_headers([CONTENT_TYPE]);

    let trace_layer =
        TraceLayer::new_for_http().on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route(
            "/matches",
            get(get_matches_handler)
                .post(create_match_handler)
                .fallback(method_not_allowed("GET, POST")),
        )
        .route(
            "/matches/:id",
            get(get_match_by_id_handler)
                .put(update_match_handler)
                .delete(delete_match_handler)
                .fallback(method_not_allowed("GET, PUT, DELETE")),
        )
        .route(
            "/matches/:id/goals",
            patch(increment_goals_handler).fallback(method_not_allowed("PATCH")),
        )
        .route(
            "/matches/:id/yellowcards",
            patch(increment_yellow_cards_handler).fallback(method_not_allowed("PATCH")),
        )
        .route(
            "/matches/:id/redcards",
            patch(increment_red_cards_handler).fallback(method_not_allowed("PATCH")),
        )
        .route(
            "/matches/:id/extratime",
            patch(set_extra_time_handler).fallback(method_not_allowed("PATCH")),
        )
        .fallback(unmatched_route_handler)
        .layer(cors)
        .layer(trace_layer)
        .with_state(state)
}

use std::sync::Arc;

use axum::async_trait;
use axum::body::Bytes;
use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequestParts;
use axum::extract::Path;
use axum::extract::State;
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::http::Uri;
use axum::response::IntoResponse;
use axum::Json;

use crate::error::AppError;
use crate::schema::CreateMatchSchema;
use crate::schema::ExtraTimeSchema;
use crate::schema::GetMatchSchema;
use crate::schema::Stat;
use crate::schema::UpdateMatchSchema;
use crate::AppState;

/// The `{id}` path segment, parsed before any handler body runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchId(pub i32);

#[async_trait]
impl<S> FromRequestParts<S> for MatchId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::InvalidId(String::new()))?;

        raw.parse::<i32>()
            .map(MatchId)
            .map_err(|_| AppError::InvalidId(raw))
    }
}

pub async fn get_matches_handler(
    State(data): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let matches = data.store.list_matches().await?;
    let matches: Vec<GetMatchSchema> = matches.into_iter().map(GetMatchSchema::from).collect();

    Ok(Json(matches))
}

pub async fn create_match_handler(
    State(data): State<Arc<AppState>>,
    body: Result<Json<CreateMatchSchema>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(body) = body?;
    let m = data.store.create_match(&body).await?;
    tracing::debug!("created match {}", m.id);

    Ok(Json(GetMatchSchema::from(m)))
}

pub async fn get_match_by_id_handler(
    MatchId(id): MatchId,
    State(data): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let m = data.store.get_match(id).await?.ok_or(AppError::NotFound)?;

    Ok(Json(GetMatchSchema::from(m)))
}

pub async fn update_match_handler(
    MatchId(id): MatchId,
    State(data): State<Arc<AppState>>,
    body: Result<Json<UpdateMatchSchema>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(body) = body?;
    let rows = data.store.update_match(id, &body).await?;
    if rows == 0 {
        tracing::debug!("update targeted missing match {}", id);
    }

    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_match_handler(
    MatchId(id): MatchId,
    State(data): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let rows = data.store.delete_match(id).await?;
    if rows == 0 {
        tracing::debug!("delete targeted missing match {}", id);
    }

    Ok(StatusCode::NO_CONTENT)
}

async fn increment_stat(data: &AppState, id: i32, stat: Stat) -> Result<StatusCode, AppError> {
    let rows = data.store.increment_stat(id, stat).await?;
    if rows == 0 {
        tracing::debug!("{} increment targeted missing match {}", stat.column(), id);
    }

    Ok(StatusCode::NO_CONTENT)
}

pub async fn increment_goals_handler(
    MatchId(id): MatchId,
    State(data): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    increment_stat(&data, id, Stat::Goals).await
}

pub async fn increment_yellow_cards_handler(
    MatchId(id): MatchId,
    State(data): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    increment_stat(&data, id, Stat::YellowCards).await
}

pub async fn increment_red_cards_handler(
    MatchId(id): MatchId,
    State(data): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    increment_stat(&data, id, Stat::RedCards).await
}

pub async fn set_extra_time_handler(
    MatchId(id): MatchId,
    State(data): State<Arc<AppState>>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let ExtraTimeSchema { extra_time } = ExtraTimeSchema::from_body_lossy(&body);

    let rows = data.store.set_extra_time(id, &extra_time).await?;
    if rows == 0 {
        tracing::debug!("extra time update targeted missing match {}", id);
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Anything under `/matches/` without a known suffix is read as an identifier, and
/// none of those parse as one.
pub async fn unmatched_route_handler(uri: Uri) -> AppError {
    match uri.path().strip_prefix("/matches/") {
        Some(raw) => AppError::InvalidId(raw.to_owned()),
        None => AppError::UnknownRoute,
    }
}

pub fn method_not_allowed(
    allow: &'static str,
) -> impl Fn() -> std::future::Ready<AppError> + Clone + Send + Sync + 'static {
    move || std::future::ready(AppError::MethodNotAllowed(allow))
}

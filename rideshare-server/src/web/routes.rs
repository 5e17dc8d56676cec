//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::contact::ContactHandoff;
use crate::export::{ExportError, groups_csv, members_csv};
use crate::matching::{MatchError, Matcher, ProximityGroup, group_by_proximity, summarize};
use crate::store::{StoreError, TravellerFilter};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/transport/stats", get(stats))
        .route("/api/transport/groups", get(groups))
        .route("/api/transport/matches/:seeker_id", get(matches))
        .route("/api/transport/contact/:provider_id", get(contact))
        .route("/api/transport/export/groups.csv", get(export_groups))
        .route("/api/transport/export/members.csv", get(export_members))
        .route("/api/transport/cache/invalidate", post(invalidate_cache))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Dashboard counters for the filtered snapshot.
async fn stats(
    State(state): State<AppState>,
    Query(query): Query<FilterQuery>,
) -> Result<Response, AppError> {
    let filter = query.to_filter().map_err(AppError::bad_request)?;
    let records = state.store.snapshot(&filter).await?;

    Ok(Json(summarize(&records)).into_response())
}

/// Proximity groups for the filtered snapshot.
async fn groups(
    State(state): State<AppState>,
    Query(query): Query<GroupsQuery>,
) -> Result<Response, AppError> {
    let groups = load_groups(&state, &query).await?;
    Ok(Json(GroupsResponse { groups }).into_response())
}

/// Ranked providers for one seeker.
///
/// Matching always runs over the full snapshot; the query only shapes the
/// matching options.
async fn matches(
    State(state): State<AppState>,
    Path(seeker_id): Path<String>,
    Query(query): Query<MatchQuery>,
) -> Result<Response, AppError> {
    let options = query.to_options().map_err(AppError::bad_request)?;
    let records = state.store.snapshot(&TravellerFilter::all()).await?;

    let matcher = Matcher::new(&records, &state.config);
    let matches = matcher.find_matches(&seeker_id, &options)?;
    let seeker = matcher.seeker(&seeker_id)?.clone();

    info!("found {} matches for seeker {seeker_id}", matches.len());

    Ok(Json(MatchesResponse { seeker, matches }).into_response())
}

/// Outreach message and WhatsApp link from a seeker to a provider.
async fn contact(
    State(state): State<AppState>,
    Path(provider_id): Path<String>,
    Query(query): Query<ContactQuery>,
) -> Result<Response, AppError> {
    let records = state.store.snapshot(&TravellerFilter::all()).await?;

    let seeker = Matcher::new(&records, &state.config).seeker(&query.seeker_id)?;
    let provider = records
        .iter()
        .find(|r| r.id == provider_id && r.is_provider())
        .ok_or_else(|| AppError::NotFound {
            message: format!("no vehicle provider with id {provider_id}"),
        })?;

    Ok(Json(ContactHandoff::new(seeker, provider)).into_response())
}

/// Proximity groups as CSV.
async fn export_groups(
    State(state): State<AppState>,
    Query(query): Query<GroupsQuery>,
) -> Result<Response, AppError> {
    let groups = load_groups(&state, &query).await?;
    Ok(csv_response("groups.csv", groups_csv(&groups)?))
}

/// Group members as CSV.
async fn export_members(
    State(state): State<AppState>,
    Query(query): Query<GroupsQuery>,
) -> Result<Response, AppError> {
    let groups = load_groups(&state, &query).await?;
    Ok(csv_response("members.csv", members_csv(&groups)?))
}

/// Reload the store and drop cached snapshots.
async fn invalidate_cache(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    match state.store.refresh().await? {
        Some(count) => info!("reloaded {count} traveller records, cache cleared"),
        None => info!("cache cleared"),
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn load_groups(
    state: &AppState,
    query: &GroupsQuery,
) -> Result<Vec<ProximityGroup>, AppError> {
    let filter = query.to_filter().map_err(AppError::bad_request)?;
    let records = state.store.snapshot(&filter).await?;

    let min_group_size = query.min_group_size.unwrap_or(state.config.min_group_size);
    Ok(group_by_proximity(
        &records,
        min_group_size,
        state.config.pincode_prefix_len,
    ))
}

fn csv_response(filename: &str, body: String) -> Response {
    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        body,
    )
        .into_response()
}

/// Application error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    BadRequest { message: String },

    #[error("{message}")]
    NotFound { message: String },

    /// The traveller store failed
    #[error("{message}")]
    Upstream { message: String },

    #[error("{message}")]
    Internal { message: String },
}

impl AppError {
    fn bad_request(message: String) -> Self {
        AppError::BadRequest { message }
    }
}

impl From<MatchError> for AppError {
    fn from(e: MatchError) -> Self {
        match e {
            MatchError::NotFound { .. } => AppError::NotFound {
                message: e.to_string(),
            },
            MatchError::InvalidInput(_) => AppError::BadRequest {
                message: e.to_string(),
            },
        }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::Upstream {
            message: e.to_string(),
        }
    }
}

impl From<ExportError> for AppError {
    fn from(e: ExportError) -> Self {
        AppError::Internal {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Upstream { message } => (StatusCode::BAD_GATEWAY, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!("[{status}] {message}");
        } else {
            warn!("[{status}] {message}");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

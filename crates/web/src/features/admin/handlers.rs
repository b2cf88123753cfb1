use axum::{
    Json,
    extract::{Query, State},
};
use storage::{
    dto::{
        common::{PaginatedResponse, PaginationParams},
        team::{TeamListFilter, TeamResponse},
    },
    models::Registration,
    services::team_directory,
};

use crate::error::WebError;
use crate::features::teams::services::lookup_event;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/admin/registrations",
    params(PaginationParams),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Stored registrations, newest first", body = PaginatedResponse<Registration>),
        (status = 400, description = "Invalid pagination"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "admin"
)]
pub async fn list_registrations(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<PaginatedResponse<Registration>>, WebError> {
    params.validate().map_err(WebError::BadRequest)?;

    let (registrations, total) = state
        .store
        .list_registrations(params.limit(), params.offset())
        .await?;

    Ok(Json(PaginatedResponse::new(registrations, &params, total)))
}

#[utoipa::path(
    get,
    path = "/api/admin/teams",
    params(TeamListFilter),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "All teams, optionally for one event", body = Vec<TeamResponse>),
        (status = 400, description = "Unknown event"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "admin"
)]
pub async fn list_teams(
    State(state): State<AppState>,
    Query(filter): Query<TeamListFilter>,
) -> Result<Json<Vec<TeamResponse>>, WebError> {
    let event = filter.event_id.as_deref().map(lookup_event).transpose()?;
    let teams = team_directory::list_teams(state.store.as_ref(), event).await?;

    Ok(Json(teams.into_iter().map(TeamResponse::from).collect()))
}

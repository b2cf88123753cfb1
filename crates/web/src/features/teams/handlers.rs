use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::dto::{
    participant::{EMAIL_INVALID, is_valid_email},
    team::{
        CreateTeamRequest, JoinTeamRequest, LeaderTeamsQuery, TeamNameAvailability,
        TeamNameQuery, TeamResponse,
    },
};
use validator::Validate;

use crate::error::WebError;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    post,
    path = "/api/teams",
    request_body = CreateTeamRequest,
    responses(
        (status = 201, description = "Team created, leader counted as first member", body = TeamResponse),
        (status = 400, description = "Validation error or solo event"),
        (status = 409, description = "Team name taken for this event, or leader already in a team for it")
    ),
    tag = "teams"
)]
pub async fn create_team(
    State(state): State<AppState>,
    Json(req): Json<CreateTeamRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let event = services::lookup_event(&req.event_id)?;
    let leader = req.leader.normalized();
    let team = services::create_team(&state, event, &req.team_name, &leader).await?;

    Ok((StatusCode::CREATED, Json(TeamResponse::from(team))).into_response())
}

#[utoipa::path(
    get,
    path = "/api/teams",
    params(LeaderTeamsQuery),
    responses(
        (status = 200, description = "Teams led by the given email, newest first", body = Vec<TeamResponse>),
        (status = 400, description = "Malformed email")
    ),
    tag = "teams"
)]
pub async fn list_teams_by_leader(
    State(state): State<AppState>,
    Query(query): Query<LeaderTeamsQuery>,
) -> Result<Json<Vec<TeamResponse>>, WebError> {
    if !is_valid_email(&query.leader_email) {
        return Err(WebError::BadRequest(EMAIL_INVALID.to_string()));
    }

    let teams = services::teams_led_by(&state, &query.leader_email).await?;

    Ok(Json(teams.into_iter().map(TeamResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/teams/name-check",
    params(TeamNameQuery),
    responses(
        (status = 200, description = "Whether the name is already taken for the event", body = TeamNameAvailability),
        (status = 400, description = "Unknown event")
    ),
    tag = "teams"
)]
pub async fn check_team_name(
    State(state): State<AppState>,
    Query(query): Query<TeamNameQuery>,
) -> Result<Json<TeamNameAvailability>, WebError> {
    let event = services::lookup_event(&query.event_id)?;
    let exists = services::team_name_exists(&state, &query.team_name, event).await?;

    Ok(Json(TeamNameAvailability {
        team_name: query.team_name.trim().to_string(),
        event_name: event.name.to_string(),
        exists,
    }))
}

#[utoipa::path(
    get,
    path = "/api/teams/{team_id}",
    params(
        ("team_id" = String, Path, description = "Team ID such as `M-7K2Q`, any case")
    ),
    responses(
        (status = 200, description = "Team found", body = TeamResponse),
        (status = 400, description = "Malformed team ID"),
        (status = 404, description = "Team not found")
    ),
    tag = "teams"
)]
pub async fn get_team(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
) -> Result<Json<TeamResponse>, WebError> {
    let team = services::get_team(&state, &team_id).await?;

    Ok(Json(TeamResponse::from(team)))
}

#[utoipa::path(
    post,
    path = "/api/teams/{team_id}/members",
    params(
        ("team_id" = String, Path, description = "Team ID to join")
    ),
    request_body = JoinTeamRequest,
    responses(
        (status = 200, description = "Joined; status is FULL once the last slot is taken", body = TeamResponse),
        (status = 400, description = "Validation error, malformed ID, or team of another event"),
        (status = 404, description = "Team not found"),
        (status = 409, description = "Team full or email already in the team")
    ),
    tag = "teams"
)]
pub async fn join_team(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
    Json(req): Json<JoinTeamRequest>,
) -> Result<Json<TeamResponse>, WebError> {
    req.validate()?;

    let event = services::lookup_event(&req.event_id)?;
    let member = req.member.normalized();
    let team = services::join_team(&state, &team_id, event, &member).await?;

    Ok(Json(TeamResponse::from(team)))
}

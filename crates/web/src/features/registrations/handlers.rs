use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    dto::registration::{FormStatus, RegistrationRequest, RegistrationSummary},
    services::registration_form,
};

use crate::error::WebError;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    post,
    path = "/api/registrations",
    request_body = RegistrationRequest,
    responses(
        (status = 201, description = "Registration stored; body is the success page", body = RegistrationSummary),
        (status = 400, description = "First failing form rule"),
        (status = 404, description = "Team to join not found"),
        (status = 409, description = "Team full, name taken, or email already in the team")
    ),
    tag = "registrations"
)]
pub async fn submit_registration(
    State(state): State<AppState>,
    Json(req): Json<RegistrationRequest>,
) -> Result<Response, WebError> {
    let registration = services::submit_registration(&state, &req).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegistrationSummary::from(&registration)),
    )
        .into_response())
}

#[utoipa::path(
    post,
    path = "/api/registrations/validate",
    request_body = RegistrationRequest,
    responses(
        (status = 200, description = "Whether the form can be submitted as it stands", body = FormStatus)
    ),
    tag = "registrations"
)]
pub async fn validate_registration(Json(req): Json<RegistrationRequest>) -> Json<FormStatus> {
    Json(registration_form::assess(&req))
}

#[utoipa::path(
    get,
    path = "/api/registrations/{registration_id}",
    params(
        ("registration_id" = String, Path, description = "Registration ID returned on submit")
    ),
    responses(
        (status = 200, description = "Registration summary", body = RegistrationSummary),
        (status = 404, description = "Registration not found")
    ),
    tag = "registrations"
)]
pub async fn get_registration(
    State(state): State<AppState>,
    Path(registration_id): Path<String>,
) -> Result<Json<RegistrationSummary>, WebError> {
    let registration = services::get_registration(&state, &registration_id).await?;

    Ok(Json(RegistrationSummary::from(&registration)))
}

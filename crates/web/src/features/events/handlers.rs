use axum::{
    Json,
    extract::{Path, Query},
};
use storage::{
    catalog,
    dto::event::{EventFilter, EventResponse},
};

use crate::error::WebError;

#[utoipa::path(
    get,
    path = "/api/events",
    params(EventFilter),
    responses(
        (status = 200, description = "Festival events, optionally for one session", body = Vec<EventResponse>)
    ),
    tag = "events"
)]
pub async fn list_events(Query(filter): Query<EventFilter>) -> Json<Vec<EventResponse>> {
    let events = match filter.session {
        Some(session) => catalog::events_for_session(session)
            .map(EventResponse::from)
            .collect(),
        None => catalog::EVENTS.iter().map(EventResponse::from).collect(),
    };

    Json(events)
}

#[utoipa::path(
    get,
    path = "/api/events/{event_id}",
    params(
        ("event_id" = String, Path, description = "Event identifier, e.g. `wordora`")
    ),
    responses(
        (status = 200, description = "Event found", body = EventResponse),
        (status = 404, description = "Event not found")
    ),
    tag = "events"
)]
pub async fn get_event(Path(event_id): Path<String>) -> Result<Json<EventResponse>, WebError> {
    catalog::get_event_by_id(&event_id)
        .map(|event| Json(EventResponse::from(event)))
        .ok_or(WebError::NotFound)
}

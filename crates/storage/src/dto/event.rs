use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::models::{EventDefinition, EventMode, Session};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EventResponse {
    pub event_id: String,
    pub name: String,
    pub mode: EventMode,
    pub team_size: i32,
    pub session: Session,
    pub requires_team: bool,
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct EventFilter {
    pub session: Option<Session>,
}

impl From<&EventDefinition> for EventResponse {
    fn from(event: &EventDefinition) -> Self {
        Self {
            event_id: event.id.to_string(),
            name: event.name.to_string(),
            mode: event.mode,
            team_size: event.team_size,
            session: event.session,
            requires_team: event.requires_team(),
        }
    }
}

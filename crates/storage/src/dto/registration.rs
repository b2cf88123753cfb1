use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::participant::ParticipantDetails;
use crate::catalog;
use crate::models::{EventMode, Registration, RegistrationType, SessionEntry, TeamRole};

/// Full registration form as submitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct RegistrationRequest {
    #[serde(flatten)]
    pub participant: ParticipantDetails,
    pub morning: Option<EventChoice>,
    pub afternoon: Option<EventChoice>,
}

/// Event picked for one session, with the team decision if the event needs one.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EventChoice {
    pub event_id: String,
    #[serde(default)]
    pub team: Option<TeamChoice>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum TeamChoice {
    Create { team_name: String },
    Join { team_id: String },
}

/// Answer to "can this form be submitted yet?"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FormStatus {
    pub submittable: bool,
    /// First failing rule, phrased for the participant.
    pub message: Option<String>,
    pub morning_requires_team: bool,
    pub afternoon_requires_team: bool,
}

/// Per-session block of the success page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SessionSummary {
    pub event_name: String,
    pub mode: Option<EventMode>,
    pub team_id: Option<String>,
    pub team_name: Option<String>,
    pub role: Option<TeamRole>,
    /// Ready-to-copy invitation, present when the participant leads the team.
    pub share_text: Option<String>,
}

/// What the success page shows after a registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RegistrationSummary {
    pub registration_id: String,
    pub greeting: String,
    pub full_name: String,
    pub email: String,
    pub registration_type: RegistrationType,
    pub is_team_leader: bool,
    pub morning: Option<SessionSummary>,
    pub afternoon: Option<SessionSummary>,
    pub registered_at: DateTime<Utc>,
}

impl SessionSummary {
    fn from_entry(entry: &SessionEntry) -> Self {
        let mode = catalog::get_event_by_name(&entry.event_name).map(|event| event.mode);
        let team = entry.team.as_ref();

        let share_text = team.filter(|t| t.role == TeamRole::Leader).map(|t| {
            format!(
                "Join my team \"{}\" for {} with Team ID {}",
                t.team_name, entry.event_name, t.team_id
            )
        });

        Self {
            event_name: entry.event_name.clone(),
            mode,
            team_id: team.map(|t| t.team_id.clone()),
            team_name: team.map(|t| t.team_name.clone()),
            role: team.map(|t| t.role),
            share_text,
        }
    }
}

impl From<&Registration> for RegistrationSummary {
    fn from(registration: &Registration) -> Self {
        Self {
            registration_id: registration.registration_id.clone(),
            greeting: format!(
                "Welcome to Utsavam 6.0, {}!",
                registration.participant.first_name()
            ),
            full_name: registration.participant.full_name.clone(),
            email: registration.participant.email.clone(),
            registration_type: registration.registration_type,
            is_team_leader: registration.is_team_leader,
            morning: registration.morning.as_ref().map(SessionSummary::from_entry),
            afternoon: registration.afternoon.as_ref().map(SessionSummary::from_entry),
            registered_at: registration.created_at,
        }
    }
}

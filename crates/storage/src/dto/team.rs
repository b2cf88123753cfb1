use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::participant::ParticipantDetails;
use crate::models::{Participant, Session, Team, TeamMember, TeamStatus};

/// Request payload for creating a team as its leader
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateTeamRequest {
    #[validate(length(min = 1, message = "Please choose an event"))]
    pub event_id: String,

    #[validate(custom(function = "validate_team_name"))]
    pub team_name: String,

    #[validate(nested)]
    pub leader: ParticipantDetails,
}

/// Request payload for joining an existing team
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct JoinTeamRequest {
    /// Event the participant signed up for; the team must belong to it.
    #[validate(length(min = 1, message = "Please choose an event"))]
    pub event_id: String,

    #[validate(nested)]
    pub member: ParticipantDetails,
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct TeamNameQuery {
    pub team_name: String,
    pub event_id: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TeamNameAvailability {
    pub team_name: String,
    pub event_name: String,
    pub exists: bool,
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct LeaderTeamsQuery {
    pub leader_email: String,
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct TeamListFilter {
    pub event_id: Option<String>,
}

/// Response containing a team and its roster
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TeamResponse {
    pub team_id: String,
    pub team_name: String,
    pub event_type: Session,
    pub event_name: String,
    pub team_size: i32,
    pub headcount: usize,
    pub open_slots: usize,
    pub status: TeamStatus,
    pub leader: Participant,
    pub members: Vec<TeamMember>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub const MIN_TEAM_NAME_LEN: usize = 2;
pub const TEAM_NAME_TOO_SHORT: &str = "Team name must be at least 2 characters";

pub fn is_valid_team_name(team_name: &str) -> bool {
    team_name.trim().chars().count() >= MIN_TEAM_NAME_LEN
}

fn validate_team_name(team_name: &str) -> Result<(), validator::ValidationError> {
    if is_valid_team_name(team_name) {
        Ok(())
    } else {
        let mut error = validator::ValidationError::new("team_name_too_short");
        error.message = Some(TEAM_NAME_TOO_SHORT.into());
        Err(error)
    }
}

impl From<Team> for TeamResponse {
    fn from(team: Team) -> Self {
        Self {
            headcount: team.headcount(),
            open_slots: team.open_slots(),
            team_id: team.team_id.into_string(),
            team_name: team.team_name,
            event_type: team.session,
            event_name: team.event_name,
            team_size: team.team_size,
            status: team.status,
            leader: team.leader,
            members: team.members,
            created_at: team.created_at,
            updated_at: team.updated_at,
        }
    }
}

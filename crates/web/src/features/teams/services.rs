use chrono::Utc;
use storage::{
    catalog,
    error::TeamError,
    models::{EventDefinition, Participant, Team, TeamMember},
    services::{
        registration_form::FormError,
        team_directory::{self, NewTeam},
    },
};

use crate::mirror::{self, SheetRecord};
use crate::state::AppState;

/// Look up a catalog event named in a request body or query.
pub fn lookup_event(event_id: &str) -> Result<&'static EventDefinition, FormError> {
    catalog::get_event_by_id(event_id.trim())
        .ok_or_else(|| FormError::UnknownEvent(event_id.trim().to_string()))
}

/// Create a team and queue its `TEAM_CREATED` row.
pub async fn create_team(
    state: &AppState,
    event: &EventDefinition,
    team_name: &str,
    leader: &Participant,
) -> Result<Team, TeamError> {
    let team = team_directory::create_team(
        state.store.as_ref(),
        NewTeam {
            event,
            team_name,
            leader,
        },
    )
    .await?;

    mirror::publish(state.mirror.clone(), SheetRecord::team_created(&team));
    Ok(team)
}

/// Join a team and queue its `TEAM_JOINED` row.
pub async fn join_team(
    state: &AppState,
    team_id: &str,
    event: &EventDefinition,
    member: &Participant,
) -> Result<Team, TeamError> {
    let joined_at = Utc::now();
    let team = team_directory::join_team(state.store.as_ref(), team_id, event, member, joined_at).await?;

    let record = SheetRecord::team_joined(&team, &TeamMember::from_participant(member, joined_at));
    mirror::publish(state.mirror.clone(), record);
    Ok(team)
}

pub async fn get_team(state: &AppState, team_id: &str) -> Result<Team, TeamError> {
    team_directory::get_team_by_team_id(state.store.as_ref(), team_id).await
}

pub async fn team_name_exists(
    state: &AppState,
    team_name: &str,
    event: &EventDefinition,
) -> Result<bool, TeamError> {
    team_directory::check_team_name_exists(state.store.as_ref(), team_name, event.name).await
}

pub async fn teams_led_by(state: &AppState, email: &str) -> Result<Vec<Team>, TeamError> {
    team_directory::teams_led_by(state.store.as_ref(), email).await
}

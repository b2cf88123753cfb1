//! The submit flow: resolve the form, check every team action, write teams
//! session by session, then store the registration itself.
//!
//! Only the store writes decide the outcome. Sheet rows are queued after each
//! write and never awaited.

use chrono::Utc;
use storage::{
    dto::registration::RegistrationRequest,
    error::TeamError,
    models::{EventDefinition, Participant, Registration, SessionEntry, Team, TeamLink, TeamRole},
    services::{
        registration_form::{self, RegistrationForm, SessionSelection, TeamIntent},
        team_directory::{self, NewTeam},
    },
};

use crate::error::{WebError, WebResult};
use crate::features::teams::services as teams;
use crate::mirror::{self, SheetRecord};
use crate::state::AppState;

pub async fn submit_registration(
    state: &AppState,
    request: &RegistrationRequest,
) -> WebResult<Registration> {
    let form = registration_form::resolve(request)?;

    preflight(state, &form).await?;

    let morning = match &form.morning {
        Some(selection) => Some(record_session(state, selection, &form.participant).await?),
        None => None,
    };
    let afternoon = match &form.afternoon {
        Some(selection) => Some(record_session(state, selection, &form.participant).await?),
        None => None,
    };

    let registration = Registration::new(form.participant, morning, afternoon, Utc::now());
    state.store.insert_registration(&registration).await?;

    tracing::info!(
        registration_id = %registration.registration_id,
        registration_type = registration.registration_type.as_str(),
        "Registration recorded"
    );

    mirror::publish(state.mirror.clone(), SheetRecord::registration(&registration));
    Ok(registration)
}

pub async fn get_registration(state: &AppState, registration_id: &str) -> WebResult<Registration> {
    state
        .store
        .find_registration(registration_id.trim())
        .await?
        .ok_or(WebError::NotFound)
}

/// Runs the read-only team checks for every session before anything is written,
/// so a bad afternoon choice does not leave a half-finished morning team behind.
async fn preflight(state: &AppState, form: &RegistrationForm) -> Result<(), TeamError> {
    let store = state.store.as_ref();

    for selection in form.selections() {
        let SessionSelection::Team { event, intent } = selection else {
            continue;
        };

        match intent {
            TeamIntent::Create { team_name } => {
                let new_team = NewTeam {
                    event,
                    team_name,
                    leader: &form.participant,
                };
                team_directory::check_can_create(store, &new_team).await?;
            }
            TeamIntent::Join { team_id } => {
                team_directory::check_can_join(store, team_id, event, &form.participant).await?;
            }
        }
    }

    Ok(())
}

async fn record_session(
    state: &AppState,
    selection: &SessionSelection,
    participant: &Participant,
) -> Result<SessionEntry, TeamError> {
    match selection {
        SessionSelection::Solo(event) => Ok(SessionEntry {
            event_name: event.name.to_string(),
            team: None,
        }),
        SessionSelection::Team {
            event,
            intent: TeamIntent::Create { team_name },
        } => {
            let team = teams::create_team(state, event, team_name, participant).await?;
            Ok(team_entry(event, team, TeamRole::Leader))
        }
        SessionSelection::Team {
            event,
            intent: TeamIntent::Join { team_id },
        } => {
            let team = teams::join_team(state, team_id, event, participant).await?;
            Ok(team_entry(event, team, TeamRole::Member))
        }
    }
}

fn team_entry(event: &EventDefinition, team: Team, role: TeamRole) -> SessionEntry {
    SessionEntry {
        event_name: event.name.to_string(),
        team: Some(TeamLink {
            team_id: team.team_id.into_string(),
            team_name: team.team_name,
            role,
        }),
    }
}

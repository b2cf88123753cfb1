//! Form controller for the registration wizard.
//!
//! A submitted [`RegistrationRequest`] is resolved into a [`RegistrationForm`]
//! where each session is either absent, a solo entry, or a team entry with a
//! create/join intent. Which fields are required follows from the variant.

use thiserror::Error;

use crate::catalog;
use crate::dto::participant::ParticipantDetails;
use crate::dto::registration::{EventChoice, FormStatus, RegistrationRequest, TeamChoice};
use crate::dto::team::is_valid_team_name;
use crate::models::{EventDefinition, Participant, Session};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("{0}")]
    Field(&'static str),

    #[error("Please select at least one event")]
    NoEventSelected,

    #[error("Please register for a morning event before choosing an afternoon event")]
    AfternoonWithoutMorning,

    #[error("Unknown event '{0}'")]
    UnknownEvent(String),

    #[error("{event_name} is not a {session} event")]
    WrongSession {
        event_name: String,
        session: Session,
    },

    #[error("Please choose whether to create or join a team for {0}")]
    TeamModeMissing(String),

    #[error("Team name must be at least 2 characters")]
    TeamNameTooShort,

    #[error("Please enter the Team ID you want to join for {0}")]
    TeamIdMissing(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TeamIntent {
    Create { team_name: String },
    Join { team_id: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionSelection {
    Solo(&'static EventDefinition),
    Team {
        event: &'static EventDefinition,
        intent: TeamIntent,
    },
}

impl SessionSelection {
    pub fn event(&self) -> &'static EventDefinition {
        match self {
            SessionSelection::Solo(event) => event,
            SessionSelection::Team { event, .. } => event,
        }
    }
}

/// A form that passed every field rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationForm {
    pub participant: Participant,
    pub morning: Option<SessionSelection>,
    pub afternoon: Option<SessionSelection>,
}

impl RegistrationForm {
    pub fn selections(&self) -> impl Iterator<Item = &SessionSelection> {
        self.morning.iter().chain(self.afternoon.iter())
    }
}

/// Runs every rule in form order and stops at the first failure.
pub fn resolve(request: &RegistrationRequest) -> Result<RegistrationForm, FormError> {
    validate_participant(&request.participant)?;

    match (&request.morning, &request.afternoon) {
        (None, None) => return Err(FormError::NoEventSelected),
        (None, Some(_)) => return Err(FormError::AfternoonWithoutMorning),
        _ => {}
    }

    let morning = request
        .morning
        .as_ref()
        .map(|choice| resolve_choice(choice, Session::Morning))
        .transpose()?;
    let afternoon = request
        .afternoon
        .as_ref()
        .map(|choice| resolve_choice(choice, Session::Afternoon))
        .transpose()?;

    Ok(RegistrationForm {
        participant: request.participant.normalized(),
        morning,
        afternoon,
    })
}

/// Whether the submit button would be enabled, plus which sessions need a team prompt.
pub fn assess(request: &RegistrationRequest) -> FormStatus {
    let requires_team = |choice: &Option<EventChoice>| {
        choice
            .as_ref()
            .and_then(|c| catalog::get_event_by_id(&c.event_id))
            .is_some_and(EventDefinition::requires_team)
    };

    let outcome = resolve(request);

    FormStatus {
        submittable: outcome.is_ok(),
        message: outcome.err().map(|e| e.to_string()),
        morning_requires_team: requires_team(&request.morning),
        afternoon_requires_team: requires_team(&request.afternoon),
    }
}

fn validate_participant(details: &ParticipantDetails) -> Result<(), FormError> {
    match details.first_error() {
        Some(message) => Err(FormError::Field(message)),
        None => Ok(()),
    }
}

fn resolve_choice(choice: &EventChoice, session: Session) -> Result<SessionSelection, FormError> {
    let event = catalog::get_event_by_id(&choice.event_id)
        .ok_or_else(|| FormError::UnknownEvent(choice.event_id.clone()))?;

    if event.session != session {
        return Err(FormError::WrongSession {
            event_name: event.name.to_string(),
            session,
        });
    }

    // Team details sent along with a solo event are ignored.
    if !event.requires_team() {
        return Ok(SessionSelection::Solo(event));
    }

    let intent = match &choice.team {
        None => return Err(FormError::TeamModeMissing(event.name.to_string())),
        Some(TeamChoice::Create { team_name }) => {
            if !is_valid_team_name(team_name) {
                return Err(FormError::TeamNameTooShort);
            }
            TeamIntent::Create {
                team_name: team_name.trim().to_string(),
            }
        }
        Some(TeamChoice::Join { team_id }) => {
            if team_id.trim().is_empty() {
                return Err(FormError::TeamIdMissing(event.name.to_string()));
            }
            TeamIntent::Join {
                team_id: team_id.trim().to_string(),
            }
        }
    };

    Ok(SessionSelection::Team { event, intent })
}

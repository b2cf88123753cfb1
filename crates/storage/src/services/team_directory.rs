use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::TeamError;
use crate::models::{
    EventDefinition, Participant, Team, TeamId, TeamMember, TeamStatus,
};
use crate::store::{AppendOutcome, RegistrationStore, TEAM_ID_CONSTRAINT, TEAM_NAME_CONSTRAINT};

/// Fresh IDs drawn before giving up on an insert that keeps colliding.
const MAX_ID_ATTEMPTS: usize = 5;

type Result<T> = std::result::Result<T, TeamError>;

/// Everything needed to open a team.
#[derive(Debug, Clone)]
pub struct NewTeam<'a> {
    pub event: &'a EventDefinition,
    pub team_name: &'a str,
    pub leader: &'a Participant,
}

/// Creates a team with `leader` as its first headcount.
pub async fn create_team<S>(store: &S, new_team: NewTeam<'_>) -> Result<Team>
where
    S: RegistrationStore + ?Sized,
{
    check_can_create(store, &new_team).await?;

    let NewTeam {
        event,
        team_name,
        leader,
    } = new_team;
    let team_name = team_name.trim();
    let now = Utc::now();

    for attempt in 1..=MAX_ID_ATTEMPTS {
        let team = Team {
            id: Uuid::new_v4(),
            team_id: TeamId::generate(event.session),
            team_name: team_name.to_string(),
            session: event.session,
            event_name: event.name.to_string(),
            team_size: event.team_size,
            leader: leader.clone(),
            members: Vec::new(),
            status: TeamStatus::for_headcount(1, event.team_size),
            created_at: now,
            updated_at: now,
        };

        match store.insert_team(&team).await {
            Ok(()) => {
                tracing::info!(
                    team_id = %team.team_id,
                    event = event.name,
                    "Team '{}' created",
                    team.team_name
                );
                return Ok(team);
            }
            Err(e) if e.violates(TEAM_ID_CONSTRAINT) => {
                tracing::warn!(team_id = %team.team_id, attempt, "Team ID collision, drawing a new one");
            }
            Err(e) if e.violates(TEAM_NAME_CONSTRAINT) => {
                return Err(TeamError::DuplicateName {
                    team_name: team_name.to_string(),
                    event_name: event.name.to_string(),
                });
            }
            Err(e) => return Err(e.into()),
        }
    }

    Err(TeamError::IdSpaceExhausted)
}

/// Pre-flight checks for [`create_team`], also run before any write of a
/// multi-step registration.
pub async fn check_can_create<S>(store: &S, new_team: &NewTeam<'_>) -> Result<()>
where
    S: RegistrationStore + ?Sized,
{
    let event = new_team.event;
    if !event.requires_team() {
        return Err(TeamError::SoloEvent(event.name.to_string()));
    }

    if check_team_name_exists(store, new_team.team_name, event.name).await? {
        return Err(TeamError::DuplicateName {
            team_name: new_team.team_name.trim().to_string(),
            event_name: event.name.to_string(),
        });
    }

    ensure_not_in_event_team(store, event, &new_team.leader.email).await
}

pub async fn get_team_by_team_id<S>(store: &S, raw_team_id: &str) -> Result<Team>
where
    S: RegistrationStore + ?Sized,
{
    let team_id = parse_team_id(raw_team_id)?;
    store.find_team(&team_id).await?.ok_or(TeamError::NotFound)
}

pub async fn check_team_name_exists<S>(store: &S, team_name: &str, event_name: &str) -> Result<bool>
where
    S: RegistrationStore + ?Sized,
{
    Ok(store.team_name_exists(team_name.trim(), event_name).await?)
}

/// Adds `member` to the team, flipping it to FULL when the last slot is taken.
pub async fn join_team<S>(
    store: &S,
    raw_team_id: &str,
    event: &EventDefinition,
    member: &Participant,
    joined_at: DateTime<Utc>,
) -> Result<Team>
where
    S: RegistrationStore + ?Sized,
{
    let team = check_can_join(store, raw_team_id, event, member).await?;

    let outcome = store
        .append_member(&team.team_id, &TeamMember::from_participant(member, joined_at))
        .await?;

    match outcome {
        AppendOutcome::Joined(team) => {
            tracing::info!(
                team_id = %team.team_id,
                headcount = team.headcount(),
                status = team.status.as_str(),
                "Member joined team"
            );
            Ok(team)
        }
        AppendOutcome::NotFound => Err(TeamError::NotFound),
        AppendOutcome::Full => Err(TeamError::Full),
        AppendOutcome::AlreadyMember => Err(TeamError::AlreadyMember),
    }
}

/// Pre-flight checks for [`join_team`]; returns the team as currently stored.
pub async fn check_can_join<S>(
    store: &S,
    raw_team_id: &str,
    event: &EventDefinition,
    member: &Participant,
) -> Result<Team>
where
    S: RegistrationStore + ?Sized,
{
    let team_id = parse_team_id(raw_team_id)?;

    if team_id.session() != event.session {
        return Err(TeamError::WrongSession {
            team_id: team_id.to_string(),
            event_name: event.name.to_string(),
            expected: event.session.to_string(),
            actual: team_id.session().to_string(),
        });
    }

    let team = store.find_team(&team_id).await?.ok_or(TeamError::NotFound)?;

    if !team.event_name.eq_ignore_ascii_case(event.name) {
        return Err(TeamError::WrongEvent {
            team_id: team.team_id.to_string(),
            expected: event.name.to_string(),
            actual: team.event_name.clone(),
        });
    }

    if team.status == TeamStatus::Full {
        return Err(TeamError::Full);
    }

    if team.contains_email(&member.email) {
        return Err(TeamError::AlreadyMember);
    }

    ensure_not_in_event_team(store, event, &member.email).await?;

    Ok(team)
}

pub async fn teams_led_by<S>(store: &S, email: &str) -> Result<Vec<Team>>
where
    S: RegistrationStore + ?Sized,
{
    Ok(store.teams_led_by(&email.trim().to_lowercase()).await?)
}

pub async fn list_teams<S>(store: &S, event: Option<&EventDefinition>) -> Result<Vec<Team>>
where
    S: RegistrationStore + ?Sized,
{
    Ok(store.list_teams(event.map(|e| e.name)).await?)
}

fn parse_team_id(raw: &str) -> Result<TeamId> {
    TeamId::parse(raw).ok_or_else(|| TeamError::InvalidTeamId(raw.trim().to_string()))
}

async fn ensure_not_in_event_team<S>(store: &S, event: &EventDefinition, email: &str) -> Result<()>
where
    S: RegistrationStore + ?Sized,
{
    match store.team_for_email(event.name, email).await? {
        Some(team) => Err(TeamError::AlreadyInEventTeam {
            email: email.to_string(),
            team_id: team.team_id.to_string(),
            event_name: event.name.to_string(),
        }),
        None => Ok(()),
    }
}

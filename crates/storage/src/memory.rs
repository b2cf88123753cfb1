//! In-process store used by tests and local runs without Postgres.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::error::{Result, StorageError};
use crate::models::{Registration, Team, TeamId, TeamMember};
use crate::store::{AppendOutcome, RegistrationStore, TEAM_ID_CONSTRAINT, TEAM_NAME_CONSTRAINT};

#[derive(Default)]
struct Tables {
    teams: Vec<Team>,
    registrations: Vec<Registration>,
}

/// Mirrors the Postgres constraints: unique team IDs, unique team names per
/// event (case-insensitive), and an atomic conditional member append.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        // A panic while holding the lock leaves plain data behind; keep serving it.
        self.tables.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl RegistrationStore for MemoryStore {
    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    async fn insert_team(&self, team: &Team) -> Result<()> {
        let mut tables = self.tables();

        if tables.teams.iter().any(|t| t.team_id == team.team_id) {
            return Err(StorageError::ConstraintViolation(TEAM_ID_CONSTRAINT.to_string()));
        }
        if tables.teams.iter().any(|t| {
            t.event_name == team.event_name && t.team_name.to_lowercase() == team.team_name.to_lowercase()
        }) {
            return Err(StorageError::ConstraintViolation(TEAM_NAME_CONSTRAINT.to_string()));
        }

        tables.teams.push(team.clone());
        Ok(())
    }

    async fn find_team(&self, team_id: &TeamId) -> Result<Option<Team>> {
        Ok(self.tables().teams.iter().find(|t| &t.team_id == team_id).cloned())
    }

    async fn team_name_exists(&self, team_name: &str, event_name: &str) -> Result<bool> {
        let wanted = team_name.trim().to_lowercase();
        Ok(self
            .tables()
            .teams
            .iter()
            .any(|t| t.event_name == event_name && t.team_name.to_lowercase() == wanted))
    }

    async fn append_member(&self, team_id: &TeamId, member: &TeamMember) -> Result<AppendOutcome> {
        let mut tables = self.tables();
        let Some(team) = tables.teams.iter_mut().find(|t| &t.team_id == team_id) else {
            return Ok(AppendOutcome::NotFound);
        };

        if team.open_slots() == 0 {
            return Ok(AppendOutcome::Full);
        }
        if team.contains_email(&member.email) {
            return Ok(AppendOutcome::AlreadyMember);
        }

        team.push_member(member.clone());
        Ok(AppendOutcome::Joined(team.clone()))
    }

    async fn teams_led_by(&self, email: &str) -> Result<Vec<Team>> {
        let mut teams: Vec<Team> = self
            .tables()
            .teams
            .iter()
            .filter(|t| t.leader.has_email(email))
            .cloned()
            .collect();
        teams.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(teams)
    }

    async fn team_for_email(&self, event_name: &str, email: &str) -> Result<Option<Team>> {
        Ok(self
            .tables()
            .teams
            .iter()
            .find(|t| t.event_name == event_name && t.contains_email(email))
            .cloned())
    }

    async fn list_teams(&self, event_name: Option<&str>) -> Result<Vec<Team>> {
        Ok(self
            .tables()
            .teams
            .iter()
            .filter(|t| event_name.is_none_or(|name| t.event_name == name))
            .cloned()
            .collect())
    }

    async fn insert_registration(&self, registration: &Registration) -> Result<()> {
        let mut tables = self.tables();
        if tables
            .registrations
            .iter()
            .any(|r| r.registration_id == registration.registration_id)
        {
            return Err(StorageError::ConstraintViolation(
                "registrations_registration_id_key".to_string(),
            ));
        }
        tables.registrations.push(registration.clone());
        Ok(())
    }

    async fn find_registration(&self, registration_id: &str) -> Result<Option<Registration>> {
        Ok(self
            .tables()
            .registrations
            .iter()
            .find(|r| r.registration_id == registration_id)
            .cloned())
    }

    async fn list_registrations(&self, limit: i64, offset: i64) -> Result<(Vec<Registration>, i64)> {
        let tables = self.tables();
        let total = tables.registrations.len() as i64;
        let page = tables
            .registrations
            .iter()
            .rev()
            .skip(usize::try_from(offset).unwrap_or(0))
            .take(usize::try_from(limit).unwrap_or(0))
            .cloned()
            .collect();
        Ok((page, total))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;
    use crate::models::{Participant, Session, TeamStatus};

    fn participant(name: &str) -> Participant {
        Participant {
            full_name: name.to_string(),
            email: format!("{name}@example.com"),
            phone: "9000000000".to_string(),
            college: "MCC".to_string(),
            department: "BSc".to_string(),
        }
    }

    fn pair_team(id: &str) -> Team {
        let now = Utc::now();
        Team {
            id: Uuid::new_v4(),
            team_id: TeamId::parse(id).unwrap(),
            team_name: "Anagrammers".to_string(),
            session: Session::Morning,
            event_name: "Scramble Zone".to_string(),
            team_size: 2,
            leader: participant("lead"),
            members: Vec::new(),
            status: TeamStatus::Open,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_second_append_on_last_slot_is_refused() {
        let store = MemoryStore::new();
        let team = pair_team("M-PA1R");
        store.insert_team(&team).await.unwrap();

        let first = TeamMember::from_participant(&participant("first"), Utc::now());
        let second = TeamMember::from_participant(&participant("second"), Utc::now());

        let outcome = store.append_member(&team.team_id, &first).await.unwrap();
        assert!(matches!(outcome, AppendOutcome::Joined(ref t) if t.status == TeamStatus::Full));

        let outcome = store.append_member(&team.team_id, &second).await.unwrap();
        assert_eq!(outcome, AppendOutcome::Full);
    }

    #[tokio::test]
    async fn test_insert_reports_violated_constraint() {
        let store = MemoryStore::new();
        store.insert_team(&pair_team("M-AAAA")).await.unwrap();

        let err = store.insert_team(&pair_team("M-AAAA")).await.unwrap_err();
        assert!(err.violates(TEAM_ID_CONSTRAINT));

        let mut renamed_only_by_case = pair_team("M-BBBB");
        renamed_only_by_case.team_name = "ANAGRAMMERS".to_string();
        let err = store.insert_team(&renamed_only_by_case).await.unwrap_err();
        assert!(err.violates(TEAM_NAME_CONSTRAINT));
    }
}

use async_trait::async_trait;

use crate::Database;
use crate::error::Result;
use crate::models::{Registration, Team, TeamId, TeamMember};
use crate::repository::registration::RegistrationRepository;
use crate::repository::team::TeamRepository;

/// Unique constraint on `teams.team_id`.
pub const TEAM_ID_CONSTRAINT: &str = "teams_team_id_key";
/// Unique index on `teams (event_name, lower(team_name))`.
pub const TEAM_NAME_CONSTRAINT: &str = "teams_event_team_name_key";

/// Result of a conditional member append.
#[derive(Debug, Clone, PartialEq)]
pub enum AppendOutcome {
    Joined(Team),
    NotFound,
    Full,
    AlreadyMember,
}

/// Persistence operations the registration flow needs.
///
/// `append_member` must be atomic with respect to other appends on the same
/// team: the capacity and duplicate-email checks and the write happen as one
/// step, so two racing joins for the last slot cannot both succeed.
#[async_trait]
pub trait RegistrationStore: Send + Sync {
    async fn ping(&self) -> Result<()>;

    /// Inserts a new team. Unique violations come back as
    /// `StorageError::ConstraintViolation` naming the constraint.
    async fn insert_team(&self, team: &Team) -> Result<()>;

    async fn find_team(&self, team_id: &TeamId) -> Result<Option<Team>>;

    async fn team_name_exists(&self, team_name: &str, event_name: &str) -> Result<bool>;

    async fn append_member(&self, team_id: &TeamId, member: &TeamMember) -> Result<AppendOutcome>;

    async fn teams_led_by(&self, email: &str) -> Result<Vec<Team>>;

    /// Team of `event_name` that already has `email` as leader or member.
    async fn team_for_email(&self, event_name: &str, email: &str) -> Result<Option<Team>>;

    async fn list_teams(&self, event_name: Option<&str>) -> Result<Vec<Team>>;

    async fn insert_registration(&self, registration: &Registration) -> Result<()>;

    async fn find_registration(&self, registration_id: &str) -> Result<Option<Registration>>;

    async fn list_registrations(&self, limit: i64, offset: i64) -> Result<(Vec<Registration>, i64)>;
}

#[async_trait]
impl RegistrationStore for Database {
    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(self.pool()).await?;
        Ok(())
    }

    async fn insert_team(&self, team: &Team) -> Result<()> {
        TeamRepository::new(self.pool()).create(team).await
    }

    async fn find_team(&self, team_id: &TeamId) -> Result<Option<Team>> {
        TeamRepository::new(self.pool()).find_by_team_id(team_id).await
    }

    async fn team_name_exists(&self, team_name: &str, event_name: &str) -> Result<bool> {
        TeamRepository::new(self.pool())
            .name_exists(team_name, event_name)
            .await
    }

    async fn append_member(&self, team_id: &TeamId, member: &TeamMember) -> Result<AppendOutcome> {
        TeamRepository::new(self.pool())
            .append_member(team_id, member)
            .await
    }

    async fn teams_led_by(&self, email: &str) -> Result<Vec<Team>> {
        TeamRepository::new(self.pool()).list_by_leader_email(email).await
    }

    async fn team_for_email(&self, event_name: &str, email: &str) -> Result<Option<Team>> {
        TeamRepository::new(self.pool())
            .find_by_event_and_email(event_name, email)
            .await
    }

    async fn list_teams(&self, event_name: Option<&str>) -> Result<Vec<Team>> {
        TeamRepository::new(self.pool()).list(event_name).await
    }

    async fn insert_registration(&self, registration: &Registration) -> Result<()> {
        RegistrationRepository::new(self.pool())
            .create(registration)
            .await
    }

    async fn find_registration(&self, registration_id: &str) -> Result<Option<Registration>> {
        RegistrationRepository::new(self.pool())
            .find_by_registration_id(registration_id)
            .await
    }

    async fn list_registrations(&self, limit: i64, offset: i64) -> Result<(Vec<Registration>, i64)> {
        RegistrationRepository::new(self.pool())
            .list(limit, offset)
            .await
    }
}

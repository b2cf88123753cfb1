use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::{Participant, Team, TeamId, TeamMember, TeamStatus};
use crate::store::AppendOutcome;

const TEAM_COLUMNS: &str = "id, team_id, team_name, event_type, event_name, team_size, \
     leader_name, leader_email, leader_phone, leader_college, leader_department, \
     members, status, created_at, updated_at";

#[derive(Debug, FromRow)]
struct TeamRow {
    id: Uuid,
    team_id: String,
    team_name: String,
    event_type: String,
    event_name: String,
    team_size: i32,
    leader_name: String,
    leader_email: String,
    leader_phone: String,
    leader_college: String,
    leader_department: String,
    members: Json<Vec<TeamMember>>,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<TeamRow> for Team {
    type Error = StorageError;

    fn try_from(row: TeamRow) -> Result<Self> {
        let team_id = TeamId::parse(&row.team_id)
            .ok_or_else(|| StorageError::InvalidRow(format!("team_id '{}'", row.team_id)))?;

        Ok(Team {
            id: row.id,
            team_id,
            team_name: row.team_name,
            session: row.event_type.parse().map_err(StorageError::InvalidRow)?,
            event_name: row.event_name,
            team_size: row.team_size,
            leader: Participant {
                full_name: row.leader_name,
                email: row.leader_email,
                phone: row.leader_phone,
                college: row.leader_college,
                department: row.leader_department,
            },
            members: row.members.0,
            status: row.status.parse().map_err(StorageError::InvalidRow)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Repository for the `teams` table
pub struct TeamRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> TeamRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new team; the unique constraint name is reported on conflict
    pub async fn create(&self, team: &Team) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO teams (
                id, team_id, team_name, event_type, event_name, team_size,
                leader_name, leader_email, leader_phone, leader_college, leader_department,
                members, status, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            "#,
        )
        .bind(team.id)
        .bind(team.team_id.as_str())
        .bind(&team.team_name)
        .bind(team.session.as_str())
        .bind(&team.event_name)
        .bind(team.team_size)
        .bind(&team.leader.full_name)
        .bind(&team.leader.email)
        .bind(&team.leader.phone)
        .bind(&team.leader.college)
        .bind(&team.leader.department)
        .bind(Json(&team.members))
        .bind(team.status.as_str())
        .bind(team.created_at)
        .bind(team.updated_at)
        .execute(self.pool)
        .await
        .map_err(StorageError::from_insert)?;

        Ok(())
    }

    pub async fn find_by_team_id(&self, team_id: &TeamId) -> Result<Option<Team>> {
        let row = sqlx::query_as::<_, TeamRow>(&format!(
            "SELECT {TEAM_COLUMNS} FROM teams WHERE team_id = $1"
        ))
        .bind(team_id.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(Team::try_from).transpose()
    }

    /// Case-insensitive probe scoped to one event
    pub async fn name_exists(&self, team_name: &str, event_name: &str) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM teams
                WHERE event_name = $1 AND lower(team_name) = lower($2)
            )
            "#,
        )
        .bind(event_name)
        .bind(team_name.trim())
        .fetch_one(self.pool)
        .await?;

        Ok(exists)
    }

    /// Append a member in a single conditional UPDATE.
    ///
    /// The WHERE clause re-checks capacity and membership against the row
    /// version being written, so concurrent joins serialize on the row lock and
    /// the loser of a race for the last slot matches zero rows.
    pub async fn append_member(&self, team_id: &TeamId, member: &TeamMember) -> Result<AppendOutcome> {
        let updated = sqlx::query_as::<_, TeamRow>(&format!(
            r#"
            UPDATE teams
            SET members = members || jsonb_build_array($2::jsonb),
                status = CASE
                    WHEN jsonb_array_length(members) + 2 >= team_size THEN 'FULL'
                    ELSE 'OPEN'
                END,
                updated_at = $4
            WHERE team_id = $1
              AND status = 'OPEN'
              AND jsonb_array_length(members) + 1 < team_size
              AND lower(leader_email) <> lower($3)
              AND NOT EXISTS (
                  SELECT 1 FROM jsonb_array_elements(members) AS m
                  WHERE lower(m->>'email') = lower($3)
              )
            RETURNING {TEAM_COLUMNS}
            "#
        ))
        .bind(team_id.as_str())
        .bind(Json(member))
        .bind(&member.email)
        .bind(member.joined_at)
        .fetch_optional(self.pool)
        .await?;

        if let Some(row) = updated {
            return Ok(AppendOutcome::Joined(Team::try_from(row)?));
        }

        // Nothing matched: find out which condition failed. Teams never shrink,
        // so the reason observed now is the reason the update was refused.
        let outcome = match self.find_by_team_id(team_id).await? {
            None => AppendOutcome::NotFound,
            Some(team) if team.status == TeamStatus::Full || team.open_slots() == 0 => {
                AppendOutcome::Full
            }
            Some(team) if team.contains_email(&member.email) => AppendOutcome::AlreadyMember,
            Some(_) => AppendOutcome::Full,
        };

        Ok(outcome)
    }

    pub async fn list_by_leader_email(&self, email: &str) -> Result<Vec<Team>> {
        let rows = sqlx::query_as::<_, TeamRow>(&format!(
            "SELECT {TEAM_COLUMNS} FROM teams WHERE lower(leader_email) = lower($1) \
             ORDER BY created_at DESC"
        ))
        .bind(email.trim())
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(Team::try_from).collect()
    }

    pub async fn find_by_event_and_email(&self, event_name: &str, email: &str) -> Result<Option<Team>> {
        let row = sqlx::query_as::<_, TeamRow>(&format!(
            r#"
            SELECT {TEAM_COLUMNS} FROM teams
            WHERE event_name = $1
              AND (
                  lower(leader_email) = lower($2)
                  OR EXISTS (
                      SELECT 1 FROM jsonb_array_elements(members) AS m
                      WHERE lower(m->>'email') = lower($2)
                  )
              )
            LIMIT 1
            "#
        ))
        .bind(event_name)
        .bind(email.trim())
        .fetch_optional(self.pool)
        .await?;

        row.map(Team::try_from).transpose()
    }

    pub async fn list(&self, event_name: Option<&str>) -> Result<Vec<Team>> {
        let rows = sqlx::query_as::<_, TeamRow>(&format!(
            "SELECT {TEAM_COLUMNS} FROM teams WHERE ($1::text IS NULL OR event_name = $1) \
             ORDER BY event_name, created_at"
        ))
        .bind(event_name)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(Team::try_from).collect()
    }
}

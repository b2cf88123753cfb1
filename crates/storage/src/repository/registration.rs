use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::{Participant, Registration, SessionEntry, TeamLink, TeamRole};

const REGISTRATION_COLUMNS: &str = "registration_id, full_name, college, department, phone, email, \
     morning_event, morning_team_id, morning_team_name, morning_team_role, \
     afternoon_event, afternoon_team_id, afternoon_team_name, afternoon_team_role, \
     registration_type, is_team_leader, created_at";

#[derive(Debug, FromRow)]
struct RegistrationRow {
    registration_id: String,
    full_name: String,
    college: String,
    department: String,
    phone: String,
    email: String,
    morning_event: Option<String>,
    morning_team_id: Option<String>,
    morning_team_name: Option<String>,
    morning_team_role: Option<String>,
    afternoon_event: Option<String>,
    afternoon_team_id: Option<String>,
    afternoon_team_name: Option<String>,
    afternoon_team_role: Option<String>,
    registration_type: String,
    is_team_leader: bool,
    created_at: DateTime<Utc>,
}

fn session_entry(
    event: Option<String>,
    team_id: Option<String>,
    team_name: Option<String>,
    role: Option<String>,
) -> Result<Option<SessionEntry>> {
    let Some(event_name) = event else {
        return Ok(None);
    };

    let team = match (team_id, role) {
        (Some(team_id), Some(role)) => Some(TeamLink {
            team_id,
            team_name: team_name.unwrap_or_default(),
            role: role.parse::<TeamRole>().map_err(StorageError::InvalidRow)?,
        }),
        _ => None,
    };

    Ok(Some(SessionEntry { event_name, team }))
}

impl TryFrom<RegistrationRow> for Registration {
    type Error = StorageError;

    fn try_from(row: RegistrationRow) -> Result<Self> {
        Ok(Registration {
            registration_id: row.registration_id,
            participant: Participant {
                full_name: row.full_name,
                email: row.email,
                phone: row.phone,
                college: row.college,
                department: row.department,
            },
            morning: session_entry(
                row.morning_event,
                row.morning_team_id,
                row.morning_team_name,
                row.morning_team_role,
            )?,
            afternoon: session_entry(
                row.afternoon_event,
                row.afternoon_team_id,
                row.afternoon_team_name,
                row.afternoon_team_role,
            )?,
            registration_type: row
                .registration_type
                .parse()
                .map_err(StorageError::InvalidRow)?,
            is_team_leader: row.is_team_leader,
            created_at: row.created_at,
        })
    }
}

/// Flattened view of one session for binding.
struct SessionColumns<'r> {
    event: Option<&'r str>,
    team_id: Option<&'r str>,
    team_name: Option<&'r str>,
    role: Option<&'static str>,
}

impl<'r> From<&'r Option<SessionEntry>> for SessionColumns<'r> {
    fn from(entry: &'r Option<SessionEntry>) -> Self {
        let team = entry.as_ref().and_then(|e| e.team.as_ref());
        Self {
            event: entry.as_ref().map(|e| e.event_name.as_str()),
            team_id: team.map(|t| t.team_id.as_str()),
            team_name: team.map(|t| t.team_name.as_str()),
            role: team.map(|t| t.role.as_str()),
        }
    }
}

/// Repository for the `registrations` table
pub struct RegistrationRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> RegistrationRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, registration: &Registration) -> Result<()> {
        let morning = SessionColumns::from(&registration.morning);
        let afternoon = SessionColumns::from(&registration.afternoon);
        let participant = &registration.participant;

        sqlx::query(
            r#"
            INSERT INTO registrations (
                id, registration_id, full_name, college, department, phone, email,
                morning_event, morning_team_id, morning_team_name, morning_team_role,
                afternoon_event, afternoon_team_id, afternoon_team_name, afternoon_team_role,
                registration_type, is_team_leader, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&registration.registration_id)
        .bind(&participant.full_name)
        .bind(&participant.college)
        .bind(&participant.department)
        .bind(&participant.phone)
        .bind(&participant.email)
        .bind(morning.event)
        .bind(morning.team_id)
        .bind(morning.team_name)
        .bind(morning.role)
        .bind(afternoon.event)
        .bind(afternoon.team_id)
        .bind(afternoon.team_name)
        .bind(afternoon.role)
        .bind(registration.registration_type.as_str())
        .bind(registration.is_team_leader)
        .bind(registration.created_at)
        .execute(self.pool)
        .await
        .map_err(StorageError::from_insert)?;

        Ok(())
    }

    pub async fn find_by_registration_id(&self, registration_id: &str) -> Result<Option<Registration>> {
        let row = sqlx::query_as::<_, RegistrationRow>(&format!(
            "SELECT {REGISTRATION_COLUMNS} FROM registrations WHERE registration_id = $1"
        ))
        .bind(registration_id)
        .fetch_optional(self.pool)
        .await?;

        row.map(Registration::try_from).transpose()
    }

    /// Page of registrations, newest first, with the total row count
    pub async fn list(&self, limit: i64, offset: i64) -> Result<(Vec<Registration>, i64)> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM registrations")
            .fetch_one(self.pool)
            .await?;

        let rows = sqlx::query_as::<_, RegistrationRow>(&format!(
            "SELECT {REGISTRATION_COLUMNS} FROM registrations \
             ORDER BY created_at DESC LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool)
        .await?;

        let registrations = rows
            .into_iter()
            .map(Registration::try_from)
            .collect::<Result<Vec<_>>>()?;

        Ok((registrations, total))
    }
}

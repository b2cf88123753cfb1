//! Best-effort copy of team and registration events to the review spreadsheet.
//!
//! The spreadsheet is a convenience for the organisers. Nothing here may
//! change the outcome of a request: [`publish`] hands the row to a background
//! task and only logs what happened to it.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Serialize;
use storage::models::{Registration, Team, TeamMember};
use thiserror::Error;
use tokio::task::JoinHandle;

#[derive(Debug, Error)]
pub enum MirrorError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Sheet endpoint answered {status}: {body}")]
    Rejected {
        status: reqwest::StatusCode,
        body: String,
    },
}

/// One row for the review sheet, tagged with the action that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SheetRecord {
    TeamCreated(TeamCreatedRow),
    TeamJoined(TeamJoinedRow),
    Registration(RegistrationRow),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamCreatedRow {
    pub timestamp: DateTime<Utc>,
    pub team_id: String,
    pub team_name: String,
    pub event_type: String,
    pub event_name: String,
    pub team_size: i32,
    pub leader_name: String,
    pub leader_email: String,
    pub leader_phone: String,
    pub leader_college: String,
    pub leader_department: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamJoinedRow {
    pub timestamp: DateTime<Utc>,
    pub team_id: String,
    pub team_name: String,
    pub member_name: String,
    pub member_email: String,
    pub member_phone: String,
    pub member_college: String,
    pub member_department: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRow {
    pub timestamp: DateTime<Utc>,
    pub registration_id: String,
    pub full_name: String,
    pub college: String,
    pub department: String,
    pub phone: String,
    pub email: String,
    pub morning_event: Option<String>,
    pub morning_team_id: Option<String>,
    pub morning_team_name: Option<String>,
    pub afternoon_event: Option<String>,
    pub afternoon_team_id: Option<String>,
    pub afternoon_team_name: Option<String>,
    pub registration_type: String,
    pub is_team_leader: bool,
}

impl SheetRecord {
    pub fn team_created(team: &Team) -> Self {
        Self::TeamCreated(TeamCreatedRow {
            timestamp: Utc::now(),
            team_id: team.team_id.to_string(),
            team_name: team.team_name.clone(),
            event_type: team.session.to_string(),
            event_name: team.event_name.clone(),
            team_size: team.team_size,
            leader_name: team.leader.full_name.clone(),
            leader_email: team.leader.email.clone(),
            leader_phone: team.leader.phone.clone(),
            leader_college: team.leader.college.clone(),
            leader_department: team.leader.department.clone(),
        })
    }

    pub fn team_joined(team: &Team, member: &TeamMember) -> Self {
        Self::TeamJoined(TeamJoinedRow {
            timestamp: Utc::now(),
            team_id: team.team_id.to_string(),
            team_name: team.team_name.clone(),
            member_name: member.name.clone(),
            member_email: member.email.clone(),
            member_phone: member.phone.clone(),
            member_college: member.college.clone(),
            member_department: member.department.clone(),
        })
    }

    pub fn registration(registration: &Registration) -> Self {
        let participant = &registration.participant;
        let morning = registration.morning.as_ref();
        let afternoon = registration.afternoon.as_ref();

        Self::Registration(RegistrationRow {
            timestamp: Utc::now(),
            registration_id: registration.registration_id.clone(),
            full_name: participant.full_name.clone(),
            college: participant.college.clone(),
            department: participant.department.clone(),
            phone: participant.phone.clone(),
            email: participant.email.clone(),
            morning_event: morning.map(|e| e.event_name.clone()),
            morning_team_id: morning.and_then(|e| e.team.as_ref()).map(|t| t.team_id.clone()),
            morning_team_name: morning.and_then(|e| e.team.as_ref()).map(|t| t.team_name.clone()),
            afternoon_event: afternoon.map(|e| e.event_name.clone()),
            afternoon_team_id: afternoon.and_then(|e| e.team.as_ref()).map(|t| t.team_id.clone()),
            afternoon_team_name: afternoon.and_then(|e| e.team.as_ref()).map(|t| t.team_name.clone()),
            registration_type: registration.registration_type.as_str().to_string(),
            is_team_leader: registration.is_team_leader,
        })
    }

    pub fn action(&self) -> &'static str {
        match self {
            SheetRecord::TeamCreated(_) => "TEAM_CREATED",
            SheetRecord::TeamJoined(_) => "TEAM_JOINED",
            SheetRecord::Registration(_) => "REGISTRATION",
        }
    }
}

#[async_trait]
pub trait SheetMirror: Send + Sync {
    async fn send(&self, record: &SheetRecord) -> Result<(), MirrorError>;
}

/// Posts rows to a Google Apps Script web app.
pub struct GoogleSheetMirror {
    client: Client,
    url: String,
}

impl GoogleSheetMirror {
    pub fn new(url: String, timeout: Duration) -> Result<Self, MirrorError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, url })
    }
}

#[async_trait]
impl SheetMirror for GoogleSheetMirror {
    async fn send(&self, record: &SheetRecord) -> Result<(), MirrorError> {
        let response = self.client.post(&self.url).json(record).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(MirrorError::Rejected { status, body });
        }

        Ok(())
    }
}

/// Used when no sheet URL is configured.
pub struct DisabledMirror;

#[async_trait]
impl SheetMirror for DisabledMirror {
    async fn send(&self, record: &SheetRecord) -> Result<(), MirrorError> {
        tracing::debug!(action = record.action(), "Sheet mirroring not configured, skipping");
        Ok(())
    }
}

/// Sends `record` in the background. The handle is returned for tests; request
/// handlers drop it.
pub fn publish(mirror: Arc<dyn SheetMirror>, record: SheetRecord) -> JoinHandle<()> {
    tokio::spawn(async move {
        match mirror.send(&record).await {
            Ok(()) => tracing::debug!(action = record.action(), "Sheet mirror updated"),
            Err(e) => tracing::warn!(action = record.action(), "Sheet mirror failed: {}", e),
        }
    })
}

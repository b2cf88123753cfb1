use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{Participant, Session, TeamId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum TeamStatus {
    Open,
    Full,
}

impl TeamStatus {
    /// Status of a team holding `headcount` people (leader included).
    pub fn for_headcount(headcount: usize, team_size: i32) -> Self {
        if headcount as i64 >= i64::from(team_size) {
            TeamStatus::Full
        } else {
            TeamStatus::Open
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TeamStatus::Open => "OPEN",
            TeamStatus::Full => "FULL",
        }
    }
}

impl FromStr for TeamStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "OPEN" => Ok(TeamStatus::Open),
            "FULL" => Ok(TeamStatus::Full),
            other => Err(format!("unknown team status '{other}'")),
        }
    }
}

/// Entry of a team's `members` JSON list. Field names follow the stored JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub college: String,
    pub department: String,
    pub joined_at: DateTime<Utc>,
}

impl TeamMember {
    pub fn from_participant(participant: &Participant, joined_at: DateTime<Utc>) -> Self {
        Self {
            name: participant.full_name.clone(),
            email: participant.email.clone(),
            phone: participant.phone.clone(),
            college: participant.college.clone(),
            department: participant.department.clone(),
            joined_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Team {
    pub id: Uuid,
    pub team_id: TeamId,
    pub team_name: String,
    pub session: Session,
    pub event_name: String,
    pub team_size: i32,
    pub leader: Participant,
    pub members: Vec<TeamMember>,
    pub status: TeamStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Team {
    pub fn headcount(&self) -> usize {
        self.members.len() + 1
    }

    pub fn open_slots(&self) -> usize {
        usize::try_from(self.team_size)
            .unwrap_or(0)
            .saturating_sub(self.headcount())
    }

    /// True when `email` belongs to the leader or any member.
    pub fn contains_email(&self, email: &str) -> bool {
        let email = email.trim();
        self.leader.has_email(email)
            || self
                .members
                .iter()
                .any(|m| m.email.eq_ignore_ascii_case(email))
    }

    /// Appends `member` and recomputes the status. Capacity and duplicate
    /// checks are the caller's job.
    pub fn push_member(&mut self, member: TeamMember) {
        self.updated_at = member.joined_at;
        self.members.push(member);
        self.status = TeamStatus::for_headcount(self.headcount(), self.team_size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(name: &str, email: &str) -> Participant {
        Participant {
            full_name: name.to_string(),
            email: email.to_string(),
            phone: "9876543210".to_string(),
            college: "St. Joseph's".to_string(),
            department: "English / 2nd Year".to_string(),
        }
    }

    fn team(size: i32) -> Team {
        let now = Utc::now();
        Team {
            id: Uuid::new_v4(),
            team_id: TeamId::parse("A-AB12").unwrap(),
            team_name: "Quillmates".to_string(),
            session: Session::Afternoon,
            event_name: "Wordora".to_string(),
            team_size: size,
            leader: person("Asha Rao", "asha@example.com"),
            members: Vec::new(),
            status: TeamStatus::for_headcount(1, size),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_status_threshold() {
        assert_eq!(TeamStatus::for_headcount(1, 1), TeamStatus::Full);
        assert_eq!(TeamStatus::for_headcount(1, 2), TeamStatus::Open);
        assert_eq!(TeamStatus::for_headcount(2, 2), TeamStatus::Full);
        assert_eq!(TeamStatus::for_headcount(2, 3), TeamStatus::Open);
        assert_eq!(TeamStatus::for_headcount(4, 3), TeamStatus::Full);
    }

    #[test]
    fn test_push_member_fills_team() {
        let mut team = team(3);
        assert_eq!(team.open_slots(), 2);

        team.push_member(TeamMember::from_participant(&person("Ben", "ben@example.com"), Utc::now()));
        assert_eq!(team.status, TeamStatus::Open);
        assert_eq!(team.open_slots(), 1);

        team.push_member(TeamMember::from_participant(&person("Cy", "cy@example.com"), Utc::now()));
        assert_eq!(team.status, TeamStatus::Full);
        assert_eq!(team.open_slots(), 0);
    }

    #[test]
    fn test_contains_email_checks_leader_and_members() {
        let mut team = team(3);
        team.push_member(TeamMember::from_participant(&person("Ben", "ben@example.com"), Utc::now()));

        assert!(team.contains_email("ASHA@example.com"));
        assert!(team.contains_email(" ben@example.com "));
        assert!(!team.contains_email("cy@example.com"));
    }

    #[test]
    fn test_member_json_uses_camel_case() {
        let member = TeamMember::from_participant(&person("Ben", "ben@example.com"), Utc::now());
        let json = serde_json::to_value(&member).unwrap();
        assert!(json.get("joinedAt").is_some());
        assert_eq!(json["email"], "ben@example.com");
    }
}

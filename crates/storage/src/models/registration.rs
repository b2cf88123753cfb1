use std::str::FromStr;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::Participant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RegistrationType {
    Solo,
    CreateTeam,
    JoinTeam,
}

impl RegistrationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistrationType::Solo => "SOLO",
            RegistrationType::CreateTeam => "CREATE_TEAM",
            RegistrationType::JoinTeam => "JOIN_TEAM",
        }
    }
}

impl FromStr for RegistrationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SOLO" => Ok(RegistrationType::Solo),
            "CREATE_TEAM" => Ok(RegistrationType::CreateTeam),
            "JOIN_TEAM" => Ok(RegistrationType::JoinTeam),
            other => Err(format!("unknown registration type '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum TeamRole {
    Leader,
    Member,
}

impl TeamRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            TeamRole::Leader => "LEADER",
            TeamRole::Member => "MEMBER",
        }
    }
}

impl FromStr for TeamRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LEADER" => Ok(TeamRole::Leader),
            "MEMBER" => Ok(TeamRole::Member),
            other => Err(format!("unknown team role '{other}'")),
        }
    }
}

/// Team a registration is attached to for one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TeamLink {
    pub team_id: String,
    pub team_name: String,
    pub role: TeamRole,
}

/// Event chosen for one session plus the team it was played with, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SessionEntry {
    pub event_name: String,
    pub team: Option<TeamLink>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Registration {
    pub registration_id: String,
    pub participant: Participant,
    pub morning: Option<SessionEntry>,
    pub afternoon: Option<SessionEntry>,
    pub registration_type: RegistrationType,
    pub is_team_leader: bool,
    pub created_at: DateTime<Utc>,
}

impl Registration {
    pub fn new(
        participant: Participant,
        morning: Option<SessionEntry>,
        afternoon: Option<SessionEntry>,
        created_at: DateTime<Utc>,
    ) -> Self {
        let roles: Vec<TeamRole> = [&morning, &afternoon]
            .into_iter()
            .flatten()
            .filter_map(|entry| entry.team.as_ref().map(|t| t.role))
            .collect();

        let registration_type = if roles.contains(&TeamRole::Leader) {
            RegistrationType::CreateTeam
        } else if roles.contains(&TeamRole::Member) {
            RegistrationType::JoinTeam
        } else {
            RegistrationType::Solo
        };

        Self {
            registration_id: generate_registration_id(created_at),
            participant,
            morning,
            afternoon,
            registration_type,
            is_team_leader: registration_type == RegistrationType::CreateTeam,
            created_at,
        }
    }
}

/// `reg_` followed by the creation time in base 36 and nine random base-36 digits.
pub fn generate_registration_id(now: DateTime<Utc>) -> String {
    let millis = u64::try_from(now.timestamp_millis()).unwrap_or(0);
    let mut rng = rand::thread_rng();
    let suffix: String = (0..9)
        .map(|_| {
            char::from_digit(rng.gen_range(0..36), 36)
                .unwrap_or('0')
        })
        .collect();
    format!("reg_{}{}", to_base36(millis), suffix)
}

fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(char::from_digit((value % 36) as u32, 36).unwrap_or('0'));
        value /= 36;
    }
    digits.iter().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn participant() -> Participant {
        Participant {
            full_name: "Meera Nair".to_string(),
            email: "meera@example.com".to_string(),
            phone: "9123456780".to_string(),
            college: "Christ College".to_string(),
            department: "BA English / 1st Year".to_string(),
        }
    }

    fn entry(event: &str, role: Option<TeamRole>) -> SessionEntry {
        SessionEntry {
            event_name: event.to_string(),
            team: role.map(|role| TeamLink {
                team_id: "M-AB12".to_string(),
                team_name: "Inkwell".to_string(),
                role,
            }),
        }
    }

    #[test]
    fn test_base36() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
    }

    #[test]
    fn test_registration_id_shape() {
        let id = generate_registration_id(Utc::now());
        assert!(id.starts_with("reg_"));
        assert!(id[4..].chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
        assert!(id.len() > 4 + 9);
    }

    #[test]
    fn test_solo_registration_type() {
        let reg = Registration::new(participant(), Some(entry("Trispark", None)), None, Utc::now());
        assert_eq!(reg.registration_type, RegistrationType::Solo);
        assert!(!reg.is_team_leader);
    }

    #[test]
    fn test_creating_any_team_makes_a_leader() {
        let reg = Registration::new(
            participant(),
            Some(entry("Scramble Zone", Some(TeamRole::Member))),
            Some(entry("Wordora", Some(TeamRole::Leader))),
            Utc::now(),
        );
        assert_eq!(reg.registration_type, RegistrationType::CreateTeam);
        assert!(reg.is_team_leader);
    }

    #[test]
    fn test_join_only_registration() {
        let reg = Registration::new(
            participant(),
            Some(entry("Trispark", None)),
            Some(entry("Wordora", Some(TeamRole::Member))),
            Utc::now(),
        );
        assert_eq!(reg.registration_type, RegistrationType::JoinTeam);
        assert!(!reg.is_team_leader);
    }
}

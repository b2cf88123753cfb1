use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One half of the festival day. Each session has its own team-ID namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Session {
    #[serde(alias = "morning")]
    Morning,
    #[serde(alias = "afternoon")]
    Afternoon,
}

impl Session {
    pub fn as_str(&self) -> &'static str {
        match self {
            Session::Morning => "Morning",
            Session::Afternoon => "Afternoon",
        }
    }

    /// Leading character of every team ID issued for this session.
    pub fn team_id_prefix(&self) -> char {
        match self {
            Session::Morning => 'M',
            Session::Afternoon => 'A',
        }
    }

    pub fn from_team_id_prefix(prefix: char) -> Option<Self> {
        match prefix.to_ascii_uppercase() {
            'M' => Some(Session::Morning),
            'A' => Some(Session::Afternoon),
            _ => None,
        }
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Session {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "morning" => Ok(Session::Morning),
            "afternoon" => Ok(Session::Afternoon),
            other => Err(format!("unknown session '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum EventMode {
    Solo,
    Pair,
    Group,
}

impl EventMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventMode::Solo => "Solo",
            EventMode::Pair => "Pair",
            EventMode::Group => "Group",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDefinition {
    pub id: &'static str,
    pub name: &'static str,
    pub mode: EventMode,
    /// Headcount of a complete team, leader included. Always 1 for solo events.
    pub team_size: i32,
    pub session: Session,
}

impl EventDefinition {
    pub fn requires_team(&self) -> bool {
        self.mode != EventMode::Solo
    }
}

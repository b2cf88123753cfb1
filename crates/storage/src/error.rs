use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Unique constraint hit on insert; carries the constraint name.
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Invalid row: {0}")]
    InvalidRow(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

impl StorageError {
    /// Maps a Postgres unique violation to `ConstraintViolation` carrying the
    /// constraint name, leaving every other error untouched.
    pub fn from_insert(error: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db_err) = error
            && db_err.code().as_deref() == Some("23505")
        {
            let constraint = db_err.constraint().unwrap_or("unknown").to_string();
            return StorageError::ConstraintViolation(constraint);
        }
        StorageError::from(error)
    }

    pub fn violates(&self, constraint: &str) -> bool {
        matches!(self, StorageError::ConstraintViolation(name) if name == constraint)
    }
}

/// Outcomes of team-directory operations that the participant can act on.
#[derive(Debug, Error)]
pub enum TeamError {
    #[error("Team not found")]
    NotFound,

    #[error("'{0}' is not a valid Team ID (expected something like M-AB12)")]
    InvalidTeamId(String),

    #[error("This team is already full")]
    Full,

    #[error("You are already registered in this team")]
    AlreadyMember,

    #[error("Team name '{team_name}' is already taken for {event_name}")]
    DuplicateName {
        team_name: String,
        event_name: String,
    },

    #[error("{email} is already part of team {team_id} for {event_name}")]
    AlreadyInEventTeam {
        email: String,
        team_id: String,
        event_name: String,
    },

    #[error("Team {team_id} is registered for {actual}, not {expected}")]
    WrongEvent {
        team_id: String,
        expected: String,
        actual: String,
    },

    #[error("Team {team_id} is a {actual} team ID, but {event_name} is a {expected} event")]
    WrongSession {
        team_id: String,
        event_name: String,
        expected: String,
        actual: String,
    },

    #[error("{0} is a solo event and does not take teams")]
    SoloEvent(String),

    #[error("Could not allocate a free Team ID, please retry")]
    IdSpaceExhausted,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

mod event;
mod participant;
mod registration;
mod team;
mod team_id;

pub use event::{EventDefinition, EventMode, Session};
pub use participant::Participant;
pub use registration::{
    Registration, RegistrationType, SessionEntry, TeamLink, TeamRole, generate_registration_id,
};
pub use team::{Team, TeamMember, TeamStatus};
pub use team_id::TeamId;

//! Static list of festival events.

use crate::models::{EventDefinition, EventMode, Session};

pub const EVENTS: &[EventDefinition] = &[
    EventDefinition {
        id: "trispark",
        name: "Trispark",
        mode: EventMode::Solo,
        team_size: 1,
        session: Session::Morning,
    },
    EventDefinition {
        id: "scramble-zone",
        name: "Scramble Zone",
        mode: EventMode::Pair,
        team_size: 2,
        session: Session::Morning,
    },
    EventDefinition {
        id: "frames-to-fame",
        name: "Frames to Fame",
        mode: EventMode::Group,
        team_size: 3,
        session: Session::Morning,
    },
    EventDefinition {
        id: "wordora",
        name: "Wordora",
        mode: EventMode::Group,
        team_size: 3,
        session: Session::Afternoon,
    },
    EventDefinition {
        id: "the-static-chase",
        name: "The Static Chase",
        mode: EventMode::Group,
        team_size: 3,
        session: Session::Afternoon,
    },
];

pub fn get_event_by_id(id: &str) -> Option<&'static EventDefinition> {
    let id = id.trim();
    EVENTS.iter().find(|event| event.id.eq_ignore_ascii_case(id))
}

pub fn get_event_by_name(name: &str) -> Option<&'static EventDefinition> {
    let name = name.trim();
    EVENTS.iter().find(|event| event.name.eq_ignore_ascii_case(name))
}

pub fn events_for_session(session: Session) -> impl Iterator<Item = &'static EventDefinition> {
    EVENTS.iter().filter(move |event| event.session == session)
}

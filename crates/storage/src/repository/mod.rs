pub mod registration;
pub mod team;

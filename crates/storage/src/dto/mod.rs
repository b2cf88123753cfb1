pub mod common;
pub mod event;
pub mod participant;
pub mod registration;
pub mod team;

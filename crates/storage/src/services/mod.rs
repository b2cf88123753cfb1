pub mod registration_form;
pub mod team_directory;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Identity of a person taking part, already trimmed and with a lowercase email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Participant {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub college: String,
    pub department: String,
}

impl Participant {
    pub fn first_name(&self) -> &str {
        self.full_name.split_whitespace().next().unwrap_or("Participant")
    }

    pub fn has_email(&self, email: &str) -> bool {
        self.email.eq_ignore_ascii_case(email.trim())
    }
}

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::models::Participant;

pub const NAME_REQUIRED: &str = "Please enter your full name";
pub const COLLEGE_REQUIRED: &str = "Please enter your college name";
pub const DEPARTMENT_REQUIRED: &str = "Please enter your department and year";
pub const PHONE_INVALID: &str = "Please enter a valid 10-digit phone number";
pub const EMAIL_INVALID: &str = "Please enter a valid email address";

/// Personal details as typed into the form.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct ParticipantDetails {
    #[validate(custom(function = "validate_full_name"))]
    pub full_name: String,

    #[validate(custom(function = "validate_college"))]
    pub college: String,

    #[validate(custom(function = "validate_department"))]
    pub department: String,

    #[validate(custom(function = "validate_phone"))]
    pub phone: String,

    #[validate(custom(function = "validate_email"))]
    pub email: String,
}

impl ParticipantDetails {
    /// Trimmed copy with a lowercase email and a digits-only phone.
    pub fn normalized(&self) -> Participant {
        Participant {
            full_name: self.full_name.trim().to_string(),
            email: self.email.trim().to_lowercase(),
            phone: digits_only(&self.phone),
            college: self.college.trim().to_string(),
            department: self.department.trim().to_string(),
        }
    }

    /// First failing field rule, checked in form order.
    pub fn first_error(&self) -> Option<&'static str> {
        if is_blank(&self.full_name) {
            return Some(NAME_REQUIRED);
        }
        if is_blank(&self.college) {
            return Some(COLLEGE_REQUIRED);
        }
        if is_blank(&self.department) {
            return Some(DEPARTMENT_REQUIRED);
        }
        if !is_valid_phone(&self.phone) {
            return Some(PHONE_INVALID);
        }
        if !is_valid_email(&self.email) {
            return Some(EMAIL_INVALID);
        }
        None
    }
}

pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Exactly ten digits once spaces, dashes and other separators are dropped.
pub fn is_valid_phone(phone: &str) -> bool {
    digits_only(phone).len() == 10
}

pub fn digits_only(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

/// `local@domain.tld` with no whitespace and a single `@`.
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }

    match domain.rfind('.') {
        Some(dot) => dot > 0 && dot + 1 < domain.len(),
        None => false,
    }
}

fn field_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

fn validate_full_name(value: &str) -> Result<(), ValidationError> {
    if is_blank(value) {
        return Err(field_error("required", NAME_REQUIRED));
    }
    Ok(())
}

fn validate_college(value: &str) -> Result<(), ValidationError> {
    if is_blank(value) {
        return Err(field_error("required", COLLEGE_REQUIRED));
    }
    Ok(())
}

fn validate_department(value: &str) -> Result<(), ValidationError> {
    if is_blank(value) {
        return Err(field_error("required", DEPARTMENT_REQUIRED));
    }
    Ok(())
}

fn validate_phone(value: &str) -> Result<(), ValidationError> {
    if !is_valid_phone(value) {
        return Err(field_error("invalid_phone", PHONE_INVALID));
    }
    Ok(())
}

fn validate_email(value: &str) -> Result<(), ValidationError> {
    if !is_valid_email(value) {
        return Err(field_error("invalid_email", EMAIL_INVALID));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details() -> ParticipantDetails {
        ParticipantDetails {
            full_name: "  Rohan Das ".to_string(),
            college: "Loyola College".to_string(),
            department: "B.Com / 3rd Year".to_string(),
            phone: "9876543210".to_string(),
            email: " Rohan.Das@Example.COM ".to_string(),
        }
    }

    #[test]
    fn test_email_shape() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("first.last+tag@mail.example.in"));
        assert!(!is_valid_email("no-at-sign.com"));
        assert!(!is_valid_email("two@@example.com"));
        assert!(!is_valid_email("user@localhost"));
        assert!(!is_valid_email("user@.com"));
        assert!(!is_valid_email("user@example."));
        assert!(!is_valid_email("us er@example.com"));
    }

    #[test]
    fn test_phone_requires_ten_digits() {
        assert!(is_valid_phone("0123456789"));
        assert!(!is_valid_phone("012345678"));
        assert!(!is_valid_phone("01234567890"));
        assert!(!is_valid_phone("01234-6789"));
    }

    #[test]
    fn test_normalized_trims_and_lowercases_email() {
        let participant = details().normalized();
        assert_eq!(participant.full_name, "Rohan Das");
        assert_eq!(participant.email, "rohan.das@example.com");
    }

    #[test]
    fn test_first_error_follows_field_order() {
        let mut d = details();
        d.college = " ".to_string();
        d.phone = "123".to_string();
        assert_eq!(d.first_error(), Some(COLLEGE_REQUIRED));

        d.college = "Loyola".to_string();
        assert_eq!(d.first_error(), Some(PHONE_INVALID));

        d.phone = "9876543210".to_string();
        assert_eq!(d.first_error(), None);
    }

    #[test]
    fn test_phone_separators_are_stripped() {
        let mut d = details();
        d.phone = " 98765 43210 ".to_string();
        assert_eq!(d.first_error(), None);
        assert!(d.validate().is_ok());
        assert_eq!(d.normalized().phone, "9876543210");

        d.phone = "+91-98765".to_string();
        assert_eq!(d.first_error(), Some(PHONE_INVALID));
    }

    #[test]
    fn test_derive_validation_reports_messages() {
        let mut d = details();
        d.email = "nope".to_string();
        let errors = d.validate().unwrap_err();
        let email_errors = errors.field_errors().get("email").cloned().unwrap();
        assert_eq!(email_errors[0].message.as_deref(), Some(EMAIL_INVALID));
    }
}

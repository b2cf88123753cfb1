use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;
use storage::error::{StorageError, TeamError};
use storage::services::registration_form::FormError;
use validator::{ValidationErrors, ValidationErrorsKind};

/// Web layer errors
#[derive(Debug)]
pub enum WebError {
    Storage(StorageError),
    Team(TeamError),
    Form(FormError),
    Validation(ValidationErrors),
    BadRequest(String),
    Unauthorized,
    NotFound,
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Storage(e) => write!(f, "Storage error: {}", e),
            Self::Team(e) => write!(f, "Team error: {}", e),
            Self::Form(e) => write!(f, "Form error: {}", e),
            Self::Validation(e) => write!(f, "Validation error: {}", e),
            Self::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            Self::Unauthorized => write!(f, "Unauthorized"),
            Self::NotFound => write!(f, "Resource not found"),
        }
    }
}

impl WebError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Storage(StorageError::ConstraintViolation(_)) => StatusCode::CONFLICT,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Team(team_error) => match team_error {
                TeamError::NotFound => StatusCode::NOT_FOUND,
                TeamError::InvalidTeamId(_)
                | TeamError::WrongEvent { .. }
                | TeamError::WrongSession { .. }
                | TeamError::SoloEvent(_) => StatusCode::BAD_REQUEST,
                TeamError::Full
                | TeamError::AlreadyMember
                | TeamError::DuplicateName { .. }
                | TeamError::AlreadyInEventTeam { .. } => StatusCode::CONFLICT,
                TeamError::IdSpaceExhausted => StatusCode::SERVICE_UNAVAILABLE,
                TeamError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Form(_) | Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::NotFound => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        let body = match &self {
            Self::NotFound => {
                json!({
                    "error": "Resource not found"
                })
            }
            Self::Storage(StorageError::ConstraintViolation(constraint)) => {
                tracing::warn!("Unhandled constraint violation: {}", constraint);
                json!({
                    "error": "This record conflicts with an existing one"
                })
            }
            Self::Storage(e) | Self::Team(TeamError::Storage(e)) => {
                tracing::error!("Storage error: {:?}", e);
                json!({
                    "error": "An internal error occurred"
                })
            }
            Self::Team(e) => {
                json!({
                    "error": e.to_string()
                })
            }
            Self::Form(e) => {
                json!({
                    "error": e.to_string()
                })
            }
            Self::Validation(errors) => {
                let mut field_errors = Vec::new();
                collect_messages("", errors, &mut field_errors);

                json!({
                    "error": "Validation failed",
                    "details": field_errors
                })
            }
            Self::BadRequest(msg) => {
                json!({
                    "error": msg
                })
            }
            Self::Unauthorized => {
                json!({
                    "error": "Unauthorized"
                })
            }
        };

        (status_code, Json(body)).into_response()
    }
}

/// Flattens nested validation errors into `path.field: message` strings.
fn collect_messages(prefix: &str, errors: &ValidationErrors, out: &mut Vec<String>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", prefix, field)
        };

        match kind {
            ValidationErrorsKind::Field(errors) => {
                out.extend(errors.iter().map(|e| {
                    format!(
                        "{}: {}",
                        path,
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string())
                    )
                }));
            }
            ValidationErrorsKind::Struct(nested) => collect_messages(&path, nested, out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect_messages(&format!("{}[{}]", path, index), nested, out);
                }
            }
        }
    }
    out.sort();
}

impl From<StorageError> for WebError {
    fn from(error: StorageError) -> Self {
        Self::Storage(error)
    }
}

impl From<TeamError> for WebError {
    fn from(error: TeamError) -> Self {
        Self::Team(error)
    }
}

impl From<FormError> for WebError {
    fn from(error: FormError) -> Self {
        Self::Form(error)
    }
}

impl From<ValidationErrors> for WebError {
    fn from(error: ValidationErrors) -> Self {
        Self::Validation(error)
    }
}

pub type WebResult<T> = Result<T, WebError>;

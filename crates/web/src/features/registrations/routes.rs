use axum::{
    Router,
    routing::{get, post},
};

use super::handlers::{get_registration, submit_registration, validate_registration};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(submit_registration))
        .route("/validate", post(validate_registration))
        .route("/:registration_id", get(get_registration))
}

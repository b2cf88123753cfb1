use axum::{
    Router,
    routing::{get, post},
};

use super::handlers::{check_team_name, create_team, get_team, join_team, list_teams_by_leader};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_team).get(list_teams_by_leader))
        .route("/name-check", get(check_team_name))
        .route("/:team_id", get(get_team))
        .route("/:team_id/members", post(join_team))
}

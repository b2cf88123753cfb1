use std::time::Duration;

use axum::{Router, routing::get};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod config;
pub mod error;
pub mod features;
pub mod middleware;
pub mod mirror;
pub mod state;

use features::{admin, events, health, registrations, teams};
use middleware::auth::ApiKeys;
use state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        events::handlers::list_events,
        events::handlers::get_event,
        teams::handlers::create_team,
        teams::handlers::list_teams_by_leader,
        teams::handlers::check_team_name,
        teams::handlers::get_team,
        teams::handlers::join_team,
        registrations::handlers::submit_registration,
        registrations::handlers::validate_registration,
        registrations::handlers::get_registration,
        admin::handlers::list_registrations,
        admin::handlers::list_teams,
    ),
    components(
        schemas(
            health::HealthResponse,
            storage::dto::event::EventResponse,
            storage::dto::participant::ParticipantDetails,
            storage::dto::team::CreateTeamRequest,
            storage::dto::team::JoinTeamRequest,
            storage::dto::team::TeamNameAvailability,
            storage::dto::team::TeamResponse,
            storage::dto::registration::RegistrationRequest,
            storage::dto::registration::EventChoice,
            storage::dto::registration::TeamChoice,
            storage::dto::registration::FormStatus,
            storage::dto::registration::SessionSummary,
            storage::dto::registration::RegistrationSummary,
            storage::dto::common::PaginationMeta,
            storage::models::Session,
            storage::models::EventMode,
            storage::models::Participant,
            storage::models::TeamMember,
            storage::models::TeamStatus,
            storage::models::TeamRole,
            storage::models::RegistrationType,
            storage::models::SessionEntry,
            storage::models::TeamLink,
            storage::models::Registration,
        )
    ),
    tags(
        (name = "health", description = "Liveness"),
        (name = "events", description = "Festival event catalog"),
        (name = "teams", description = "Team creation, lookup and joining"),
        (name = "registrations", description = "Registration form submission"),
        (name = "admin", description = "Organiser views, API key required"),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("API Key")
                        .build(),
                ),
            )
        }
    }
}

/// Builds the full HTTP application around `state`.
pub fn app(state: AppState, api_keys: ApiKeys) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600));

    let api = Router::new()
        .nest("/events", events::routes::routes())
        .nest("/teams", teams::routes::routes())
        .nest("/registrations", registrations::routes::routes())
        .nest("/admin", admin::routes::routes(api_keys));

    Router::new()
        .route("/health", get(health::health))
        .nest("/api", api)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

mod common;

use axum::http::{Method, StatusCode};
use common::*;
use serde_json::{Value, json};

fn solo(event_id: &str) -> Value {
    json!({ "event_id": event_id })
}

fn create(event_id: &str, team_name: &str) -> Value {
    json!({ "event_id": event_id, "team": { "mode": "create", "team_name": team_name } })
}

fn join(event_id: &str, team_id: &str) -> Value {
    json!({ "event_id": event_id, "team": { "mode": "join", "team_id": team_id } })
}

#[tokio::test]
async fn test_solo_registration_has_no_team() {
    let app = TestApp::new();

    let (status, body) = app
        .post("/api/registrations/validate", registration("Asha", solo("trispark"), Value::Null))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["submittable"], true);
    assert_eq!(body["morning_requires_team"], false);

    let (status, body) = app
        .post("/api/registrations", registration("Asha", solo("trispark"), Value::Null))
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["registration_type"], "SOLO");
    assert_eq!(body["is_team_leader"], false);
    assert_eq!(body["greeting"], "Welcome to Utsavam 6.0, Asha!");
    assert_eq!(body["morning"]["event_name"], "Trispark");
    assert!(body["morning"]["team_id"].is_null());
    assert!(body["afternoon"].is_null());

    let registration_id = body["registration_id"].as_str().unwrap();
    assert!(registration_id.starts_with("reg_"));

    let (status, stored) = app.get(&format!("/api/registrations/{registration_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stored["registration_id"], registration_id);

    assert_eq!(app.mirror.wait_for(1).await, vec!["REGISTRATION"]);
}

#[tokio::test]
async fn test_leader_then_member_registrations() {
    let app = TestApp::new();

    let (status, leader) = app
        .post(
            "/api/registrations",
            registration("Asha", solo("trispark"), create("wordora", "Plot Twisters")),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{leader}");
    assert_eq!(leader["registration_type"], "CREATE_TEAM");
    assert_eq!(leader["is_team_leader"], true);

    let team_id = leader["afternoon"]["team_id"].as_str().unwrap().to_string();
    assert!(team_id.starts_with("A-"));
    assert_eq!(
        leader["afternoon"]["share_text"],
        format!("Join my team \"Plot Twisters\" for Wordora with Team ID {team_id}")
    );

    let (status, member) = app
        .post(
            "/api/registrations",
            registration(
                "Ben",
                solo("trispark"),
                join("wordora", &team_id.to_lowercase()),
            ),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{member}");
    assert_eq!(member["registration_type"], "JOIN_TEAM");
    assert_eq!(member["afternoon"]["role"], "MEMBER");
    assert!(member["afternoon"]["share_text"].is_null());

    let (_, team) = app.get(&format!("/api/teams/{team_id}")).await;
    assert_eq!(team["headcount"], 2);
    assert_eq!(team["status"], "OPEN");
}

#[tokio::test]
async fn test_afternoon_without_morning_is_rejected() {
    let app = TestApp::new();
    let body = registration("Asha", Value::Null, create("wordora", "Plot Twisters"));

    let (status, status_body) = app.post("/api/registrations/validate", body.clone()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(status_body["submittable"], false);
    assert_eq!(status_body["afternoon_requires_team"], true);

    let (status, error) = app.post("/api/registrations", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        error["error"],
        "Please register for a morning event before choosing an afternoon event"
    );

    let (_, name_check) = app
        .get("/api/teams/name-check?team_name=Plot%20Twisters&event_id=wordora")
        .await;
    assert_eq!(name_check["exists"], false);
}

#[tokio::test]
async fn test_bad_afternoon_join_writes_nothing_for_morning() {
    let app = TestApp::new();

    let (status, _) = app
        .post(
            "/api/registrations",
            registration(
                "Asha",
                create("frames-to-fame", "Reel Talk"),
                join("wordora", "A-ZZZZ"),
            ),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, name_check) = app
        .get("/api/teams/name-check?team_name=Reel%20Talk&event_id=frames-to-fame")
        .await;
    assert_eq!(name_check["exists"], false);
}

#[tokio::test]
async fn test_member_cannot_join_full_team() {
    let app = TestApp::new();

    let (_, leader) = app
        .post(
            "/api/registrations",
            registration("Asha", create("scramble-zone", "Anagrammers"), Value::Null),
        )
        .await;
    let team_id = leader["morning"]["team_id"].as_str().unwrap().to_string();

    let (status, _) = app
        .post(
            "/api/registrations",
            registration("Ben", join("scramble-zone", &team_id), Value::Null),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, error) = app
        .post(
            "/api/registrations",
            registration("Cy", join("scramble-zone", &team_id), Value::Null),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error["error"], "This team is already full");
}

#[tokio::test]
async fn test_failing_mirror_does_not_change_outcome() {
    let router = TestApp::with_failing_mirror();

    let (status, body) = send(
        &router,
        Method::POST,
        "/api/registrations",
        Some(registration("Asha", create("frames-to-fame", "Reel Talk"), Value::Null)),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");

    let team_id = body["morning"]["team_id"].as_str().unwrap();
    let (status, team) = send(&router, Method::GET, &format!("/api/teams/{team_id}"), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(team["team_name"], "Reel Talk");
}

#[tokio::test]
async fn test_first_failing_field_message() {
    let app = TestApp::new();
    let mut body = registration("Asha", solo("trispark"), Value::Null);
    body["email"] = json!("not-an-email");

    let (status, error) = app.post("/api/registrations", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["error"], "Please enter a valid email address");
}

#[tokio::test]
async fn test_admin_views_require_api_key() {
    let app = TestApp::new();
    app.post("/api/registrations", registration("Asha", solo("trispark"), Value::Null))
        .await;

    let (status, _) = app.get_as_admin("/api/admin/registrations", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app.get_as_admin("/api/admin/registrations", Some("wrong")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = app
        .get_as_admin("/api/admin/registrations?page=1&page_size=10", Some(ADMIN_KEY))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pagination"]["total_items"], 1);
    assert_eq!(body["data"][0]["participant"]["email"], "asha@example.com");

    let (status, _) = app
        .get_as_admin("/api/admin/registrations?page_size=1000", Some(ADMIN_KEY))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .get_as_admin("/api/admin/teams?event_id=wordora", Some(ADMIN_KEY))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();
    let (status, body) = app.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

//! End-to-end tests against a mock backend.
//!
//! The mock (axum, random port) accepts `coach@x.org` / `secret`, issues the
//! token `abc123`, and answers 401 on every `/admin` route unless that exact
//! bearer token arrives.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use axum::extract::{Multipart, Path, Query};
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use chrono::NaiveDate;
use courtside::prelude::*;
use courtside::session::DEFAULT_SESSION_KEY;
use courtside::{DEFAULT_RECENT_LIMIT, DEFAULT_UPCOMING_LIMIT};
use serde_json::{json, Value};

// -- mock backend --

const TOKEN: &str = "abc123";

fn authorized(headers: &HeaderMap) -> bool {
    let expected = format!("Bearer {TOKEN}");
    headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()) == Some(expected.as_str())
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "message": "Full authentication is required" })),
    )
        .into_response()
}

async fn login(Json(body): Json<Value>) -> Response {
    if body["email"] == "coach@x.org" && body["password"] == "secret" {
        Json(json!({
            "token": TOKEN,
            "fullName": "Coach X",
            "email": "coach@x.org",
        }))
        .into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Bad credentials" })),
        )
            .into_response()
    }
}

fn team_json(id: u64, name: &str, level: &str) -> Value {
    json!({ "id": id, "name": name, "level": level, "season": "2025-26", "description": null })
}

fn game_json(id: u64) -> Value {
    json!({
        "id": id,
        "teamId": 1,
        "teamName": "Varsity",
        "opponent": format!("Opponent {id}"),
        "gameDateTime": "2025-01-10T19:00:00",
        "homeAway": "HOME",
        "location": "Main Gym",
        "scoreUs": null,
        "scoreThem": null,
        "win": null,
        "conferenceGame": true,
        "notes": null,
    })
}

fn staff_json(id: u64, level: &str) -> Value {
    json!({
        "id": id,
        "fullName": format!("Coach {id}"),
        "teamLevel": level,
        "position": "Head Coach",
        "displayOrder": id,
        "active": true,
    })
}

async fn public_teams() -> Json<Value> {
    Json(json!([team_json(1, "Varsity", "NATIONAL"), team_json(2, "JV", "REGIONAL")]))
}

async fn games_window(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let limit: u64 = params.get("limit").and_then(|l| l.parse().ok()).unwrap_or(0);
    Json(Value::Array((1..=limit).map(game_json).collect()))
}

async fn public_staff(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let all = [staff_json(1, "NATIONAL"), staff_json(2, "REGIONAL")];
    let filtered = all
        .into_iter()
        .filter(|s| params.get("teamLevel").is_none_or(|l| s["teamLevel"] == *l))
        .collect();
    Json(Value::Array(filtered))
}

async fn public_staff_member(Path(id): Path<u64>) -> Response {
    if id == 1 {
        Json(staff_json(1, "NATIONAL")).into_response()
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": format!("Staff member {id} not found") })),
        )
            .into_response()
    }
}

async fn admin_teams(headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    Json(json!([team_json(1, "Varsity", "NATIONAL")])).into_response()
}

async fn create_team(headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    if body["name"].as_str().is_none_or(str::is_empty) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": "name must not be blank" })),
        )
            .into_response();
    }
    let level = body["level"].as_str().unwrap_or("REGIONAL");
    let name = body["name"].as_str().unwrap_or_default();
    (StatusCode::CREATED, Json(team_json(7, name, level))).into_response()
}

async fn delete_team(headers: HeaderMap, Path(_id): Path<u64>) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn slow_admin_games(headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    tokio::time::sleep(Duration::from_millis(200)).await;
    Json(json!([game_json(1)])).into_response()
}

async fn upload_photo(headers: HeaderMap, mut multipart: Multipart) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() == Some("file") {
            let name = field.file_name().unwrap_or("unnamed").to_string();
            let len = field.bytes().await.map(|b| b.len()).unwrap_or(0);
            return Json(json!({ "url": format!("/uploads/{name}?bytes={len}") }))
                .into_response();
        }
    }
    StatusCode::BAD_REQUEST.into_response()
}

async fn start_backend() -> String {
    let app = Router::new()
        .route("/auth/login", post(login))
        .route("/public/teams", get(public_teams))
        .route("/public/games/upcoming", get(games_window))
        .route("/public/games/recent", get(games_window))
        .route("/public/staff", get(public_staff))
        .route("/public/staff/{id}", get(public_staff_member))
        .route("/admin/teams", get(admin_teams).post(create_team))
        .route("/admin/teams/{id}", delete(delete_team))
        .route("/admin/games", get(slow_admin_games))
        .route("/admin/players/photo", post(upload_photo));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("should bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}")
}

fn client(base: &str) -> ApiClient {
    ApiClient::builder()
        .base_url(base)
        .build()
        .expect("client should build")
}

// -- session lifecycle --

#[tokio::test]
async fn test_login_then_admin_request_is_authorized() {
    let base = start_backend().await;
    let client = client(&base);

    let session = client.login("coach@x.org", "secret").await.unwrap();
    assert_eq!(session.full_name.as_deref(), Some("Coach X"));
    assert_eq!(
        client.session().store().load().and_then(|s| s.token),
        Some(TOKEN.to_string())
    );

    let teams = client.admin_teams().list().await.unwrap();
    assert_eq!(teams.len(), 1);
}

#[tokio::test]
async fn test_admin_request_without_login_is_unauthorized() {
    let base = start_backend().await;
    let client = client(&base);

    let err = client.admin_teams().list().await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Unauthorized);
    assert!(err.to_string().contains("Full authentication is required"));
}

#[tokio::test]
async fn test_wrong_password_leaves_client_logged_out() {
    let base = start_backend().await;
    let client = client(&base);

    let err = client.login("coach@x.org", "nope").await.unwrap_err();

    assert_eq!(err.status(), Some(401));
    assert!(!client.session().is_authenticated());
    assert!(client.session().store().load().is_none());
}

#[tokio::test]
async fn test_logout_revokes_admin_access() {
    let base = start_backend().await;
    let client = client(&base);
    client.login("coach@x.org", "secret").await.unwrap();

    client.logout().unwrap();

    assert!(client.session().store().load().is_none());
    let err = client.admin_teams().list().await.unwrap_err();
    assert!(err.is_auth_failure());
}

#[tokio::test]
async fn test_subscribers_see_login_and_logout() {
    let base = start_backend().await;
    let client = client(&base);
    let mut rx = client.session().subscribe();

    client.login("coach@x.org", "secret").await.unwrap();
    rx.changed().await.unwrap();
    assert!(rx.borrow_and_update().is_authenticated());

    client.logout().unwrap();
    rx.changed().await.unwrap();
    assert!(!rx.borrow_and_update().is_authenticated());
}

#[tokio::test]
async fn test_logout_during_request_discards_response() {
    let base = start_backend().await;
    let client = client(&base);
    client.login("coach@x.org", "secret").await.unwrap();
    let games = client.admin_games();

    let (result, ()) = tokio::join!(
        client.guarded(games.list()),
        async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            client.logout().unwrap();
        }
    );

    assert!(matches!(result, Err(CourtsideError::Stale)));
}

#[tokio::test]
async fn test_session_file_survives_restart() {
    let base = start_backend().await;
    let dir = tempfile::tempdir().unwrap();
    let path: PathBuf = dir.path().join("session.json");

    let first = ApiClient::builder()
        .base_url(&base)
        .storage(FileStorage::new(&path))
        .build()
        .unwrap();
    first.login("coach@x.org", "secret").await.unwrap();
    drop(first);

    let config = ClientConfig {
        base_url: base.clone(),
        session_file: Some(path.clone()),
        ..ClientConfig::default()
    };
    let second = ApiClient::builder().config(config).build().unwrap();

    assert!(second.session().is_authenticated());
    second.admin_teams().list().await.unwrap();

    let raw = FileStorage::new(&path).get(DEFAULT_SESSION_KEY).unwrap();
    let stored: Value = serde_json::from_str(&raw.unwrap()).unwrap();
    assert_eq!(stored["token"], TOKEN);
    assert_eq!(stored["fullName"], "Coach X");
}

// -- resources --

#[tokio::test]
async fn test_public_endpoints_decode() {
    let base = start_backend().await;
    let client = client(&base);
    let public = client.public();

    let teams = public.teams().await.unwrap();
    assert_eq!(teams[0].level, TeamLevel::National);
    assert_eq!(teams[1].season.as_deref(), Some("2025-26"));

    let upcoming = public.upcoming_games(DEFAULT_UPCOMING_LIMIT).await.unwrap();
    assert_eq!(upcoming.len(), 3);
    let recent = public.recent_games(DEFAULT_RECENT_LIMIT).await.unwrap();
    assert_eq!(recent.len(), 5);
    assert_eq!(
        recent[0].game_date_time,
        NaiveDate::from_ymd_opt(2025, 1, 10)
            .unwrap()
            .and_hms_opt(19, 0, 0)
            .unwrap()
    );
    assert_eq!(recent[0].home_away, HomeAway::Home);
    assert!(!recent[0].is_final());
}

#[tokio::test]
async fn test_staff_filter_by_level() {
    let base = start_backend().await;
    let client = client(&base);

    let all = client.public().staff(None).await.unwrap();
    assert_eq!(all.len(), 2);

    let regional = client
        .public()
        .staff(Some(TeamLevel::Regional))
        .await
        .unwrap();
    assert_eq!(regional.len(), 1);
    assert_eq!(regional[0].team_level, TeamLevel::Regional);
}

#[tokio::test]
async fn test_missing_staff_member_is_validation_error() {
    let base = start_backend().await;
    let client = client(&base);

    let found = client.public().staff_member(StaffId(1)).await.unwrap();
    assert_eq!(found.full_name, "Coach 1");

    let err = client.public().staff_member(StaffId(99)).await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(err.to_string().contains("Staff member 99 not found"));
}

#[tokio::test]
async fn test_team_create_and_delete() {
    let base = start_backend().await;
    let client = client(&base);
    client.login("coach@x.org", "secret").await.unwrap();

    let created = client
        .admin_teams()
        .create(&TeamInput {
            name: "Freshman".into(),
            level: TeamLevel::Regional,
        })
        .await
        .unwrap();
    assert_eq!(created.id, TeamId(7));
    assert_eq!(created.name, "Freshman");

    client.admin_teams().delete(created.id).await.unwrap();
}

#[tokio::test]
async fn test_team_create_rejected_by_backend() {
    let base = start_backend().await;
    let client = client(&base);
    client.login("coach@x.org", "secret").await.unwrap();

    let err = client
        .admin_teams()
        .create(&TeamInput {
            name: String::new(),
            level: TeamLevel::Regional,
        })
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(err.to_string().contains("name must not be blank"));
}

#[tokio::test]
async fn test_player_photo_upload_returns_url() {
    let base = start_backend().await;
    let client = client(&base);
    client.login("coach@x.org", "secret").await.unwrap();

    let url = client
        .admin_players()
        .upload_photo("jersey.png", "image/png", vec![0u8; 64])
        .await
        .unwrap();

    assert_eq!(url, "/uploads/jersey.png?bytes=64");
}

#[tokio::test]
async fn test_unreachable_backend_is_network_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(&format!("http://{addr}"))
        .public()
        .teams()
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Network);
}

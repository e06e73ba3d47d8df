#![allow(dead_code)]

use std::time::Duration;

use agenda_core::{ApiClient, App, Session, TokenStore};
use serde_json::{Value, json};
use tempfile::TempDir;
use url::Url;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TOKEN: &str = "abc123";

pub const COLLECTION_PATHS: [&str; 8] = [
    "/api/events",
    "/api/tasks",
    "/api/reminders",
    "/api/students",
    "/api/pedagogical/observations",
    "/api/pedagogical/attendance",
    "/api/pedagogical/plannings",
    "/api/pedagogical/contents",
];

pub fn api(server: &MockServer) -> ApiClient {
    ApiClient::new(Url::parse(&server.uri()).unwrap(), Duration::from_secs(5)).unwrap()
}

/// App with its token store in `home` and, optionally, an active session.
pub fn app(server: &MockServer, home: &TempDir, token: Option<&str>) -> App {
    let session = token.map(Session::new).unwrap_or_default();
    App::with_session(api(server), TokenStore::in_dir(home.path()), session)
}

/// Serve every collection except `skip` as an empty list, `times` times each.
pub async fn mount_empty_collections_except(server: &MockServer, skip: &[&str], times: u64) {
    for p in COLLECTION_PATHS.iter().filter(|p| !skip.contains(p)) {
        Mock::given(method("GET"))
            .and(path(*p))
            .and(header("authorization", format!("Bearer {TOKEN}").as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(times)
            .named(*p)
            .mount(server)
            .await;
    }
}

/// Serve every collection except `skip` as an empty list, with no call count
/// expectation.
pub async fn serve_empty_collections_except(server: &MockServer, skip: &[&str]) {
    for p in COLLECTION_PATHS.iter().filter(|p| !skip.contains(p)) {
        Mock::given(method("GET"))
            .and(path(*p))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(server)
            .await;
    }
}

pub async fn mount_empty_collections(server: &MockServer, times: u64) {
    mount_empty_collections_except(server, &[], times).await;
}

pub fn student_json(id: i64, name: &str, group: Option<&str>) -> Value {
    json!({
        "id": id,
        "owner_id": 1,
        "full_name": name,
        "age": 4,
        "birthday": null,
        "group_name": group,
        "guardian_contact": null,
        "progress_status": "en_proceso"
    })
}

pub fn task_json(id: i64, is_done: bool) -> Value {
    json!({
        "id": id,
        "owner_id": 1,
        "title": "Preparar láminas de colores",
        "due_date": "2026-03-20",
        "priority": "medium",
        "notes": null,
        "is_done": is_done,
        "event_id": null
    })
}

pub fn profile_json(id: i64, name: &str) -> Value {
    json!({
        "student": student_json(id, name, Some("Sala de 4")),
        "attendance": [
            { "id": 1, "owner_id": 1, "student_id": id, "date": "2026-03-16", "status": "presente" }
        ],
        "observations": [],
        "contents": []
    })
}

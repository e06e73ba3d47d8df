//! Integration tests for the `agenda` binary against a mock backend.

use std::fs;
use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use tempfile::tempdir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const COLLECTIONS: [&str; 8] = [
    "/api/events",
    "/api/tasks",
    "/api/reminders",
    "/api/students",
    "/api/pedagogical/observations",
    "/api/pedagogical/attendance",
    "/api/pedagogical/plannings",
    "/api/pedagogical/contents",
];

fn write_session(home: &Path, token: &str) {
    fs::write(home.join("session.toml"), format!("token = \"{token}\"\n")).unwrap();
}

async fn serve_collections(server: &MockServer, students: serde_json::Value) {
    for p in COLLECTIONS {
        let body = if p == "/api/students" {
            students.clone()
        } else {
            json!([])
        };
        Mock::given(method("GET"))
            .and(path(p))
            .and(header("authorization", "Bearer abc123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(1)
            .mount(server)
            .await;
    }
}

#[test]
fn test_help_lists_commands() {
    cargo_bin_cmd!("agenda")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("login"))
        .stdout(predicate::str::contains("tracking"))
        .stdout(predicate::str::contains("export"));
}

#[test]
fn test_home_requires_login() {
    let temp = tempdir().unwrap();

    cargo_bin_cmd!("agenda")
        .env("AGENDA_HOME", temp.path())
        .arg("home")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not signed in"));
}

#[tokio::test]
async fn test_home_shows_empty_day() {
    let server = MockServer::start().await;
    let temp = tempdir().unwrap();
    write_session(temp.path(), "abc123");
    serve_collections(&server, json!([])).await;

    cargo_bin_cmd!("agenda")
        .env("AGENDA_HOME", temp.path())
        .env("AGENDA_API_URL", server.uri())
        .arg("home")
        .assert()
        .success()
        .stdout(predicate::str::contains("0 clases hoy"))
        .stdout(predicate::str::contains("0 recordatorios activos"))
        .stdout(predicate::str::contains("0 asistencias registradas"))
        .stdout(predicate::str::contains("0 observaciones"));
}

#[tokio::test]
async fn test_student_list_filters_by_name() {
    let server = MockServer::start().await;
    let temp = tempdir().unwrap();
    write_session(temp.path(), "abc123");
    serve_collections(
        &server,
        json!([
            { "id": 1, "owner_id": 1, "full_name": "Ana", "age": 4, "birthday": null,
              "group_name": null, "guardian_contact": null, "progress_status": "bien" },
            { "id": 2, "owner_id": 1, "full_name": "Bruno", "age": null, "birthday": null,
              "group_name": "Sala de 5", "guardian_contact": null, "progress_status": "atencion" }
        ]),
    )
    .await;

    cargo_bin_cmd!("agenda")
        .env("AGENDA_HOME", temp.path())
        .env("AGENDA_API_URL", server.uri())
        .args(["student", "list", "--search", "ana"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ana"))
        .stdout(predicate::str::contains("Sin sala"))
        .stdout(predicate::str::contains("Bruno").not());
}

#[tokio::test]
async fn test_token_is_stored_and_used() {
    let server = MockServer::start().await;
    let temp = tempdir().unwrap();
    serve_collections(&server, json!([])).await;

    cargo_bin_cmd!("agenda")
        .env("AGENDA_HOME", temp.path())
        .env("AGENDA_API_URL", server.uri())
        .args(["token", "abc123"])
        .assert()
        .success();

    let session = fs::read_to_string(temp.path().join("session.toml")).unwrap();
    assert!(session.contains("abc123"));
}

#[test]
fn test_logout_removes_session() {
    let temp = tempdir().unwrap();
    write_session(temp.path(), "abc123");

    cargo_bin_cmd!("agenda")
        .env("AGENDA_HOME", temp.path())
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Sesión cerrada"));

    assert!(!temp.path().join("session.toml").exists());
}

#[tokio::test]
async fn test_export_writes_pdf() {
    let server = MockServer::start().await;
    let temp = tempdir().unwrap();
    let out = tempdir().unwrap();
    write_session(temp.path(), "abc123");
    serve_collections(&server, json!([])).await;

    cargo_bin_cmd!("agenda")
        .env("AGENDA_HOME", temp.path())
        .env("AGENDA_API_URL", server.uri())
        .args(["export", "--scope", "semana", "--output"])
        .arg(out.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("agenda-semana.pdf"));

    assert!(out.path().join("agenda-semana.pdf").exists());
}

#[test]
fn test_unknown_scope_is_rejected() {
    cargo_bin_cmd!("agenda")
        .args(["calendar", "--scope", "year"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown calendar scope"));
}

#[test]
fn test_blank_observation_is_rejected_in_spanish() {
    let temp = tempdir().unwrap();
    write_session(temp.path(), "abc123");

    cargo_bin_cmd!("agenda")
        .env("AGENDA_HOME", temp.path())
        .args(["observation", "4", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("La observación necesita notas"));
}

#[test]
fn test_debug_log_goes_to_stderr() {
    let temp = tempdir().unwrap();

    cargo_bin_cmd!("agenda")
        .env("AGENDA_HOME", temp.path())
        .env("AGENDA_LOG", "debug")
        .arg("home")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("opening agenda"));
}

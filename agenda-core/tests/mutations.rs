mod common;

use agenda_core::pedagogical::NewObservation;
use agenda_core::student::{NewStudent, ProgressStatus, StudentUpdate};
use agenda_core::{AgendaError, ResourceKind, View};
use common::*;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_toggle_sends_negated_flag_and_resyncs() {
    let server = MockServer::start().await;
    let home = tempfile::tempdir().unwrap();
    mount_empty_collections_except(&server, &["/api/tasks"], 3).await;

    // Server state after each round trip: open, done, open
    for is_done in [false, true] {
        Mock::given(method("GET"))
            .and(path("/api/tasks"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([task_json(5, is_done)])))
            .up_to_n_times(1)
            .mount(&server)
            .await;
    }
    Mock::given(method("GET"))
        .and(path("/api/tasks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([task_json(5, false)])))
        .mount(&server)
        .await;

    for is_done in [true, false] {
        Mock::given(method("PUT"))
            .and(path("/api/tasks/5"))
            .and(header("authorization", "Bearer abc123"))
            .and(body_json(json!({ "is_done": is_done })))
            .respond_with(ResponseTemplate::new(200).set_body_json(task_json(5, is_done)))
            .expect(1)
            .mount(&server)
            .await;
    }

    let mut app = app(&server, &home, Some(TOKEN));
    app.load_all().await.unwrap();
    let original = app.data().task(5).cloned().unwrap();
    assert!(!original.is_done);

    app.toggle_task(&original).await.unwrap();
    assert!(app.data().task(5).unwrap().is_done);

    app.toggle_task_by_id(5).await.unwrap();
    assert_eq!(app.data().task(5), Some(&original));
}

#[tokio::test]
async fn test_toggle_unknown_task_is_rejected_locally() {
    let server = MockServer::start().await;
    let home = tempfile::tempdir().unwrap();

    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let mut app = app(&server, &home, Some(TOKEN));
    assert!(matches!(
        app.toggle_task_by_id(42).await,
        Err(AgendaError::InvalidInput(_))
    ));
}

#[tokio::test]
async fn test_created_student_appears_only_through_resync() {
    let server = MockServer::start().await;
    let home = tempfile::tempdir().unwrap();
    mount_empty_collections_except(&server, &["/api/students"], 1).await;

    Mock::given(method("POST"))
        .and(path("/api/students"))
        .and(body_json(json!({
            "full_name": "Ana",
            "group_name": "Sala de 4",
            "progress_status": "en_proceso"
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(student_json(99, "Ana", Some("Sala de 4"))),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/students"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([student_json(12, "Ana", Some("Sala de 4"))])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut app = app(&server, &home, Some(TOKEN));
    app.change_view(View::Students);

    let ana = NewStudent {
        full_name: "Ana".into(),
        group_name: Some("Sala de 4".into()),
        ..NewStudent::default()
    };
    app.add(&ana).await.unwrap();

    // The record comes from the reload, not from the POST response
    let students = &app.data().students;
    assert_eq!(students.len(), 1);
    assert_eq!(students[0].id, 12);
    assert_eq!(students[0].group_name.as_deref(), Some("Sala de 4"));
    assert!(app.profile().is_none());
}

#[tokio::test]
async fn test_create_with_selection_also_reloads_profile() {
    let server = MockServer::start().await;
    let home = tempfile::tempdir().unwrap();
    mount_empty_collections(&server, 1).await;

    Mock::given(method("GET"))
        .and(path("/api/students/4/profile"))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile_json(4, "Ana")))
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/pedagogical/observations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 1 })))
        .expect(1)
        .mount(&server)
        .await;

    let mut app = app(&server, &home, Some(TOKEN));
    app.change_view(View::Students);
    app.select_student(4).await.unwrap();

    let observation = NewObservation {
        student_id: 4,
        date: "2026-03-20".parse().unwrap(),
        behavior_mood: Some("tranquila".into()),
        participation: Some("alta".into()),
        notes: "Cantó con el grupo".into(),
    };
    app.create(ResourceKind::Observations, &observation)
        .await
        .unwrap();

    assert_eq!(app.profile().map(|p| p.student_id()), Some(4));
}

#[tokio::test]
async fn test_failed_create_skips_resync() {
    let server = MockServer::start().await;
    let home = tempfile::tempdir().unwrap();
    mount_empty_collections(&server, 0).await;

    Mock::given(method("POST"))
        .and(path("/api/students"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "detail": [{ "loc": ["body", "full_name"], "msg": "field required" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut app = app(&server, &home, Some(TOKEN));
    let err = app.add(&NewStudent::default()).await.unwrap_err();

    assert_eq!(err.status(), Some(422));
    assert!(err.to_string().contains("field required"));
}

#[tokio::test]
async fn test_status_update_reloads_aggregate_and_profile() {
    let server = MockServer::start().await;
    let home = tempfile::tempdir().unwrap();
    mount_empty_collections(&server, 1).await;

    Mock::given(method("GET"))
        .and(path("/api/students/4/profile"))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile_json(4, "Ana")))
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/api/students/4"))
        .and(body_json(json!({ "progress_status": "atencion" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(student_json(4, "Ana", None)))
        .expect(1)
        .mount(&server)
        .await;

    let mut app = app(&server, &home, Some(TOKEN));
    app.change_view(View::Students);
    app.select_student(4).await.unwrap();

    app.update_student(4, &StudentUpdate::progress(ProgressStatus::Atencion))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_mutations_require_a_session() {
    let server = MockServer::start().await;
    let home = tempfile::tempdir().unwrap();

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let mut app = app(&server, &home, None);
    assert!(matches!(
        app.add(&NewStudent::default()).await,
        Err(AgendaError::NotAuthenticated)
    ));
}

use questlog_core::db::open_db_in_memory;
use questlog_core::{
    NewTodoRequest, SqliteAccountRepository, SqliteTodoRepository, TodoDate, TodoPatch,
    TodoService, TodoServiceError, TodoValidationError,
};
use rusqlite::Connection;
use uuid::Uuid;

fn service(conn: &Connection) -> TodoService<SqliteTodoRepository<'_>, SqliteAccountRepository<'_>> {
    TodoService::new(
        SqliteTodoRepository::new(conn),
        SqliteAccountRepository::new(conn),
    )
}

fn date(value: &str) -> TodoDate {
    TodoDate::parse(value).unwrap()
}

#[test]
fn create_and_list_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let today = date("2026-08-23");

    let request = NewTodoRequest {
        text: "  water the plants  ".to_string(),
        date: today.clone(),
    };
    let created = service.create_todo("auth0|alice", &request).unwrap();
    assert_eq!(created.text, "water the plants");
    assert!(!created.completed);
    assert!(!created.xp_awarded);

    let listed = service.list_todos("auth0|alice", &today).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].uuid, created.uuid);
    assert_eq!(listed[0].date, today);
}

#[test]
fn listing_is_scoped_to_owner_and_date() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let today = date("2026-08-23");
    let tomorrow = date("2026-08-24");

    for (subject, day, text) in [
        ("auth0|alice", &today, "alice today"),
        ("auth0|alice", &tomorrow, "alice tomorrow"),
        ("auth0|bob", &today, "bob today"),
    ] {
        let request = NewTodoRequest {
            text: text.to_string(),
            date: day.clone(),
        };
        service.create_todo(subject, &request).unwrap();
    }

    let alice_today = service.list_todos("auth0|alice", &today).unwrap();
    assert_eq!(alice_today.len(), 1);
    assert_eq!(alice_today[0].text, "alice today");

    let bob_tomorrow = service.list_todos("auth0|bob", &tomorrow).unwrap();
    assert!(bob_tomorrow.is_empty());
}

#[test]
fn create_rejects_empty_text() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let request = NewTodoRequest {
        text: "   ".to_string(),
        date: date("2026-08-23"),
    };
    let err = service.create_todo("auth0|alice", &request).unwrap_err();
    assert!(matches!(
        err,
        TodoServiceError::Validation(TodoValidationError::EmptyText)
    ));
}

#[test]
fn todo_date_rejects_malformed_values() {
    for value in ["2026-8-23", "2026/08/23", "20260823", "2026-13-01", "2026-01-00", "not a date"] {
        let err = TodoDate::parse(value).unwrap_err();
        assert!(
            matches!(err, TodoValidationError::InvalidDate(_)),
            "`{value}` should be rejected"
        );
    }

    assert_eq!(date(" 2026-08-23 ").as_str(), "2026-08-23");
}

#[test]
fn patch_updates_text_and_trims_it() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let request = NewTodoRequest {
        text: "draft".to_string(),
        date: date("2026-08-23"),
    };
    let created = service.create_todo("auth0|alice", &request).unwrap();

    let patch = TodoPatch {
        text: Some("  polished  ".to_string()),
        ..TodoPatch::default()
    };
    let outcome = service
        .patch_todo("auth0|alice", created.uuid, &patch)
        .unwrap();
    assert_eq!(outcome.todo.text, "polished");
    assert!(outcome.progress.is_none());
}

#[test]
fn patch_rejects_text_emptied_by_trim() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let request = NewTodoRequest {
        text: "keep me".to_string(),
        date: date("2026-08-23"),
    };
    let created = service.create_todo("auth0|alice", &request).unwrap();

    let patch = TodoPatch {
        text: Some("   ".to_string()),
        ..TodoPatch::default()
    };
    let err = service
        .patch_todo("auth0|alice", created.uuid, &patch)
        .unwrap_err();
    assert!(matches!(
        err,
        TodoServiceError::Validation(TodoValidationError::EmptyText)
    ));
}

#[test]
fn cross_account_access_behaves_as_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let request = NewTodoRequest {
        text: "private".to_string(),
        date: date("2026-08-23"),
    };
    let created = service.create_todo("auth0|alice", &request).unwrap();

    let patch = TodoPatch {
        completed: Some(true),
        ..TodoPatch::default()
    };
    let err = service
        .patch_todo("auth0|mallory", created.uuid, &patch)
        .unwrap_err();
    assert!(matches!(err, TodoServiceError::TodoNotFound(id) if id == created.uuid));

    let err = service
        .delete_todo("auth0|mallory", created.uuid)
        .unwrap_err();
    assert!(matches!(err, TodoServiceError::TodoNotFound(id) if id == created.uuid));

    // The owner still sees the untouched todo.
    let listed = service
        .list_todos("auth0|alice", &date("2026-08-23"))
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert!(!listed[0].completed);
}

#[test]
fn delete_removes_the_todo() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let today = date("2026-08-23");

    let request = NewTodoRequest {
        text: "ephemeral".to_string(),
        date: today.clone(),
    };
    let created = service.create_todo("auth0|alice", &request).unwrap();

    service.delete_todo("auth0|alice", created.uuid).unwrap();
    assert!(service.list_todos("auth0|alice", &today).unwrap().is_empty());

    let err = service.delete_todo("auth0|alice", created.uuid).unwrap_err();
    assert!(matches!(err, TodoServiceError::TodoNotFound(id) if id == created.uuid));
}

#[test]
fn delete_unknown_id_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let id = Uuid::new_v4();
    let err = service.delete_todo("auth0|alice", id).unwrap_err();
    assert!(matches!(err, TodoServiceError::TodoNotFound(missing) if missing == id));
}

#[test]
fn todo_serialization_uses_expected_wire_fields() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let request = NewTodoRequest {
        text: "ship it".to_string(),
        date: date("2026-08-23"),
    };
    let created = service.create_todo("auth0|alice", &request).unwrap();

    let json = serde_json::to_value(&created).unwrap();
    assert_eq!(json["uuid"], created.uuid.to_string());
    assert_eq!(json["subjectId"], "auth0|alice");
    assert_eq!(json["date"], "2026-08-23");
    assert_eq!(json["text"], "ship it");
    assert_eq!(json["completed"], false);
    assert_eq!(json["xpAwarded"], false);
}

#[test]
fn patch_deserialization_whitelists_fields() {
    let patch: TodoPatch = serde_json::from_str(
        r#"{
            "completed": true,
            "xpAwarded": false,
            "text": "renamed",
            "subject_id": "auth0|evil",
            "xp": 9999
        }"#,
    )
    .unwrap();

    assert_eq!(patch.completed, Some(true));
    assert_eq!(patch.xp_awarded, Some(false));
    assert_eq!(patch.text.as_deref(), Some("renamed"));
}

use chrono::{DateTime, Duration, TimeZone, Utc};
use taskflow_core::service::auth_service::{DEMO_EMAIL, DEMO_PASSWORD};
use taskflow_core::{
    open_db, open_db_in_memory, AuthService, CreateProjectRequest, CreateTaskRequest, ErrorCode,
    FixedClock, KvProjectRepository, KvTaskRepository, KvUserRepository, ProjectService,
    RegisterRequest, ServiceError, SqliteKvStore, TaskPriority, TaskService, TaskStatus,
    UpdateProjectRequest, UpdateTaskRequest, UserRepository,
};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 7, 1, 9, 30, 0).unwrap()
}

fn create_request(title: &str, days_ahead: i64) -> CreateTaskRequest {
    CreateTaskRequest {
        title: title.to_string(),
        description: "details".to_string(),
        due_date: now().date_naive() + Duration::days(days_ahead),
        priority: TaskPriority::High,
        project_id: None,
    }
}

fn register_request(username: &str, email: &str) -> RegisterRequest {
    RegisterRequest {
        username: username.to_string(),
        email: email.to_string(),
        display_name: String::new(),
        password: "Sturdy#Pass9".to_string(),
    }
}

#[test]
fn task_update_changes_one_record_and_advances_updated_at() {
    let conn = open_db_in_memory().unwrap();
    let kv = SqliteKvStore::try_new(&conn).unwrap();
    let service = TaskService::new(KvTaskRepository::new(kv), FixedClock(now()));

    let first = service.create_task("u1", &create_request("First", 1)).unwrap();
    let second = service.create_task("u1", &create_request("Second", 2)).unwrap();

    let updated = service
        .update_task(
            "u1",
            &UpdateTaskRequest {
                id: second.id.clone(),
                title: Some("Second, renamed".into()),
                status: Some(TaskStatus::InProgress),
                ..UpdateTaskRequest::default()
            },
        )
        .unwrap();

    assert!(updated.updated_at > second.updated_at);
    assert_eq!(updated.id, second.id);
    assert_eq!(updated.user_id, second.user_id);
    assert_eq!(updated.created_at, second.created_at);

    let all = service.list_tasks("u1").unwrap();
    assert_eq!(all[0], first);
    assert_eq!(all[1], updated);
}

#[test]
fn update_and_delete_of_absent_id_fail_with_not_found() {
    let conn = open_db_in_memory().unwrap();
    let kv = SqliteKvStore::try_new(&conn).unwrap();
    let service = TaskService::new(KvTaskRepository::new(kv), FixedClock(now()));

    let err = service
        .update_task("u1", &UpdateTaskRequest::status_change("missing", TaskStatus::Completed))
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound { kind: "Task", .. }));
    assert_eq!(err.to_string(), "Task not found");

    let err = service.delete_task("u1", "missing").unwrap_err();
    assert!(matches!(err, ServiceError::NotFound { .. }));
}

#[test]
fn create_rejects_past_due_date_with_validation_error() {
    let conn = open_db_in_memory().unwrap();
    let kv = SqliteKvStore::try_new(&conn).unwrap();
    let service = TaskService::new(KvTaskRepository::new(kv), FixedClock(now()));

    let err = service.create_task("u1", &create_request("Late", -1)).unwrap_err();
    let codes: Vec<_> = err.validation_errors().iter().map(|e| e.code).collect();
    assert_eq!(codes, vec![ErrorCode::PastDate]);
    assert!(service.list_tasks("u1").unwrap().is_empty());
}

#[test]
fn tasks_survive_reopening_a_file_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("taskflow.sqlite3");
    let created = {
        let conn = open_db(&path).unwrap();
        let kv = SqliteKvStore::try_new(&conn).unwrap();
        let service = TaskService::new(KvTaskRepository::new(kv), FixedClock(now()));
        service.create_task("u1", &create_request("Persist me", 3)).unwrap()
    };

    let conn = open_db(&path).unwrap();
    let kv = SqliteKvStore::try_new(&conn).unwrap();
    let service = TaskService::new(KvTaskRepository::new(kv), FixedClock(now()));
    assert_eq!(service.list_tasks("u1").unwrap(), vec![created]);
}

#[test]
fn persisted_task_json_uses_camel_case_and_snake_enums() {
    let conn = open_db_in_memory().unwrap();
    let kv = SqliteKvStore::try_new(&conn).unwrap();
    let service = TaskService::new(KvTaskRepository::new(kv), FixedClock(now()));
    service.create_task("u1", &create_request("Shape", 1)).unwrap();

    let raw: Vec<u8> = conn
        .query_row(
            "SELECT value FROM kv_entries WHERE key = 'task_management_tasks';",
            [],
            |row| row.get(0),
        )
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&raw).unwrap();
    let record = &json[0];
    assert_eq!(record["dueDate"], "2025-07-02");
    assert_eq!(record["priority"], "high");
    assert_eq!(record["status"], "not_started");
    assert_eq!(record["userId"], "u1");
    assert!(record.get("createdAt").is_some());
    assert!(record.get("projectId").is_none());
}

#[test]
fn project_names_are_unique_case_insensitively_and_sanitized() {
    let conn = open_db_in_memory().unwrap();
    let kv = SqliteKvStore::try_new(&conn).unwrap();
    let service = ProjectService::new(KvProjectRepository::new(kv), FixedClock(now()));

    let roadmap = service
        .create_project(&CreateProjectRequest {
            name: "  Roadmap  ".into(),
            description: "Quarter plan ".into(),
        })
        .unwrap();
    assert_eq!(roadmap.name, "Roadmap");
    assert_eq!(roadmap.description, "Quarter plan");

    let err = service
        .create_project(&CreateProjectRequest {
            name: "ROADMAP".into(),
            description: String::new(),
        })
        .unwrap_err();
    assert_eq!(err.to_string(), "Project with this name already exists");

    let other = service
        .create_project(&CreateProjectRequest {
            name: "Ops".into(),
            description: String::new(),
        })
        .unwrap();
    let err = service
        .update_project(&UpdateProjectRequest {
            id: other.id.clone(),
            name: Some("roadmap".into()),
            description: None,
        })
        .unwrap_err();
    assert!(matches!(err, ServiceError::Conflict(_)));

    // renaming to its own name with different case is allowed
    let renamed = service
        .update_project(&UpdateProjectRequest {
            id: roadmap.id.clone(),
            name: Some("ROADMAP".into()),
            description: None,
        })
        .unwrap();
    assert_eq!(renamed.name, "ROADMAP");
    assert!(renamed.updated_at > roadmap.updated_at);
}

#[test]
fn deleting_a_project_keeps_its_tasks() {
    let conn = open_db_in_memory().unwrap();
    let kv = SqliteKvStore::try_new(&conn).unwrap();
    let projects = ProjectService::new(KvProjectRepository::new(kv), FixedClock(now()));
    let tasks = TaskService::new(KvTaskRepository::new(kv), FixedClock(now()));

    let project = projects
        .create_project(&CreateProjectRequest {
            name: "Launch".into(),
            description: String::new(),
        })
        .unwrap();
    let mut request = create_request("Press kit", 2);
    request.project_id = Some(project.id.clone());
    let task = tasks.create_task("u1", &request).unwrap();
    let linked = projects.link_task(&project.id, &task.id).unwrap();
    assert_eq!(linked.task_ids, vec![task.id.clone()]);

    projects.delete_project(&project.id).unwrap();
    assert!(matches!(
        projects.get_project(&project.id).unwrap_err(),
        ServiceError::NotFound { kind: "Project", .. }
    ));
    let remaining = tasks.list_tasks("u1").unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].project_id.as_deref(), Some(project.id.as_str()));
}

#[test]
fn duplicate_registration_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let kv = SqliteKvStore::try_new(&conn).unwrap();
    let auth = AuthService::new(KvUserRepository::new(kv), FixedClock(now()));

    let user = auth.register(&register_request("grace", "grace@example.org")).unwrap();
    assert_eq!(user.display_name, "grace");

    let same_email = auth.register(&register_request("hopper", "GRACE@example.org"));
    assert!(matches!(same_email, Err(ServiceError::Conflict(_))));
    let same_username = auth.register(&register_request("Grace", "other@example.org"));
    assert!(matches!(same_username, Err(ServiceError::Conflict(_))));
    assert_eq!(KvUserRepository::new(kv).list_users().unwrap().len(), 1);
}

#[test]
fn login_requires_matching_password() {
    let conn = open_db_in_memory().unwrap();
    let kv = SqliteKvStore::try_new(&conn).unwrap();
    let auth = AuthService::new(KvUserRepository::new(kv), FixedClock(now()));

    auth.register(&register_request("grace", "grace@example.org")).unwrap();
    auth.logout().unwrap();
    assert!(auth.restore_session().unwrap().is_none());

    let wrong = auth.login("grace@example.org", "Wrong#Pass9");
    assert!(matches!(wrong, Err(ServiceError::InvalidCredentials)));
    let unknown = auth.login("nobody@example.org", "Sturdy#Pass9");
    assert!(matches!(unknown, Err(ServiceError::InvalidCredentials)));

    let by_username = auth.login("grace", "Sturdy#Pass9").unwrap();
    assert_eq!(auth.require_user().unwrap(), by_username);
}

#[test]
fn credentials_are_not_stored_in_plain_text() {
    let conn = open_db_in_memory().unwrap();
    let kv = SqliteKvStore::try_new(&conn).unwrap();
    let auth = AuthService::new(KvUserRepository::new(kv), FixedClock(now()));
    auth.register(&register_request("grace", "grace@example.org")).unwrap();

    let mut stmt = conn.prepare("SELECT value FROM kv_entries;").unwrap();
    let values: Vec<Vec<u8>> = stmt
        .query_map([], |row| row.get::<_, Vec<u8>>(0))
        .unwrap()
        .map(|row| row.unwrap())
        .collect();
    assert!(!values.is_empty());
    for value in values {
        assert!(!String::from_utf8_lossy(&value).contains("Sturdy#Pass9"));
    }
}

#[test]
fn stale_session_is_reported_as_expired_and_cleared() {
    let conn = open_db_in_memory().unwrap();
    let kv = SqliteKvStore::try_new(&conn).unwrap();
    let repo = KvUserRepository::new(kv);
    let auth = AuthService::new(KvUserRepository::new(kv), FixedClock(now()));

    let ghost = taskflow_core::User {
        id: "ghost".into(),
        username: "ghost".into(),
        email: "ghost@example.org".into(),
        display_name: "Ghost".into(),
        created_at: now(),
    };
    repo.set_current_session(&ghost).unwrap();

    assert!(matches!(auth.restore_session(), Err(ServiceError::SessionExpired)));
    assert!(repo.current_session().unwrap().is_none());
    assert!(matches!(auth.require_user(), Err(ServiceError::NotAuthenticated)));
}

#[test]
fn demo_user_is_created_once_and_can_sign_in() {
    let conn = open_db_in_memory().unwrap();
    let kv = SqliteKvStore::try_new(&conn).unwrap();
    let auth = AuthService::new(KvUserRepository::new(kv), FixedClock(now()));

    let first = auth.ensure_demo_user().unwrap();
    let second = auth.ensure_demo_user().unwrap();
    assert_eq!(first, second);
    assert_eq!(auth.login(DEMO_EMAIL, DEMO_PASSWORD).unwrap().id, first.id);
}

#[test]
fn unlinking_removes_the_task_id_and_ignores_missing_projects() {
    let conn = open_db_in_memory().unwrap();
    let kv = SqliteKvStore::try_new(&conn).unwrap();
    let projects = ProjectService::new(KvProjectRepository::new(kv), FixedClock(now()));

    let project = projects
        .create_project(&CreateProjectRequest {
            name: "Launch".into(),
            description: String::new(),
        })
        .unwrap();
    projects.link_task(&project.id, "t1").unwrap();
    projects.link_task(&project.id, "t2").unwrap();

    projects.unlink_task(&project.id, "t1").unwrap();
    assert_eq!(
        projects.get_project(&project.id).unwrap().task_ids,
        vec!["t2".to_string()]
    );
    projects.unlink_task(&project.id, "absent").unwrap();
    projects.unlink_task("no-such-project", "t2").unwrap();
}

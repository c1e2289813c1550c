use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use taskflow_core::model::project::Project;
use taskflow_core::view::board::build_board;
use taskflow_core::view::dashboard::{compute_dashboard, overdue_tasks, recent_tasks, TaskStats};
use taskflow_core::view::filter::{search_tasks, tasks_for_user};
use taskflow_core::view::summary::summarize_projects;
use taskflow_core::{Task, TaskPriority, TaskStatus};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 5, 15, 12, 0, 0).unwrap()
}

fn task(id: &str, status: TaskStatus, due: NaiveDate, created_minutes: i64) -> Task {
    let created = Utc.with_ymd_and_hms(2025, 5, 1, 0, 0, 0).unwrap() + Duration::minutes(created_minutes);
    Task {
        id: id.to_string(),
        title: format!("Task {id}"),
        description: String::new(),
        due_date: due,
        priority: TaskPriority::Medium,
        status,
        project_id: None,
        user_id: "u1".to_string(),
        created_at: created,
        updated_at: created,
    }
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 5, d).unwrap()
}

#[test]
fn completion_rate_for_empty_and_one_of_three() {
    assert_eq!(compute_dashboard(&[], now()).completion_rate, 0);

    let tasks = vec![
        task("a", TaskStatus::Completed, day(20), 0),
        task("b", TaskStatus::NotStarted, day(20), 1),
        task("c", TaskStatus::InProgress, day(20), 2),
    ];
    let view = compute_dashboard(&tasks, now());
    assert_eq!(view.completion_rate, 33);
    assert_eq!(
        view.stats,
        TaskStats {
            total: 3,
            not_started: 1,
            in_progress: 1,
            completed: 1
        }
    );
}

#[test]
fn overdue_requires_past_due_and_open_status() {
    let open = task("open", TaskStatus::InProgress, day(10), 0);
    let mut done = open.clone();
    done.status = TaskStatus::Completed;

    assert!(open.is_overdue(now()));
    assert!(!done.is_overdue(now()));
}

#[test]
fn due_today_is_overdue_once_the_day_has_started() {
    let due_today = task("today", TaskStatus::NotStarted, day(15), 0);
    assert!(due_today.is_overdue(now()));
    let midnight = Utc.with_ymd_and_hms(2025, 5, 15, 0, 0, 0).unwrap();
    assert!(!due_today.is_overdue(midnight));
}

#[test]
fn overdue_list_is_sorted_by_due_date() {
    let tasks = vec![
        task("mid", TaskStatus::NotStarted, day(8), 0),
        task("future", TaskStatus::NotStarted, day(30), 1),
        task("oldest", TaskStatus::InProgress, day(2), 2),
        task("closed", TaskStatus::Completed, day(1), 3),
    ];
    let overdue: Vec<_> = overdue_tasks(&tasks, now()).into_iter().map(|t| t.id).collect();
    assert_eq!(overdue, vec!["oldest", "mid"]);
    assert_eq!(compute_dashboard(&tasks, now()).overdue_count, 2);
}

#[test]
fn recent_tasks_are_the_five_newest() {
    let tasks: Vec<Task> = (0..7)
        .map(|i| task(&format!("t{i}"), TaskStatus::NotStarted, day(20), i))
        .collect();
    let recent: Vec<_> = recent_tasks(&tasks, 5).into_iter().map(|t| t.id).collect();
    assert_eq!(recent, vec!["t6", "t5", "t4", "t3", "t2"]);
}

#[test]
fn priority_breakdown_covers_every_priority() {
    let mut tasks = vec![
        task("a", TaskStatus::NotStarted, day(20), 0),
        task("b", TaskStatus::NotStarted, day(20), 1),
        task("c", TaskStatus::NotStarted, day(20), 2),
        task("d", TaskStatus::NotStarted, day(20), 3),
    ];
    tasks[0].priority = TaskPriority::Urgent;
    let view = compute_dashboard(&tasks, now());
    let shares: Vec<_> = view
        .priority_breakdown
        .iter()
        .map(|s| (s.priority, s.count, s.percentage))
        .collect();
    assert_eq!(
        shares,
        vec![
            (TaskPriority::Low, 0, 0.0),
            (TaskPriority::Medium, 3, 75.0),
            (TaskPriority::High, 0, 0.0),
            (TaskPriority::Urgent, 1, 25.0),
        ]
    );
}

#[test]
fn board_has_one_column_per_status_with_overdue_counts() {
    let tasks = vec![
        task("a", TaskStatus::NotStarted, day(3), 0),
        task("b", TaskStatus::NotStarted, day(25), 1),
        task("c", TaskStatus::Completed, day(3), 2),
    ];
    let board = build_board(&tasks, now());
    let summary: Vec<_> = board
        .iter()
        .map(|c| (c.title, c.count, c.overdue))
        .collect();
    assert_eq!(
        summary,
        vec![("To Do", 2, 1), ("In Progress", 0, 0), ("Completed", 1, 0)]
    );
}

#[test]
fn search_matches_title_or_description_case_insensitively() {
    let mut tasks = vec![
        task("a", TaskStatus::NotStarted, day(20), 0),
        task("b", TaskStatus::NotStarted, day(20), 1),
    ];
    tasks[0].title = "Write Release Notes".into();
    tasks[1].description = "prepare the release checklist".into();
    let hits: Vec<_> = search_tasks(&tasks, "RELEASE").into_iter().map(|t| t.id).collect();
    assert_eq!(hits, vec!["a", "b"]);
    assert_eq!(search_tasks(&tasks, "notes").len(), 1);
    assert_eq!(search_tasks(&tasks, "  ").len(), 2);
}

#[test]
fn user_scoping_and_project_summaries() {
    let mut tasks = vec![
        task("a", TaskStatus::NotStarted, day(20), 0),
        task("b", TaskStatus::Completed, day(20), 1),
        task("c", TaskStatus::InProgress, day(20), 2),
    ];
    tasks[0].project_id = Some("p1".into());
    tasks[1].project_id = Some("p1".into());
    tasks[2].user_id = "u2".into();

    assert_eq!(tasks_for_user(&tasks, "u1").len(), 2);

    let project = Project {
        id: "p1".into(),
        name: "Launch".into(),
        description: String::new(),
        created_at: now(),
        updated_at: now(),
        task_ids: Vec::new(),
    };
    let summaries = summarize_projects(&[project], &tasks);
    assert_eq!(summaries[0].total_tasks, 2);
    assert_eq!(summaries[0].not_started_tasks, 1);
    assert_eq!(summaries[0].completed_tasks, 1);
    assert_eq!(summaries[0].in_progress_tasks, 0);
}

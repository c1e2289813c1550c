//! Task input validation.
//!
//! Checks run per field in this order: title, description, due date,
//! priority, status. Within a field a missing value short-circuits the
//! remaining checks for that field only.

use super::{char_len, check_description, markup, ErrorCode, ValidationError};
use crate::model::task::{CreateTaskRequest, Task, TaskPriority, TaskStatus, UpdateTaskRequest};
use chrono::{DateTime, NaiveDate};

pub const TITLE_MAX_CHARS: usize = 100;
pub const DESCRIPTION_MAX_CHARS: usize = 500;

/// Raw, unparsed task input as entered by a user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
    pub project_id: Option<String>,
}

impl From<&CreateTaskRequest> for TaskDraft {
    fn from(request: &CreateTaskRequest) -> Self {
        Self {
            title: Some(request.title.clone()),
            description: Some(request.description.clone()),
            due_date: Some(request.due_date.to_string()),
            priority: Some(request.priority.as_str().to_string()),
            status: None,
            project_id: request.project_id.clone(),
        }
    }
}

impl From<&UpdateTaskRequest> for TaskDraft {
    fn from(request: &UpdateTaskRequest) -> Self {
        Self {
            title: request.title.clone(),
            description: request.description.clone(),
            due_date: request.due_date.map(|date| date.to_string()),
            priority: request.priority.map(|p| p.as_str().to_string()),
            status: request.status.map(|s| s.as_str().to_string()),
            project_id: request.project_id.clone(),
        }
    }
}

impl TaskDraft {
    /// Validates the draft as a new task and converts it to a request.
    pub fn into_create_request(
        self,
        today: NaiveDate,
    ) -> Result<CreateTaskRequest, Vec<ValidationError>> {
        let errors = validate_task(&self, today);
        if !errors.is_empty() {
            return Err(errors);
        }
        // Validation guarantees the parsed fields below.
        let due_date = self
            .due_date
            .as_deref()
            .and_then(parse_due_date)
            .ok_or_else(|| vec![invalid_date()])?;
        let priority = self
            .priority
            .as_deref()
            .and_then(TaskPriority::parse)
            .ok_or_else(|| vec![invalid_priority()])?;
        Ok(CreateTaskRequest {
            title: self.title.unwrap_or_default().trim().to_string(),
            description: self.description.unwrap_or_default().trim().to_string(),
            due_date,
            priority,
            project_id: non_blank(self.project_id),
        })
    }

    /// Validates the draft as a partial update of `existing`.
    pub fn into_update_request(
        self,
        existing: &Task,
        today: NaiveDate,
    ) -> Result<UpdateTaskRequest, Vec<ValidationError>> {
        let errors = validate_task_update(&self, existing, today);
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(UpdateTaskRequest {
            id: existing.id.clone(),
            title: self.title.map(|t| t.trim().to_string()),
            description: self.description.map(|d| d.trim().to_string()),
            due_date: self.due_date.as_deref().and_then(parse_due_date),
            priority: self.priority.as_deref().and_then(TaskPriority::parse),
            status: self.status.as_deref().and_then(TaskStatus::parse),
            project_id: non_blank(self.project_id),
        })
    }
}

/// Validates input for a new task. `today` is the current calendar day.
pub fn validate_task(draft: &TaskDraft, today: NaiveDate) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    check_title(draft.title.as_deref(), true, &mut errors);
    if let Some(description) = draft.description.as_deref() {
        check_description(description, &mut errors);
    }
    check_due_date(draft.due_date.as_deref(), true, None, today, &mut errors);
    check_priority(draft.priority.as_deref(), true, &mut errors);
    check_status(draft.status.as_deref(), &mut errors);
    errors
}

/// Validates a partial update. Absent fields are not checked, and an
/// unchanged past due date is accepted.
pub fn validate_task_update(
    draft: &TaskDraft,
    existing: &Task,
    today: NaiveDate,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    check_title(draft.title.as_deref(), false, &mut errors);
    if let Some(description) = draft.description.as_deref() {
        check_description(description, &mut errors);
    }
    check_due_date(
        draft.due_date.as_deref(),
        false,
        Some(existing.due_date),
        today,
        &mut errors,
    );
    check_priority(draft.priority.as_deref(), false, &mut errors);
    check_status(draft.status.as_deref(), &mut errors);
    errors
}

/// Parses `YYYY-MM-DD`, or an RFC 3339 timestamp reduced to its date.
pub fn parse_due_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

fn check_title(title: Option<&str>, required: bool, errors: &mut Vec<ValidationError>) {
    let Some(title) = title else {
        if required {
            errors.push(ValidationError::new("title", ErrorCode::Required, "Title is required"));
        }
        return;
    };
    if title.trim().is_empty() {
        errors.push(ValidationError::new("title", ErrorCode::Required, "Title is required"));
        return;
    }
    if char_len(title) > TITLE_MAX_CHARS {
        errors.push(ValidationError::new(
            "title",
            ErrorCode::MaxLength,
            "Title must be less than 100 characters",
        ));
    }
    if markup::contains_disallowed_markup(title) {
        errors.push(ValidationError::new(
            "title",
            ErrorCode::XssDetected,
            "Title contains invalid characters",
        ));
    }
}

fn check_due_date(
    due_date: Option<&str>,
    required: bool,
    current: Option<NaiveDate>,
    today: NaiveDate,
    errors: &mut Vec<ValidationError>,
) {
    let raw = match due_date {
        Some(raw) if !raw.trim().is_empty() => raw,
        Some(_) => {
            errors.push(ValidationError::new("dueDate", ErrorCode::Required, "Due date is required"));
            return;
        }
        None => {
            if required {
                errors.push(ValidationError::new(
                    "dueDate",
                    ErrorCode::Required,
                    "Due date is required",
                ));
            }
            return;
        }
    };
    let Some(date) = parse_due_date(raw) else {
        errors.push(invalid_date());
        return;
    };
    if date < today && current != Some(date) {
        errors.push(ValidationError::new(
            "dueDate",
            ErrorCode::PastDate,
            "Due date cannot be in the past",
        ));
    }
}

fn check_priority(priority: Option<&str>, required: bool, errors: &mut Vec<ValidationError>) {
    match priority {
        Some(value) if TaskPriority::parse(value).is_some() => {}
        None if !required => {}
        _ => errors.push(invalid_priority()),
    }
}

fn check_status(status: Option<&str>, errors: &mut Vec<ValidationError>) {
    if let Some(value) = status {
        if TaskStatus::parse(value).is_none() {
            errors.push(ValidationError::new(
                "status",
                ErrorCode::InvalidValue,
                "Status must be one of: not_started, in_progress, completed",
            ));
        }
    }
}

fn invalid_date() -> ValidationError {
    ValidationError::new("dueDate", ErrorCode::InvalidDate, "Invalid date format")
}

fn invalid_priority() -> ValidationError {
    ValidationError::new(
        "priority",
        ErrorCode::InvalidValue,
        "Priority must be one of: low, medium, high, urgent",
    )
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::{parse_due_date, validate_task, validate_task_update, TaskDraft};
    use crate::model::task::{Task, TaskPriority, TaskStatus};
    use crate::validation::ErrorCode;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 10).unwrap()
    }

    fn draft(title: &str, due: &str, priority: &str) -> TaskDraft {
        TaskDraft {
            title: Some(title.to_string()),
            due_date: Some(due.to_string()),
            priority: Some(priority.to_string()),
            ..TaskDraft::default()
        }
    }

    #[test]
    fn empty_title_yields_single_required_error() {
        let errors = validate_task(&draft("", "2025-07-01", "medium"), today());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "title");
        assert_eq!(errors[0].code, ErrorCode::Required);
    }

    #[test]
    fn script_title_is_flagged_as_markup() {
        let errors = validate_task(&draft("<script>x</script>", "2025-07-01", "high"), today());
        assert!(errors
            .iter()
            .any(|e| e.field == "title" && e.code == ErrorCode::XssDetected));
    }

    #[test]
    fn all_violations_are_reported_in_field_order() {
        let mut input = draft(&"x".repeat(101), "not-a-date", "critical");
        input.description = Some("y".repeat(501));
        input.status = Some("done".to_string());
        let codes: Vec<_> = validate_task(&input, today())
            .into_iter()
            .map(|e| (e.field, e.code))
            .collect();
        assert_eq!(
            codes,
            vec![
                ("title", ErrorCode::MaxLength),
                ("description", ErrorCode::MaxLength),
                ("dueDate", ErrorCode::InvalidDate),
                ("priority", ErrorCode::InvalidValue),
                ("status", ErrorCode::InvalidValue),
            ]
        );
    }

    #[test]
    fn due_date_boundaries() {
        assert!(validate_task(&draft("a", "2025-06-10", "low"), today()).is_empty());
        let past = validate_task(&draft("a", "2025-06-09", "low"), today());
        assert_eq!(past[0].code, ErrorCode::PastDate);
        let missing = validate_task(
            &TaskDraft {
                title: Some("a".into()),
                priority: Some("low".into()),
                ..TaskDraft::default()
            },
            today(),
        );
        assert_eq!(missing[0].code, ErrorCode::Required);
        assert_eq!(missing[0].field, "dueDate");
    }

    #[test]
    fn title_length_counts_characters() {
        let title = "é".repeat(100);
        assert!(validate_task(&draft(&title, "2025-06-11", "urgent"), today()).is_empty());
    }

    #[test]
    fn parse_due_date_accepts_rfc3339() {
        assert_eq!(
            parse_due_date("2025-06-12T08:30:00Z"),
            NaiveDate::from_ymd_opt(2025, 6, 12)
        );
        assert_eq!(parse_due_date("12/06/2025"), None);
    }

    #[test]
    fn update_keeps_an_unchanged_past_due_date_valid() {
        let created = Utc.with_ymd_and_hms(2025, 5, 1, 0, 0, 0).unwrap();
        let existing = Task {
            id: "t1".into(),
            title: "Old".into(),
            description: String::new(),
            due_date: NaiveDate::from_ymd_opt(2025, 5, 20).unwrap(),
            priority: TaskPriority::Low,
            status: TaskStatus::NotStarted,
            project_id: None,
            user_id: "u1".into(),
            created_at: created,
            updated_at: created,
        };
        let same = TaskDraft {
            due_date: Some("2025-05-20".into()),
            status: Some("completed".into()),
            ..TaskDraft::default()
        };
        assert!(validate_task_update(&same, &existing, today()).is_empty());

        let moved = TaskDraft {
            due_date: Some("2025-05-21".into()),
            ..TaskDraft::default()
        };
        let errors = validate_task_update(&moved, &existing, today());
        assert_eq!(errors[0].code, ErrorCode::PastDate);
    }

    #[test]
    fn draft_converts_into_trimmed_request() {
        let mut input = draft("  Write docs ", "2025-06-20", "high");
        input.project_id = Some("  ".into());
        let request = input.into_create_request(today()).unwrap();
        assert_eq!(request.title, "Write docs");
        assert_eq!(request.priority, TaskPriority::High);
        assert_eq!(request.project_id, None);
    }
}

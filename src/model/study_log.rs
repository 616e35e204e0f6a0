use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A record of one completed study session, optionally linked to a plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudyLog {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub date: NaiveDate,
    /// Session length in minutes.
    pub minutes: u32,
    /// Linked plan, if any. Cleared when the plan is deleted.
    #[serde(default)]
    pub plan_id: Option<Uuid>,
    pub created: DateTime<Utc>,
}

impl StudyLog {
    pub fn new(title: impl Into<String>, date: NaiveDate, minutes: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            content: String::new(),
            date,
            minutes,
            plan_id: None,
            created: Utc::now(),
        }
    }
}

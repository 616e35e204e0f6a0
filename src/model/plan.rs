use chrono::{DateTime, NaiveDate, Utc};
use egui::Color32;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle state of a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlanStatus {
    NotStarted,
    InProgress,
    Completed,
    Canceled,
}

impl PlanStatus {
    pub const ALL: [PlanStatus; 4] = [
        PlanStatus::NotStarted,
        PlanStatus::InProgress,
        PlanStatus::Completed,
        PlanStatus::Canceled,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PlanStatus::NotStarted => "Not Started",
            PlanStatus::InProgress => "In Progress",
            PlanStatus::Completed => "Completed",
            PlanStatus::Canceled => "Canceled",
        }
    }

    /// Parse the loose status spellings that show up in imported files.
    pub fn parse(s: &str) -> Option<PlanStatus> {
        match s.trim().to_lowercase().as_str() {
            "not started" | "not-started" | "notstarted" | "new" | "planned" => {
                Some(PlanStatus::NotStarted)
            }
            "in progress" | "in-progress" | "inprogress" | "active" | "started" => {
                Some(PlanStatus::InProgress)
            }
            "completed" | "complete" | "done" | "finished" => Some(PlanStatus::Completed),
            "canceled" | "cancelled" | "dropped" => Some(PlanStatus::Canceled),
            _ => None,
        }
    }
}

/// A study plan: a goal with a date range, status and progress, optionally
/// nested under a parent plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plan {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub start: NaiveDate,
    /// Inclusive end date. `end >= start` is the caller's responsibility.
    pub end: NaiveDate,
    pub status: PlanStatus,
    /// Progress from 0 to 100.
    pub progress: u8,
    /// Parent plan id; `None` marks a root plan.
    #[serde(default)]
    pub parent_id: Option<Uuid>,
    /// Explicit display color (stored as RGBA). Falls back to a
    /// status/duration-derived color when absent.
    #[serde(with = "color_serde", default)]
    pub color: Option<Color32>,
    /// Owning user. Absent on records written before ownership existed;
    /// backfilled on the next update.
    #[serde(default)]
    pub owner: Option<Uuid>,
    pub created: DateTime<Utc>,
}

impl Plan {
    /// Create a new plan with sensible defaults.
    pub fn new(name: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: String::new(),
            start,
            end,
            status: PlanStatus::NotStarted,
            progress: 0,
            parent_id: None,
            color: None,
            owner: None,
            created: Utc::now(),
        }
    }

    /// Inclusive day span of the plan's range.
    pub fn duration_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// Serde helper for `Option<Color32>`.
mod color_serde {
    use egui::Color32;
    use serde::{self, Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(color: &Option<Color32>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        color
            .map(|c| [c.r(), c.g(), c.b(), c.a()])
            .serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Color32>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let rgba: Option<[u8; 4]> = Deserialize::deserialize(deserializer)?;
        Ok(rgba.map(|[r, g, b, a]| Color32::from_rgba_premultiplied(r, g, b, a)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn new_plan_starts_blank() {
        let plan = Plan::new("Linear Algebra", date(2025, 3, 1), date(2025, 5, 31));
        assert_eq!(plan.status, PlanStatus::NotStarted);
        assert_eq!(plan.progress, 0);
        assert!(plan.parent_id.is_none());
        assert!(plan.color.is_none());
    }

    #[test]
    fn duration_is_inclusive() {
        let plan = Plan::new("One day", date(2025, 1, 10), date(2025, 1, 10));
        assert_eq!(plan.duration_days(), 1);
        let plan = Plan::new("One week", date(2025, 1, 1), date(2025, 1, 7));
        assert_eq!(plan.duration_days(), 7);
    }

    #[test]
    fn status_parsing_accepts_common_spellings() {
        assert_eq!(PlanStatus::parse("In Progress"), Some(PlanStatus::InProgress));
        assert_eq!(PlanStatus::parse("done"), Some(PlanStatus::Completed));
        assert_eq!(PlanStatus::parse("cancelled"), Some(PlanStatus::Canceled));
        assert_eq!(PlanStatus::parse("???"), None);
    }

    #[test]
    fn plan_json_round_trip() {
        let mut plan = Plan::new("Rust book", date(2025, 2, 1), date(2025, 4, 1));
        plan.color = Some(Color32::from_rgb(59, 130, 246));
        plan.progress = 40;
        let json = serde_json::to_string(&plan).unwrap();
        let back: Plan = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, plan.id);
        assert_eq!(back.start, plan.start);
        assert_eq!(back.end, plan.end);
        assert_eq!(back.color, plan.color);
    }
}

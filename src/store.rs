use std::collections::HashMap;

use chrono::NaiveDate;
use egui::Color32;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::model::stats;
use crate::model::{Plan, PlanStatus, PomodoroPatch, PomodoroSettings, Stats, StudyLog};

/// Errors surfaced by the store. `InvalidInput`, `Forbidden` and `NotFound`
/// correspond to the 400/403/404 classes of the repository contract; io and
/// json failures are the 500 class.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("permission denied: {0}")]
    Forbidden(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Input for creating a plan.
#[derive(Debug, Clone)]
pub struct PlanDraft {
    pub name: String,
    pub description: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub color: Option<Color32>,
    pub parent_id: Option<Uuid>,
}

/// Partial plan update; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct PlanPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    /// `Some(None)` clears the explicit color.
    pub color: Option<Option<Color32>>,
    pub status: Option<PlanStatus>,
    pub progress: Option<u8>,
}

/// Input for creating a study log.
#[derive(Debug, Clone)]
pub struct LogDraft {
    pub title: String,
    pub content: String,
    pub date: NaiveDate,
    pub minutes: u32,
    pub plan_id: Option<Uuid>,
}

/// Partial study-log update.
#[derive(Debug, Clone, Default)]
pub struct LogPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub date: Option<NaiveDate>,
    pub minutes: Option<u32>,
    pub plan_id: Option<Option<Uuid>>,
}

/// Serialized form of the whole data file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreData {
    pub user: Uuid,
    pub plans: Vec<Plan>,
    pub logs: Vec<StudyLog>,
    #[serde(default)]
    pub pomodoro: PomodoroSettings,
}

/// In-memory plan repository, scoped to one user.
///
/// Plans and logs live in flat maps keyed by id; child lists are derived
/// from `parent_id` on demand, so there are no nested sub-plan vectors to
/// keep consistent.
pub struct PlanStore {
    user: Uuid,
    plans: HashMap<Uuid, Plan>,
    logs: HashMap<Uuid, StudyLog>,
    pomodoro: PomodoroSettings,
}

impl PlanStore {
    pub fn new(user: Uuid) -> Self {
        Self {
            user,
            plans: HashMap::new(),
            logs: HashMap::new(),
            pomodoro: PomodoroSettings::default(),
        }
    }

    pub fn from_data(data: StoreData) -> Self {
        Self {
            user: data.user,
            plans: data.plans.into_iter().map(|p| (p.id, p)).collect(),
            logs: data.logs.into_iter().map(|l| (l.id, l)).collect(),
            pomodoro: data.pomodoro,
        }
    }

    pub fn to_data(&self) -> StoreData {
        let mut plans: Vec<Plan> = self.plans.values().cloned().collect();
        plans.sort_by_key(|p| (p.created, p.id));
        let mut logs: Vec<StudyLog> = self.logs.values().cloned().collect();
        logs.sort_by_key(|l| (l.created, l.id));
        StoreData {
            user: self.user,
            plans,
            logs,
            pomodoro: self.pomodoro.clone(),
        }
    }

    pub fn user(&self) -> Uuid {
        self.user
    }

    // --- Plans ---

    /// Plans visible to the current user (their own plus ownerless legacy
    /// records), newest created first.
    pub fn plans(&self) -> Vec<&Plan> {
        let mut plans: Vec<&Plan> = self
            .plans
            .values()
            .filter(|p| p.owner.is_none() || p.owner == Some(self.user))
            .collect();
        plans.sort_by(|a, b| b.created.cmp(&a.created).then(a.id.cmp(&b.id)));
        plans
    }

    pub fn plan(&self, id: Uuid) -> Option<&Plan> {
        self.plans.get(&id)
    }

    /// Direct children of a plan, ordered by start date.
    pub fn children_of(&self, id: Uuid) -> Vec<&Plan> {
        let mut children: Vec<&Plan> = self
            .plans
            .values()
            .filter(|p| p.parent_id == Some(id))
            .collect();
        children.sort_by_key(|p| (p.start, p.created));
        children
    }

    pub fn create_plan(&mut self, draft: PlanDraft) -> Result<Uuid, StoreError> {
        let name = draft.name.trim();
        if name.chars().count() < 2 {
            return Err(StoreError::InvalidInput(
                "plan name needs at least 2 characters".into(),
            ));
        }
        if let Some(parent) = draft.parent_id {
            if !self.plans.contains_key(&parent) {
                return Err(StoreError::NotFound(format!("parent plan {parent}")));
            }
        }

        let mut plan = Plan::new(name, draft.start, draft.end);
        plan.description = draft.description;
        plan.color = draft.color;
        plan.parent_id = draft.parent_id;
        plan.owner = Some(self.user);
        let id = plan.id;
        self.plans.insert(id, plan);
        Ok(id)
    }

    pub fn update_plan(&mut self, id: Uuid, patch: PlanPatch) -> Result<(), StoreError> {
        if let Some(name) = &patch.name {
            if name.trim().chars().count() < 2 {
                return Err(StoreError::InvalidInput(
                    "plan name needs at least 2 characters".into(),
                ));
            }
        }
        let user = self.user;
        let plan = self
            .plans
            .get_mut(&id)
            .ok_or_else(|| StoreError::NotFound(format!("plan {id}")))?;
        if let Some(owner) = plan.owner {
            if owner != user {
                return Err(StoreError::Forbidden(format!("plan {id} belongs to another user")));
            }
        }
        // Records from before ownership existed adopt the updating user.
        plan.owner = Some(user);

        if let Some(name) = patch.name {
            plan.name = name.trim().to_string();
        }
        if let Some(description) = patch.description {
            plan.description = description;
        }
        if let Some(start) = patch.start {
            plan.start = start;
        }
        if let Some(end) = patch.end {
            plan.end = end;
        }
        if let Some(color) = patch.color {
            plan.color = color;
        }
        if let Some(status) = patch.status {
            plan.status = status;
        }
        if let Some(progress) = patch.progress {
            plan.progress = progress.min(100);
        }
        Ok(())
    }

    /// Delete a plan and every transitive descendant, detaching study logs
    /// that pointed at any removed plan. Returns how many plans went away.
    pub fn delete_plan(&mut self, id: Uuid) -> Result<usize, StoreError> {
        let plan = self
            .plans
            .get(&id)
            .ok_or_else(|| StoreError::NotFound(format!("plan {id}")))?;
        if let Some(owner) = plan.owner {
            if owner != self.user {
                return Err(StoreError::Forbidden(format!("plan {id} belongs to another user")));
            }
        }

        let doomed = self.collect_subtree(id);
        for plan_id in &doomed {
            self.plans.remove(plan_id);
        }
        for log in self.logs.values_mut() {
            if let Some(plan_id) = log.plan_id {
                if doomed.contains(&plan_id) {
                    log.plan_id = None;
                }
            }
        }
        Ok(doomed.len())
    }

    /// The plan and all of its descendants, collected breadth-first.
    fn collect_subtree(&self, id: Uuid) -> Vec<Uuid> {
        let mut ids = vec![id];
        let mut i = 0;
        while i < ids.len() {
            let current = ids[i];
            ids.extend(
                self.plans
                    .values()
                    .filter(|p| p.parent_id == Some(current))
                    .map(|p| p.id),
            );
            i += 1;
        }
        ids
    }

    /// Bulk-insert plans produced by a CSV import, stamping ownership.
    pub fn import_plans(&mut self, plans: Vec<Plan>) -> usize {
        let count = plans.len();
        for mut plan in plans {
            plan.owner = Some(self.user);
            self.plans.insert(plan.id, plan);
        }
        count
    }

    // --- Study logs ---

    /// All study logs, newest date first.
    pub fn logs(&self) -> Vec<&StudyLog> {
        let mut logs: Vec<&StudyLog> = self.logs.values().collect();
        logs.sort_by(|a, b| b.date.cmp(&a.date).then(b.created.cmp(&a.created)));
        logs
    }

    pub fn log(&self, id: Uuid) -> Option<&StudyLog> {
        self.logs.get(&id)
    }

    pub fn add_log(&mut self, draft: LogDraft) -> Result<Uuid, StoreError> {
        let title = draft.title.trim();
        if title.is_empty() {
            return Err(StoreError::InvalidInput("log title must not be empty".into()));
        }
        if draft.minutes == 0 {
            return Err(StoreError::InvalidInput("duration must be at least 1 minute".into()));
        }
        if let Some(plan_id) = draft.plan_id {
            if !self.plans.contains_key(&plan_id) {
                return Err(StoreError::NotFound(format!("plan {plan_id}")));
            }
        }

        let mut log = StudyLog::new(title, draft.date, draft.minutes);
        log.content = draft.content;
        log.plan_id = draft.plan_id;
        let id = log.id;
        self.logs.insert(id, log);
        Ok(id)
    }

    pub fn update_log(&mut self, id: Uuid, patch: LogPatch) -> Result<(), StoreError> {
        if let Some(title) = &patch.title {
            if title.trim().is_empty() {
                return Err(StoreError::InvalidInput("log title must not be empty".into()));
            }
        }
        if patch.minutes == Some(0) {
            return Err(StoreError::InvalidInput("duration must be at least 1 minute".into()));
        }
        if let Some(Some(plan_id)) = patch.plan_id {
            if !self.plans.contains_key(&plan_id) {
                return Err(StoreError::NotFound(format!("plan {plan_id}")));
            }
        }
        let log = self
            .logs
            .get_mut(&id)
            .ok_or_else(|| StoreError::NotFound(format!("study log {id}")))?;

        if let Some(title) = patch.title {
            log.title = title.trim().to_string();
        }
        if let Some(content) = patch.content {
            log.content = content;
        }
        if let Some(date) = patch.date {
            log.date = date;
        }
        if let Some(minutes) = patch.minutes {
            log.minutes = minutes;
        }
        if let Some(plan_id) = patch.plan_id {
            log.plan_id = plan_id;
        }
        Ok(())
    }

    pub fn delete_log(&mut self, id: Uuid) -> Result<(), StoreError> {
        self.logs
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(format!("study log {id}")))
    }

    // --- Pomodoro ---

    pub fn pomodoro(&self) -> &PomodoroSettings {
        &self.pomodoro
    }

    pub fn update_pomodoro(&mut self, patch: PomodoroPatch) -> Result<(), StoreError> {
        let merged = PomodoroSettings {
            work_minutes: patch.work_minutes.unwrap_or(self.pomodoro.work_minutes),
            break_minutes: patch.break_minutes.unwrap_or(self.pomodoro.break_minutes),
            long_break_minutes: patch
                .long_break_minutes
                .unwrap_or(self.pomodoro.long_break_minutes),
            long_break_interval: patch
                .long_break_interval
                .unwrap_or(self.pomodoro.long_break_interval),
        };
        if merged.work_minutes == 0
            || merged.break_minutes == 0
            || merged.long_break_minutes == 0
            || merged.long_break_interval == 0
        {
            return Err(StoreError::InvalidInput(
                "pomodoro durations and interval must be at least 1".into(),
            ));
        }
        self.pomodoro = merged;
        Ok(())
    }

    // --- Stats ---

    pub fn stats(&self, today: NaiveDate) -> Stats {
        let plans = self.plans();
        let logs = self.logs();
        stats::compute(&plans, &logs, today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn draft(name: &str) -> PlanDraft {
        PlanDraft {
            name: name.into(),
            description: String::new(),
            start: date(2025, 1, 1),
            end: date(2025, 2, 1),
            color: None,
            parent_id: None,
        }
    }

    fn store() -> PlanStore {
        PlanStore::new(Uuid::new_v4())
    }

    #[test]
    fn create_then_fetch_round_trips_the_range() {
        let mut store = store();
        let mut d = draft("Calculus");
        d.start = date(2025, 3, 2);
        d.end = date(2025, 4, 10);
        let id = store.create_plan(d).unwrap();
        let plan = store.plan(id).unwrap();
        assert_eq!(plan.start, date(2025, 3, 2));
        assert_eq!(plan.end, date(2025, 4, 10));
        assert_eq!(plan.status, PlanStatus::NotStarted);
        assert_eq!(plan.progress, 0);
        assert_eq!(plan.owner, Some(store.user()));
    }

    #[test]
    fn short_names_are_rejected() {
        let mut store = store();
        assert!(matches!(
            store.create_plan(draft(" a ")),
            Err(StoreError::InvalidInput(_))
        ));
        let id = store.create_plan(draft("ok")).unwrap();
        assert!(matches!(
            store.update_plan(
                id,
                PlanPatch {
                    name: Some("x".into()),
                    ..Default::default()
                }
            ),
            Err(StoreError::InvalidInput(_))
        ));
    }

    #[test]
    fn creating_under_a_missing_parent_fails() {
        let mut store = store();
        let mut d = draft("orphan");
        d.parent_id = Some(Uuid::new_v4());
        assert!(matches!(store.create_plan(d), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn update_respects_ownership_and_backfills() {
        let mut store = store();
        let id = store.create_plan(draft("mine")).unwrap();

        // Foreign-owned record: forbidden.
        let foreign = Uuid::new_v4();
        let mut stolen = store.plan(id).unwrap().clone();
        stolen.owner = Some(foreign);
        store.plans.insert(id, stolen);
        assert!(matches!(
            store.update_plan(id, PlanPatch::default()),
            Err(StoreError::Forbidden(_))
        ));

        // Ownerless legacy record: update succeeds and adopts the user.
        let mut legacy = store.plan(id).unwrap().clone();
        legacy.owner = None;
        store.plans.insert(id, legacy);
        store
            .update_plan(
                id,
                PlanPatch {
                    progress: Some(150),
                    ..Default::default()
                },
            )
            .unwrap();
        let plan = store.plan(id).unwrap();
        assert_eq!(plan.owner, Some(store.user()));
        assert_eq!(plan.progress, 100); // clamped
    }

    #[test]
    fn update_of_unknown_id_is_not_found() {
        let mut store = store();
        assert!(matches!(
            store.update_plan(Uuid::new_v4(), PlanPatch::default()),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn delete_cascades_and_detaches_logs() {
        let mut store = store();
        let root = store.create_plan(draft("root")).unwrap();
        let mut child_draft = draft("child");
        child_draft.parent_id = Some(root);
        let child = store.create_plan(child_draft).unwrap();
        let mut grand_draft = draft("grandchild");
        grand_draft.parent_id = Some(child);
        let grand = store.create_plan(grand_draft).unwrap();
        let other = store.create_plan(draft("other")).unwrap();

        let attached = store
            .add_log(LogDraft {
                title: "session on grandchild".into(),
                content: String::new(),
                date: date(2025, 1, 5),
                minutes: 50,
                plan_id: Some(grand),
            })
            .unwrap();
        let unrelated = store
            .add_log(LogDraft {
                title: "session elsewhere".into(),
                content: String::new(),
                date: date(2025, 1, 6),
                minutes: 25,
                plan_id: Some(other),
            })
            .unwrap();

        let removed = store.delete_plan(root).unwrap();
        assert_eq!(removed, 3);
        assert!(store.plan(root).is_none());
        assert!(store.plan(child).is_none());
        assert!(store.plan(grand).is_none());
        assert!(store.plan(other).is_some());
        assert_eq!(store.log(attached).unwrap().plan_id, None);
        assert_eq!(store.log(unrelated).unwrap().plan_id, Some(other));
    }

    #[test]
    fn plan_listing_is_scoped_and_newest_first() {
        let mut store = store();
        let a = store.create_plan(draft("first")).unwrap();
        let b = store.create_plan(draft("second")).unwrap();

        // A plan owned by someone else never shows up.
        let mut foreign_plan = Plan::new("foreign", date(2025, 1, 1), date(2025, 1, 2));
        foreign_plan.owner = Some(Uuid::new_v4());
        store.plans.insert(foreign_plan.id, foreign_plan);

        // An ownerless legacy plan does.
        let legacy = Plan::new("legacy", date(2025, 1, 1), date(2025, 1, 2));
        let legacy_id = legacy.id;
        store.plans.insert(legacy_id, legacy);

        let listed: Vec<Uuid> = store.plans().iter().map(|p| p.id).collect();
        assert!(listed.contains(&a));
        assert!(listed.contains(&b));
        assert!(listed.contains(&legacy_id));
        assert_eq!(listed.len(), 3);
        // Creation order was a, b, legacy: listing is reversed.
        assert_eq!(listed[0], legacy_id);
    }

    #[test]
    fn log_validation() {
        let mut store = store();
        let bad_title = LogDraft {
            title: "  ".into(),
            content: String::new(),
            date: date(2025, 1, 1),
            minutes: 30,
            plan_id: None,
        };
        assert!(matches!(
            store.add_log(bad_title),
            Err(StoreError::InvalidInput(_))
        ));

        let dangling = LogDraft {
            title: "reading".into(),
            content: String::new(),
            date: date(2025, 1, 1),
            minutes: 30,
            plan_id: Some(Uuid::new_v4()),
        };
        assert!(matches!(store.add_log(dangling), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn pomodoro_patch_merges_partially() {
        let mut store = store();
        store
            .update_pomodoro(PomodoroPatch {
                work_minutes: Some(25),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(store.pomodoro().work_minutes, 25);
        assert_eq!(store.pomodoro().break_minutes, 5);

        assert!(matches!(
            store.update_pomodoro(PomodoroPatch {
                break_minutes: Some(0),
                ..Default::default()
            }),
            Err(StoreError::InvalidInput(_))
        ));
        // The failed merge left settings untouched.
        assert_eq!(store.pomodoro().break_minutes, 5);
    }

    #[test]
    fn data_round_trip_preserves_records() {
        let mut store = store();
        let root = store.create_plan(draft("root")).unwrap();
        store
            .add_log(LogDraft {
                title: "session".into(),
                content: "notes".into(),
                date: date(2025, 1, 3),
                minutes: 40,
                plan_id: Some(root),
            })
            .unwrap();

        let data = store.to_data();
        let reloaded = PlanStore::from_data(data);
        assert_eq!(reloaded.user(), store.user());
        assert_eq!(reloaded.plans().len(), 1);
        assert_eq!(reloaded.logs().len(), 1);
        assert_eq!(reloaded.logs()[0].plan_id, Some(root));
    }
}

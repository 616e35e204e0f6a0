pub mod plan;
pub mod pomodoro;
pub mod stats;
pub mod study_log;

pub use plan::{Plan, PlanStatus};
pub use pomodoro::{PomodoroPatch, PomodoroSettings, PomodoroTimer, TimerMode, TimerState};
pub use stats::Stats;
pub use study_log::StudyLog;

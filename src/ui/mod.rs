pub mod dialogs;
pub mod plan_editor;
pub mod plan_list;
pub mod pomodoro;
pub mod stats;
pub mod study_log;
pub mod theme;
pub mod timeline;
pub mod toolbar;

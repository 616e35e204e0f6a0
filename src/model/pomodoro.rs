use serde::{Deserialize, Serialize};

/// Per-user pomodoro configuration, merged wholesale via [`PomodoroPatch`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PomodoroSettings {
    /// Work session length in minutes.
    pub work_minutes: u32,
    /// Short break length in minutes.
    pub break_minutes: u32,
    /// Long break length in minutes.
    pub long_break_minutes: u32,
    /// A long break replaces every Nth short break.
    pub long_break_interval: u32,
}

impl Default for PomodoroSettings {
    fn default() -> Self {
        Self {
            work_minutes: 30,
            break_minutes: 5,
            long_break_minutes: 15,
            long_break_interval: 4,
        }
    }
}

/// Partial settings update; `None` fields keep their current value.
#[derive(Debug, Clone, Copy, Default)]
pub struct PomodoroPatch {
    pub work_minutes: Option<u32>,
    pub break_minutes: Option<u32>,
    pub long_break_minutes: Option<u32>,
    pub long_break_interval: Option<u32>,
}

/// What the timer is currently counting down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerMode {
    Work,
    Break,
    LongBreak,
}

impl TimerMode {
    pub fn label(self) -> &'static str {
        match self {
            TimerMode::Work => "Focus",
            TimerMode::Break => "Break",
            TimerMode::LongBreak => "Long Break",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Idle,
    Running,
    Paused,
}

/// Pomodoro countdown state machine. Pure logic: the UI feeds it elapsed
/// seconds and reads the remainder, no wall clock in here.
#[derive(Debug, Clone)]
pub struct PomodoroTimer {
    pub mode: TimerMode,
    pub state: TimerState,
    pub remaining_secs: u32,
    /// Completed work sessions since the timer was created.
    pub completed_sessions: u32,
}

impl PomodoroTimer {
    pub fn new(settings: &PomodoroSettings) -> Self {
        Self {
            mode: TimerMode::Work,
            state: TimerState::Idle,
            remaining_secs: settings.work_minutes * 60,
            completed_sessions: 0,
        }
    }

    /// Full length of the current mode in seconds.
    pub fn total_secs(&self, settings: &PomodoroSettings) -> u32 {
        let minutes = match self.mode {
            TimerMode::Work => settings.work_minutes,
            TimerMode::Break => settings.break_minutes,
            TimerMode::LongBreak => settings.long_break_minutes,
        };
        minutes * 60
    }

    pub fn start(&mut self) {
        if self.remaining_secs > 0 {
            self.state = TimerState::Running;
        }
    }

    pub fn pause(&mut self) {
        if self.state == TimerState::Running {
            self.state = TimerState::Paused;
        }
    }

    /// Advance the countdown. Returns the mode that just finished, if any.
    pub fn tick(&mut self, settings: &PomodoroSettings, elapsed_secs: u32) -> Option<TimerMode> {
        if self.state != TimerState::Running || elapsed_secs == 0 {
            return None;
        }
        if self.remaining_secs > elapsed_secs {
            self.remaining_secs -= elapsed_secs;
            return None;
        }
        let finished = self.mode;
        self.advance(settings);
        Some(finished)
    }

    /// Jump to the next phase as if the current one had finished.
    pub fn skip(&mut self, settings: &PomodoroSettings) -> TimerMode {
        let finished = self.mode;
        self.advance(settings);
        finished
    }

    /// Reset the current mode back to its full length.
    pub fn reset(&mut self, settings: &PomodoroSettings) {
        self.remaining_secs = self.total_secs(settings);
        self.state = TimerState::Idle;
    }

    fn advance(&mut self, settings: &PomodoroSettings) {
        match self.mode {
            TimerMode::Work => {
                self.completed_sessions += 1;
                let interval = settings.long_break_interval.max(1);
                self.mode = if self.completed_sessions % interval == 0 {
                    TimerMode::LongBreak
                } else {
                    TimerMode::Break
                };
            }
            TimerMode::Break | TimerMode::LongBreak => {
                self.mode = TimerMode::Work;
            }
        }
        self.remaining_secs = self.total_secs(settings);
        self.state = TimerState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn work_session_flows_into_break() {
        let settings = PomodoroSettings::default();
        let mut timer = PomodoroTimer::new(&settings);
        timer.start();
        let finished = timer.tick(&settings, settings.work_minutes * 60);
        assert_eq!(finished, Some(TimerMode::Work));
        assert_eq!(timer.mode, TimerMode::Break);
        assert_eq!(timer.state, TimerState::Idle);
        assert_eq!(timer.completed_sessions, 1);
    }

    #[test]
    fn long_break_every_nth_session() {
        let settings = PomodoroSettings {
            long_break_interval: 2,
            ..Default::default()
        };
        let mut timer = PomodoroTimer::new(&settings);

        timer.skip(&settings);
        assert_eq!(timer.mode, TimerMode::Break);
        timer.skip(&settings);
        assert_eq!(timer.mode, TimerMode::Work);
        timer.skip(&settings);
        // Second completed work session hits the interval.
        assert_eq!(timer.mode, TimerMode::LongBreak);
        assert_eq!(timer.remaining_secs, settings.long_break_minutes * 60);
    }

    #[test]
    fn breaks_do_not_count_as_sessions() {
        let settings = PomodoroSettings::default();
        let mut timer = PomodoroTimer::new(&settings);
        timer.skip(&settings); // work -> break
        timer.skip(&settings); // break -> work
        assert_eq!(timer.completed_sessions, 1);
    }

    #[test]
    fn partial_tick_only_counts_down() {
        let settings = PomodoroSettings::default();
        let mut timer = PomodoroTimer::new(&settings);
        timer.start();
        assert_eq!(timer.tick(&settings, 60), None);
        assert_eq!(timer.remaining_secs, settings.work_minutes * 60 - 60);
        assert_eq!(timer.state, TimerState::Running);
    }

    #[test]
    fn tick_while_idle_is_a_no_op() {
        let settings = PomodoroSettings::default();
        let mut timer = PomodoroTimer::new(&settings);
        assert_eq!(timer.tick(&settings, 600), None);
        assert_eq!(timer.remaining_secs, settings.work_minutes * 60);
    }
}

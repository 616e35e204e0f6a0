use chrono::{NaiveDate, Weekday};

use super::plan::{Plan, PlanStatus};
use super::study_log::StudyLog;

/// One day of the 7-day trend, Sunday first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayTrend {
    /// Abbreviated weekday name ("Sun".."Sat").
    pub day: String,
    pub minutes: u32,
}

/// Aggregate numbers for the stats view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stats {
    pub total_minutes: u32,
    pub completed_plans: usize,
    pub in_progress_plans: usize,
    /// Total minutes divided by the inclusive day span between the oldest
    /// and newest log, rounded.
    pub daily_average: u32,
    pub weekly_trend: Vec<DayTrend>,
}

/// Compute stats for the given records. `today` anchors the weekly trend.
pub fn compute(plans: &[&Plan], logs: &[&StudyLog], today: NaiveDate) -> Stats {
    let total_minutes: u32 = logs.iter().map(|log| log.minutes).sum();

    let completed_plans = plans
        .iter()
        .filter(|p| p.status == PlanStatus::Completed)
        .count();
    let in_progress_plans = plans
        .iter()
        .filter(|p| p.status == PlanStatus::InProgress)
        .count();

    let daily_average = match (
        logs.iter().map(|l| l.date).min(),
        logs.iter().map(|l| l.date).max(),
    ) {
        (Some(oldest), Some(newest)) => {
            let span = (newest - oldest).num_days() + 1;
            (total_minutes as f64 / span.max(1) as f64).round() as u32
        }
        _ => 0,
    };

    let week_start = today.week(Weekday::Sun).first_day();
    let weekly_trend = (0..7)
        .map(|i| {
            let day = week_start + chrono::Duration::days(i);
            let minutes = logs
                .iter()
                .filter(|log| log.date == day)
                .map(|log| log.minutes)
                .sum();
            DayTrend {
                day: day.format("%a").to_string(),
                minutes,
            }
        })
        .collect();

    Stats {
        total_minutes,
        completed_plans,
        in_progress_plans,
        daily_average,
        weekly_trend,
    }
}

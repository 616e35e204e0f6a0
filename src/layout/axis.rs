use chrono::{Datelike, NaiveDate};

/// Default width of one quarter cell in pixels.
pub const DEFAULT_CELL_WIDTH: f32 = 300.0;

/// One quarter of one year on the horizontal axis. Derived from the axis
/// configuration, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct QuarterCell {
    pub year: i32,
    /// Quarter number, 1..=4.
    pub quarter: u32,
    /// Calendar months covered by this quarter, e.g. `[1, 2, 3]`.
    pub months: [u32; 3],
    /// Pixel x of the cell's left edge.
    pub origin: f32,
    pub width: f32,
}

impl QuarterCell {
    pub fn label(&self) -> String {
        format!("Q{}", self.quarter)
    }
}

/// Which end of a date range is being mapped. Start dates sit at the
/// beginning of their day, end dates at the end of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Start,
    End,
}

/// A date resolved onto the axis: cell ordinal plus fractional offset
/// within that cell (0..=1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellPos {
    pub cell: usize,
    pub frac: f32,
}

/// The fixed quarter-based horizontal axis: a configured span of years,
/// four cells per year, every cell the same width.
#[derive(Debug, Clone, PartialEq)]
pub struct QuarterAxis {
    pub start_year: i32,
    pub years: i32,
    pub cell_width: f32,
}

impl Default for QuarterAxis {
    fn default() -> Self {
        Self::new(2025, 5, DEFAULT_CELL_WIDTH)
    }
}

impl QuarterAxis {
    pub fn new(start_year: i32, years: i32, cell_width: f32) -> Self {
        Self {
            start_year,
            years,
            cell_width,
        }
    }

    pub fn cell_count(&self) -> usize {
        self.years.max(0) as usize * 4
    }

    pub fn total_width(&self) -> f32 {
        self.cell_count() as f32 * self.cell_width
    }

    /// Every (year, quarter) cell of the axis, left to right.
    pub fn cells(&self) -> Vec<QuarterCell> {
        (0..self.cell_count())
            .map(|i| {
                let year = self.start_year + (i / 4) as i32;
                let quarter = (i % 4) as u32 + 1;
                let first_month = (quarter - 1) * 3 + 1;
                QuarterCell {
                    year,
                    quarter,
                    months: [first_month, first_month + 1, first_month + 2],
                    origin: i as f32 * self.cell_width,
                    width: self.cell_width,
                }
            })
            .collect()
    }

    /// Map a date onto the axis. A date whose year falls outside the
    /// configured range is not renderable and maps to `None`; callers skip
    /// drawing such plans.
    pub fn locate(&self, date: NaiveDate, bound: Bound) -> Option<CellPos> {
        let year = date.year();
        if year < self.start_year || year >= self.start_year + self.years {
            return None;
        }
        let month = date.month(); // 1..=12
        let quarter = (month - 1) / 3;
        let month_in_quarter = (month - 1) % 3;
        let cell = (year - self.start_year) as usize * 4 + quarter as usize;

        // Day fraction uses the actual length of this month, not a fixed
        // 30-day month; short months would otherwise drift.
        let days = days_in_month(year, month) as f32;
        let day_frac = match bound {
            Bound::Start => (date.day() - 1) as f32 / days,
            Bound::End => date.day() as f32 / days,
        };
        let frac = (month_in_quarter as f32 + day_frac) / 3.0;
        Some(CellPos { cell, frac })
    }

    /// Absolute pixel x for a date, if renderable.
    pub fn x_of(&self, date: NaiveDate, bound: Bound) -> Option<f32> {
        self.locate(date, bound)
            .map(|pos| pos.cell as f32 * self.cell_width + pos.frac * self.cell_width)
    }
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(30)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn cells_cover_the_configured_years() {
        let axis = QuarterAxis::default();
        let cells = axis.cells();
        assert_eq!(cells.len(), 20);
        assert_eq!(cells[0].year, 2025);
        assert_eq!(cells[0].months, [1, 2, 3]);
        assert_eq!(cells[4].year, 2026);
        assert_eq!(cells[19].quarter, 4);
        assert_eq!(cells[1].origin, 300.0);
    }

    #[test]
    fn first_day_of_axis_maps_to_zero() {
        let axis = QuarterAxis::default();
        let pos = axis.locate(date(2025, 1, 1), Bound::Start).unwrap();
        assert_eq!(pos.cell, 0);
        assert_eq!(pos.frac, 0.0);
    }

    #[test]
    fn quarter_and_year_select_the_cell() {
        let axis = QuarterAxis::default();
        assert_eq!(axis.locate(date(2025, 5, 15), Bound::Start).unwrap().cell, 1);
        assert_eq!(axis.locate(date(2026, 10, 1), Bound::Start).unwrap().cell, 7);
    }

    #[test]
    fn day_fraction_respects_month_length() {
        let axis = QuarterAxis::default();
        // Feb 2025 has 28 days: the 15th starts 14/28 of the way through the
        // middle month of Q1.
        let pos = axis.locate(date(2025, 2, 15), Bound::Start).unwrap();
        let expected = (1.0 + 14.0 / 28.0) / 3.0;
        assert!((pos.frac - expected).abs() < 1e-6);

        // End bound counts the full day.
        let pos = axis.locate(date(2025, 2, 28), Bound::End).unwrap();
        assert!((pos.frac - 2.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn out_of_range_years_are_not_renderable() {
        let axis = QuarterAxis::default();
        assert_eq!(axis.locate(date(2024, 12, 31), Bound::Start), None);
        assert_eq!(axis.locate(date(2030, 1, 1), Bound::End), None);
        assert!(axis.locate(date(2029, 12, 31), Bound::End).is_some());
    }

    #[test]
    fn locate_is_deterministic() {
        let axis = QuarterAxis::new(2024, 3, 120.0);
        let a = axis.locate(date(2025, 7, 9), Bound::End);
        let b = axis.locate(date(2025, 7, 9), Bound::End);
        assert_eq!(a, b);
    }
}

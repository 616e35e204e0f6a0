use chrono::NaiveDate;

use super::axis::{Bound, QuarterAxis};

/// Narrowest a bar is allowed to render; keeps zero-duration plans visible.
pub const MIN_BAR_WIDTH: f32 = 10.0;

/// Horizontal extent of one plan bar in axis pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarSpan {
    pub left: f32,
    pub width: f32,
}

impl BarSpan {
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    /// Closed-interval collision test: touching edges count as overlap.
    pub fn overlaps(&self, other: &BarSpan) -> bool {
        self.left <= other.right() && other.left <= self.right()
    }
}

/// Compute the bar for a date range, spanning quarter cells as needed.
/// `None` when either endpoint falls off the axis; the plan is then skipped.
pub fn bar_span(axis: &QuarterAxis, start: NaiveDate, end: NaiveDate) -> Option<BarSpan> {
    let s = axis.locate(start, Bound::Start)?;
    let e = axis.locate(end, Bound::End)?;
    let w = axis.cell_width;

    let left = s.cell as f32 * w + s.frac * w;
    let width = if s.cell == e.cell {
        if start == end {
            MIN_BAR_WIDTH
        } else {
            (e.frac - s.frac) * w
        }
    } else {
        (e.cell as f32 - s.cell as f32) * w + e.frac * w - s.frac * w
    };

    Some(BarSpan {
        left,
        width: width.max(MIN_BAR_WIDTH),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn axis() -> QuarterAxis {
        QuarterAxis::default()
    }

    #[test]
    fn single_day_plan_gets_minimum_width() {
        // 2025-01-10, both ends: Q1 cell, day-10 offset.
        let span = bar_span(&axis(), date(2025, 1, 10), date(2025, 1, 10)).unwrap();
        assert_eq!(span.width, MIN_BAR_WIDTH);
        let expected_left = (9.0 / 31.0) / 3.0 * 300.0;
        assert!((span.left - expected_left).abs() < 1e-3);
    }

    #[test]
    fn same_cell_width_is_the_fraction_difference() {
        let span = bar_span(&axis(), date(2025, 1, 1), date(2025, 3, 31)).unwrap();
        assert!((span.left - 0.0).abs() < 1e-6);
        // Full quarter: end fraction is 1.0.
        assert!((span.width - 300.0).abs() < 1e-3);
    }

    #[test]
    fn quarter_crossing_span_uses_the_multi_cell_formula() {
        // Feb 15 -> May 15 crosses from Q1 into Q2.
        let a = axis();
        let span = bar_span(&a, date(2025, 2, 15), date(2025, 5, 15)).unwrap();
        let s = a.locate(date(2025, 2, 15), Bound::Start).unwrap();
        let e = a.locate(date(2025, 5, 15), Bound::End).unwrap();
        assert_eq!(s.cell, 0);
        assert_eq!(e.cell, 1);
        assert!(span.left > 0.0 && span.left < 300.0);
        let expected = 300.0 + e.frac * 300.0 - s.frac * 300.0;
        assert!((span.width - expected).abs() < 1e-3);
        // The bar reaches into the second cell.
        assert!(span.right() > 300.0);
    }

    #[test]
    fn width_never_collapses_below_minimum() {
        // Two consecutive days late in a long month make a sliver of a few px.
        let span = bar_span(&axis(), date(2025, 1, 30), date(2025, 1, 31)).unwrap();
        assert!(span.width >= MIN_BAR_WIDTH);
    }

    #[test]
    fn off_axis_dates_yield_no_bar() {
        assert!(bar_span(&axis(), date(2024, 6, 1), date(2024, 6, 30)).is_none());
        assert!(bar_span(&axis(), date(2029, 12, 1), date(2030, 1, 5)).is_none());
    }

    #[test]
    fn touching_bars_count_as_overlapping() {
        let a = BarSpan { left: 0.0, width: 50.0 };
        let b = BarSpan { left: 50.0, width: 50.0 };
        let c = BarSpan { left: 101.0, width: 10.0 };
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
    }
}

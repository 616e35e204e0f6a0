use super::bar::BarSpan;

/// First-fit row assignment: each span lands in the lowest row where it
/// collides with nothing already placed, under the closed-interval test.
/// Input order is placement order, so callers sort by start date first
/// (ties keep their original order).
pub fn assign_rows(spans: &[BarSpan]) -> Vec<usize> {
    let mut rows: Vec<Vec<BarSpan>> = Vec::new();
    let mut assigned = Vec::with_capacity(spans.len());

    for span in spans {
        let row = rows
            .iter()
            .position(|row| row.iter().all(|placed| !placed.overlaps(span)))
            .unwrap_or(rows.len());
        if row == rows.len() {
            rows.push(Vec::new());
        }
        rows[row].push(*span);
        assigned.push(row);
    }

    assigned
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(left: f32, width: f32) -> BarSpan {
        BarSpan { left, width }
    }

    #[test]
    fn disjoint_spans_share_row_zero() {
        let rows = assign_rows(&[span(0.0, 40.0), span(100.0, 40.0), span(200.0, 40.0)]);
        assert_eq!(rows, vec![0, 0, 0]);
    }

    #[test]
    fn overlapping_spans_split_into_rows() {
        let rows = assign_rows(&[span(0.0, 100.0), span(50.0, 100.0)]);
        assert_eq!(rows, vec![0, 1]);
    }

    #[test]
    fn first_fit_reuses_the_lowest_free_row() {
        // Third span overlaps the second but not the first.
        let rows = assign_rows(&[span(0.0, 40.0), span(20.0, 100.0), span(60.0, 30.0)]);
        assert_eq!(rows, vec![0, 1, 0]);
    }

    #[test]
    fn touching_spans_are_pushed_apart() {
        // Closed-interval test: a span ending exactly where the next starts
        // still collides.
        let rows = assign_rows(&[span(0.0, 50.0), span(50.0, 50.0)]);
        assert_eq!(rows, vec![0, 1]);
    }

    #[test]
    fn no_same_row_overlap_ever() {
        let spans = [
            span(0.0, 80.0),
            span(10.0, 30.0),
            span(70.0, 50.0),
            span(130.0, 10.0),
            span(85.0, 10.0),
        ];
        let rows = assign_rows(&spans);
        for i in 0..spans.len() {
            for j in (i + 1)..spans.len() {
                if rows[i] == rows[j] {
                    assert!(!spans[i].overlaps(&spans[j]));
                }
            }
        }
    }
}

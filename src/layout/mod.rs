pub mod axis;
pub mod bar;
pub mod pack;

pub use axis::{Bound, QuarterAxis, QuarterCell};
pub use bar::{bar_span, BarSpan, MIN_BAR_WIDTH};

use std::collections::{HashMap, HashSet};

use uuid::Uuid;

use crate::model::Plan;

/// Row metrics in pixels. Root plans get the tall rows, every nested level
/// shares the compact ones.
pub const ROOT_ROW_HEIGHT: f32 = 40.0;
pub const ROOT_ROW_SPACING: f32 = 12.0;
pub const SUB_ROW_HEIGHT: f32 = 34.0;
pub const SUB_ROW_SPACING: f32 = 4.0;

/// One plan bar placed on the timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedBar {
    pub id: Uuid,
    /// 0 for roots, +1 per nesting level.
    pub depth: usize,
    /// Row index within this bar's packing group.
    pub row: usize,
    pub left: f32,
    pub width: f32,
    pub top: f32,
    pub height: f32,
    pub has_children: bool,
}

/// Complete geometry for one render pass. Rebuilt from scratch on every
/// plan-list change or expand/collapse toggle; nothing in here survives a
/// recomputation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimelineLayout {
    pub bars: Vec<PlacedBar>,
    /// Total pixel height consumed by all visible rows.
    pub height: f32,
}

/// Compute the full timeline placement for `plans`.
///
/// Roots are processed in ascending start order and each takes a dedicated
/// row; no packing is attempted between them. Children are packed first-fit
/// per parent, and the subtree of an expanded child is inserted directly
/// below its row, pushing everything after it further down. Collapsed
/// subtrees contribute no height at all, so the pass is linear in the
/// number of visible nodes.
pub fn arrange(plans: &[&Plan], axis: &QuarterAxis, expanded: &HashSet<Uuid>) -> TimelineLayout {
    let mut by_parent: HashMap<Uuid, Vec<&Plan>> = HashMap::new();
    let mut roots: Vec<&Plan> = Vec::new();
    for plan in plans {
        match plan.parent_id {
            Some(parent) => by_parent.entry(parent).or_default().push(plan),
            None => roots.push(plan),
        }
    }
    // Stable sorts: plans sharing a start date keep their input order.
    roots.sort_by_key(|p| p.start);
    for children in by_parent.values_mut() {
        children.sort_by_key(|p| p.start);
    }

    let mut layout = TimelineLayout::default();
    let mut cursor = 0.0;

    for (ordinal, root) in roots.iter().enumerate() {
        // An unrenderable root hides its whole subtree.
        let Some(span) = bar_span(axis, root.start, root.end) else {
            continue;
        };
        layout.bars.push(PlacedBar {
            id: root.id,
            depth: 0,
            row: ordinal,
            left: span.left,
            width: span.width,
            top: cursor,
            height: ROOT_ROW_HEIGHT,
            has_children: by_parent.contains_key(&root.id),
        });
        cursor += ROOT_ROW_HEIGHT + ROOT_ROW_SPACING;
        if expanded.contains(&root.id) {
            place_children(root.id, 1, &by_parent, axis, expanded, &mut layout.bars, &mut cursor);
        }
    }

    layout.height = cursor;
    layout
}

fn place_children(
    parent: Uuid,
    depth: usize,
    by_parent: &HashMap<Uuid, Vec<&Plan>>,
    axis: &QuarterAxis,
    expanded: &HashSet<Uuid>,
    bars: &mut Vec<PlacedBar>,
    cursor: &mut f32,
) {
    let Some(children) = by_parent.get(&parent) else {
        return;
    };

    let placed: Vec<(&Plan, BarSpan)> = children
        .iter()
        .filter_map(|plan| bar_span(axis, plan.start, plan.end).map(|span| (*plan, span)))
        .collect();
    if placed.is_empty() {
        return;
    }

    let spans: Vec<BarSpan> = placed.iter().map(|(_, span)| *span).collect();
    let rows = pack::assign_rows(&spans);
    let row_count = rows.iter().max().map_or(0, |max| max + 1);

    for row in 0..row_count {
        let row_top = *cursor;
        *cursor += SUB_ROW_HEIGHT + SUB_ROW_SPACING;
        for (i, (plan, span)) in placed.iter().enumerate() {
            if rows[i] != row {
                continue;
            }
            bars.push(PlacedBar {
                id: plan.id,
                depth,
                row,
                left: span.left,
                width: span.width,
                top: row_top,
                height: SUB_ROW_HEIGHT,
                has_children: by_parent.contains_key(&plan.id),
            });
        }
        // Expanded members of this row nest directly beneath it.
        for (i, (plan, _)) in placed.iter().enumerate() {
            if rows[i] == row && expanded.contains(&plan.id) {
                place_children(plan.id, depth + 1, by_parent, axis, expanded, bars, cursor);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn plan(name: &str, start: NaiveDate, end: NaiveDate) -> Plan {
        Plan::new(name, start, end)
    }

    fn child_of(parent: &Plan, name: &str, start: NaiveDate, end: NaiveDate) -> Plan {
        let mut p = Plan::new(name, start, end);
        p.parent_id = Some(parent.id);
        p
    }

    fn refs(plans: &[Plan]) -> Vec<&Plan> {
        plans.iter().collect()
    }

    fn bar_of<'a>(layout: &'a TimelineLayout, id: Uuid) -> &'a PlacedBar {
        layout.bars.iter().find(|b| b.id == id).unwrap()
    }

    fn span_of(bar: &PlacedBar) -> BarSpan {
        BarSpan {
            left: bar.left,
            width: bar.width,
        }
    }

    #[test]
    fn roots_always_get_their_own_row() {
        // Disjoint ranges would pack into one row; roots must not.
        let a = plan("a", date(2025, 1, 1), date(2025, 1, 31));
        let b = plan("b", date(2025, 6, 1), date(2025, 6, 30));
        let plans = vec![a, b];
        let layout = arrange(&refs(&plans), &QuarterAxis::default(), &HashSet::new());
        assert_eq!(layout.bars.len(), 2);
        assert_eq!(layout.bars[0].top, 0.0);
        assert_eq!(layout.bars[1].top, ROOT_ROW_HEIGHT + ROOT_ROW_SPACING);
        assert_eq!(layout.height, 2.0 * (ROOT_ROW_HEIGHT + ROOT_ROW_SPACING));
    }

    #[test]
    fn roots_order_by_start_date() {
        let late = plan("late", date(2025, 8, 1), date(2025, 9, 1));
        let early = plan("early", date(2025, 2, 1), date(2025, 3, 1));
        let plans = vec![late, early];
        let layout = arrange(&refs(&plans), &QuarterAxis::default(), &HashSet::new());
        assert_eq!(layout.bars[0].id, plans[1].id);
        assert_eq!(layout.bars[1].id, plans[0].id);
    }

    #[test]
    fn collapsed_children_are_invisible_and_weightless() {
        let root = plan("root", date(2025, 1, 1), date(2025, 3, 1));
        let kid = child_of(&root, "kid", date(2025, 1, 5), date(2025, 2, 1));
        let plans = vec![root, kid];
        let layout = arrange(&refs(&plans), &QuarterAxis::default(), &HashSet::new());
        assert_eq!(layout.bars.len(), 1);
        assert_eq!(layout.height, ROOT_ROW_HEIGHT + ROOT_ROW_SPACING);
    }

    #[test]
    fn overlapping_siblings_split_into_rows_zero_and_one() {
        let root = plan("root", date(2025, 1, 1), date(2025, 6, 30));
        let a = child_of(&root, "a", date(2025, 1, 10), date(2025, 2, 20));
        let b = child_of(&root, "b", date(2025, 2, 1), date(2025, 3, 15));
        let mut expanded = HashSet::new();
        expanded.insert(root.id);
        let plans = vec![root, a, b];
        let layout = arrange(&refs(&plans), &QuarterAxis::default(), &expanded);

        let bar_a = bar_of(&layout, plans[1].id);
        let bar_b = bar_of(&layout, plans[2].id);
        assert_eq!(bar_a.row, 0);
        assert_eq!(bar_b.row, 1);
        assert_eq!(bar_b.top - bar_a.top, SUB_ROW_HEIGHT + SUB_ROW_SPACING);
    }

    #[test]
    fn same_row_siblings_never_overlap() {
        let root = plan("root", date(2025, 1, 1), date(2025, 12, 31));
        let mut plans = vec![root.clone()];
        for m in 1..=6 {
            plans.push(child_of(
                &root,
                "c",
                date(2025, m, 1),
                date(2025, m, 20),
            ));
        }
        let mut expanded = HashSet::new();
        expanded.insert(root.id);
        let layout = arrange(&refs(&plans), &QuarterAxis::default(), &expanded);
        let kids: Vec<&PlacedBar> = layout.bars.iter().filter(|b| b.depth == 1).collect();
        for a in &kids {
            for b in &kids {
                if a.id != b.id && a.row == b.row {
                    assert!(!span_of(a).overlaps(&span_of(b)));
                }
            }
        }
    }

    #[test]
    fn expanded_grandchild_stacks_below_its_child() {
        let root = plan("root", date(2025, 1, 1), date(2025, 6, 30));
        let kid = child_of(&root, "kid", date(2025, 1, 10), date(2025, 4, 1));
        let grandkid = child_of(&kid, "grandkid", date(2025, 2, 1), date(2025, 3, 1));
        let mut expanded = HashSet::new();
        expanded.insert(root.id);
        expanded.insert(kid.id);
        let plans = vec![root, kid, grandkid];
        let layout = arrange(&refs(&plans), &QuarterAxis::default(), &expanded);

        assert_eq!(layout.bars.len(), 3);
        let kid_bar = bar_of(&layout, plans[1].id);
        let grand_bar = bar_of(&layout, plans[2].id);
        assert_eq!(kid_bar.top, ROOT_ROW_HEIGHT + ROOT_ROW_SPACING);
        assert_eq!(grand_bar.top, kid_bar.top + SUB_ROW_HEIGHT + SUB_ROW_SPACING);
        assert_eq!(grand_bar.depth, 2);
        // Root + one child row + one grandchild row.
        let expected = ROOT_ROW_HEIGHT + ROOT_ROW_SPACING + 2.0 * (SUB_ROW_HEIGHT + SUB_ROW_SPACING);
        assert_eq!(layout.height, expected);
    }

    #[test]
    fn root_offset_delta_equals_bar_plus_subtree_height() {
        let first = plan("first", date(2025, 1, 1), date(2025, 3, 1));
        let a = child_of(&first, "a", date(2025, 1, 5), date(2025, 2, 1));
        let b = child_of(&first, "b", date(2025, 1, 10), date(2025, 2, 10));
        let second = plan("second", date(2025, 4, 1), date(2025, 5, 1));
        let mut expanded = HashSet::new();
        expanded.insert(first.id);
        let plans = vec![first, a, b, second];
        let layout = arrange(&refs(&plans), &QuarterAxis::default(), &expanded);

        // a and b overlap -> two child rows under the first root.
        let subtree = 2.0 * (SUB_ROW_HEIGHT + SUB_ROW_SPACING);
        let first_bar = bar_of(&layout, plans[0].id);
        let second_bar = bar_of(&layout, plans[3].id);
        assert_eq!(
            second_bar.top - first_bar.top,
            ROOT_ROW_HEIGHT + ROOT_ROW_SPACING + subtree
        );
    }

    #[test]
    fn collapse_restores_the_exact_previous_height() {
        let root = plan("root", date(2025, 1, 1), date(2025, 6, 30));
        let kid = child_of(&root, "kid", date(2025, 1, 10), date(2025, 4, 1));
        let plans = vec![root, kid];
        let axis = QuarterAxis::default();

        let collapsed = arrange(&refs(&plans), &axis, &HashSet::new());
        let mut expanded = HashSet::new();
        expanded.insert(plans[0].id);
        let open = arrange(&refs(&plans), &axis, &expanded);
        assert_eq!(
            open.height - collapsed.height,
            SUB_ROW_HEIGHT + SUB_ROW_SPACING
        );

        // Collapsing again is a pure function of the state: identical output.
        let collapsed_again = arrange(&refs(&plans), &axis, &HashSet::new());
        assert_eq!(collapsed_again, collapsed);
    }

    #[test]
    fn expanding_a_childless_plan_changes_nothing() {
        let root = plan("root", date(2025, 1, 1), date(2025, 2, 1));
        let plans = vec![root];
        let axis = QuarterAxis::default();
        let mut expanded = HashSet::new();
        expanded.insert(plans[0].id);
        assert_eq!(
            arrange(&refs(&plans), &axis, &expanded),
            arrange(&refs(&plans), &axis, &HashSet::new())
        );
    }

    #[test]
    fn out_of_range_plans_are_skipped() {
        let visible = plan("visible", date(2025, 1, 1), date(2025, 2, 1));
        let outside = plan("outside", date(2031, 1, 1), date(2031, 2, 1));
        let plans = vec![visible, outside];
        let layout = arrange(&refs(&plans), &QuarterAxis::default(), &HashSet::new());
        assert_eq!(layout.bars.len(), 1);
        assert_eq!(layout.bars[0].id, plans[0].id);
        assert_eq!(layout.height, ROOT_ROW_HEIGHT + ROOT_ROW_SPACING);
    }
}

use std::collections::HashMap;
use std::path::Path;

use chrono::NaiveDate;
use tracing::warn;
use uuid::Uuid;

use crate::model::{Plan, PlanStatus};
use crate::store::StoreError;

/// Try parsing a date string with several common formats.
fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    for fmt in &[
        "%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y", "%d-%m-%Y", "%d.%m.%Y", "%Y/%m/%d", "%m-%d-%Y",
    ] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    None
}

/// Detect delimiter by checking the first line for common separators.
fn detect_delimiter(first_line: &str) -> u8 {
    let semicolons = first_line.matches(';').count();
    let commas = first_line.matches(',').count();
    let tabs = first_line.matches('\t').count();

    if semicolons >= commas && semicolons >= tabs {
        b';'
    } else if tabs >= commas {
        b'\t'
    } else {
        b','
    }
}

fn normalize_header(h: &str) -> String {
    h.trim().to_lowercase().replace([' ', '-', '_'], "")
}

/// Map a normalized header to our column index:
///   0 = name, 1 = start, 2 = end, 3 = status, 4 = progress,
///   5 = description, 6 = parent
fn header_to_col(normalized: &str) -> Option<usize> {
    match normalized {
        "name" | "plan" | "planname" | "title" | "label" | "goal" => Some(0),

        "start" | "startdate" | "from" | "begin" | "begindate" => Some(1),

        "end" | "enddate" | "to" | "finish" | "finishdate" | "due" | "duedate" => Some(2),

        "status" | "state" | "stage" => Some(3),

        "progress" | "done" | "percent" | "percentage" => Some(4),

        "description" | "notes" | "note" | "details" | "comment" | "comments" => Some(5),

        "parent" | "parentplan" | "parentname" | "subplanof" => Some(6),

        _ => None,
    }
}

/// Import plans from a CSV file.
///
/// Auto-detects delimiter (comma, semicolon, tab) and matches column headers
/// flexibly (e.g. "Plan Name", "Start Date"). Parent columns hold plan
/// names, resolved to ids in a second pass once every row is read.
/// Returns `(plans, skipped_row_count)`.
pub fn import_plans(path: &Path) -> Result<(Vec<Plan>, usize), StoreError> {
    let content = std::fs::read_to_string(path)?;

    let first_line = content.lines().next().unwrap_or("");
    let delimiter = detect_delimiter(first_line);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| StoreError::InvalidInput(format!("failed to read CSV headers: {e}")))?
        .clone();

    let col_map: Vec<Option<usize>> = headers
        .iter()
        .map(|h| header_to_col(&normalize_header(h)))
        .collect();

    let has_name = col_map.iter().any(|c| *c == Some(0));
    let has_start = col_map.iter().any(|c| *c == Some(1));
    let has_end = col_map.iter().any(|c| *c == Some(2));
    if !has_name || !has_start || !has_end {
        let found: Vec<&str> = headers.iter().collect();
        return Err(StoreError::InvalidInput(format!(
            "CSV is missing required columns. Found headers: {found:?}. \
             Need columns for: plan name, start date, end date."
        )));
    }

    // Accumulate (plan, optional parent name) pairs; parents resolve later.
    let mut plans: Vec<Plan> = Vec::new();
    let mut parent_names: Vec<Option<String>> = Vec::new();
    let mut skipped = 0usize;

    for (i, result) in reader.records().enumerate() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                warn!(row = i + 2, "skipping malformed CSV row: {e}");
                skipped += 1;
                continue;
            }
        };

        let mut fields: [Option<String>; 7] = Default::default();
        for (col_idx, field) in record.iter().enumerate() {
            if let Some(Some(slot)) = col_map.get(col_idx) {
                fields[*slot] = Some(field.trim().to_string());
            }
        }
        let [name, start, end, status, progress, description, parent] = fields;

        let name = match name {
            Some(n) if n.chars().count() >= 2 => n,
            _ => {
                skipped += 1;
                continue;
            }
        };

        let Some(start) = start.as_deref().and_then(parse_date) else {
            warn!(row = i + 2, "skipping row with invalid start date");
            skipped += 1;
            continue;
        };
        let Some(end) = end.as_deref().and_then(parse_date) else {
            warn!(row = i + 2, "skipping row with invalid end date");
            skipped += 1;
            continue;
        };

        let mut plan = Plan::new(name, start, end.max(start));
        if let Some(status) = status.as_deref().and_then(PlanStatus::parse) {
            plan.status = status;
        }
        if let Some(progress) = progress.as_deref().and_then(|p| p.trim_end_matches('%').trim().parse::<u8>().ok()) {
            plan.progress = progress.min(100);
        }
        plan.description = description.unwrap_or_default();

        parent_names.push(parent.filter(|s| !s.is_empty()));
        plans.push(plan);
    }

    if plans.is_empty() {
        return Err(StoreError::InvalidInput(if skipped > 0 {
            format!("no valid plans found in CSV ({skipped} rows skipped)")
        } else {
            "CSV file is empty or has no data rows".to_string()
        }));
    }

    // Second pass: resolve parent names to ids.
    let name_to_id: HashMap<String, Uuid> = plans
        .iter()
        .map(|p| (p.name.to_lowercase(), p.id))
        .collect();

    for (plan, parent_name) in plans.iter_mut().zip(parent_names.iter()) {
        if let Some(pname) = parent_name {
            match name_to_id.get(&pname.to_lowercase()) {
                // A plan must not parent itself.
                Some(&pid) if pid != plan.id => plan.parent_id = Some(pid),
                Some(_) => {}
                None => warn!("parent plan '{pname}' not found for '{}'", plan.name),
            }
        }
    }

    Ok((plans, skipped))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plans.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        (dir, path)
    }

    #[test]
    fn imports_basic_rows() {
        let (_dir, path) = write_csv(
            "Name,Start Date,End Date,Status,Progress\n\
             Algorithms,2025-01-01,2025-03-31,In Progress,40\n\
             Databases,2025-04-01,2025-06-30,Not Started,0\n",
        );
        let (plans, skipped) = import_plans(&path).unwrap();
        assert_eq!(plans.len(), 2);
        assert_eq!(skipped, 0);
        assert_eq!(plans[0].name, "Algorithms");
        assert_eq!(plans[0].status, PlanStatus::InProgress);
        assert_eq!(plans[0].progress, 40);
        assert_eq!(plans[1].start, NaiveDate::from_ymd_opt(2025, 4, 1).unwrap());
    }

    #[test]
    fn detects_semicolons_and_alternate_date_formats() {
        let (_dir, path) = write_csv(
            "Plan Name;From;To\n\
             Deep Work;01/02/2025;28/02/2025\n",
        );
        let (plans, _) = import_plans(&path).unwrap();
        assert_eq!(plans[0].start, NaiveDate::from_ymd_opt(2025, 2, 1).unwrap());
        assert_eq!(plans[0].end, NaiveDate::from_ymd_opt(2025, 2, 28).unwrap());
    }

    #[test]
    fn resolves_parent_names_in_second_pass() {
        let (_dir, path) = write_csv(
            "Name,Start,End,Parent\n\
             Child,2025-01-10,2025-01-20,Semester\n\
             Semester,2025-01-01,2025-06-30,\n",
        );
        let (plans, _) = import_plans(&path).unwrap();
        let semester = plans.iter().find(|p| p.name == "Semester").unwrap();
        let child = plans.iter().find(|p| p.name == "Child").unwrap();
        assert_eq!(child.parent_id, Some(semester.id));
        assert_eq!(semester.parent_id, None);
    }

    #[test]
    fn a_plan_cannot_parent_itself() {
        let (_dir, path) = write_csv(
            "Name,Start,End,Parent\n\
             Loop,2025-01-01,2025-01-05,Loop\n",
        );
        let (plans, _) = import_plans(&path).unwrap();
        assert_eq!(plans[0].parent_id, None);
    }

    #[test]
    fn bad_rows_are_counted_not_fatal() {
        let (_dir, path) = write_csv(
            "Name,Start,End\n\
             Good,2025-01-01,2025-01-05\n\
             Bad,not-a-date,2025-01-05\n\
             X,2025-01-01,2025-01-05\n",
        );
        let (plans, skipped) = import_plans(&path).unwrap();
        assert_eq!(plans.len(), 1);
        // One invalid date, one single-character name.
        assert_eq!(skipped, 2);
    }

    #[test]
    fn missing_required_columns_is_invalid_input() {
        let (_dir, path) = write_csv("Name,Notes\nSolo,hello\n");
        assert!(matches!(
            import_plans(&path),
            Err(StoreError::InvalidInput(_))
        ));
    }
}

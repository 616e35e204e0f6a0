use std::collections::HashMap;
use std::path::Path;

use uuid::Uuid;

use crate::model::Plan;
use crate::store::StoreError;

/// Export plans to a semicolon-delimited CSV file matching the import
/// format. Parents are written by name so the file survives a re-import.
/// Dates are ISO (YYYY-MM-DD). Returns the number of plans written.
pub fn export_plans(plans: &[&Plan], path: &Path) -> Result<usize, StoreError> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .from_path(path)
        .map_err(|e| StoreError::InvalidInput(format!("failed to create CSV file: {e}")))?;

    wtr.write_record(["Name", "Start", "End", "Status", "Progress", "Parent"])
        .map_err(|e| StoreError::InvalidInput(format!("failed to write header: {e}")))?;

    let name_by_id: HashMap<Uuid, &str> = plans.iter().map(|p| (p.id, p.name.as_str())).collect();

    for plan in plans {
        let parent = plan
            .parent_id
            .and_then(|id| name_by_id.get(&id).copied())
            .unwrap_or("");
        wtr.write_record([
            plan.name.as_str(),
            &plan.start.format("%Y-%m-%d").to_string(),
            &plan.end.format("%Y-%m-%d").to_string(),
            plan.status.label(),
            &plan.progress.to_string(),
            parent,
        ])
        .map_err(|e| StoreError::InvalidInput(format!("failed to write plan '{}': {e}", plan.name)))?;
    }

    wtr.flush().map_err(StoreError::Io)?;
    Ok(plans.len())
}

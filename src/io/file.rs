use std::path::{Path, PathBuf};

use crate::store::{StoreData, StoreError};

/// Save the full data file as pretty JSON.
pub fn save_data(data: &StoreData, path: &Path) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(data)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Load a data file from disk.
pub fn load_data(path: &Path) -> Result<StoreData, StoreError> {
    let json = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}

/// Default location of the data file, under the per-user config directory.
pub fn default_data_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "StudyPlanner")
        .map(|dirs| dirs.config_dir().join("study-planner.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{PlanDraft, PlanStore};
    use chrono::NaiveDate;
    use uuid::Uuid;

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("data.json");

        let mut store = PlanStore::new(Uuid::new_v4());
        store
            .create_plan(PlanDraft {
                name: "Compilers".into(),
                description: "dragon book".into(),
                start: NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
                end: NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
                color: None,
                parent_id: None,
            })
            .unwrap();

        save_data(&store.to_data(), &path).unwrap();
        let loaded = load_data(&path).unwrap();
        assert_eq!(loaded.user, store.user());
        assert_eq!(loaded.plans.len(), 1);
        assert_eq!(loaded.plans[0].name, "Compilers");
    }

    #[test]
    fn loading_a_missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_data(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, StoreError::Io(_)));
    }

    #[test]
    fn loading_garbage_is_a_json_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{not json").unwrap();
        let err = load_data(&path).unwrap_err();
        assert!(matches!(err, StoreError::Json(_)));
    }
}

//! Persistent storage module.
//!
//! This module handles reading and writing the single JSON document that
//! holds all application data, plus user-triggered backup export and the
//! import stub.

mod error;

pub use error::StorageError;

use crate::error::AppResult;
use crate::store::Store;
use chrono::{DateTime, Local, Utc};
use log::*;
use serde::Serialize;
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

const FILE_NAME: &str = "state.json";
const DEFAULT_DIRECTORY_PATH: &str = ".local/share/lifeos-tui";

/// Oversees management of the persisted state document.
///
pub struct Storage {
    file_path: Option<PathBuf>,
}

/// Defines the layout of an exported backup: the full state document plus
/// the export instant.
///
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportSpec<'a> {
    #[serde(flatten)]
    store: &'a Store,
    export_date: DateTime<Utc>,
}

impl Storage {
    /// Return a new instance with no resolved file path.
    ///
    pub fn new() -> Storage {
        Storage { file_path: None }
    }

    /// Resolve the document path (the custom directory if provided, the
    /// default data directory otherwise) and load the existing document, or
    /// return an empty store when no document exists yet. Collections absent
    /// from older documents deserialize as empty.
    ///
    pub fn load(&mut self, custom_dir: Option<&str>) -> AppResult<Store> {
        let dir_path = match custom_dir {
            Some(path) => Path::new(&path).to_path_buf(),
            None => Storage::default_path()?,
        };

        if !dir_path.exists() {
            fs::create_dir_all(&dir_path).map_err(|e| StorageError::CreateDirectoryFailed {
                path: dir_path.clone(),
                source: e,
            })?;
        }

        self.file_path = Some(dir_path.join(Path::new(FILE_NAME)));
        let file_path = self.file_path.as_ref().ok_or(StorageError::FilePathNotSet)?;

        if !file_path.exists() {
            info!("No state document at {:?}, starting fresh", file_path);
            return Ok(Store::default());
        }

        let contents = fs::read_to_string(file_path).map_err(|e| StorageError::LoadFailed {
            path: file_path.clone(),
            message: format!("IO error: {}", e),
        })?;
        let store: Store = serde_json::from_str(&contents)
            .map_err(|e| StorageError::DeserializationFailed(e.to_string()))?;
        info!(
            "Loaded {} habits and {} logs from {:?}",
            store.get_habits().len(),
            store.get_logs().len(),
            file_path
        );
        Ok(store)
    }

    /// Serialize the store and write it to the resolved document path.
    ///
    pub fn save(&self, store: &Store) -> AppResult<()> {
        let file_path = self.file_path.as_ref().ok_or(StorageError::FilePathNotSet)?;
        let content = serde_json::to_string(store)
            .map_err(|e| StorageError::SerializationFailed(e.to_string()))?;

        // The data directory can disappear between saves.
        if let Some(parent) = file_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| StorageError::CreateDirectoryFailed {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        let mut file = fs::File::create(file_path).map_err(|e| StorageError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        write!(file, "{}", content).map_err(|e| StorageError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        file.flush().map_err(|e| StorageError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        Ok(())
    }

    /// Write a pretty-printed backup of the store, stamped with the export
    /// instant, to the given path or to a dated file next to the state
    /// document. Returns the path written.
    ///
    pub fn export(&self, store: &Store, target: Option<&Path>) -> AppResult<PathBuf> {
        let target_path = match target {
            Some(path) => path.to_path_buf(),
            None => {
                let file_path = self.file_path.as_ref().ok_or(StorageError::FilePathNotSet)?;
                let dir = file_path
                    .parent()
                    .map(Path::to_path_buf)
                    .unwrap_or_default();
                dir.join(format!(
                    "lifeos-backup-{}.json",
                    Local::now().format("%Y-%m-%d")
                ))
            }
        };

        let spec = ExportSpec {
            store,
            export_date: Utc::now(),
        };
        let content = serde_json::to_string_pretty(&spec)
            .map_err(|e| StorageError::SerializationFailed(e.to_string()))?;
        fs::write(&target_path, content).map_err(|e| StorageError::SaveFailed {
            path: target_path.clone(),
            source: e,
        })?;
        info!("Exported backup to {:?}", target_path);
        Ok(target_path)
    }

    /// Import stub: parse a backup document and log what it contains.
    /// Nothing is merged into the live store yet. Malformed JSON is the one
    /// failure surfaced to the user.
    ///
    pub fn import(path: &Path) -> AppResult<()> {
        let contents = fs::read_to_string(path).map_err(|e| StorageError::LoadFailed {
            path: path.to_path_buf(),
            message: format!("IO error: {}", e),
        })?;
        let data: serde_json::Value = serde_json::from_str(&contents)
            .map_err(|e| StorageError::DeserializationFailed(e.to_string()))?;

        let count = |key: &str| {
            data.get(key)
                .and_then(|v| v.as_array())
                .map(|a| a.len())
                .unwrap_or(0)
        };
        info!(
            "Import parsed from {:?}: {} habits, {} logs, {} goals (merge not implemented)",
            path,
            count("habits"),
            count("logs"),
            count("goals")
        );
        Ok(())
    }

    /// Returns the path buffer for the default data directory or an error if
    /// the home directory could not be found.
    ///
    fn default_path() -> AppResult<PathBuf> {
        match dirs::home_dir() {
            Some(home) => {
                let home_path = Path::new(&home);
                let default_data_path = Path::new(DEFAULT_DIRECTORY_PATH);
                Ok(home_path.join(default_data_path))
            }
            None => Err(StorageError::HomeDirectoryNotFound.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Icon;

    fn storage_in(dir: &Path) -> Storage {
        let mut storage = Storage::new();
        storage
            .load(Some(dir.to_str().unwrap()))
            .expect("load should succeed in temp dir");
        storage
    }

    #[test]
    fn load_missing_document_returns_default() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = Storage::new();
        let store = storage.load(Some(dir.path().to_str().unwrap())).unwrap();
        assert_eq!(store, Store::default());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = Storage::new();
        let mut store = storage.load(Some(dir.path().to_str().unwrap())).unwrap();
        store.add_habit("Read", Icon::Book, "#00ff41", 30.0, "pages");
        let habit_id = store.get_habits()[0].id.clone();
        store.log_progress(&habit_id, 30.0);
        storage.save(&store).unwrap();

        let mut fresh = Storage::new();
        let loaded = fresh.load(Some(dir.path().to_str().unwrap())).unwrap();
        assert_eq!(store, loaded);
    }

    #[test]
    fn load_older_document_defaults_newer_collections() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(FILE_NAME),
            r#"{"habits":[],"logs":[],"antiScrollLogs":[],"totalXP":10.0,"playerLevel":1,
                "settings":{"theme":"neon","xpMultiplier":1.0,"soundEnabled":true,"dailyGoalTime":"00:00"}}"#,
        )
        .unwrap();
        let mut storage = Storage::new();
        let store = storage.load(Some(dir.path().to_str().unwrap())).unwrap();
        assert!(store.get_goals().is_empty());
        assert!(store.get_planner_tasks().is_empty());
        assert_eq!(store.get_total_xp(), 10.0);
    }

    #[test]
    fn load_malformed_document_fails() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(FILE_NAME), "{not json").unwrap();
        let mut storage = Storage::new();
        assert!(storage.load(Some(dir.path().to_str().unwrap())).is_err());
    }

    #[test]
    fn save_without_path_fails() {
        let storage = Storage::new();
        assert!(storage.save(&Store::default()).is_err());
    }

    #[test]
    fn export_stamps_date_and_keeps_shape() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage_in(dir.path());
        let mut store = Store::default();
        store.add_habit("Read", Icon::Book, "#00ff41", 30.0, "pages");

        let written = storage.export(&store, None).unwrap();
        let contents = fs::read_to_string(&written).unwrap();
        let value: serde_json::Value = serde_json::from_str(&contents).unwrap();
        assert!(value.get("exportDate").is_some());
        assert_eq!(value["habits"].as_array().unwrap().len(), 1);
        assert!(value.get("plannerTasks").is_some());
    }

    #[test]
    fn export_to_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage_in(dir.path());
        let target = dir.path().join("backup.json");
        let written = storage.export(&Store::default(), Some(&target)).unwrap();
        assert_eq!(written, target);
        assert!(target.exists());
    }

    #[test]
    fn import_logs_parsed_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("backup.json");
        fs::write(&path, r#"{"habits":[],"logs":[],"goals":[]}"#).unwrap();
        assert!(Storage::import(&path).is_ok());
    }

    #[test]
    fn import_rejects_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("backup.json");
        fs::write(&path, "{broken").unwrap();
        assert!(Storage::import(&path).is_err());
    }
}

//! JSON file persistence for the score table

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::entry::LeaderboardEntry;
use crate::error::LeaderboardError;
use crate::table::ScoreTable;

/// A score table stored as a JSON array of entries
///
/// Saves write a sibling temp file and rename it over the target, so a
/// crash mid-write leaves the previous contents intact.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the table; a missing file is an empty table
    pub fn load(&self) -> Result<ScoreTable, LeaderboardError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no leaderboard store yet");
                return Ok(ScoreTable::new());
            }
            Err(e) => return Err(e.into()),
        };
        let entries: Vec<LeaderboardEntry> = serde_json::from_slice(&bytes)?;
        Ok(ScoreTable::from_entries(entries))
    }

    pub fn save(&self, table: &ScoreTable) -> Result<(), LeaderboardError> {
        let json = serde_json::to_vec_pretty(&table.entries())?;
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), entries = table.len(), "leaderboard saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::ScoreSubmission;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("blockfall-{}-{name}.json", std::process::id()))
    }

    #[test]
    fn test_missing_file_is_empty() {
        let store = JsonFileStore::new(temp_path("missing"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_path("roundtrip");
        let store = JsonFileStore::new(&path);
        let mut table = ScoreTable::new();
        table.submit(&ScoreSubmission::new("Ada", 50).unwrap());
        table.submit(&ScoreSubmission::new("Bo", 20).unwrap());

        store.save(&table).unwrap();
        assert_eq!(store.load().unwrap(), table);
        fs::remove_file(path).ok();
    }

    #[test]
    fn test_corrupt_file_is_decode_error() {
        let path = temp_path("corrupt");
        fs::write(&path, b"{not json").unwrap();
        let err = JsonFileStore::new(&path).load().unwrap_err();
        assert!(matches!(err, LeaderboardError::Decode(_)));
        fs::remove_file(path).ok();
    }

    #[test]
    fn test_unwritable_location_is_storage_error() {
        let store = JsonFileStore::new(temp_path("no-such-dir").join("scores.json"));
        let err = store.save(&ScoreTable::new()).unwrap_err();
        assert!(matches!(err, LeaderboardError::Storage(_)));
    }
}

//! File-backed store.
//!
//! One directory holds every match. Per match:
//! - `<id>.json` or `<id>.bin`: latest snapshot (pretty JSON or bincode)
//! - `<id>.legs.jsonl`: one JSON line per finished leg
//! - `<id>.result.json`: written when the match is decided

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{GameSnapshot, GameStore, LegResult, MatchId, MatchResult, StoreError};

/// Snapshot encoding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Format {
    #[default]
    Json,
    Bincode,
}

impl Format {
    fn extension(self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Bincode => "bin",
        }
    }
}

pub struct FileStore {
    base_dir: PathBuf,
    format: Format,
}

impl FileStore {
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Self {
        Self::with_format(base_dir, Format::Json)
    }

    pub fn with_format<P: AsRef<Path>>(base_dir: P, format: Format) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
            format,
        }
    }

    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Path of the snapshot file for a match.
    #[must_use]
    pub fn snapshot_path(&self, match_id: &MatchId) -> PathBuf {
        self.base_dir
            .join(format!("{}.{}", file_stem(match_id), self.format.extension()))
    }

    #[must_use]
    pub fn legs_path(&self, match_id: &MatchId) -> PathBuf {
        self.base_dir.join(format!("{}.legs.jsonl", file_stem(match_id)))
    }

    #[must_use]
    pub fn result_path(&self, match_id: &MatchId) -> PathBuf {
        self.base_dir.join(format!("{}.result.json", file_stem(match_id)))
    }

    /// Every finished leg recorded for a match, oldest first.
    pub fn load_legs(&self, match_id: &MatchId) -> Result<Vec<LegResult>, StoreError> {
        let path = self.legs_path(match_id);
        if !path.exists() {
            return Ok(Vec::new());
        }
        fs::read_to_string(path)?
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| serde_json::from_str(line).map_err(StoreError::from))
            .collect()
    }

    pub fn load_result(&self, match_id: &MatchId) -> Result<Option<MatchResult>, StoreError> {
        let path = self.result_path(match_id);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(&fs::read_to_string(path)?)?))
    }

    fn encode(&self, snapshot: &GameSnapshot) -> Result<Vec<u8>, StoreError> {
        Ok(match self.format {
            Format::Json => serde_json::to_vec_pretty(snapshot)?,
            Format::Bincode => bincode::serialize(snapshot)?,
        })
    }

    fn decode(&self, bytes: &[u8]) -> Result<GameSnapshot, StoreError> {
        Ok(match self.format {
            Format::Json => serde_json::from_slice(bytes)?,
            Format::Bincode => bincode::deserialize(bytes)?,
        })
    }
}

/// Match ids become file names; anything outside `[A-Za-z0-9_-]` is replaced.
fn file_stem(match_id: &MatchId) -> String {
    match_id
        .as_str()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}

impl GameStore for FileStore {
    fn save_game(&mut self, match_id: &MatchId, snapshot: &GameSnapshot) -> Result<(), StoreError> {
        fs::create_dir_all(&self.base_dir)?;
        let path = self.snapshot_path(match_id);
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, self.encode(snapshot)?)?;
        fs::rename(&tmp, &path)?;
        debug!("Saved match {} to {:?}", match_id, path);
        Ok(())
    }

    fn record_leg(&mut self, match_id: &MatchId, result: &LegResult) -> Result<(), StoreError> {
        fs::create_dir_all(&self.base_dir)?;
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.legs_path(match_id))?;
        writeln!(file, "{}", serde_json::to_string(result)?)?;
        Ok(())
    }

    fn complete_match(
        &mut self,
        match_id: &MatchId,
        result: &MatchResult,
    ) -> Result<(), StoreError> {
        fs::create_dir_all(&self.base_dir)?;
        fs::write(self.result_path(match_id), serde_json::to_string_pretty(result)?)?;
        Ok(())
    }

    fn load_game(&self, match_id: &MatchId) -> Result<Option<GameSnapshot>, StoreError> {
        let path = self.snapshot_path(match_id);
        if !path.exists() {
            return Ok(None);
        }
        let bytes = fs::read(path)?;
        Ok(Some(self.decode(&bytes)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Dart, GamePoints, GameSettings, LegState, Player, TurnRecord};
    use tempfile::TempDir;

    fn snapshot() -> GameSnapshot {
        let mut alice = Player::new("1", "Alice", 501);
        alice.history.push_back(TurnRecord::scored(1, &[Dart::triple(20).unwrap()]));
        alice.score = 441;
        let players = vec![alice, Player::new("2", "Bob", 501)];
        let mut leg = LegState::new(&players);
        leg.current_player_index = 1;
        GameSnapshot::new(&players, &leg, &GameSettings::default())
    }

    #[test]
    fn test_json_round_trip() {
        let dir = TempDir::new().unwrap();
        let mut store = FileStore::new(dir.path());
        let id = MatchId::new("42");

        assert!(store.load_game(&id).unwrap().is_none());
        store.save_game(&id, &snapshot()).unwrap();

        assert!(store.snapshot_path(&id).ends_with("42.json"));
        assert_eq!(store.load_game(&id).unwrap(), Some(snapshot()));
    }

    #[test]
    fn test_bincode_round_trip() {
        let dir = TempDir::new().unwrap();
        let mut store = FileStore::with_format(dir.path(), Format::Bincode);
        let id = MatchId::new("42");

        store.save_game(&id, &snapshot()).unwrap();
        assert!(store.snapshot_path(&id).ends_with("42.bin"));
        assert_eq!(store.load_game(&id).unwrap(), Some(snapshot()));
    }

    #[test]
    fn test_legs_append() {
        let dir = TempDir::new().unwrap();
        let mut store = FileStore::new(dir.path());
        let id = MatchId::new("m");
        let result = LegResult {
            leg_number: 1,
            winner: "1".into(),
            game_points: GamePoints::new(),
            final_state: snapshot(),
        };

        store.record_leg(&id, &result).unwrap();
        store.record_leg(&id, &LegResult { leg_number: 2, ..result.clone() }).unwrap();

        let legs = store.load_legs(&id).unwrap();
        assert_eq!(legs.len(), 2);
        assert_eq!(legs[1].leg_number, 2);
    }

    #[test]
    fn test_complete_match() {
        let dir = TempDir::new().unwrap();
        let mut store = FileStore::new(dir.path());
        let id = MatchId::new("m");
        assert!(store.load_result(&id).unwrap().is_none());

        let result = MatchResult {
            winner: Player::new("1", "Alice", 501),
            game_points: [(crate::core::PlayerId::new("1"), 3)].into_iter().collect(),
        };
        store.complete_match(&id, &result).unwrap();
        assert_eq!(store.load_result(&id).unwrap(), Some(result));
    }

    #[test]
    fn test_match_id_sanitized() {
        let store = FileStore::new("/tmp/x");
        let path = store.snapshot_path(&MatchId::new("../evil id"));
        assert_eq!(path.file_name().unwrap(), "___evil_id.json");
    }

    #[test]
    fn test_missing_directory_is_io_error() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, b"x").unwrap();
        let mut store = FileStore::new(blocker.join("sub"));
        assert!(matches!(
            store.save_game(&MatchId::new("m"), &snapshot()),
            Err(StoreError::Io(_))
        ));
    }
}

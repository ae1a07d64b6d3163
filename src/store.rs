use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::riot::riot_id::RiotId;
use crate::Error;

pub const DEFAULT_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedPlayer {
    pub game_name: String,
    pub tag_line: String,
}

impl TrackedPlayer {
    fn matches(&self, id: &RiotId) -> bool {
        self.game_name == id.game_name && self.tag_line == id.tag_line
    }

    pub fn riot_id(&self) -> RiotId {
        RiotId {
            game_name: self.game_name.clone(),
            tag_line: self.tag_line.clone(),
        }
    }
}

impl From<&RiotId> for TrackedPlayer {
    fn from(id: &RiotId) -> Self {
        Self {
            game_name: id.game_name.clone(),
            tag_line: id.tag_line.clone(),
        }
    }
}

/// The persisted roster document: tracked players in insertion order plus the
/// leaderboard display limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    pub players: Vec<TrackedPlayer>,
    pub limit: usize,
}

impl Default for Roster {
    fn default() -> Self {
        Self {
            players: Vec::new(),
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Sole owner of the on-disk roster document. Every mutation is
/// load-mutate-save, so the document is rewritten whole after each change.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Never fails: a missing, unreadable or partial document is replaced with
    /// the default roster, which is persisted immediately.
    pub fn load(&self) -> Roster {
        match self.try_load() {
            Ok(roster) => roster,
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Could not read roster document, resetting to defaults"
                );
                let roster = Roster::default();
                if let Err(e) = self.save(&roster) {
                    warn!(
                        path = %self.path.display(),
                        error = %e,
                        "Could not persist default roster document"
                    );
                }
                roster
            }
        }
    }

    fn try_load(&self) -> Result<Roster, Error> {
        let contents = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    pub fn save(&self, roster: &Roster) -> Result<(), Error> {
        let json = serde_json::to_string_pretty(roster)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// Appends a player unless an entry with the same name and tag already
    /// exists. Returns whether the roster changed.
    pub fn add_player(&self, id: &RiotId) -> Result<bool, Error> {
        let mut roster = self.load();
        if roster.players.iter().any(|p| p.matches(id)) {
            return Ok(false);
        }
        roster.players.push(TrackedPlayer::from(id));
        self.save(&roster)?;
        info!(player = %id, count = roster.players.len(), "Player added to roster");
        Ok(true)
    }

    /// Removes the exact (name, tag) match. Removing an absent player is a
    /// no-op. Returns whether the roster changed.
    pub fn remove_player(&self, id: &RiotId) -> Result<bool, Error> {
        let mut roster = self.load();
        let before = roster.players.len();
        roster.players.retain(|p| !p.matches(id));
        if roster.players.len() == before {
            return Ok(false);
        }
        self.save(&roster)?;
        info!(player = %id, count = roster.players.len(), "Player removed from roster");
        Ok(true)
    }

    pub fn set_limit(&self, limit: usize) -> Result<(), Error> {
        let mut roster = self.load();
        roster.limit = limit;
        self.save(&roster)?;
        info!(limit, "Leaderboard display limit updated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use tempfile::TempDir;

    use super::*;

    fn store_in(dir: &TempDir) -> Store {
        Store::new(dir.path().join("leaderboard_data.json"))
    }

    fn riot_id(s: &str) -> RiotId {
        RiotId::from_str(s).expect("valid riot id")
    }

    #[test]
    fn save_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let roster = Roster {
            players: vec![
                TrackedPlayer::from(&riot_id("Faker#KR1")),
                TrackedPlayer::from(&riot_id("Chovy#KR2")),
            ],
            limit: 5,
        };

        store.save(&roster).unwrap();
        assert_eq!(store.load(), roster);
    }

    #[test]
    fn missing_document_resets_and_persists_default() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        assert_eq!(store.load(), Roster::default());
        // The default must now exist on disk and parse cleanly.
        let on_disk = std::fs::read_to_string(dir.path().join("leaderboard_data.json")).unwrap();
        let parsed: Roster = serde_json::from_str(&on_disk).unwrap();
        assert_eq!(parsed, Roster::default());
    }

    #[test]
    fn corrupt_document_resets_to_default() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("leaderboard_data.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = Store::new(path);
        let roster = store.load();
        assert_eq!(roster, Roster::default());
        assert_eq!(roster.limit, DEFAULT_LIMIT);
    }

    #[test]
    fn document_missing_required_field_resets_to_default() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("leaderboard_data.json");
        std::fs::write(&path, r#"{"players": []}"#).unwrap();

        let store = Store::new(path);
        assert_eq!(store.load(), Roster::default());
    }

    #[test]
    fn add_is_idempotent_for_exact_duplicates() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let id = riot_id("Faker#KR1");

        assert!(store.add_player(&id).unwrap());
        assert!(!store.add_player(&id).unwrap());

        let players = store.load().players;
        assert_eq!(players.len(), 1);
        assert_eq!(players[0].game_name, "Faker");
        assert_eq!(players[0].tag_line, "KR1");
    }

    #[test]
    fn same_name_different_tag_is_not_a_duplicate() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        assert!(store.add_player(&riot_id("Faker#KR1")).unwrap());
        assert!(store.add_player(&riot_id("Faker#EUW")).unwrap());
        assert_eq!(store.load().players.len(), 2);
    }

    #[test]
    fn remove_absent_player_is_a_noop() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.add_player(&riot_id("Faker#KR1")).unwrap();

        assert!(!store.remove_player(&riot_id("Chovy#KR2")).unwrap());
        assert_eq!(store.load().players.len(), 1);
    }

    #[test]
    fn remove_deletes_the_exact_match() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.add_player(&riot_id("Faker#KR1")).unwrap();
        store.add_player(&riot_id("Chovy#KR2")).unwrap();

        assert!(store.remove_player(&riot_id("Faker#KR1")).unwrap());
        let players = store.load().players;
        assert_eq!(players.len(), 1);
        assert_eq!(players[0].game_name, "Chovy");
    }

    #[test]
    fn set_limit_persists() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.set_limit(3).unwrap();
        assert_eq!(store.load().limit, 3);
    }
}

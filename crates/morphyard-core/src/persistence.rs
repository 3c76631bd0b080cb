//! Save/Load functionality for player progress and whole sessions
//!
//! Player progress is a JSON record kept in a [`SaveStore`] under the
//! player's username. A session snapshot (market state plus player record)
//! is a versioned bincode blob written to any `Write`.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use morphyard_logic::constants::progression::MAX_LEVEL;

use crate::components::{Organism, PlayerAccount};
use crate::systems::MarketSystem;

/// Version number for session snapshots (increment when format changes)
const SNAPSHOT_VERSION: u32 = 1;

/// Keyed byte storage for save records
pub trait SaveStore {
    /// Fetch the record stored under `key`, or `None` if there is none
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, SaveError>;

    /// Replace the record stored under `key`
    fn write(&mut self, key: &str, data: &[u8]) -> Result<(), SaveError>;
}

/// In-memory store, mainly for tests and throwaway sessions
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: HashMap<String, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl SaveStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, SaveError> {
        Ok(self.records.get(key).cloned())
    }

    fn write(&mut self, key: &str, data: &[u8]) -> Result<(), SaveError> {
        self.records.insert(key.to_string(), data.to_vec());
        Ok(())
    }
}

/// One `{key}_save.json` file per record inside a directory
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File path holding the record for `key`
    pub fn path_for(&self, key: &str) -> Result<PathBuf, SaveError> {
        let valid = !key.is_empty()
            && key != "."
            && key != ".."
            && !key.contains(['/', '\\', '\0']);
        if !valid {
            return Err(SaveError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{}_save.json", key)))
    }
}

impl SaveStore for JsonFileStore {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, SaveError> {
        let path = self.path_for(key)?;
        match fs::read(&path) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&mut self, key: &str, data: &[u8]) -> Result<(), SaveError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;

        // Write beside the target then rename so a record is never half-written
        let tmp = path.with_extension("json.tmp");
        {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(data)?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

/// Persisted form of a [`PlayerAccount`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub username: String,
    pub money: f64,
    pub reputation: f64,
    pub level: u32,
    pub organisms: Vec<Organism>,
    pub inventory: BTreeMap<String, u32>,
    pub tournament_rank: Option<u32>,
}

impl From<&PlayerAccount> for PlayerRecord {
    fn from(player: &PlayerAccount) -> Self {
        Self {
            username: player.username.clone(),
            money: player.money,
            reputation: player.reputation,
            level: player.level,
            organisms: player.organisms.clone(),
            inventory: player.inventory.clone(),
            tournament_rank: player.tournament_rank,
        }
    }
}

impl PlayerRecord {
    /// Validate the record and turn it back into an account
    pub fn into_account(self) -> Result<PlayerAccount, SaveError> {
        if !(1..=MAX_LEVEL).contains(&self.level) {
            return Err(SaveError::Malformed(format!(
                "level {} outside 1..={}",
                self.level, MAX_LEVEL
            )));
        }
        if !self.money.is_finite() || !self.reputation.is_finite() {
            return Err(SaveError::Malformed(
                "money and reputation must be finite".to_string(),
            ));
        }
        if let Some(name) = first_duplicate_name(&self.organisms) {
            return Err(SaveError::Malformed(format!(
                "reptile {} listed more than once",
                name
            )));
        }
        Ok(PlayerAccount {
            username: self.username,
            money: self.money,
            reputation: self.reputation,
            level: self.level,
            organisms: self.organisms,
            inventory: self.inventory,
            tournament_rank: self.tournament_rank,
        })
    }
}

fn first_duplicate_name(organisms: &[Organism]) -> Option<String> {
    let mut names = HashSet::new();
    organisms
        .iter()
        .find(|o| !names.insert(o.name.as_str()))
        .map(|o| o.name.clone())
}

/// Result of loading a player
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// A saved record was found and restored
    Restored(PlayerAccount),
    /// No record existed; this is a brand-new account
    Fresh(PlayerAccount),
}

impl LoadOutcome {
    pub fn is_fresh(&self) -> bool {
        matches!(self, LoadOutcome::Fresh(_))
    }

    pub fn into_account(self) -> PlayerAccount {
        match self {
            LoadOutcome::Restored(account) | LoadOutcome::Fresh(account) => account,
        }
    }
}

/// Write a player's full state to the store under their username
pub fn save_player<S: SaveStore + ?Sized>(
    store: &mut S,
    player: &PlayerAccount,
) -> Result<(), SaveError> {
    let record = PlayerRecord::from(player);
    let data = serde_json::to_vec_pretty(&record)?;
    store.write(&player.username, &data)?;
    log::info!(
        "Saved {} ({} reptiles, ${:.2})",
        player.username,
        player.organisms.len(),
        player.money
    );
    Ok(())
}

/// Load a player by username, or start a fresh account when no save exists
pub fn load_player<S: SaveStore + ?Sized>(
    store: &S,
    username: &str,
) -> Result<LoadOutcome, SaveError> {
    load_player_with(store, username, || PlayerAccount::new(username))
}

/// Like [`load_player`], building the fresh account with `fresh` on a miss
pub fn load_player_with<S, F>(store: &S, username: &str, fresh: F) -> Result<LoadOutcome, SaveError>
where
    S: SaveStore + ?Sized,
    F: FnOnce() -> PlayerAccount,
{
    let Some(data) = store.read(username)? else {
        log::warn!("No save found for {}. Starting fresh.", username);
        return Ok(LoadOutcome::Fresh(fresh()));
    };

    let record: PlayerRecord =
        serde_json::from_slice(&data).map_err(|e| SaveError::Malformed(e.to_string()))?;
    if record.username != username {
        return Err(SaveError::Malformed(format!(
            "record belongs to {}, expected {}",
            record.username, username
        )));
    }
    let account = record.into_account()?;
    log::info!("Loaded {} at level {}", account.username, account.level);
    Ok(LoadOutcome::Restored(account))
}

impl PlayerAccount {
    /// Save this account under its username
    pub fn save<S: SaveStore + ?Sized>(&self, store: &mut S) -> Result<(), SaveError> {
        save_player(store, self)
    }

    /// Load an account by username; [`LoadOutcome::Fresh`] when none is saved
    pub fn load<S: SaveStore + ?Sized>(username: &str, store: &S) -> Result<LoadOutcome, SaveError> {
        load_player(store, username)
    }
}

/// Serializable snapshot of a whole session
#[derive(Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Snapshot format version
    pub version: u32,
    pub market: MarketSystem,
    pub player: PlayerRecord,
}

/// Save a market and player to a writer
pub fn save_session<W: Write>(
    writer: W,
    market: &MarketSystem,
    player: &PlayerAccount,
) -> Result<(), SaveError> {
    let snapshot = SessionSnapshot {
        version: SNAPSHOT_VERSION,
        market: market.clone(),
        player: PlayerRecord::from(player),
    };
    bincode::serialize_into(writer, &snapshot)?;
    Ok(())
}

/// Load a market and player from a reader
pub fn load_session<R: Read>(reader: R) -> Result<(MarketSystem, PlayerAccount), SaveError> {
    let snapshot: SessionSnapshot = bincode::deserialize_from(reader)?;

    if snapshot.version != SNAPSHOT_VERSION {
        return Err(SaveError::VersionMismatch {
            expected: SNAPSHOT_VERSION,
            found: snapshot.version,
        });
    }

    let player = snapshot.player.into_account()?;
    Ok((snapshot.market, player))
}

/// Errors that can occur during save/load
#[derive(Debug)]
pub enum SaveError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Bincode(Box<bincode::ErrorKind>),
    /// Record was readable but missing fields or holding invalid values
    Malformed(String),
    /// Key cannot be used as a record name
    InvalidKey(String),
    VersionMismatch { expected: u32, found: u32 },
}

impl From<std::io::Error> for SaveError {
    fn from(e: std::io::Error) -> Self {
        SaveError::Io(e)
    }
}

impl From<serde_json::Error> for SaveError {
    fn from(e: serde_json::Error) -> Self {
        SaveError::Json(e)
    }
}

impl From<Box<bincode::ErrorKind>> for SaveError {
    fn from(e: Box<bincode::ErrorKind>) -> Self {
        SaveError::Bincode(e)
    }
}

impl std::fmt::Display for SaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SaveError::Io(e) => write!(f, "IO error: {}", e),
            SaveError::Json(e) => write!(f, "JSON error: {}", e),
            SaveError::Bincode(e) => write!(f, "Serialization error: {}", e),
            SaveError::Malformed(msg) => write!(f, "Malformed save data: {}", msg),
            SaveError::InvalidKey(key) => write!(f, "Invalid save key: {:?}", key),
            SaveError::VersionMismatch { expected, found } => {
                write!(
                    f,
                    "Save version mismatch: expected {}, found {}",
                    expected, found
                )
            }
        }
    }
}

impl std::error::Error for SaveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SaveError::Io(e) => Some(e),
            SaveError::Json(e) => Some(e),
            SaveError::Bincode(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use log::warn;
use serde::{Serialize, de::DeserializeOwned};

use crate::sheet::{FIRST_ROUND, LAST_ROUND, TimeSheet};

const SHOOTERS_KEY: &str = "shooters.json";
const TIMES_KEY: &str = "times.json";
const ROUND_KEY: &str = "round.json";

/// Key-value persistence for the session state, one JSON file per logical
/// key: the roster, the nested time sheet and the current round. Loading an
/// absent or malformed key yields the empty default, so a fresh or damaged
/// store always hydrates to a usable session.
pub struct JsonStore {
    base_dir: PathBuf,
}

impl JsonStore {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("steeltally");
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn with_base_dir(base_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    fn file_path(&self, name: &str) -> PathBuf {
        self.base_dir.join(name)
    }

    fn load<T: DeserializeOwned + Default>(&self, name: &str) -> T {
        let path = self.file_path(name);
        if path.exists() {
            match fs::read_to_string(&path) {
                Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                    warn!("resetting {name}: could not parse stored data: {e}");
                    T::default()
                }),
                Err(_) => T::default(),
            }
        } else {
            T::default()
        }
    }

    fn save<T: Serialize>(&self, name: &str, data: &T) -> Result<()> {
        let path = self.file_path(name);
        let tmp_path = path.with_extension("tmp");

        let json = serde_json::to_string_pretty(data)?;
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;

        fs::rename(&tmp_path, &path)?;
        Ok(())
    }

    pub fn load_shooters(&self) -> Vec<String> {
        self.load(SHOOTERS_KEY)
    }

    pub fn save_shooters(&self, shooters: &[String]) -> Result<()> {
        self.save(SHOOTERS_KEY, &shooters)
    }

    pub fn load_times(&self) -> TimeSheet {
        self.load(TIMES_KEY)
    }

    pub fn save_times(&self, sheet: &TimeSheet) -> Result<()> {
        self.save(TIMES_KEY, sheet)
    }

    /// The current round defaults to the first one; a stored value outside
    /// the fixed round range counts as malformed.
    pub fn load_round(&self) -> u8 {
        let round: Option<u8> = self.load(ROUND_KEY);
        match round {
            Some(r) if (FIRST_ROUND..=LAST_ROUND).contains(&r) => r,
            _ => FIRST_ROUND,
        }
    }

    pub fn save_round(&self, round: u8) -> Result<()> {
        self.save(ROUND_KEY, &round)
    }
}

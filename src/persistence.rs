//! JSON persistence for ~/.flappy-bee/ files and the best-score store.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const BEST_SCORE_FILE: &str = "best_score.json";

/// Get the ~/.flappy-bee/ directory path, creating it if needed.
pub fn bee_dir() -> io::Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine home directory",
        )
    })?;
    let dir = home_dir.join(".flappy-bee");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Get the full path for a file in ~/.flappy-bee/.
pub fn save_path(filename: &str) -> io::Result<PathBuf> {
    Ok(bee_dir()?.join(filename))
}

/// Load a JSON file, returning `T::default()` if missing or invalid.
pub fn load_json_or_default<T: Default + serde::de::DeserializeOwned>(path: &Path) -> T {
    match fs::read_to_string(path) {
        Ok(json) => serde_json::from_str(&json).unwrap_or_default(),
        Err(_) => T::default(),
    }
}

/// Save a value as pretty-printed JSON, creating parent directories.
pub fn save_json<T: Serialize>(path: &Path, data: &T) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(path, json)?;
    Ok(())
}

/// Stored best score.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestScore {
    pub score: u32,
    /// Unix timestamp of when the score was set.
    #[serde(default)]
    pub achieved_at: Option<i64>,
}

impl BestScore {
    pub fn now(score: u32) -> Self {
        Self {
            score,
            achieved_at: Some(Utc::now().timestamp()),
        }
    }
}

/// Where the display collaborator keeps the best score between sessions.
pub trait ScoreStore {
    /// Stored best score, or 0 when nothing was saved yet.
    fn load_best(&self) -> u32;

    fn save_best(&mut self, score: u32) -> io::Result<()>;
}

/// Best score kept in a JSON file.
#[derive(Debug, Clone)]
pub struct JsonScoreStore {
    path: PathBuf,
}

impl JsonScoreStore {
    /// Store at ~/.flappy-bee/best_score.json.
    pub fn open_default() -> io::Result<Self> {
        Ok(Self::at(save_path(BEST_SCORE_FILE)?))
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load_record(&self) -> BestScore {
        load_json_or_default(&self.path)
    }

    /// Remove the stored score. Missing files are fine.
    pub fn clear(&self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}

impl ScoreStore for JsonScoreStore {
    fn load_best(&self) -> u32 {
        self.load_record().score
    }

    fn save_best(&mut self, score: u32) -> io::Result<()> {
        save_json(&self.path, &BestScore::now(score))?;
        tracing::debug!(score, path = %self.path.display(), "best score saved");
        Ok(())
    }
}

/// In-memory store for tests and headless hosts.
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    pub best: u32,
    pub saves: u32,
}

impl ScoreStore for MemoryScoreStore {
    fn load_best(&self) -> u32 {
        self.best
    }

    fn save_best(&mut self, score: u32) -> io::Result<()> {
        self.best = score;
        self.saves += 1;
        Ok(())
    }
}

//! On-disk save file: a world snapshot plus enough metadata to notice a
//! corrupt or hand-edited copy before handing it to the session.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use core::{Session, Snapshot};

use crate::{APP_NAME, format_snapshot_hash};

pub const SAVE_FORMAT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SaveFile {
    pub format_version: u32,
    pub seed: u64,
    pub snapshot: Snapshot,
    pub snapshot_hash_hex: String,
    pub updated_at_unix_ms: u64,
}

impl SaveFile {
    pub fn capture(session: &Session, seed: u64) -> Result<Self, serde_json::Error> {
        let snapshot = session.snapshot();
        let hash = Session::snapshot_hash(&snapshot)?;
        Ok(Self {
            format_version: SAVE_FORMAT_VERSION,
            seed,
            snapshot,
            snapshot_hash_hex: format_snapshot_hash(hash),
            updated_at_unix_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map_or(0, |d| d.as_millis() as u64),
        })
    }

    pub fn get_default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", APP_NAME).map(|proj_dirs| {
            let mut path = proj_dirs.data_dir().to_path_buf();
            path.push("save.json");
            path
        })
    }

    pub fn write_atomic(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;

        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, path)?;

        Ok(())
    }

    pub fn load(path: &Path) -> io::Result<Self> {
        let content = fs::read_to_string(path)?;
        let state: Self = serde_json::from_str(&content)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(state)
    }

    /// Load and re-hash. A snapshot whose digest no longer matches the stored
    /// one is treated the same as an unreadable file.
    pub fn load_verified(path: &Path) -> io::Result<Self> {
        let state = Self::load(path)?;
        let hash = Session::snapshot_hash(&state.snapshot)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        if format_snapshot_hash(hash) != state.snapshot_hash_hex {
            return Err(io::Error::new(io::ErrorKind::InvalidData, "snapshot hash mismatch"));
        }
        Ok(state)
    }
}

//! Persistent key/value profile.
//!
//! Every value is a plain string, and the whole map is rewritten on each
//! change. Structured data (the task list) is serialized by its owner before
//! it is stored here.

use crate::errors::AppError;
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};
use tokio::fs;
use tracing::{debug, error};

pub const USER_KEY: &str = "cht_user";
pub const TASKS_KEY: &str = "cht_tasks";
pub const THEME_KEY: &str = "cht_theme";
pub const ACCENT_KEY: &str = "cht_accent";

#[derive(Debug)]
pub struct Profile {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl Profile {
    /// Loads the profile at `path`. A missing or unreadable file yields an
    /// empty profile.
    pub async fn open(path: PathBuf) -> Self {
        let entries = load_entries(&path).await;
        Self { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get_item(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub async fn set_item(&mut self, key: &str, value: impl Into<String>) -> Result<(), AppError> {
        let mut next = self.entries.clone();
        next.insert(key.to_string(), value.into());
        self.commit(next).await
    }

    pub async fn remove_item(&mut self, key: &str) -> Result<(), AppError> {
        if !self.entries.contains_key(key) {
            return Ok(());
        }
        let mut next = self.entries.clone();
        next.remove(key);
        self.commit(next).await
    }

    /// Writes `next` to disk and only then makes it the in-memory state.
    async fn commit(&mut self, next: BTreeMap<String, String>) -> Result<(), AppError> {
        write_entries(&self.path, &next).await?;
        debug!(path = %self.path.display(), keys = next.len(), "profile saved");
        self.entries = next;
        Ok(())
    }
}

async fn write_entries(path: &Path, entries: &BTreeMap<String, String>) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(entries)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, payload).await?;
    if let Err(err) = fs::rename(&tmp, path).await {
        let _ = fs::remove_file(&tmp).await;
        return Err(err.into());
    }
    Ok(())
}

async fn load_entries(path: &Path) -> BTreeMap<String, String> {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(entries) => entries,
            Err(err) => {
                error!("failed to parse profile file: {err}");
                BTreeMap::new()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
        Err(err) => {
            error!("failed to read profile file: {err}");
            BTreeMap::new()
        }
    }
}

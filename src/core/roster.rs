use crate::domain::ports::{KeyValueStore, PLAYERS_KEY};
use crate::utils::error::Result;

pub const DEFAULT_SEPARATOR: &str = ",";

/// Split free text into trimmed, non-empty candidate names.
pub fn normalize_names(raw: &str, separator: &str) -> Vec<String> {
    raw.split(separator)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Ordered, de-duplicated player list mirrored into a [`KeyValueStore`].
#[derive(Debug, Clone)]
pub struct RosterStore<S: KeyValueStore> {
    store: S,
    separator: String,
    names: Vec<String>,
}

impl<S: KeyValueStore> RosterStore<S> {
    /// Empty roster. Nothing is written until the first mutation.
    pub fn new(store: S, separator: impl Into<String>) -> Self {
        Self {
            store,
            separator: separator.into(),
            names: Vec::new(),
        }
    }

    /// Restore the roster from the store. Absent or unreadable data yields an
    /// empty roster; errors never reach the caller.
    pub fn load(store: S, separator: impl Into<String>) -> Self {
        let mut roster = Self::new(store, separator);

        let raw = match roster.store.get(PLAYERS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return roster,
            Err(e) => {
                tracing::warn!("⚠️ Could not read saved players, starting empty: {}", e);
                return roster;
            }
        };

        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(saved) => {
                for name in saved {
                    let name = name.trim();
                    if !name.is_empty() && !roster.contains(name) {
                        roster.names.push(name.to_string());
                    }
                }
                tracing::debug!("Restored {} player(s)", roster.names.len());
            }
            Err(e) => {
                tracing::warn!("⚠️ Saved players are malformed, starting empty: {}", e);
            }
        }

        roster
    }

    /// Append every new name found in `raw`, in order. Returns the names that
    /// were actually added.
    pub fn add(&mut self, raw: &str) -> Result<Vec<String>> {
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }

        let mut added = Vec::new();
        for name in normalize_names(raw, &self.separator) {
            if self.contains(&name) {
                tracing::debug!("Skipping duplicate player '{}'", name);
                continue;
            }
            self.names.push(name.clone());
            added.push(name);
        }

        self.save()?;
        Ok(added)
    }

    /// Drop the entry at `index`. Out of range is a no-op.
    pub fn remove(&mut self, index: usize) -> Result<Option<String>> {
        if index >= self.names.len() {
            tracing::debug!(
                "Ignoring removal at index {} (roster has {})",
                index,
                self.names.len()
            );
            return Ok(None);
        }

        let removed = self.names.remove(index);
        self.save()?;
        Ok(Some(removed))
    }

    pub fn clear(&mut self) -> Result<()> {
        self.names.clear();
        self.save()
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|existing| existing == name)
    }

    fn save(&self) -> Result<()> {
        let json = serde_json::to_string(&self.names)?;
        self.store.set(PLAYERS_KEY, &json)
    }
}

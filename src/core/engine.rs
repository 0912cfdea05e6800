use crate::core::partition::partition;
use crate::core::roster::RosterStore;
use crate::core::session::SessionState;
use crate::domain::model::{PartitionResult, TeamSize};
use crate::domain::ports::{ConfigProvider, KeyValueStore, RESULT_KEY, TEAM_SIZE_KEY};
use crate::utils::error::{Result, TeamError};
use std::time::Duration;

/// A partition that has been computed but not yet published.
#[must_use = "a pending generation must be passed to complete_generation"]
#[derive(Debug)]
pub struct PendingGeneration {
    result: PartitionResult,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateOutcome {
    Completed(PartitionResult),
    /// Another generation was already in flight.
    Ignored,
}

/// Publishes an accepted generation even if the future awaiting the delay is
/// dropped, so the session never stays in `Generating`.
struct CompletionGuard<'a, S: KeyValueStore> {
    engine: &'a mut TeamEngine<S>,
    pending: Option<PendingGeneration>,
}

impl<S: KeyValueStore> CompletionGuard<'_, S> {
    fn complete(mut self) -> Result<PartitionResult> {
        match self.pending.take() {
            Some(pending) => self.engine.complete_generation(pending),
            // 只有 complete 和 drop 會取走 pending
            None => Err(TeamError::GenerationInProgress),
        }
    }
}

impl<S: KeyValueStore> Drop for CompletionGuard<'_, S> {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            tracing::debug!("Generation interrupted during delay, publishing result now");
            if let Err(e) = self.engine.complete_generation(pending) {
                tracing::warn!("⚠️ Could not persist interrupted generation: {}", e);
            }
        }
    }
}

/// Owns the roster, the selected team size and the last published result, and
/// serialises generation requests against roster edits.
pub struct TeamEngine<S: KeyValueStore> {
    store: S,
    roster: RosterStore<S>,
    team_size: TeamSize,
    last_result: Option<PartitionResult>,
    session: SessionState,
    delay: Duration,
}

impl<S: KeyValueStore> TeamEngine<S> {
    /// Restore all persisted state. Nothing here fails: unreadable entries fall
    /// back to an empty roster, the configured team size and no result.
    pub fn load<C: ConfigProvider>(store: S, config: &C) -> Self {
        let roster = RosterStore::load(store.clone(), config.name_separator());
        let team_size = load_team_size(&store, config.default_team_size());
        let last_result = load_result(&store);

        tracing::info!(
            "Loaded {} player(s), team size {}, {}",
            roster.len(),
            team_size,
            if last_result.is_some() { "previous result available" } else { "no previous result" }
        );

        Self {
            store,
            roster,
            team_size,
            last_result,
            session: SessionState::Idle,
            delay: config.generation_delay(),
        }
    }

    pub fn players(&self) -> &[String] {
        self.roster.names()
    }

    pub fn name_separator(&self) -> &str {
        self.roster.separator()
    }

    pub fn team_size(&self) -> TeamSize {
        self.team_size
    }

    pub fn last_result(&self) -> Option<&PartitionResult> {
        self.last_result.as_ref()
    }

    pub fn session(&self) -> SessionState {
        self.session
    }

    pub fn add_players(&mut self, raw: &str) -> Result<Vec<String>> {
        self.ensure_idle()?;
        let added = self.roster.add(raw)?;
        tracing::info!("➕ Added {} player(s)", added.len());
        Ok(added)
    }

    pub fn remove_player(&mut self, index: usize) -> Result<Option<String>> {
        self.ensure_idle()?;
        let removed = self.roster.remove(index)?;
        if let Some(name) = &removed {
            tracing::info!("➖ Removed player '{}'", name);
        }
        Ok(removed)
    }

    pub fn clear_players(&mut self) -> Result<()> {
        self.ensure_idle()?;
        self.roster.clear()?;
        tracing::info!("🧹 Roster cleared");
        Ok(())
    }

    pub fn set_team_size(&mut self, size: TeamSize) -> Result<()> {
        self.ensure_idle()?;
        self.team_size = size;
        self.store.set(TEAM_SIZE_KEY, &size.to_string())?;
        tracing::info!("🔧 Team size set to {}", size);
        Ok(())
    }

    /// First half of a generation. Fails with `InsufficientPlayers` when the
    /// roster is too small, returns `Ok(None)` while another generation is in
    /// flight, and otherwise enters `Generating` with the partition computed.
    pub fn request_generation(&mut self) -> Result<Option<PendingGeneration>> {
        let required = self.team_size.get();
        if self.roster.len() < required {
            tracing::warn!(
                "Cannot generate: {} player(s) for a team of {}",
                self.roster.len(),
                required
            );
            return Err(TeamError::InsufficientPlayers {
                required,
                available: self.roster.len(),
            });
        }

        if self.session.is_generating() {
            tracing::debug!("Generation already in progress, request ignored");
            return Ok(None);
        }

        let result = partition(self.roster.names(), required)?;
        self.session.begin();
        tracing::info!("🎲 {}", self.session.status_label());
        Ok(Some(PendingGeneration { result }))
    }

    /// Second half of a generation: publish and persist the result. The
    /// session always returns to `Idle`, even if persisting fails.
    pub fn complete_generation(&mut self, pending: PendingGeneration) -> Result<PartitionResult> {
        self.session.finish();
        let result = pending.result;
        self.last_result = Some(result.clone());

        self.store.set(RESULT_KEY, &serde_json::to_string(&result)?)?;
        tracing::info!(
            "✅ Team of {} generated, {} spectator(s)",
            result.team.len(),
            result.spectators.len()
        );
        Ok(result)
    }

    /// Request, wait the configured delay, then complete.
    pub async fn generate(&mut self) -> Result<GenerateOutcome> {
        let Some(pending) = self.request_generation()? else {
            return Ok(GenerateOutcome::Ignored);
        };

        let delay = self.delay;
        let guard = CompletionGuard {
            engine: self,
            pending: Some(pending),
        };

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        guard.complete().map(GenerateOutcome::Completed)
    }

    fn ensure_idle(&self) -> Result<()> {
        if self.session.is_generating() {
            return Err(TeamError::GenerationInProgress);
        }
        Ok(())
    }
}

fn load_team_size<S: KeyValueStore>(store: &S, default: TeamSize) -> TeamSize {
    match store.get(TEAM_SIZE_KEY) {
        Ok(Some(raw)) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!("⚠️ Saved team size '{}' is invalid, using {}", raw, default);
            default
        }),
        Ok(None) => default,
        Err(e) => {
            tracing::warn!("⚠️ Could not read saved team size, using {}: {}", default, e);
            default
        }
    }
}

fn load_result<S: KeyValueStore>(store: &S) -> Option<PartitionResult> {
    let raw = match store.get(RESULT_KEY) {
        Ok(raw) => raw?,
        Err(e) => {
            tracing::warn!("⚠️ Could not read saved result: {}", e);
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(result) => Some(result),
        Err(e) => {
            tracing::warn!("⚠️ Saved result is malformed, ignoring it: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryStore;
    use crate::config::AppConfig;
    use crate::domain::ports::PLAYERS_KEY;

    fn config() -> AppConfig {
        AppConfig {
            delay_ms: 0,
            ..AppConfig::default()
        }
    }

    fn engine_with(players: &str, size: TeamSize) -> TeamEngine<MemoryStore> {
        let mut engine = TeamEngine::load(MemoryStore::new(), &config());
        engine.add_players(players).unwrap();
        engine.set_team_size(size).unwrap();
        engine
    }

    #[test]
    fn test_load_defaults_on_empty_store() {
        let engine = TeamEngine::load(MemoryStore::new(), &config());
        assert!(engine.players().is_empty());
        assert_eq!(engine.team_size(), TeamSize::Five);
        assert!(engine.last_result().is_none());
        assert_eq!(engine.session(), SessionState::Idle);
    }

    #[test]
    fn test_load_fails_soft_on_bad_entries() {
        let store = MemoryStore::new();
        store.set(PLAYERS_KEY, "{oops").unwrap();
        store.set(TEAM_SIZE_KEY, "4").unwrap();
        store.set(RESULT_KEY, r#"{"team":["A"]}"#).unwrap();

        let engine = TeamEngine::load(store, &config());
        assert!(engine.players().is_empty());
        assert_eq!(engine.team_size(), TeamSize::Five);
        assert!(engine.last_result().is_none());
    }

    #[test]
    fn test_second_request_is_ignored_while_generating() {
        let mut engine = engine_with("A, B, C, D", TeamSize::Two);

        let pending = engine.request_generation().unwrap().expect("first request accepted");
        assert!(engine.session().is_generating());
        assert!(engine.request_generation().unwrap().is_none());
        assert!(engine.last_result().is_none());

        let result = engine.complete_generation(pending).unwrap();
        assert_eq!(engine.session(), SessionState::Idle);
        assert_eq!(engine.last_result(), Some(&result));

        let again = engine.request_generation().unwrap();
        assert!(again.is_some());
        engine.complete_generation(again.unwrap()).unwrap();
    }

    #[test]
    fn test_mutations_rejected_while_generating() {
        let mut engine = engine_with("A, B, C", TeamSize::Two);
        let pending = engine.request_generation().unwrap().unwrap();

        assert!(matches!(engine.add_players("D"), Err(TeamError::GenerationInProgress)));
        assert!(matches!(engine.remove_player(0), Err(TeamError::GenerationInProgress)));
        assert!(matches!(engine.clear_players(), Err(TeamError::GenerationInProgress)));
        assert!(matches!(
            engine.set_team_size(TeamSize::Three),
            Err(TeamError::GenerationInProgress)
        ));
        assert_eq!(engine.players(), ["A", "B", "C"]);
        assert_eq!(engine.team_size(), TeamSize::Two);

        engine.complete_generation(pending).unwrap();
        engine.add_players("D").unwrap();
        assert_eq!(engine.players().len(), 4);
    }

    #[test]
    fn test_insufficient_players_changes_nothing() {
        let store = MemoryStore::new();
        let mut engine = TeamEngine::load(store.clone(), &config());
        engine.add_players("A").unwrap();
        engine.set_team_size(TeamSize::Three).unwrap();

        let err = engine.request_generation().unwrap_err();
        assert!(matches!(
            err,
            TeamError::InsufficientPlayers {
                required: 3,
                available: 1
            }
        ));
        assert_eq!(engine.players(), ["A"]);
        assert_eq!(engine.session(), SessionState::Idle);
        assert_eq!(store.get(RESULT_KEY).unwrap(), None);
    }

    #[test]
    fn test_team_size_is_persisted() {
        let store = MemoryStore::new();
        let mut engine = TeamEngine::load(store.clone(), &config());
        engine.set_team_size(TeamSize::Three).unwrap();
        assert_eq!(store.get(TEAM_SIZE_KEY).unwrap().as_deref(), Some("3"));

        let reloaded = TeamEngine::load(store, &config());
        assert_eq!(reloaded.team_size(), TeamSize::Three);
    }

    #[tokio::test]
    async fn test_generate_persists_result() {
        let store = MemoryStore::new();
        let mut engine = TeamEngine::load(store.clone(), &config());
        engine.add_players("A, B, C, D").unwrap();
        engine.set_team_size(TeamSize::Two).unwrap();

        let GenerateOutcome::Completed(result) = engine.generate().await.unwrap() else {
            panic!("generation should complete");
        };
        assert_eq!(result.team.len(), 2);
        assert_eq!(result.spectators.len(), 2);

        let reloaded = TeamEngine::load(store, &config());
        assert_eq!(reloaded.last_result(), Some(&result));
    }

    #[tokio::test]
    async fn test_dropped_generation_still_returns_to_idle() {
        let store = MemoryStore::new();
        let slow = AppConfig {
            delay_ms: 200,
            ..AppConfig::default()
        };
        let mut engine = TeamEngine::load(store.clone(), &slow);
        engine.add_players("A, B, C, D").unwrap();
        engine.set_team_size(TeamSize::Two).unwrap();

        let timed_out =
            tokio::time::timeout(Duration::from_millis(5), engine.generate()).await;
        assert!(timed_out.is_err());

        assert_eq!(engine.session(), SessionState::Idle);
        let result = engine.last_result().cloned().expect("result published on drop");
        assert_eq!(result.team.len(), 2);
        assert!(store.get(RESULT_KEY).unwrap().is_some());

        engine.add_players("E").unwrap();
        assert_eq!(engine.players().len(), 5);
    }
}

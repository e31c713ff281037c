use std::collections::BTreeSet;
use std::sync::Arc;

use keyrole_types::{ProgressSummary, WordEntry, WordId};
use serde::{Deserialize, Serialize};

use crate::error::{ProgressError, StorageError};
use crate::storage::KeyValueStore;
use crate::vocabulary::Vocabulary;

/// Fixed slot holding the serialized progress
pub const PROGRESS_KEY: &str = "keyrole-vocab-stats";

/// Learned and favorite word ids, stored as `{"learnedIds": [..], "favoriteIds": [..]}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProgressState {
    pub learned_ids: BTreeSet<WordId>,
    pub favorite_ids: BTreeSet<WordId>,
}

impl ProgressState {
    pub fn from_ids(
        learned: impl IntoIterator<Item = WordId>,
        favorites: impl IntoIterator<Item = WordId>,
    ) -> Self {
        Self {
            learned_ids: learned.into_iter().collect(),
            favorite_ids: favorites.into_iter().collect(),
        }
    }

    pub fn is_learned(&self, id: WordId) -> bool {
        self.learned_ids.contains(&id)
    }

    pub fn is_favorite(&self, id: WordId) -> bool {
        self.favorite_ids.contains(&id)
    }

    pub fn to_json(&self) -> Result<String, StorageError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, StorageError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Drop ids the vocabulary does not know, returns how many were removed
    fn retain_known(&mut self, vocabulary: &Vocabulary) -> usize {
        let before = self.learned_ids.len() + self.favorite_ids.len();
        self.learned_ids.retain(|id| vocabulary.contains(*id));
        self.favorite_ids.retain(|id| vocabulary.contains(*id));
        before - (self.learned_ids.len() + self.favorite_ids.len())
    }
}

/// Remove when present, insert otherwise. Returns the new membership.
fn toggle(set: &mut BTreeSet<WordId>, id: WordId) -> bool {
    if set.remove(&id) {
        false
    } else {
        set.insert(id);
        true
    }
}

/// Owns the progress state and writes it through after every change
pub struct ProgressManager {
    vocabulary: Arc<Vocabulary>,
    store: Arc<dyn KeyValueStore>,
    key: String,
    state: ProgressState,
}

impl ProgressManager {
    /// Load from the default slot
    pub fn load(vocabulary: Arc<Vocabulary>, store: Arc<dyn KeyValueStore>) -> Self {
        Self::load_with_key(vocabulary, store, PROGRESS_KEY)
    }

    /// Load progress, falling back to empty sets on any storage or parse problem
    pub fn load_with_key(
        vocabulary: Arc<Vocabulary>,
        store: Arc<dyn KeyValueStore>,
        key: &str,
    ) -> Self {
        let mut state = match store.get(key) {
            Ok(Some(raw)) => ProgressState::from_json(&raw).unwrap_or_else(|e| {
                tracing::warn!("Failed to parse stored progress under '{}': {}", key, e);
                ProgressState::default()
            }),
            Ok(None) => {
                tracing::debug!("No stored progress under '{}', starting fresh", key);
                ProgressState::default()
            }
            Err(e) => {
                tracing::error!("Failed to read stored progress: {}", e);
                ProgressState::default()
            }
        };

        let dropped = state.retain_known(&vocabulary);
        if dropped > 0 {
            tracing::warn!("Dropped {} stored ids with no matching word", dropped);
        }

        tracing::info!(
            "Progress loaded: {} learned, {} favorites",
            state.learned_ids.len(),
            state.favorite_ids.len()
        );

        Self {
            vocabulary,
            store,
            key: key.to_string(),
            state,
        }
    }

    pub fn toggle_learned(&mut self, id: WordId) -> Result<bool, ProgressError> {
        self.ensure_known(id)?;
        let learned = toggle(&mut self.state.learned_ids, id);
        tracing::debug!("Word {} learned={}", id, learned);
        self.persist();
        Ok(learned)
    }

    pub fn toggle_favorite(&mut self, id: WordId) -> Result<bool, ProgressError> {
        self.ensure_known(id)?;
        let favorite = toggle(&mut self.state.favorite_ids, id);
        tracing::debug!("Word {} favorite={}", id, favorite);
        self.persist();
        Ok(favorite)
    }

    pub fn is_learned(&self, id: WordId) -> bool {
        self.state.is_learned(id)
    }

    pub fn is_favorite(&self, id: WordId) -> bool {
        self.state.is_favorite(id)
    }

    pub fn state(&self) -> &ProgressState {
        &self.state
    }

    pub fn vocabulary(&self) -> &Arc<Vocabulary> {
        &self.vocabulary
    }

    /// Learned words in vocabulary order
    pub fn learned_words(&self) -> Vec<&WordEntry> {
        self.vocabulary
            .words()
            .iter()
            .filter(|w| self.state.is_learned(w.id))
            .collect()
    }

    pub fn favorite_words(&self) -> Vec<&WordEntry> {
        self.vocabulary
            .words()
            .iter()
            .filter(|w| self.state.is_favorite(w.id))
            .collect()
    }

    pub fn summary(&self) -> ProgressSummary {
        let learned = self.state.learned_ids.len();
        let total = self.vocabulary.len();
        ProgressSummary {
            learned,
            favorites: self.state.favorite_ids.len(),
            total,
            percent: round_percent(learned, total),
        }
    }

    fn ensure_known(&self, id: WordId) -> Result<(), ProgressError> {
        if self.vocabulary.contains(id) {
            Ok(())
        } else {
            Err(ProgressError::UnknownWord(id))
        }
    }

    // Write failures are logged, the in-memory change stands
    fn persist(&self) {
        let result = self
            .state
            .to_json()
            .and_then(|json| self.store.set(&self.key, &json));
        if let Err(e) = result {
            tracing::error!("Failed to persist progress: {}", e);
        }
    }
}

/// `round(part / whole * 100)`, 0 for an empty whole
pub fn round_percent(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    ((part as f64 / whole as f64) * 100.0).round() as u32
}

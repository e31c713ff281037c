use std::collections::{HashMap, HashSet};
use std::path::Path;

use keyrole_types::{ALL_CATEGORIES, WordEntry, WordId};
use serde::Deserialize;

use crate::error::LoadError;

// On-disk word list
#[derive(Debug, Deserialize)]
struct VocabularyJson {
    /// When empty, categories are collected from the words in order of appearance
    #[serde(default)]
    categories: Vec<String>,
    words: Vec<WordEntry>,
}

/// Read-only word list with its enumerated categories
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    words: Vec<WordEntry>,
    categories: Vec<String>,
    index: HashMap<WordId, usize>,
}

impl Vocabulary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build and validate: ids must be unique and every category listed
    pub fn from_words(categories: Vec<String>, words: Vec<WordEntry>) -> Result<Self, LoadError> {
        let categories = if categories.is_empty() {
            let mut seen = HashSet::new();
            words
                .iter()
                .filter(|w| seen.insert(w.category.clone()))
                .map(|w| w.category.clone())
                .collect()
        } else {
            categories
                .into_iter()
                .filter(|c| !c.eq_ignore_ascii_case(ALL_CATEGORIES))
                .collect::<Vec<_>>()
        };

        let mut index = HashMap::with_capacity(words.len());
        for (pos, word) in words.iter().enumerate() {
            if index.insert(word.id, pos).is_some() {
                return Err(LoadError::DuplicateId(word.id));
            }
            if !categories.iter().any(|c| c == &word.category) {
                return Err(LoadError::UnknownCategory {
                    id: word.id,
                    category: word.category.clone(),
                });
            }
        }

        Ok(Self {
            words,
            categories,
            index,
        })
    }

    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        let data: VocabularyJson = serde_json::from_str(json)?;
        Self::from_words(data.categories, data.words)
    }

    pub fn load_from_file(path: &Path) -> Result<Self, LoadError> {
        if !path.exists() {
            return Err(LoadError::FileNotFound(path.display().to_string()));
        }
        tracing::info!("Loading vocabulary from file: {}", path.display());
        let json = std::fs::read_to_string(path)?;
        let vocabulary = Self::from_json(&json)?;
        tracing::info!("Loaded {} words from file", vocabulary.len());
        Ok(vocabulary)
    }

    /// Merge another list over this one. Entries with an existing id replace it in place,
    /// new ids are appended.
    pub fn merge(self, other: Vocabulary) -> Result<Self, LoadError> {
        let mut categories = self.categories;
        for category in other.categories {
            if !categories.contains(&category) {
                categories.push(category);
            }
        }

        let mut words = self.words;
        let index = self.index;
        for word in other.words {
            match index.get(&word.id) {
                Some(&pos) => words[pos] = word,
                None => words.push(word),
            }
        }

        Self::from_words(categories, words)
    }

    pub fn get(&self, id: WordId) -> Option<&WordEntry> {
        self.index.get(&id).map(|&pos| &self.words[pos])
    }

    pub fn contains(&self, id: WordId) -> bool {
        self.index.contains_key(&id)
    }

    /// Words in storage order
    pub fn words(&self) -> &[WordEntry] {
        &self.words
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Category selector labels, sentinel first
    pub fn selector_labels(&self) -> Vec<String> {
        std::iter::once(ALL_CATEGORIES.to_string())
            .chain(self.categories.iter().cloned())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

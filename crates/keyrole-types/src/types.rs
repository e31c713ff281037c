use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub type WordId = u32;

/// Label used by the category selector to mean "every category"
pub const ALL_CATEGORIES: &str = "All";

/// One vocabulary item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordEntry {
    pub id: WordId,
    /// Source-language term
    pub spanish: String,
    /// Pronunciation guide
    pub transliteration: String,
    /// Localized gloss
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub malaysian: Option<String>,
    /// Target-language meaning
    pub meaning: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mnemonic: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    /// Parse a selector label, "All" in any case maps to the sentinel
    pub fn parse(label: &str) -> Self {
        let label = label.trim();
        if label.is_empty() || label.eq_ignore_ascii_case(ALL_CATEGORIES) {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(label.to_string())
        }
    }

    pub fn matches(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => wanted == category,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str(ALL_CATEGORIES),
            CategoryFilter::Only(label) => f.write_str(label),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "grid" => Ok(ViewMode::Grid),
            "list" => Ok(ViewMode::List),
            other => Err(format!("Unknown view '{other}'")),
        }
    }
}

/// Kind of generated text requested from the word assistant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssistKind {
    Mnemonic,
    Usage,
}

impl AssistKind {
    pub fn label(&self) -> &'static str {
        match self {
            AssistKind::Mnemonic => "Mnemonic",
            AssistKind::Usage => "Usage example",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressSummary {
    pub learned: usize,
    pub favorites: usize,
    pub total: usize,
    pub percent: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordRow {
    pub entry: WordEntry,
    pub learned: bool,
    pub favorite: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizView {
    /// No learned words, only exit is available
    Empty,
    Question {
        number: usize,
        total: usize,
        term: String,
        transliteration: String,
        /// Malay gloss shown under the term
        malaysian: Option<String>,
        options: Vec<String>,
        selected: Option<String>,
        /// Revealed once an answer is locked in
        correct: Option<String>,
        score: usize,
    },
    Completed {
        score: usize,
        total: usize,
        percent: u32,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCommand {
    Search(String),
    Category(CategoryFilter),
    ListCategories,
    ClearFilters,
    SetView(ViewMode),
    List,
    ToggleLearned(WordId),
    ToggleFavorite(WordId),
    Show(WordId),
    Mnemonic(WordId),
    Assist { id: WordId, kind: AssistKind },
    /// Speak a word, or the current quiz question when no id is given
    Speak(Option<WordId>),
    Stats,
    StartQuiz,
    Answer(usize),
    Next,
    Restart,
    ExitQuiz,
    Help,
    Quit,
}

#[derive(Debug, Clone)]
pub enum AppEvent {
    Command(UiCommand),
    AssistReady {
        id: WordId,
        kind: AssistKind,
        text: String,
    },
    ShowWords {
        rows: Vec<WordRow>,
        view: ViewMode,
        filter: CategoryFilter,
        search: String,
        summary: ProgressSummary,
    },
    ShowWord(WordRow),
    ShowQuiz(QuizView),
    ShowAssist {
        term: String,
        kind: AssistKind,
        text: String,
    },
    ShowCategories(Vec<String>),
    ShowSummary(ProgressSummary),
    Status(String),
    Help,
    Shutdown,
}

use keyrole_types::{CategoryFilter, WordEntry};

use crate::preprocess::{DefaultPreprocessor, Preprocessor};
use crate::progress::ProgressState;
use crate::vocabulary::Vocabulary;

/// Search text plus category selector
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterQuery {
    pub search: String,
    pub category: CategoryFilter,
}

impl FilterQuery {
    pub fn new(search: impl Into<String>, category: CategoryFilter) -> Self {
        Self {
            search: search.into(),
            category,
        }
    }

    /// Reset to empty search and the "All" category
    pub fn clear(&mut self) {
        *self = FilterQuery::default();
    }

    pub fn is_cleared(&self) -> bool {
        self.search.trim().is_empty() && self.category == CategoryFilter::All
    }
}

/// Substring match over term, pronunciation and meaning. `needle` must already be folded.
fn matches_search(word: &WordEntry, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }

    let pre = DefaultPreprocessor;
    [&word.spanish, &word.transliteration, &word.meaning]
        .iter()
        .any(|field| pre.process(field).contains(needle))
}

/// Matching words, unlearned first. Order within each group follows the vocabulary.
pub fn filter_words<'a>(
    vocabulary: &'a Vocabulary,
    query: &FilterQuery,
    progress: &ProgressState,
) -> Vec<&'a WordEntry> {
    let needle = DefaultPreprocessor.process(&query.search);

    let mut matched: Vec<&WordEntry> = vocabulary
        .words()
        .iter()
        .filter(|w| query.category.matches(&w.category) && matches_search(w, &needle))
        .collect();

    // sort_by_key is stable
    matched.sort_by_key(|w| progress.is_learned(w.id));
    matched
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::vocabulary::tests::sample;

    fn ids(words: &[&WordEntry]) -> Vec<u32> {
        words.iter().map(|w| w.id).collect()
    }

    #[test]
    fn test_empty_query_returns_everything_in_order() {
        let vocab = sample();
        let result = filter_words(&vocab, &FilterQuery::default(), &ProgressState::default());
        assert_eq!(ids(&result), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_search_is_case_insensitive_across_fields() {
        let vocab = sample();
        let progress = ProgressState::default();

        let by_meaning = filter_words(&vocab, &FilterQuery::new("WATER", CategoryFilter::All), &progress);
        assert_eq!(ids(&by_meaning), vec![4]);

        let by_term = filter_words(&vocab, &FilterQuery::new("adre", CategoryFilter::All), &progress);
        assert_eq!(ids(&by_term), vec![5, 6]);

        let by_pron = filter_words(&vocab, &FilterQuery::new("hola-PRON", CategoryFilter::All), &progress);
        assert_eq!(ids(&by_pron), vec![1]);
    }

    #[test]
    fn test_search_matches_decomposed_accents() {
        let vocab = sample();
        let query = FilterQuery::new("ADIO\u{0301}S", CategoryFilter::All);
        let result = filter_words(&vocab, &query, &ProgressState::default());
        assert_eq!(ids(&result), vec![2]);
    }

    #[test]
    fn test_category_filter() {
        let vocab = sample();
        let query = FilterQuery::new("", CategoryFilter::Only("Food".into()));
        let result = filter_words(&vocab, &query, &ProgressState::default());
        assert_eq!(ids(&result), vec![3, 4]);

        let query = FilterQuery::new("a", CategoryFilter::Only("Family".into()));
        let result = filter_words(&vocab, &query, &ProgressState::default());
        assert_eq!(ids(&result), vec![5, 6]);
    }

    #[test]
    fn test_no_matches_is_empty_not_error() {
        let vocab = sample();
        let query = FilterQuery::new("zzz", CategoryFilter::All);
        assert!(filter_words(&vocab, &query, &ProgressState::default()).is_empty());

        let query = FilterQuery::new("", CategoryFilter::Only("Colors".into()));
        assert!(filter_words(&vocab, &query, &ProgressState::default()).is_empty());
    }

    #[test]
    fn test_learned_words_sink_to_the_end() {
        let vocab = sample();
        let progress = ProgressState::from_ids([1, 4], []);
        let result = filter_words(&vocab, &FilterQuery::default(), &progress);
        assert_eq!(ids(&result), vec![2, 3, 5, 6, 1, 4]);

        // no learned entry precedes an unlearned one
        for pair in result.windows(2) {
            assert!(!(progress.is_learned(pair[0].id) && !progress.is_learned(pair[1].id)));
        }
    }

    #[test]
    fn test_output_is_exactly_the_matching_set() {
        let vocab = sample();
        let progress = ProgressState::from_ids([2, 3], [5]);
        for search in ["", "a", "PAN", "o", "her", "x"] {
            for category in vocab.selector_labels() {
                let query = FilterQuery::new(search, CategoryFilter::parse(&category));
                let result = filter_words(&vocab, &query, &progress);
                let needle = search.to_lowercase();
                let expected: Vec<u32> = vocab
                    .words()
                    .iter()
                    .filter(|w| query.category.matches(&w.category))
                    .filter(|w| {
                        w.spanish.to_lowercase().contains(&needle)
                            || w.transliteration.to_lowercase().contains(&needle)
                            || w.meaning.to_lowercase().contains(&needle)
                    })
                    .map(|w| w.id)
                    .collect();

                let mut got = ids(&result);
                got.sort_unstable();
                let mut expected_sorted = expected.clone();
                expected_sorted.sort_unstable();
                assert_eq!(got, expected_sorted, "search={search:?} category={category}");
            }
        }
    }

    #[test]
    fn test_clear_resets_query() {
        let mut query = FilterQuery::new("pan", CategoryFilter::Only("Food".into()));
        assert!(!query.is_cleared());
        query.clear();
        assert!(query.is_cleared());
        assert_eq!(query, FilterQuery::default());
    }
}

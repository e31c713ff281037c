pub mod types;

pub use types::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_filter_parse() {
        assert_eq!(CategoryFilter::parse("all"), CategoryFilter::All);
        assert_eq!(CategoryFilter::parse(" ALL "), CategoryFilter::All);
        assert_eq!(CategoryFilter::parse(""), CategoryFilter::All);
        assert_eq!(
            CategoryFilter::parse("Food"),
            CategoryFilter::Only("Food".to_string())
        );
    }

    #[test]
    fn test_category_filter_matches() {
        assert!(CategoryFilter::All.matches("Food"));
        assert!(CategoryFilter::Only("Food".into()).matches("Food"));
        assert!(!CategoryFilter::Only("Food".into()).matches("Family"));
    }

    #[test]
    fn test_word_entry_camel_case_fields() {
        let json = r#"{
            "id": 7,
            "spanish": "gracias",
            "transliteration": "GRAH-syahs",
            "malaysian": "terima kasih",
            "meaning": "thank you",
            "category": "Greetings"
        }"#;
        let word: WordEntry = serde_json::from_str(json).unwrap();
        assert_eq!(word.id, 7);
        assert_eq!(word.malaysian.as_deref(), Some("terima kasih"));
        assert!(word.mnemonic.is_none());
    }

    #[test]
    fn test_view_mode_from_str() {
        assert_eq!("GRID".parse(), Ok(ViewMode::Grid));
        assert_eq!(" list".parse(), Ok(ViewMode::List));
        assert!("flashcard".parse::<ViewMode>().is_err());
    }
}

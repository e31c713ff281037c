use unicode_normalization::UnicodeNormalization;

pub trait Preprocessor {
    // Default search folding
    fn process(&self, text: &str) -> String {
        let text = text.trim();

        if text.is_empty() {
            return String::new();
        }

        // Unicode normalization (NFKC) so composed and decomposed accents compare equal
        text.nfkc().collect::<String>().to_lowercase()
    }
}

pub struct DefaultPreprocessor;
impl Preprocessor for DefaultPreprocessor {}

pub mod assistant;
pub mod loader;

pub use assistant::GeminiAssistant;
pub use loader::VocabularyLoader;

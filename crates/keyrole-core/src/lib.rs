pub mod error;
pub mod filter;
pub mod preprocess;
pub mod progress;
pub mod quiz;
pub mod speech;
pub mod storage;
pub mod vocabulary;

pub use error::{LoadError, ProgressError, SpeechError, StorageError};
pub use filter::{FilterQuery, filter_words};
pub use progress::{PROGRESS_KEY, ProgressManager, ProgressState};
pub use quiz::{AnswerOutcome, QuizQuestion, QuizSession, QuizState};
pub use speech::{CommandSpeaker, SilentSpeaker, TextToSpeech, speak_or_log};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use vocabulary::Vocabulary;

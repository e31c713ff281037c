use std::process::{Command, Stdio};

use crate::error::SpeechError;

/// Host text-to-speech capability. Nothing waits on the utterance.
pub trait TextToSpeech: Send + Sync {
    fn speak(&self, text: &str, lang: &str) -> Result<(), SpeechError>;
}

/// Fire and forget, errors only reach the log
pub fn speak_or_log(tts: &dyn TextToSpeech, text: &str, lang: &str) {
    if let Err(e) = tts.speak(text, lang) {
        tracing::warn!("Speech unavailable for '{}': {}", text, e);
    }
}

/// Used when speech is turned off in config
pub struct SilentSpeaker;

impl TextToSpeech for SilentSpeaker {
    fn speak(&self, _text: &str, _lang: &str) -> Result<(), SpeechError> {
        Err(SpeechError::Disabled)
    }
}

/// Spawns an external program per utterance, e.g. `espeak-ng -v es-ES hola`
pub struct CommandSpeaker {
    program: String,
    args: Vec<String>,
}

impl CommandSpeaker {
    /// `{lang}` and `{text}` in `args` are replaced on every call
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    fn render_args(&self, text: &str, lang: &str) -> Vec<String> {
        self.args
            .iter()
            .map(|arg| arg.replace("{lang}", lang).replace("{text}", text))
            .collect()
    }
}

impl TextToSpeech for CommandSpeaker {
    fn speak(&self, text: &str, lang: &str) -> Result<(), SpeechError> {
        let mut child = Command::new(&self.program)
            .args(self.render_args(text, lang))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| SpeechError::Spawn {
                command: self.program.clone(),
                source,
            })?;

        // reap in the background so the caller never blocks
        std::thread::spawn(move || {
            if let Err(e) = child.wait() {
                tracing::debug!("Speech process wait failed: {}", e);
            }
        });
        Ok(())
    }
}

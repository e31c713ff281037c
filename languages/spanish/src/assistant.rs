use std::time::Duration;

use async_trait::async_trait;
use keyrole_assistant::{AssistError, ProviderMetadata, WordAssistant};
use keyrole_config::assistant::AssistantConfig;
use keyrole_types::WordEntry;

#[derive(Clone)]
pub struct GeminiAssistant {
    client: reqwest::Client,
    api_key: String,
    api_url: String,
    model: String,
    mnemonic_temperature: f64,
    usage_temperature: f64,
}

impl GeminiAssistant {
    pub fn new(api_key: String, api_url: String, model: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            api_url,
            model,
            mnemonic_temperature: 0.7,
            usage_temperature: 0.5,
        }
    }

    pub fn from_config(config: &AssistantConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Falling back to default HTTP client: {}", e);
                reqwest::Client::new()
            });

        Self {
            client,
            api_key: config.api_key.clone(),
            api_url: config.api_url.clone(),
            model: config.model.clone(),
            mnemonic_temperature: config.mnemonic_temperature,
            usage_temperature: config.usage_temperature,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.api_url.trim_end_matches('/'),
            self.model
        )
    }

    async fn generate(&self, prompt: &str, temperature: f64) -> Result<String, AssistError> {
        if self.api_key.is_empty() {
            return Err(AssistError::AuthenticationError);
        }

        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": { "temperature": temperature },
        });

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        if response.status() == 429 {
            return Err(AssistError::RateLimitExceeded);
        }

        if response.status() == 401 || response.status() == 403 {
            return Err(AssistError::AuthenticationError);
        }

        if !response.status().is_success() {
            return Err(AssistError::ApiError(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AssistError::ApiError(format!("Failed to parse response: {}", e)))?;

        extract_text(&json)
            .ok_or_else(|| AssistError::ApiError("No candidate text in response".to_string()))
    }
}

/// Concatenated text parts of the first candidate
fn extract_text(json: &serde_json::Value) -> Option<String> {
    let parts = json["candidates"]
        .get(0)
        .and_then(|c| c["content"]["parts"].as_array())?;

    Some(
        parts
            .iter()
            .filter_map(|p| p["text"].as_str())
            .collect::<String>(),
    )
}

pub fn mnemonic_prompt(word: &WordEntry) -> String {
    format!(
        "Create a simple, fun mnemonic to help me remember the Spanish word \"{}\" ({}), which means \"{}\". Keep it under 50 words.",
        word.spanish, word.transliteration, word.meaning
    )
}

pub fn usage_prompt(word: &WordEntry) -> String {
    format!(
        "Provide 1 simple example sentence in Spanish using the word \"{}\" ({}), including its pronunciation and English translation.",
        word.spanish, word.meaning
    )
}

#[async_trait]
impl WordAssistant for GeminiAssistant {
    async fn mnemonic(&self, word: &WordEntry) -> Result<String, AssistError> {
        self.generate(&mnemonic_prompt(word), self.mnemonic_temperature)
            .await
    }

    async fn usage_example(&self, word: &WordEntry) -> Result<String, AssistError> {
        self.generate(&usage_prompt(word), self.usage_temperature)
            .await
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "Gemini".to_string(),
            model: self.model.clone(),
            requires_api_key: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use keyrole_assistant::{
        MNEMONIC_EMPTY, MNEMONIC_FAILED, USAGE_FAILED, mnemonic_or_fallback, usage_or_fallback,
    };
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    use super::*;

    fn perro() -> WordEntry {
        WordEntry {
            id: 3,
            spanish: "perro".into(),
            transliteration: "PEH-rroh".into(),
            malaysian: None,
            meaning: "dog".into(),
            category: "Animals".into(),
            mnemonic: None,
        }
    }

    fn assistant_at(url: String) -> GeminiAssistant {
        GeminiAssistant::new("test-key".into(), url, "gemini-test".into())
    }

    fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
        haystack.windows(needle.len()).position(|w| w == needle)
    }

    /// Serve one canned HTTP response, hand back the raw request
    async fn serve_once(status: &'static str, body: &'static str) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/v1beta", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut chunk = [0u8; 1024];
            loop {
                let n = stream.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&chunk[..n]);
                if let Some(end) = find(&request, b"\r\n\r\n") {
                    let headers = String::from_utf8_lossy(&request[..end]).to_lowercase();
                    let length = headers
                        .lines()
                        .find_map(|l| l.strip_prefix("content-length:"))
                        .and_then(|v| v.trim().parse::<usize>().ok())
                        .unwrap_or(0);
                    if request.len() >= end + 4 + length {
                        break;
                    }
                }
            }

            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.shutdown().await.ok();
            String::from_utf8_lossy(&request).to_string()
        });

        (url, handle)
    }

    #[test]
    fn test_extract_text_joins_parts() {
        let json = serde_json::json!({
            "candidates": [{ "content": { "parts": [{ "text": "Un " }, { "text": "perro." }] } }]
        });
        assert_eq!(extract_text(&json).as_deref(), Some("Un perro."));
        assert_eq!(extract_text(&serde_json::json!({ "candidates": [] })), None);
        assert_eq!(extract_text(&serde_json::json!({})), None);
    }

    #[test]
    fn test_prompts_mention_the_word() {
        let mnemonic = mnemonic_prompt(&perro());
        assert!(mnemonic.contains("\"perro\" (PEH-rroh)"));
        assert!(mnemonic.contains("means \"dog\""));
        assert!(usage_prompt(&perro()).contains("\"perro\" (dog)"));
    }

    #[test]
    fn test_endpoint() {
        let assistant = assistant_at("https://example.test/v1beta/".into());
        assert_eq!(
            assistant.endpoint(),
            "https://example.test/v1beta/models/gemini-test:generateContent"
        );
    }

    #[tokio::test]
    async fn test_missing_key_is_authentication_error() {
        let assistant = GeminiAssistant::new(String::new(), "http://127.0.0.1:1".into(), "m".into());
        assert!(matches!(
            assistant.mnemonic(&perro()).await,
            Err(AssistError::AuthenticationError)
        ));
        assert_eq!(mnemonic_or_fallback(&assistant, &perro()).await, MNEMONIC_FAILED);
    }

    #[tokio::test]
    async fn test_network_failure_returns_fallback_text() {
        // bind then drop to get a port nobody listens on
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let assistant = assistant_at(format!("http://127.0.0.1:{port}/v1beta"));

        assert!(matches!(
            assistant.usage_example(&perro()).await,
            Err(AssistError::NetworkError(_))
        ));
        assert_eq!(usage_or_fallback(&assistant, &perro()).await, USAGE_FAILED);
    }

    #[tokio::test]
    async fn test_successful_generation() {
        let (url, server) = serve_once(
            "200 OK",
            r#"{"candidates":[{"content":{"parts":[{"text":"A PERRO purrs? No, a dog barks!"}]}}]}"#,
        )
        .await;
        let assistant = assistant_at(url);

        let text = mnemonic_or_fallback(&assistant, &perro()).await;
        assert_eq!(text, "A PERRO purrs? No, a dog barks!");

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /v1beta/models/gemini-test:generateContent"));
        assert!(request.to_lowercase().contains("x-goog-api-key: test-key"));
        assert!(request.contains("\"temperature\":0.7"));
    }

    #[tokio::test]
    async fn test_malformed_body_returns_fallback_text() {
        let (url, server) = serve_once("200 OK", "{not json").await;
        let assistant = assistant_at(url);
        assert_eq!(mnemonic_or_fallback(&assistant, &perro()).await, MNEMONIC_FAILED);
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_empty_candidate_text_returns_empty_fallback() {
        let (url, server) = serve_once(
            "200 OK",
            r#"{"candidates":[{"content":{"parts":[{"text":""}]}}]}"#,
        )
        .await;
        let assistant = assistant_at(url);
        assert_eq!(mnemonic_or_fallback(&assistant, &perro()).await, MNEMONIC_EMPTY);
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_rate_limit_status() {
        let (url, server) = serve_once("429 Too Many Requests", "{}").await;
        let assistant = assistant_at(url);
        assert!(matches!(
            assistant.mnemonic(&perro()).await,
            Err(AssistError::RateLimitExceeded)
        ));
        server.await.unwrap();
    }
}

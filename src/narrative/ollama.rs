//! Ollama HTTP client for the generative narrative path.

use serde::{Deserialize, Serialize};

use super::NarrativeError;

/// Text-generation capability consumed by the synthesizer.
///
/// One method is all the engine needs; model management stays with the
/// backend's own tooling.
pub trait LlmClient: Send + Sync {
    fn generate(&self, model: &str, prompt: &str, system: &str) -> Result<String, NarrativeError>;
}

/// Blocking HTTP client against a local Ollama instance.
pub struct OllamaClient {
    base_url: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl OllamaClient {
    pub fn new(base_url: &str, timeout_secs: u64) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            timeout_secs,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Request body for Ollama /api/generate
#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    system: &'a str,
    stream: bool,
}

/// Response body from Ollama /api/generate
#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

impl LlmClient for OllamaClient {
    fn generate(&self, model: &str, prompt: &str, system: &str) -> Result<String, NarrativeError> {
        let url = format!("{}/api/generate", self.base_url);
        let body = GenerateRequest {
            model,
            prompt,
            system,
            stream: false,
        };

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .map_err(|e| {
                if e.is_connect() {
                    NarrativeError::Connection(self.base_url.clone())
                } else if e.is_timeout() {
                    NarrativeError::Timeout(self.timeout_secs)
                } else {
                    NarrativeError::Http(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(NarrativeError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = response
            .json()
            .map_err(|e| NarrativeError::ResponseParsing(e.to_string()))?;

        Ok(parsed.response)
    }
}

/// Mock client returning a fixed response, for tests.
pub struct MockLlmClient {
    response: String,
}

impl MockLlmClient {
    pub fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
        }
    }
}

impl LlmClient for MockLlmClient {
    fn generate(&self, _model: &str, _prompt: &str, _system: &str) -> Result<String, NarrativeError> {
        Ok(self.response.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_client_returns_configured_response() {
        let client = MockLlmClient::new("herbal narrative");
        let out = client.generate("model", "prompt", "system").unwrap();
        assert_eq!(out, "herbal narrative");
    }

    #[test]
    fn ollama_client_trims_trailing_slash() {
        let client = OllamaClient::new("http://localhost:11434/", 60);
        assert_eq!(client.base_url(), "http://localhost:11434");
    }

    #[test]
    fn ollama_client_keeps_timeout() {
        let client = OllamaClient::new("http://localhost:11434", 120);
        assert_eq!(client.timeout_secs, 120);
    }
}

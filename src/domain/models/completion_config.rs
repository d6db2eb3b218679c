use serde::{Deserialize, Serialize};

/// Provider-side parameters for a completion request.
///
/// `model` is an override; when `None` each provider falls back to its own
/// environment variable and then to its built-in default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionConfig {
    pub model: Option<String>,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Ask the provider to return a JSON object when it supports such a hint.
    pub json_response: bool,
}

impl CompletionConfig {
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens.max(1);
        self
    }

    pub fn with_json_response(mut self, enabled: bool) -> Self {
        self.json_response = enabled;
        self
    }
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            model: None,
            temperature: 0.7,
            max_tokens: 2000,
            json_response: true,
        }
    }
}

//! Gemini model discovery.
//!
//! Small utility endpoint: list which models the configured `GOOGLE_API_KEY`
//! can call `generateContent` on. Useful when switching the agent between
//! providers.

use reqwest::blocking::Client;
use serde::Deserialize;

use crate::error::AppError;

const MODELS_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

pub struct GeminiClient {
    client: Client,
    api_key: String,
}

impl GeminiClient {
    /// Read `GOOGLE_API_KEY` from the environment (`.env` honored).
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let api_key = std::env::var("GOOGLE_API_KEY")
            .map_err(|_| AppError::new(2, "Missing GOOGLE_API_KEY in environment (.env)."))?;
        Ok(Self::with_api_key(api_key))
    }

    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
        }
    }

    /// Names of all models supporting `generateContent`, across pages.
    pub fn list_models(&self) -> Result<Vec<String>, AppError> {
        let mut names = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut req = self
                .client
                .get(MODELS_URL)
                .query(&[("key", self.api_key.as_str()), ("pageSize", "200")]);
            if let Some(token) = &page_token {
                req = req.query(&[("pageToken", token.as_str())]);
            }

            let resp = req
                .send()
                .map_err(|e| AppError::new(4, format!("Gemini request failed: {e}")))?;

            let status = resp.status();
            if !status.is_success() {
                return Err(AppError::new(
                    4,
                    format!("Gemini request failed with status {status}."),
                ));
            }

            let body: ModelsResponse = resp
                .json()
                .map_err(|e| AppError::new(4, format!("Failed to parse Gemini response: {e}")))?;

            for model in body.models {
                if model
                    .supported_generation_methods
                    .iter()
                    .any(|m| m == "generateContent")
                {
                    names.push(model.name);
                }
            }

            match body.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        Ok(names)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModelsResponse {
    #[serde(default)]
    models: Vec<ModelInfo>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModelInfo {
    name: String,
    #[serde(default)]
    supported_generation_methods: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn models_response_filters_on_generate_content() {
        let raw = r#"{
            "models": [
                {"name": "models/gemini-pro", "supportedGenerationMethods": ["generateContent"]},
                {"name": "models/embedding-001", "supportedGenerationMethods": ["embedContent"]}
            ]
        }"#;
        let body: ModelsResponse = serde_json::from_str(raw).unwrap();
        let names: Vec<_> = body
            .models
            .into_iter()
            .filter(|m| m.supported_generation_methods.iter().any(|s| s == "generateContent"))
            .map(|m| m.name)
            .collect();
        assert_eq!(names, ["models/gemini-pro"]);
    }
}

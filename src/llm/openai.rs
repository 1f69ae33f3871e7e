//! OpenAI chat-completions client (blocking).

use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::domain::{self, OptimizationRequest};
use crate::error::AppError;
use crate::report::Assignments;

const CHAT_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Model used for structured parsing (needs solid schema adherence).
const PARSE_MODEL: &str = "gpt-4o";
/// Model used for table rendering (cheap, formatting-only).
const RENDER_MODEL: &str = "gpt-4o-mini";

pub struct OpenAiClient {
    client: Client,
    api_key: String,
}

impl OpenAiClient {
    /// Read `OPENAI_API_KEY` from the environment (`.env` honored).
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| AppError::new(2, "Missing OPENAI_API_KEY in environment (.env)."))?;
        Ok(Self::with_api_key(api_key))
    }

    /// Explicit-key constructor, used by tests and embedding callers.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
        }
    }

    /// Convert a free-text inventory description into a structured request.
    ///
    /// The completion is constrained to the optimizer's wire schema, then
    /// validated locally — the model assigns the incremental numbering, but
    /// we do not trust it to get uniqueness or positivity right.
    pub fn parse_request(&self, description: &str) -> Result<OptimizationRequest, AppError> {
        let body = json!({
            "model": PARSE_MODEL,
            "messages": [
                {
                    "role": "system",
                    "content": "You convert human descriptions of items and bins into a \
                                structured JSON object for a bin-packing optimizer. \
                                Assign unique incremental numbers starting from 1 to \
                                each item type and each bin type."
                },
                { "role": "user", "content": description }
            ],
            "response_format": {
                "type": "json_schema",
                "json_schema": {
                    "name": "optimization_request",
                    "strict": true,
                    "schema": request_schema()
                }
            }
        });

        let content = self.complete(&body)?;
        let request: OptimizationRequest = serde_json::from_str(&content).map_err(|e| {
            AppError::new(4, format!("LLM returned a non-conforming request: {e}\n{content}"))
        })?;
        domain::validate_request(&request)?;
        Ok(request)
    }

    /// Render bin/item assignments as a two-column Markdown table.
    pub fn render_markdown(&self, assignments: &Assignments) -> Result<String, AppError> {
        let data = serde_json::to_string_pretty(&assignments.to_json())
            .map_err(|e| AppError::new(2, format!("Failed to encode assignments: {e}")))?;

        let body = json!({
            "model": RENDER_MODEL,
            "messages": [
                { "role": "system", "content": "You are a data visualization expert." },
                {
                    "role": "user",
                    "content": format!(
                        "Convert the following bin-item mapping into a Markdown table.\n\n\
                         {data}\n\n\
                         Each row represents one bin. Columns: \"Bin\" | \"Items\". \
                         Only return the Markdown table. No extra text."
                    )
                }
            ]
        });

        self.complete(&body)
    }

    /// POST one chat completion and pull out the first choice's content.
    fn complete(&self, body: &Value) -> Result<String, AppError> {
        let resp = self
            .client
            .post(CHAT_URL)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .map_err(|e| AppError::new(4, format!("OpenAI request failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let detail = resp.text().unwrap_or_default();
            return Err(AppError::new(
                4,
                format!("OpenAI request failed with status {status}: {detail}"),
            ));
        }

        let parsed: ChatResponse = resp
            .json()
            .map_err(|e| AppError::new(4, format!("Failed to parse OpenAI response: {e}")))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| AppError::new(4, "OpenAI response contained no choices."))
    }
}

/// JSON schema for [`OptimizationRequest`], mirroring the wire format.
fn request_schema() -> Value {
    json!({
        "type": "object",
        "additionalProperties": false,
        "properties": {
            "itemTypes": {
                "type": "array",
                "items": {
                    "type": "object",
                    "additionalProperties": false,
                    "properties": {
                        "number":   { "type": "integer" },
                        "width":    { "type": "number" },
                        "height":   { "type": "number" },
                        "price":    { "type": "number" },
                        "quantity": { "type": "integer" }
                    },
                    "required": ["number", "width", "height", "price", "quantity"]
                }
            },
            "binTypes": {
                "type": "array",
                "items": {
                    "type": "object",
                    "additionalProperties": false,
                    "properties": {
                        "number": { "type": "integer" },
                        "width":  { "type": "number" },
                        "height": { "type": "number" }
                    },
                    "required": ["number", "width", "height"]
                }
            }
        },
        "required": ["itemTypes", "binTypes"]
    })
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Debug, Deserialize)]
struct Message {
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_names_match_wire_format() {
        let schema = request_schema();
        let props = schema.get("properties").unwrap();
        assert!(props.get("itemTypes").is_some());
        assert!(props.get("binTypes").is_some());
        // Field casing must match what serde produces for the domain types.
        let item_props = props["itemTypes"]["items"]["properties"].as_object().unwrap();
        for key in ["number", "width", "height", "price", "quantity"] {
            assert!(item_props.contains_key(key), "schema missing `{key}`");
        }
    }

    #[test]
    fn chat_response_extracts_first_choice() {
        let raw = r#"{"choices":[{"message":{"role":"assistant","content":"hi"}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.choices[0].message.content, "hi");
    }
}

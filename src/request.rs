use serde::Serialize;
use serde_json::{json, Value};

/// Number of recommendations requested from the model.
pub const SUGGESTION_COUNT: usize = 5;

/// Fields every suggestion object must carry.
pub const SUGGESTION_FIELDS: [&str; 3] = ["title", "synopsis", "genre"];

/// Body of a Gemini `generateContent` call.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<RequestContent>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RequestContent {
    pub role: String,
    pub parts: Vec<RequestPart>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RequestPart {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_mime_type: String,
    pub response_schema: Value,
}

impl GenerateContentRequest {
    /// Text of the first user part.
    pub fn prompt(&self) -> Option<&str> {
        self.contents
            .first()
            .and_then(|content| content.parts.first())
            .map(|part| part.text.as_str())
    }
}

pub fn build_prompt(favorite_anime: &str) -> String {
    format!(
        "Based on the anime \"{favorite_anime}\", suggest {SUGGESTION_COUNT} similar anime. \
         For each suggestion, provide a one-sentence synopsis and its primary genre."
    )
}

/// Response schema in Gemini's OpenAPI subset: an array of objects with
/// three required string properties.
pub fn suggestion_schema() -> Value {
    let properties: serde_json::Map<String, Value> = SUGGESTION_FIELDS
        .iter()
        .map(|field| (field.to_string(), json!({ "type": "STRING" })))
        .collect();

    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": properties,
            "required": SUGGESTION_FIELDS,
        }
    })
}

/// Build the complete request for one favorite title.
pub fn build_request(favorite_anime: &str) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![RequestContent {
            role: "user".to_string(),
            parts: vec![RequestPart {
                text: build_prompt(favorite_anime),
            }],
        }],
        generation_config: GenerationConfig {
            response_mime_type: "application/json".to_string(),
            response_schema: suggestion_schema(),
        },
    }
}

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::RecommendError;

/// Shown in place of a field the model left out.
pub const PLACEHOLDER: &str = "N/A";

/// One recommended anime.
///
/// Fields are optional so a partially filled object still decodes; the
/// accessors fall back to [`PLACEHOLDER`]. A field that is present but not a
/// string is treated as missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    #[serde(default, deserialize_with = "string_or_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "string_or_none")]
    pub synopsis: Option<String>,
    #[serde(default, deserialize_with = "string_or_none")]
    pub genre: Option<String>,
}

fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(value) => Ok(Some(value)),
        Value::Null => Ok(None),
        other => {
            tracing::debug!("ignoring non-string suggestion field: {other}");
            Ok(None)
        }
    }
}

impl Suggestion {
    pub fn new(
        title: impl Into<String>,
        synopsis: impl Into<String>,
        genre: impl Into<String>,
    ) -> Self {
        Self {
            title: Some(title.into()),
            synopsis: Some(synopsis.into()),
            genre: Some(genre.into()),
        }
    }

    pub fn title(&self) -> &str {
        field_or_placeholder(&self.title)
    }

    pub fn synopsis(&self) -> &str {
        field_or_placeholder(&self.synopsis)
    }

    pub fn genre(&self) -> &str {
        field_or_placeholder(&self.genre)
    }
}

fn field_or_placeholder(field: &Option<String>) -> &str {
    match field.as_deref() {
        Some(value) if !value.trim().is_empty() => value,
        _ => PLACEHOLDER,
    }
}

// Envelope returned by `generateContent`. Everything is optional so a
// missing level is reported as a format failure instead of a serde error.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    prompt_feedback: Option<GeminiPromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiResponseContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponseContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiPromptFeedback {
    block_reason: Option<String>,
}

/// Pull `candidates[0].content.parts[0].text` out of a response body.
pub fn extract_payload(body: &str) -> Result<String, RecommendError> {
    let envelope: GeminiResponse = serde_json::from_str(body)
        .map_err(|e| RecommendError::Format(format!("response is not a JSON envelope ({e})")))?;

    let text = envelope
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().next())
        .and_then(|part| part.text);

    match text {
        Some(text) => Ok(text),
        None => {
            let reason = envelope
                .prompt_feedback
                .and_then(|feedback| feedback.block_reason)
                .map(|reason| format!("prompt blocked ({reason})"))
                .unwrap_or_else(|| "missing candidates[0].content.parts[0].text".to_string());
            Err(RecommendError::Format(format!("{reason}; response: {body}")))
        }
    }
}

pub fn decode_suggestions(payload: &str) -> Result<Vec<Suggestion>, RecommendError> {
    serde_json::from_str(payload).map_err(RecommendError::Decode)
}

/// Interpret a successful response body as a list of suggestions.
pub fn interpret(body: &str) -> Result<Vec<Suggestion>, RecommendError> {
    let payload = extract_payload(body)?;
    let suggestions = decode_suggestions(&payload)?;
    tracing::debug!("decoded {} suggestion(s)", suggestions.len());
    Ok(suggestions)
}

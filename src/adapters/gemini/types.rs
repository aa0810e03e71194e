//! Gemini generateContent request/response types

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub(crate) struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

impl GenerateContentRequest {
    /// Single-turn user prompt
    pub fn from_prompt(prompt: &str) -> Self {
        Self {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part { text: prompt.to_string() }],
            }],
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct Content {
    pub role: String,
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
pub(crate) struct Part {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Candidate {
    pub content: Option<CandidateContent>,
    #[serde(rename = "finishReason")]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResponsePart {
    pub text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        Some(text)
    }

    /// Why the first candidate stopped, e.g. `SAFETY` for a blocked reply
    pub fn finish_reason(&self) -> Option<&str> {
        self.candidates.first()?.finish_reason.as_deref()
    }
}

/// Protocol error text for a reply that carried no candidate text
pub(crate) fn empty_response_message(response: &GenerateContentResponse) -> String {
    match response.finish_reason() {
        Some(reason) => format!("Empty response from Gemini (finish reason: {})", reason),
        None => "Empty response from Gemini".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_shape() {
        let request = GenerateContentRequest::from_prompt("hello");
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(
            value,
            json!({"contents": [{"role": "user", "parts": [{"text": "hello"}]}]})
        );
    }

    #[test]
    fn test_response_text_joins_parts() {
        let body = json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "Score: "}, {"text": "72"}]},
                "finishReason": "STOP"
            }],
            "usageMetadata": {"promptTokenCount": 812}
        });

        let response: GenerateContentResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.text().as_deref(), Some("Score: 72"));
        assert_eq!(response.finish_reason(), Some("STOP"));
    }

    #[test]
    fn test_response_without_candidates() {
        let body = json!({"promptFeedback": {"blockReason": "SAFETY"}});
        let response: GenerateContentResponse = serde_json::from_value(body).unwrap();
        assert!(response.text().is_none());
        assert!(response.finish_reason().is_none());
    }

    #[test]
    fn test_blocked_candidate_reports_finish_reason() {
        let body = json!({"candidates": [{"finishReason": "SAFETY"}]});
        let response: GenerateContentResponse = serde_json::from_value(body).unwrap();

        assert!(response.text().is_none());
        assert_eq!(response.finish_reason(), Some("SAFETY"));
        assert_eq!(
            empty_response_message(&response),
            "Empty response from Gemini (finish reason: SAFETY)"
        );
    }
}

//! Shared wire format for OpenAI-style chat-completions endpoints
//!
//! Used by the OpenAI, OpenRouter and NVIDIA adapters.

use serde_json::{json, Value};

use super::error::{ProviderError, ProviderResult};
use super::traits::{str_at, u64_at, CompletionRequest};
use crate::types::{AnalysisResult, ChatMessage};

/// `Authorization: Bearer <key>`
pub(crate) fn bearer(credential: &str) -> Vec<(String, String)> {
    vec![(
        "Authorization".to_string(),
        format!("Bearer {}", credential.trim()),
    )]
}

/// System message plus one user message carrying context and task
pub(crate) fn payload(request: &CompletionRequest, model: &str) -> Value {
    json!({
        "model": model,
        "messages": ChatMessage::exchange(request.system.as_str(), request.prompt()),
        "max_tokens": request.max_tokens,
    })
}

/// Extract `choices[0].message.content`, the reported model and total tokens
pub(crate) fn parse(provider: &str, body: &Value, model: &str) -> ProviderResult<AnalysisResult> {
    let analysis = str_at(body, "/choices/0/message/content").ok_or_else(|| {
        ProviderError::response_parse(provider, "missing choices[0].message.content")
    })?;

    Ok(AnalysisResult {
        analysis: analysis.to_string(),
        provider: provider.to_string(),
        model: str_at(body, "/model").unwrap_or(model).to_string(),
        tokens_used: u64_at(body, "/usage/total_tokens"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_shape() {
        let request = CompletionRequest::new("You are a reviewer.", "Review it.", 700)
            .with_context("Resume Text:\n\nJane\n\n");
        let body = payload(&request, "gpt-4o");

        assert_eq!(body["model"], "gpt-4o");
        assert_eq!(body["max_tokens"], 700);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], "You are a reviewer.");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "Resume Text:\n\nJane\n\nReview it.");
    }

    #[test]
    fn test_parse_full_response() {
        let body = json!({
            "model": "gpt-4o-2024-05-13",
            "choices": [{"message": {"role": "assistant", "content": "Strong resume."}}],
            "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
        });
        let result = parse("OpenAI", &body, "gpt-4o").unwrap();
        assert_eq!(result.analysis, "Strong resume.");
        assert_eq!(result.model, "gpt-4o-2024-05-13");
        assert_eq!(result.tokens_used, Some(15));
    }

    #[test]
    fn test_parse_minimal_response() {
        let body = json!({"choices": [{"message": {"content": "ok"}}]});
        let result = parse("NVIDIA NIMs", &body, "llama3-70b-instruct").unwrap();
        assert_eq!(result.model, "llama3-70b-instruct");
        assert_eq!(result.tokens_used, None);
    }

    #[test]
    fn test_parse_missing_content() {
        let err = parse("OpenRouter", &json!({"choices": []}), "m").unwrap_err();
        assert_eq!(err.kind(), crate::providers::ErrorKind::ResponseParse);
    }

    #[test]
    fn test_bearer_trims() {
        assert_eq!(bearer(" sk-abc ")[0].1, "Bearer sk-abc");
    }
}

//! Provider-specific model listing endpoints

use std::collections::HashSet;

use serde_json::Value;

use crate::providers::HttpRequest;
use crate::types::{ModelDescriptor, ProviderKind};

/// Build the listing request, or `None` when the provider has no listing endpoint
pub(crate) fn listing_request(kind: ProviderKind, base: &str, credential: &str) -> Option<HttpRequest> {
    let credential = credential.trim();
    match kind {
        ProviderKind::OpenAi => Some(
            HttpRequest::get(format!("{}/models", base))
                .header("Authorization", format!("Bearer {}", credential)),
        ),
        ProviderKind::OpenRouter => Some(
            HttpRequest::get(format!("{}/models", base))
                .header("Authorization", format!("Bearer {}", credential)),
        ),
        ProviderKind::Gemini => Some(
            HttpRequest::get(format!("{}/models", base)).header("x-goog-api-key", credential),
        ),
        _ => None,
    }
}

/// Parse a listing body into descriptors, dropping duplicate ids
pub(crate) fn parse_listing(kind: ProviderKind, body: &Value) -> Result<Vec<ModelDescriptor>, String> {
    let models = match kind {
        ProviderKind::OpenAi => parse_openai(body)?,
        ProviderKind::OpenRouter => parse_openrouter(body)?,
        ProviderKind::Gemini => parse_gemini(body)?,
        other => return Err(format!("{} has no listing endpoint", other)),
    };

    let mut seen = HashSet::new();
    Ok(models
        .into_iter()
        .filter(|model| seen.insert(model.id.clone()))
        .collect())
}

fn array<'a>(body: &'a Value, field: &str) -> Result<&'a Vec<Value>, String> {
    body.get(field)
        .and_then(Value::as_array)
        .ok_or_else(|| format!("missing '{}' array", field))
}

fn parse_openai(body: &Value) -> Result<Vec<ModelDescriptor>, String> {
    Ok(array(body, "data")?
        .iter()
        .filter_map(|entry| entry.get("id").and_then(Value::as_str))
        .filter(|id| id.contains("gpt-4") || id.contains("gpt-3.5"))
        .map(|id| ModelDescriptor::new(id, openai_display_name(id), 0, "OpenAI model"))
        .collect())
}

fn parse_openrouter(body: &Value) -> Result<Vec<ModelDescriptor>, String> {
    Ok(array(body, "data")?
        .iter()
        .filter_map(|entry| {
            let id = entry.get("id").and_then(Value::as_str)?;
            let name = entry.get("name").and_then(Value::as_str).unwrap_or(id);
            let context = entry
                .get("context_length")
                .and_then(Value::as_u64)
                .unwrap_or(0);
            let description = entry
                .get("description")
                .and_then(Value::as_str)
                .unwrap_or("Model from OpenRouter");
            Some(ModelDescriptor::new(id, name, clamp(context), description))
        })
        .collect())
}

fn parse_gemini(body: &Value) -> Result<Vec<ModelDescriptor>, String> {
    Ok(array(body, "models")?
        .iter()
        .filter_map(|entry| {
            let full_name = entry.get("name").and_then(Value::as_str)?;
            if !full_name.contains("gemini") {
                return None;
            }
            let id = full_name.strip_prefix("models/").unwrap_or(full_name);
            let name = entry
                .get("displayName")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| title_case(id));
            let context = entry
                .get("inputTokenLimit")
                .and_then(Value::as_u64)
                .unwrap_or(0);
            let description = entry
                .get("description")
                .and_then(Value::as_str)
                .unwrap_or("Google Gemini model");
            Some(ModelDescriptor::new(id, name, clamp(context), description))
        })
        .collect())
}

fn clamp(value: u64) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

/// "gpt-4o-mini" -> "GPT 4o Mini"
fn openai_display_name(id: &str) -> String {
    let words = title_case(id);
    match words.strip_prefix("Gpt") {
        Some(rest) => format!("GPT{}", rest),
        None => words,
    }
}

/// Hyphens to spaces, first letter of each word upper-cased
fn title_case(id: &str) -> String {
    id.split('-')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_listing_requests() {
        let openai = listing_request(ProviderKind::OpenAi, "https://api.openai.com/v1", "sk-x").unwrap();
        assert_eq!(openai.url, "https://api.openai.com/v1/models");
        assert_eq!(openai.header_value("Authorization"), Some("Bearer sk-x"));

        let gemini = listing_request(ProviderKind::Gemini, "https://g/v1beta", "AIza").unwrap();
        assert_eq!(gemini.url, "https://g/v1beta/models");
        assert_eq!(gemini.header_value("x-goog-api-key"), Some("AIza"));

        for kind in [ProviderKind::Nvidia, ProviderKind::Anthropic, ProviderKind::Cohere, ProviderKind::Custom] {
            assert!(listing_request(kind, "https://x", "k").is_none());
        }
    }

    #[test]
    fn test_parse_openai_filters_chat_models() {
        let body = json!({"data": [
            {"id": "gpt-4o-mini"},
            {"id": "gpt-3.5-turbo"},
            {"id": "whisper-1"},
            {"id": "text-embedding-3-small"},
            {"id": "gpt-4o-mini"}
        ]});
        let models = parse_listing(ProviderKind::OpenAi, &body).unwrap();
        let ids: Vec<_> = models.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["gpt-4o-mini", "gpt-3.5-turbo"]);
        assert_eq!(models[0].name, "GPT 4o Mini");
        assert_eq!(models[0].context_window, 0);
    }

    #[test]
    fn test_parse_openrouter() {
        let body = json!({"data": [
            {"id": "meta-llama/llama-3-8b-instruct", "name": "Llama 3 8B", "context_length": 8192, "description": "Small llama"},
            {"id": "mystery/model"},
            {"name": "no id"}
        ]});
        let models = parse_listing(ProviderKind::OpenRouter, &body).unwrap();
        assert_eq!(models.len(), 2);
        assert_eq!(models[0].context_window, 8192);
        assert_eq!(models[0].description, "Small llama");
        assert_eq!(models[1].name, "mystery/model");
        assert_eq!(models[1].context_window, 0);
        assert_eq!(models[1].description, "Model from OpenRouter");
    }

    #[test]
    fn test_parse_gemini() {
        let body = json!({"models": [
            {"name": "models/gemini-1.5-pro", "displayName": "Gemini 1.5 Pro", "inputTokenLimit": 2000000},
            {"name": "models/gemini-1.0-pro"},
            {"name": "models/embedding-001", "displayName": "Embedding 001"}
        ]});
        let models = parse_listing(ProviderKind::Gemini, &body).unwrap();
        assert_eq!(models.len(), 2);
        assert_eq!(models[0].id, "gemini-1.5-pro");
        assert_eq!(models[0].context_window, 2000000);
        assert_eq!(models[1].name, "Gemini 1.0 Pro");
        assert_eq!(models[1].description, "Google Gemini model");
    }

    #[test]
    fn test_parse_malformed() {
        assert!(parse_listing(ProviderKind::OpenAi, &json!({"object": "list"})).is_err());
        assert!(parse_listing(ProviderKind::Gemini, &json!([])).is_err());
        assert!(parse_listing(ProviderKind::Cohere, &json!({"data": []})).is_err());
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("gemini-1.5-flash"), "Gemini 1.5 Flash");
        assert_eq!(openai_display_name("gpt-4-turbo"), "GPT 4 Turbo");
        assert_eq!(openai_display_name("chatgpt-4o-latest"), "Chatgpt 4o Latest");
    }
}

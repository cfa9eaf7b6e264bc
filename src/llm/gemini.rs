use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::{debug, warn};

use super::{GenerationRequest, ImageModel};
use crate::config::Config;
use crate::utils::http::get_http_client;
use crate::utils::timing::log_llm_timing;

#[derive(Debug, thiserror::Error)]
#[error("Image generation failed: {0}")]
pub struct ImageGenerationError(pub String);

#[derive(Debug, Clone, Default)]
pub struct GeminiImageConfig {
    pub aspect_ratio: Option<String>,
    pub image_size: Option<String>,
}

impl GeminiImageConfig {
    pub fn for_request(request: &GenerationRequest) -> Self {
        Self {
            aspect_ratio: request.aspect_ratio.requested_ratio(),
            image_size: Some(request.image_size.to_string()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<GeminiCandidate>>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiContent {
    parts: Option<Vec<GeminiPart>>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum GeminiPart {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: GeminiInlineData,
    },
    /// Function calls, executable code and other part kinds we never consume.
    Other(Value),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiInlineData {
    mime_type: String,
    data: String,
}

/// `generateContent` REST client for image edits and image questions.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    api_key: String,
    base_url: String,
    image_model: String,
    analysis_model: String,
    timeout: Duration,
    safety_profile: String,
}

impl GeminiClient {
    pub fn from_config(config: &Config) -> Self {
        Self {
            api_key: config.gemini_api_key.clone(),
            base_url: config.gemini_base_url.clone(),
            image_model: config.gemini_image_model.clone(),
            analysis_model: config.gemini_analysis_model.clone(),
            timeout: Duration::from_secs(config.gemini_timeout_seconds),
            safety_profile: config.gemini_safety_settings.clone(),
        }
    }

    fn redact_api_key(&self, text: &str) -> String {
        let key = self.api_key.trim();
        if key.is_empty() {
            return text.to_string();
        }
        text.replace(key, "[redacted]")
    }

    fn build_safety_settings(&self) -> Vec<Value> {
        let threshold = match self.safety_profile.as_str() {
            "standard" => "BLOCK_MEDIUM_AND_ABOVE",
            "permissive" => "OFF",
            other => {
                warn!(
                    "Unknown GEMINI_SAFETY_SETTINGS value '{}', using permissive defaults.",
                    other
                );
                "OFF"
            }
        };

        vec![
            json!({ "category": "HARM_CATEGORY_HARASSMENT", "threshold": threshold }),
            json!({ "category": "HARM_CATEGORY_HATE_SPEECH", "threshold": threshold }),
            json!({ "category": "HARM_CATEGORY_SEXUALLY_EXPLICIT", "threshold": threshold }),
            json!({ "category": "HARM_CATEGORY_DANGEROUS_CONTENT", "threshold": threshold }),
            json!({ "category": "HARM_CATEGORY_CIVIC_INTEGRITY", "threshold": threshold }),
        ]
    }

    // One attempt only; the caller surfaces failures to the user.
    async fn call_gemini_api(&self, model: &str, payload: Value) -> Result<GeminiResponse> {
        let client = get_http_client();
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, model, self.api_key
        );

        if tracing::enabled!(tracing::Level::DEBUG) {
            let payload_summary = summarize_gemini_payload(&payload);
            debug!(target: "llm.gemini", model = model, payload = %payload_summary);
        }

        let response = match client
            .post(&url)
            .timeout(self.timeout)
            .json(&payload)
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                let err_text = self.redact_api_key(&err.to_string());
                warn!(
                    "Gemini request failed to send: {} (timeout={}, connect={}, status={:?})",
                    err_text,
                    err.is_timeout(),
                    err.is_connect(),
                    err.status()
                );
                return Err(anyhow!("Gemini request failed: {}", err_text));
            }
        };

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let (message, body_summary) = summarize_error_body(&body);
            warn!("Gemini API error: status={}, body={}", status, body_summary);
            if tracing::enabled!(tracing::Level::DEBUG) {
                debug!(
                    target: "llm.gemini",
                    status = %status,
                    body = %truncate_for_log(&body, 4000)
                );
            }
            let detail = message.unwrap_or(body_summary);
            return Err(anyhow!(
                "Gemini request failed with status {}: {}",
                status,
                self.redact_api_key(&detail)
            ));
        }

        let value = response
            .json::<GeminiResponse>()
            .await
            .map_err(|err| anyhow!("Invalid Gemini response: {}", self.redact_api_key(&err.to_string())))?;
        if tracing::enabled!(tracing::Level::DEBUG) {
            let response_summary = summarize_gemini_response(&value);
            debug!(target: "llm.gemini", model = model, response = %response_summary);
        }
        Ok(value)
    }
}

#[async_trait]
impl ImageModel for GeminiClient {
    async fn edit_image(
        &self,
        request: &GenerationRequest,
    ) -> Result<Vec<u8>, ImageGenerationError> {
        let image_config = GeminiImageConfig::for_request(request);
        let mut generation_config = json!({
            "responseModalities": ["TEXT", "IMAGE"]
        });
        if let Some(image_config) = build_image_config(Some(&image_config)) {
            if let Some(config_object) = generation_config.as_object_mut() {
                config_object.insert("imageConfig".to_string(), image_config);
            }
        }

        let payload = json!({
            "contents": [{
                "role": "user",
                "parts": build_image_parts(&request.image, &request.mime_type, &request.prompt),
            }],
            "generationConfig": generation_config,
            "safetySettings": self.build_safety_settings(),
        });

        let model = self.image_model.as_str();
        let metadata = json!({
            "promptChars": request.prompt.chars().count(),
            "imageBytes": request.image.len(),
            "aspectRatio": image_config.aspect_ratio,
            "imageSize": image_config.image_size,
        });

        let response = log_llm_timing("gemini", model, "edit_image", Some(metadata), || async move {
            self.call_gemini_api(model, payload).await
        })
        .await
        .map_err(|err| ImageGenerationError(err.to_string()))?;

        extract_last_image(response)?.ok_or_else(|| {
            ImageGenerationError(format!("No image data in response (model: {})", model))
        })
    }

    async fn describe_image(
        &self,
        image: &[u8],
        mime_type: &str,
        instruction: &str,
    ) -> Result<String, ImageGenerationError> {
        let payload = json!({
            "contents": [{
                "role": "user",
                "parts": build_image_parts(image, mime_type, instruction),
            }],
            "generationConfig": { "responseModalities": ["TEXT"] },
            "safetySettings": self.build_safety_settings(),
        });

        let model = self.analysis_model.as_str();
        let response = log_llm_timing("gemini", model, "describe_image", None, || async move {
            self.call_gemini_api(model, payload).await
        })
        .await
        .map_err(|err| ImageGenerationError(err.to_string()))?;

        let text = extract_text_from_response(response);
        if text.trim().is_empty() {
            return Err(ImageGenerationError(format!(
                "No text in response (model: {})",
                model
            )));
        }
        Ok(text)
    }
}

fn build_image_parts(image: &[u8], mime_type: &str, text: &str) -> Vec<Value> {
    vec![
        json!({
            "inlineData": {
                "mimeType": mime_type,
                "data": general_purpose::STANDARD.encode(image),
            }
        }),
        json!({ "text": text }),
    ]
}

fn build_image_config(config: Option<&GeminiImageConfig>) -> Option<Value> {
    let config = config?;
    let mut map = Map::new();

    if let Some(aspect_ratio) = config.aspect_ratio.as_deref() {
        let trimmed = aspect_ratio.trim();
        if !trimmed.is_empty() {
            map.insert("aspectRatio".to_string(), json!(trimmed));
        }
    }

    if let Some(image_size) = config.image_size.as_deref() {
        let trimmed = image_size.trim();
        if !trimmed.is_empty() {
            map.insert("imageSize".to_string(), json!(trimmed));
        }
    }

    if map.is_empty() {
        None
    } else {
        Some(Value::Object(map))
    }
}

fn truncate_for_log(value: &str, limit: usize) -> String {
    if value.chars().count() <= limit {
        return value.to_string();
    }
    let truncated: String = value.chars().take(limit).collect();
    format!("{truncated}... (truncated)")
}

fn summarize_gemini_parts(parts: &[Value]) -> Vec<Value> {
    parts
        .iter()
        .map(|part| {
            if let Some(text) = part.get("text").and_then(|value| value.as_str()) {
                json!({ "text": truncate_for_log(text, 200) })
            } else if let Some(inline_data) = part.get("inlineData") {
                let mime_type = inline_data
                    .get("mimeType")
                    .and_then(|value| value.as_str())
                    .unwrap_or("unknown");
                let data_len = inline_data
                    .get("data")
                    .and_then(|value| value.as_str())
                    .map(|value| value.len())
                    .unwrap_or(0);
                json!({ "inlineData": { "mimeType": mime_type, "dataLen": data_len } })
            } else {
                json!({ "unknownPart": true })
            }
        })
        .collect()
}

fn summarize_gemini_payload(payload: &Value) -> Value {
    let mut summary = Map::new();

    if let Some(contents) = payload.get("contents").and_then(|value| value.as_array()) {
        let summarized: Vec<Value> = contents
            .iter()
            .map(|content| {
                let role = content
                    .get("role")
                    .and_then(|value| value.as_str())
                    .unwrap_or("user");
                let parts = content
                    .get("parts")
                    .and_then(|value| value.as_array())
                    .map(|parts| summarize_gemini_parts(parts))
                    .unwrap_or_default();
                json!({ "role": role, "parts": parts })
            })
            .collect();
        summary.insert("contents".to_string(), Value::Array(summarized));
    }

    if let Some(config) = payload.get("generationConfig") {
        summary.insert("generationConfig".to_string(), config.clone());
    }

    if let Some(safety) = payload
        .get("safetySettings")
        .and_then(|value| value.as_array())
    {
        summary.insert("safetySettingsCount".to_string(), json!(safety.len()));
    }

    Value::Object(summary)
}

fn summarize_gemini_response(response: &GeminiResponse) -> Value {
    let mut text_parts = 0usize;
    let mut image_parts = 0usize;
    let mut other_parts = 0usize;
    let mut text_preview = None;

    let candidates = response.candidates.as_deref().unwrap_or(&[]);
    for part in candidates
        .iter()
        .filter_map(|candidate| candidate.content.as_ref())
        .filter_map(|content| content.parts.as_ref())
        .flatten()
    {
        match part {
            GeminiPart::Text { text } => {
                text_parts += 1;
                if text_preview.is_none() && !text.trim().is_empty() {
                    text_preview = Some(truncate_for_log(text, 200));
                }
            }
            GeminiPart::InlineData { inline_data } => {
                if inline_data.mime_type.starts_with("image/") {
                    image_parts += 1;
                }
            }
            GeminiPart::Other(_) => other_parts += 1,
        }
    }

    json!({
        "candidates": candidates.len(),
        "textParts": text_parts,
        "imageParts": image_parts,
        "otherParts": other_parts,
        "textPreview": text_preview
    })
}

fn summarize_error_body(body: &str) -> (Option<String>, String) {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return (None, "empty response body".to_string());
    }

    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        let message = value
            .pointer("/error/message")
            .and_then(|v| v.as_str())
            .map(|v| v.to_string())
            .or_else(|| {
                value
                    .get("message")
                    .and_then(|v| v.as_str())
                    .map(|v| v.to_string())
            });
        return (message, truncate_for_log(&value.to_string(), 2000));
    }

    (None, truncate_for_log(trimmed, 2000))
}

fn first_candidate_parts(response: GeminiResponse) -> Vec<GeminiPart> {
    response
        .candidates
        .unwrap_or_default()
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts)
        .unwrap_or_default()
}

/// The last inline image of the first candidate is the edit result; earlier
/// image parts are intermediate drafts.
fn extract_last_image(response: GeminiResponse) -> Result<Option<Vec<u8>>, ImageGenerationError> {
    let last = first_candidate_parts(response)
        .into_iter()
        .filter_map(|part| match part {
            GeminiPart::InlineData { inline_data } if !inline_data.data.is_empty() => {
                Some(inline_data)
            }
            _ => None,
        })
        .last();

    match last {
        None => Ok(None),
        Some(inline_data) => general_purpose::STANDARD
            .decode(inline_data.data)
            .map(Some)
            .map_err(|err| ImageGenerationError(format!("Invalid image data in response: {err}"))),
    }
}

fn extract_text_from_response(response: GeminiResponse) -> String {
    first_candidate_parts(response)
        .into_iter()
        .filter_map(|part| match part {
            GeminiPart::Text { text } if !text.trim().is_empty() => Some(text),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{AspectRatio, ImageSize};

    fn response(raw: Value) -> GeminiResponse {
        serde_json::from_value(raw).unwrap()
    }

    fn client() -> GeminiClient {
        GeminiClient {
            api_key: "secret-key".to_string(),
            base_url: "http://localhost".to_string(),
            image_model: "image-model".to_string(),
            analysis_model: "text-model".to_string(),
            timeout: Duration::from_secs(1),
            safety_profile: "standard".to_string(),
        }
    }

    #[test]
    fn image_config_omits_match_aspect_ratio() {
        let request = GenerationRequest {
            image: vec![1, 2, 3],
            mime_type: "image/png".to_string(),
            prompt: "p".to_string(),
            aspect_ratio: AspectRatio::Match,
            image_size: ImageSize::FourK,
        };
        let config = build_image_config(Some(&GeminiImageConfig::for_request(&request))).unwrap();
        assert_eq!(config, json!({ "imageSize": "4K" }));

        let request = GenerationRequest {
            aspect_ratio: AspectRatio::Portrait,
            ..request
        };
        let config = build_image_config(Some(&GeminiImageConfig::for_request(&request))).unwrap();
        assert_eq!(config, json!({ "aspectRatio": "4:5", "imageSize": "4K" }));
    }

    #[test]
    fn last_image_of_first_candidate_wins() {
        let first = general_purpose::STANDARD.encode([1u8, 1]);
        let second = general_purpose::STANDARD.encode([2u8, 2]);
        let other = general_purpose::STANDARD.encode([3u8]);
        let parsed = response(json!({
            "candidates": [
                { "content": { "parts": [
                    { "inlineData": { "mimeType": "image/png", "data": first } },
                    { "text": "thinking" },
                    { "inlineData": { "mimeType": "image/png", "data": second } }
                ] } },
                { "content": { "parts": [
                    { "inlineData": { "mimeType": "image/png", "data": other } }
                ] } }
            ]
        }));
        assert_eq!(extract_last_image(parsed).unwrap(), Some(vec![2, 2]));
    }

    #[test]
    fn text_only_response_has_no_image() {
        let parsed = response(json!({
            "candidates": [{ "content": { "parts": [{ "text": "I cannot edit this" }] } }]
        }));
        assert_eq!(extract_last_image(parsed).unwrap(), None);
        assert_eq!(extract_last_image(response(json!({}))).unwrap(), None);
    }

    #[test]
    fn unrecognised_parts_are_skipped() {
        let image = general_purpose::STANDARD.encode([7u8, 7]);
        let raw = json!({
            "candidates": [{ "content": { "parts": [
                { "functionCall": { "name": "lookup", "args": {} } },
                { "executableCode": { "language": "PYTHON", "code": "print(1)" } },
                { "text": "here it is", "thought": true },
                { "inlineData": { "mimeType": "image/png", "data": image } }
            ] } }]
        });

        let summary = summarize_gemini_response(&response(raw.clone()));
        assert_eq!(summary["otherParts"], json!(2));
        assert_eq!(summary["imageParts"], json!(1));
        assert_eq!(extract_text_from_response(response(raw.clone())), "here it is");
        assert_eq!(extract_last_image(response(raw)).unwrap(), Some(vec![7, 7]));
    }

    #[test]
    fn error_body_message_is_extracted() {
        let (message, _) = summarize_error_body(r#"{"error":{"message":"quota exceeded"}}"#);
        assert_eq!(message.as_deref(), Some("quota exceeded"));
        let (message, summary) = summarize_error_body("  ");
        assert!(message.is_none());
        assert_eq!(summary, "empty response body");
    }

    #[test]
    fn api_key_is_redacted_and_payload_summary_drops_image_data() {
        let client = client();
        assert_eq!(
            client.redact_api_key("url?key=secret-key failed"),
            "url?key=[redacted] failed"
        );

        let payload = json!({
            "contents": [{ "role": "user", "parts": build_image_parts(&[0u8; 64], "image/png", "prompt") }],
            "safetySettings": client.build_safety_settings(),
        });
        let summary = summarize_gemini_payload(&payload);
        assert_eq!(
            summary.pointer("/contents/0/parts/0/inlineData/mimeType"),
            Some(&json!("image/png"))
        );
        assert!(summary.pointer("/contents/0/parts/0/inlineData/data").is_none());
        assert_eq!(summary["safetySettingsCount"], json!(5));
    }
}

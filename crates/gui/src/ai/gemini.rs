//! Google Generative Language REST client

use std::time::Duration;

use serde_json::{json, Value};

use super::{AiError, EncodedImage, GenerativeBackend};
use crate::state::settings::AiSettings;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_VIDEO_MODEL: &str = "veo-3.1-fast-generate-preview";
pub const DEFAULT_IMAGE_MODEL: &str = "imagen-4.0-generate-001";
pub const DEFAULT_EDIT_MODEL: &str = "gemini-2.5-flash-image";
pub const DEFAULT_ANALYSIS_MODEL: &str = "gemini-3-pro-preview";

const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub base_url: String,
    pub video_model: String,
    pub image_model: String,
    pub edit_model: String,
    pub analysis_model: String,
    /// Delay between two polls of a long running video operation
    pub poll_interval: Duration,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            video_model: DEFAULT_VIDEO_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            edit_model: DEFAULT_EDIT_MODEL.to_string(),
            analysis_model: DEFAULT_ANALYSIS_MODEL.to_string(),
            poll_interval: Duration::from_secs(5),
        }
    }

    /// Build from the persisted settings; the key is read from the
    /// environment variable the settings name.
    pub fn from_settings(settings: &AiSettings) -> Result<Self, AiError> {
        let api_key = std::env::var(&settings.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| AiError::MissingApiKey(settings.api_key_env.clone()))?;
        Ok(Self {
            api_key,
            base_url: settings.base_url.clone(),
            video_model: settings.video_model.clone(),
            image_model: settings.image_model.clone(),
            edit_model: settings.edit_model.clone(),
            analysis_model: settings.analysis_model.clone(),
            poll_interval: settings.poll_interval(),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }
}

pub struct GeminiClient {
    http: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    fn base(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }

    /// POST `models/{model}:{method}`
    async fn call_model(&self, model: &str, method: &str, body: Value) -> Result<Value, AiError> {
        let url = format!("{}/models/{model}:{method}", self.base());
        tracing::debug!("POST {url}");
        let response = self
            .http
            .post(&url)
            .header(API_KEY_HEADER, &self.config.api_key)
            .json(&body)
            .send()
            .await?;
        read_json(response).await
    }

    async fn get_operation(&self, name: &str) -> Result<Value, AiError> {
        let url = format!("{}/{}", self.base(), name.trim_start_matches('/'));
        let response = self
            .http
            .get(&url)
            .header(API_KEY_HEADER, &self.config.api_key)
            .send()
            .await?;
        read_json(response).await
    }

    /// Append the API key so the URL can be fetched directly
    fn signed_url(&self, uri: &str) -> Result<String, AiError> {
        let mut url = reqwest::Url::parse(uri).map_err(|e| AiError::InvalidUrl(format!("{uri}: {e}")))?;
        url.query_pairs_mut().append_pair("key", &self.config.api_key);
        Ok(url.into())
    }
}

/// Body of a 2xx response, or an `Api` error carrying the backend message
async fn read_json(response: reqwest::Response) -> Result<Value, AiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }
    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<Value>(&text)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| {
            if text.trim().is_empty() {
                status.canonical_reason().unwrap_or("request failed").to_string()
            } else {
                text
            }
        });
    tracing::warn!("Gemini API error {status}: {message}");
    Err(AiError::Api {
        status: status.as_u16(),
        message,
    })
}

fn data_uri(mime_type: &str, data: &str) -> String {
    format!("data:{mime_type};base64,{data}")
}

impl GenerativeBackend for GeminiClient {
    async fn generate_video(&self, prompt: &str, image: Option<&EncodedImage>) -> Result<String, AiError> {
        let mut instance = json!({ "prompt": prompt });
        if let Some(img) = image {
            instance["image"] = json!({
                "bytesBase64Encoded": img.data,
                "mimeType": img.mime_type,
            });
        }
        let body = json!({
            "instances": [instance],
            "parameters": {
                "aspectRatio": "16:9",
                "resolution": "720p",
                "sampleCount": 1,
            }
        });

        let mut operation = self
            .call_model(&self.config.video_model, "predictLongRunning", body)
            .await?;
        let name = operation["name"]
            .as_str()
            .ok_or(AiError::EmptyPayload("no operation name returned"))?
            .to_string();
        tracing::info!("Video operation started: {name}");

        while !operation["done"].as_bool().unwrap_or(false) {
            tokio::time::sleep(self.config.poll_interval).await;
            tracing::debug!("Polling video operation {name}");
            operation = self.get_operation(&name).await?;
        }

        if let Some(error) = operation.get("error").filter(|e| !e.is_null()) {
            let message = error["message"].as_str().unwrap_or("unknown error");
            return Err(AiError::Operation(message.to_string()));
        }

        let uri = operation
            .pointer("/response/generateVideoResponse/generatedSamples/0/video/uri")
            .and_then(Value::as_str)
            .ok_or(AiError::EmptyPayload("no video URI returned"))?;
        self.signed_url(uri)
    }

    async fn generate_image(&self, prompt: &str) -> Result<String, AiError> {
        let body = json!({
            "instances": [{ "prompt": prompt }],
            "parameters": {
                "sampleCount": 1,
                "aspectRatio": "1:1",
                "outputMimeType": "image/jpeg",
            }
        });
        let response = self.call_model(&self.config.image_model, "predict", body).await?;
        let prediction = &response["predictions"][0];
        let data = prediction["bytesBase64Encoded"]
            .as_str()
            .filter(|d| !d.is_empty())
            .ok_or(AiError::EmptyPayload("no image generated"))?;
        let mime = prediction["mimeType"].as_str().unwrap_or("image/jpeg");
        Ok(data_uri(mime, data))
    }

    async fn edit_image(&self, image: &EncodedImage, prompt: &str) -> Result<String, AiError> {
        let body = json!({
            "contents": [{
                "parts": [
                    { "inlineData": { "mimeType": image.mime_type, "data": image.data } },
                    { "text": prompt },
                ]
            }],
            "generationConfig": { "responseModalities": ["IMAGE"] }
        });
        let response = self.call_model(&self.config.edit_model, "generateContent", body).await?;

        // Last inline image part wins
        let inline = response
            .pointer("/candidates/0/content/parts")
            .and_then(Value::as_array)
            .and_then(|parts| parts.iter().rev().find_map(|p| p.get("inlineData")))
            .ok_or(AiError::EmptyPayload("no edited image returned"))?;
        let data = inline["data"]
            .as_str()
            .ok_or(AiError::EmptyPayload("no edited image returned"))?;
        let mime = inline["mimeType"].as_str().unwrap_or("image/png");
        Ok(data_uri(mime, data))
    }

    async fn analyze(&self, prompt: &str) -> Result<String, AiError> {
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });
        let response = self
            .call_model(&self.config.analysis_model, "generateContent", body)
            .await?;
        let text = response
            .pointer("/candidates/0/content/parts")
            .and_then(Value::as_array)
            .map(|parts| {
                parts
                    .iter()
                    .filter_map(|p| p["text"].as_str())
                    .collect::<String>()
            })
            .unwrap_or_default();
        Ok(text)
    }
}

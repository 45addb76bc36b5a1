use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::{ProviderError, Translator};

const PROVIDER: &str = "Google Translate";

/// Google Translate v2 client.
#[derive(Debug, Clone)]
pub struct GoogleTranslator {
    http: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl GoogleTranslator {
    pub fn new(http: reqwest::Client, api_key: Option<String>, base_url: impl Into<String>) -> Self {
        Self {
            http,
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'static str,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    data: Option<TranslateData>,
}

#[derive(Debug, Deserialize)]
struct TranslateData {
    #[serde(default)]
    translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Translation {
    translated_text: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

fn first_translation(body: &str) -> Result<String, ProviderError> {
    let parsed: TranslateResponse =
        serde_json::from_str(body).map_err(|e| ProviderError::Payload(e.to_string()))?;
    parsed
        .data
        .and_then(|d| d.translations.into_iter().next())
        .map(|t| t.translated_text)
        .ok_or_else(|| ProviderError::Payload("no translation data received".into()))
}

#[async_trait]
impl Translator for GoogleTranslator {
    #[instrument(skip(self))]
    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String, ProviderError> {
        let key = self
            .api_key
            .as_deref()
            .ok_or(ProviderError::NotConfigured(PROVIDER))?;
        let response = self
            .http
            .post(format!("{}/language/translate/v2", self.base_url))
            .query(&[("key", key)])
            .json(&TranslateRequest {
                q: text,
                source: source_lang,
                target: target_lang,
                format: "text",
            })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ProviderError::Status {
                provider: PROVIDER,
                status: status.as_u16(),
                message,
            });
        }
        first_translation(&body)
    }
}

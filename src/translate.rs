//! Translation client for the English-to-Vietnamese endpoint
//!
//! A single request/response call to the remote translation service. Not
//! part of the search pipeline, but it surfaces errors the same way: every
//! failure becomes a user-visible message, never an uncaught one.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::PoiMapError;
use crate::auth::IdentityGate;
use crate::config::TranslationConfig;

/// Error-detail fields checked in priority order on non-success responses
const ERROR_DETAIL_FIELDS: [&str; 2] = ["detail", "error"];

#[derive(Debug, Serialize)]
struct TranslationRequest<'a> {
    text: &'a str,
    source_lang: &'a str,
    target_lang: &'a str,
}

#[derive(Debug, Deserialize)]
struct TranslationResponse {
    #[serde(default)]
    translated_text: Option<String>,
}

/// Client for the remote translation endpoint
pub struct TranslationClient {
    client: reqwest::Client,
    endpoint: Option<String>,
    source_lang: String,
    target_lang: String,
    auth: Arc<dyn IdentityGate>,
}

impl TranslationClient {
    /// Create a new translation client from configuration
    pub fn new(config: &TranslationConfig, auth: Arc<dyn IdentityGate>) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .build()
            .with_context(|| "Failed to create HTTP client for translation")?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            source_lang: config.source_lang.clone(),
            target_lang: config.target_lang.clone(),
            auth,
        })
    }

    /// Whether a remote endpoint is configured
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.endpoint
            .as_deref()
            .is_some_and(|endpoint| !endpoint.trim().is_empty())
    }

    /// The configured language pair, e.g. `"en->vi"`
    #[must_use]
    pub fn language_pair(&self) -> String {
        format!("{}->{}", self.source_lang, self.target_lang)
    }

    /// Translate a short English sentence to Vietnamese
    ///
    /// Rejects locally, without a network call, when the caller is not
    /// signed in, the text is empty, or no endpoint is configured.
    #[tracing::instrument(skip(self, text))]
    pub async fn translate(&self, text: &str) -> Result<String, PoiMapError> {
        if self.auth.current_user().is_none() {
            return Err(PoiMapError::validation("sign in to translate"));
        }

        let text = text.trim();
        if text.is_empty() {
            return Err(PoiMapError::validation("text to translate cannot be empty"));
        }

        let endpoint = match self.endpoint.as_deref() {
            Some(endpoint) if !endpoint.trim().is_empty() => endpoint.trim_end_matches('/'),
            _ => {
                return Err(PoiMapError::validation(
                    "translation service endpoint is not configured",
                ));
            }
        };

        let request = TranslationRequest {
            text,
            source_lang: &self.source_lang,
            target_lang: &self.target_lang,
        };

        debug!("Translating {} character(s)", text.len());
        let response = self
            .client
            .post(format!("{endpoint}/translate"))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body: Option<Value> = response.json().await.ok();
            return Err(PoiMapError::upstream(extract_error_detail(
                body.as_ref(),
                status.as_u16(),
            )));
        }

        let body: TranslationResponse = response.json().await?;
        match body.translated_text {
            Some(translated) if !translated.trim().is_empty() => Ok(translated),
            _ => Err(PoiMapError::empty_result(
                "The translation service returned no text",
            )),
        }
    }
}

/// Pull a structured error detail out of a non-success response body,
/// falling back to a status-code message
fn extract_error_detail(body: Option<&Value>, status: u16) -> String {
    if let Some(body) = body {
        for field in ERROR_DETAIL_FIELDS {
            if let Some(detail) = body.get(field).and_then(Value::as_str) {
                if !detail.is_empty() {
                    return detail.to_string();
                }
            }
        }
    }
    format!("Translation service returned status {status}")
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::auth::{AuthContext, UserIdentity};

    struct AlwaysSignedIn;

    impl IdentityGate for AlwaysSignedIn {
        fn current_user(&self) -> Option<UserIdentity> {
            Some(UserIdentity {
                email: "user@example.com".to_string(),
            })
        }
    }

    fn client(endpoint: Option<&str>, auth: Arc<dyn IdentityGate>) -> TranslationClient {
        let config = TranslationConfig {
            endpoint: endpoint.map(String::from),
            ..Default::default()
        };
        TranslationClient::new(&config, auth).unwrap()
    }

    #[tokio::test]
    async fn test_unconfigured_endpoint_rejects_locally() {
        let client = client(None, Arc::new(AlwaysSignedIn));
        let result = client.translate("Hello").await;
        assert!(matches!(result, Err(PoiMapError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_empty_text_rejects_locally() {
        let client = client(Some("http://localhost:8000"), Arc::new(AlwaysSignedIn));
        let result = client.translate("   ").await;
        assert!(matches!(result, Err(PoiMapError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_unauthenticated_rejects_locally() {
        let client = client(Some("http://localhost:8000"), Arc::new(AuthContext::new()));
        let result = client.translate("Hello").await;
        assert!(matches!(result, Err(PoiMapError::Validation { .. })));
    }

    #[test]
    fn test_configuration_state_is_reported() {
        let unconfigured = client(None, Arc::new(AlwaysSignedIn));
        assert!(!unconfigured.is_configured());

        let blank = client(Some("   "), Arc::new(AlwaysSignedIn));
        assert!(!blank.is_configured());

        let configured = client(Some("http://localhost:8000"), Arc::new(AlwaysSignedIn));
        assert!(configured.is_configured());
        assert_eq!(configured.language_pair(), "en->vi");
    }

    #[test]
    fn test_error_detail_prefers_detail_field() {
        let body = json!({"detail": "model is loading", "error": "other"});
        assert_eq!(extract_error_detail(Some(&body), 503), "model is loading");
    }

    #[test]
    fn test_error_detail_falls_back_to_error_field() {
        let body = json!({"error": "quota exceeded"});
        assert_eq!(extract_error_detail(Some(&body), 429), "quota exceeded");
    }

    #[test]
    fn test_error_detail_falls_back_to_status() {
        let body = json!({"unexpected": true});
        assert_eq!(
            extract_error_detail(Some(&body), 502),
            "Translation service returned status 502"
        );
        assert_eq!(
            extract_error_detail(None, 500),
            "Translation service returned status 500"
        );
    }
}

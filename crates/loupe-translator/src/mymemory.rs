use std::time::Duration;

use async_trait::async_trait;
use loupe_config::translator::TranslatorConfig;
use loupe_core::text::collapse_lines;
use serde_json::Value;

use crate::{ProviderMetadata, TranslateError, Translation, Translator};

/// Free MyMemory REST API, no key required
#[derive(Clone)]
pub struct MyMemoryTranslator {
    client: reqwest::Client,
    api_url: String,
    email: Option<String>,
}

impl MyMemoryTranslator {
    pub fn new(config: &TranslatorConfig) -> Result<Self, TranslateError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            email: config.email.clone(),
        })
    }
}

/// Extract the translated text from a MyMemory JSON body.
///
/// MyMemory reports some failures (quota, bad language pair) with HTTP 200
/// and a non-200 `responseStatus`, which may be a number or a string.
pub(crate) fn parse_response(json: &Value) -> Result<String, TranslateError> {
    let status = match &json["responseStatus"] {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    };

    match status {
        Some(200) | None => {}
        Some(429) => return Err(TranslateError::RateLimitExceeded),
        Some(code) => {
            let details = json["responseDetails"].as_str().unwrap_or("no details");
            return Err(TranslateError::ApiError(format!("status {code}: {details}")));
        }
    }

    json["responseData"]["translatedText"]
        .as_str()
        .map(collapse_lines)
        .ok_or_else(|| {
            TranslateError::MalformedResponse("no responseData.translatedText".to_string())
        })
}

#[async_trait]
impl Translator for MyMemoryTranslator {
    async fn translate(
        &self,
        text: &str,
        from: &str,
        to: &str,
    ) -> Result<Translation, TranslateError> {
        let langpair = format!("{from}|{to}");
        let mut params = vec![("q", text), ("langpair", langpair.as_str())];
        if let Some(email) = &self.email {
            params.push(("de", email.as_str()));
        }

        let response = self.client.get(&self.api_url).query(&params).send().await?;

        if response.status() == 429 {
            return Err(TranslateError::RateLimitExceeded);
        }

        if !response.status().is_success() {
            return Err(TranslateError::ApiError(format!(
                "HTTP {}",
                response.status()
            )));
        }

        // Body read errors keep their timeout classification
        let json: Value = response.json().await?;

        Ok(Translation {
            text: parse_response(&json)?,
            provider: "mymemory".to_string(),
        })
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "MyMemory".to_string(),
            requires_api_key: false,
            free_tier_available: true,
        }
    }
}

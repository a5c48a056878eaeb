use std::time::Duration;

use serde_json::Value;
use tracing::debug;

use super::{TranslateError, Translator};
use crate::settings::TranslationSettings;

/// Client for the public Google translate endpoint (`client=gtx`).
pub struct GoogleTranslator {
    agent: ureq::Agent,
    endpoint: String,
    max_chars: usize,
}

impl GoogleTranslator {
    pub fn new(endpoint: impl Into<String>, timeout: Duration, max_chars: usize) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .build()
            .into();
        Self {
            agent,
            endpoint: endpoint.into(),
            max_chars,
        }
    }

    pub fn from_settings(settings: &TranslationSettings) -> Self {
        Self::new(
            settings.endpoint.clone(),
            settings.timeout(),
            settings.max_chars,
        )
    }
}

impl Translator for GoogleTranslator {
    fn translate(&self, text: &str, source: &str, target: &str) -> Result<String, TranslateError> {
        let len = text.chars().count();
        if len > self.max_chars {
            return Err(TranslateError::TooLong {
                len,
                max: self.max_chars,
            });
        }
        debug!(source, target, len, "google translate request");

        let body = self
            .agent
            .get(self.endpoint.as_str())
            .query("client", "gtx")
            .query("sl", source)
            .query("tl", target)
            .query("dt", "t")
            .query("q", text)
            .call()
            .map_err(|e| TranslateError::Http(format!("{}: {e}", self.endpoint)))?
            .into_body()
            .read_to_string()
            .map_err(|e| TranslateError::Http(format!("{}: {e}", self.endpoint)))?;
        parse_response(&body)
    }
}

/// Extract the translation from a `translate_a/single` response.
///
/// The body is a nested JSON array; element 0 lists sentence segments and
/// each segment starts with its translated text:
/// `[[["Hello ","こんにちは",null,null,10],["world","世界",...]],null,"ja",...]`
fn parse_response(body: &str) -> Result<String, TranslateError> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| TranslateError::Parse(e.to_string()))?;
    let segments = value
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| TranslateError::Parse("missing segment list".to_string()))?;

    let mut out = String::new();
    for segment in segments {
        if let Some(text) = segment.get(0).and_then(Value::as_str) {
            out.push_str(text);
        }
    }
    Ok(out)
}

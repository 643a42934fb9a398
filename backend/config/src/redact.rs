//! Config redaction: produce safe-to-log config snapshots by masking secrets.

use serde_json::Value;

use crate::schema::PokelensConfig;

static SENSITIVE_KEYS: &[&str] = &["apiKey", "api_key", "token", "secret", "password"];

fn is_sensitive_key(key: &str) -> bool {
    SENSITIVE_KEYS.iter().any(|k| k.eq_ignore_ascii_case(key))
}

/// Redact a config JSON value, replacing sensitive strings with a short hint.
pub fn redact(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| {
                    let v = match v {
                        Value::String(s) if is_sensitive_key(k) && !s.is_empty() => {
                            Value::String(mask(s))
                        }
                        other => redact(other),
                    };
                    (k.clone(), v)
                })
                .collect(),
        ),
        Value::Array(arr) => Value::Array(arr.iter().map(redact).collect()),
        other => other.clone(),
    }
}

// Preserve a length hint: first 4 chars + ***
fn mask(s: &str) -> String {
    match s.char_indices().nth(4) {
        Some((idx, _)) => format!("{}***", &s[..idx]),
        None => "***".to_string(),
    }
}

impl PokelensConfig {
    /// A JSON snapshot of the config with all secrets masked.
    pub fn redacted_summary(&self) -> Value {
        serde_json::to_value(self)
            .map(|v| redact(&v))
            .unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn masks_nested_api_keys() {
        let v = json!({"gemini": {"apiKey": "AIzaSyVerySecret", "model": "gemini-1.5-flash"}});
        let out = redact(&v);
        assert_eq!(out["gemini"]["apiKey"], "AIza***");
        assert_eq!(out["gemini"]["model"], "gemini-1.5-flash");
    }

    #[test]
    fn short_secrets_fully_masked() {
        let out = redact(&json!({"token": "abc"}));
        assert_eq!(out["token"], "***");
    }

    #[test]
    fn summary_hides_configured_keys() {
        let mut cfg = PokelensConfig::default();
        cfg.openrouter.api_key = Some("sk-or-v1-1234567890".into());
        let summary = cfg.redacted_summary().to_string();
        assert!(!summary.contains("1234567890"));
        assert!(summary.contains("sk-o***"));
    }
}

//! Logging utilities with sensitive data redaction.

/// Form fields whose values never reach a log line
const SENSITIVE_FIELDS: [&str; 4] = ["token", "secret", "password", "client_secret"];

/// Redact token from a string, preserving prefix for debugging
pub fn redact_token(token: &str) -> String {
    match token.get(..8) {
        Some(prefix) if token.len() > 8 => format!("{}...[REDACTED]", prefix),
        _ => "[REDACTED]".to_string(),
    }
}

/// Copy of form fields with sensitive values replaced
pub fn redact_form_fields(fields: &[(String, String)]) -> Vec<(String, String)> {
    fields
        .iter()
        .map(|(key, value)| {
            if SENSITIVE_FIELDS.iter().any(|s| key.eq_ignore_ascii_case(s)) {
                (key.clone(), "[REDACTED]".to_string())
            } else {
                (key.clone(), value.clone())
            }
        })
        .collect()
}

//! Masking of secret-looking configuration values for display

const SENSITIVE_MARKERS: [&str; 4] = ["KEY", "SECRET", "PASSWORD", "TOKEN"];

/// True if the key name looks like it holds a credential
pub fn is_sensitive_key(key: &str) -> bool {
    let upper = key.to_uppercase();
    SENSITIVE_MARKERS.iter().any(|m| upper.contains(m))
}

/// Show roughly 30% of the value (between 3 and 10 characters) and
/// replace the rest with `*`. Values too short to hide anything are
/// returned unchanged.
pub fn mask_value(value: &str) -> String {
    let len = value.chars().count();
    let visible = (len * 3 / 10).clamp(3, 10);

    if visible >= len {
        return value.to_string();
    }

    let prefix: String = value.chars().take(visible).collect();
    format!("{}...{}", prefix, "*".repeat(len - visible))
}

/// Mask the value only when the key is sensitive
pub fn display_value(key: &str, value: &str) -> String {
    if is_sensitive_key(key) {
        mask_value(value)
    } else {
        value.to_string()
    }
}

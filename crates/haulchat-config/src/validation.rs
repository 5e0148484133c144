// SPDX-FileCopyrightText: 2026 Haulchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Checks constraints serde cannot express: non-empty paths, well-formed
//! origins, a usable signing TTL, and plausible outward codes.

use crate::diagnostic::ConfigError;
use crate::model::HaulchatConfig;

/// Validate a deserialized configuration.
///
/// Collects every error instead of stopping at the first.
pub fn validate_config(config: &HaulchatConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let host = config.server.host.trim();
    if host.is_empty() {
        errors.push(ConfigError::validation("server.host must not be empty"));
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(ConfigError::validation(format!(
                "server.host `{host}` is not a valid IP address or hostname"
            )));
        }
    }

    for origin in &config.server.allowed_origins {
        if let Err(reason) = check_origin(origin) {
            errors.push(ConfigError::validation(format!(
                "server.allowed_origins entry `{origin}` {reason}"
            )));
        }
    }

    if let Err(reason) = check_origin(&config.server.public_base_url) {
        errors.push(ConfigError::validation(format!(
            "server.public_base_url `{}` {reason}",
            config.server.public_base_url
        )));
    }

    if config.server.max_upload_bytes == 0 {
        errors.push(ConfigError::validation(
            "server.max_upload_bytes must be greater than zero",
        ));
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::validation(
            "storage.database_path must not be empty",
        ));
    }

    if config.storage.upload_dir.trim().is_empty() {
        errors.push(ConfigError::validation("storage.upload_dir must not be empty"));
    }

    if config.storage.signed_url_ttl_secs == 0 {
        errors.push(ConfigError::validation(
            "storage.signed_url_ttl_secs must be greater than zero",
        ));
    }

    if let Some(secret) = &config.storage.signing_secret {
        if secret.trim().is_empty() {
            errors.push(ConfigError::validation(
                "storage.signing_secret must not be empty when set",
            ));
        }
    }

    if let Some(token) = &config.auth.backend_token {
        if token.trim().is_empty() {
            errors.push(ConfigError::validation(
                "auth.backend_token must not be empty when set",
            ));
        }
    }

    let prefix = config.intake.regional_prefix.trim();
    if !prefix.chars().all(|c| c.is_ascii_alphabetic()) || prefix.len() > 2 {
        errors.push(ConfigError::validation(format!(
            "intake.regional_prefix `{prefix}` must be at most two letters"
        )));
    }

    for code in &config.intake.inner_city_outward_codes {
        if !is_outward_code(code) {
            errors.push(ConfigError::validation(format!(
                "intake.inner_city_outward_codes entry `{code}` must be 2-4 letters and digits"
            )));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// An origin is a scheme plus host (and optional port) with no path.
fn check_origin(origin: &str) -> Result<(), &'static str> {
    let Some(rest) = origin
        .strip_prefix("https://")
        .or_else(|| origin.strip_prefix("http://"))
    else {
        return Err("must start with http:// or https://");
    };
    if rest.is_empty() {
        return Err("has no host");
    }
    if rest.ends_with('/') {
        return Err("must not end with a slash");
    }
    if rest.contains(['/', '?', '#']) || rest.chars().any(char::is_whitespace) {
        return Err("must not contain a path, query or whitespace");
    }
    Ok(())
}

fn is_outward_code(code: &str) -> bool {
    let code = code.trim();
    (2..=4).contains(&code.len())
        && code.chars().all(|c| c.is_ascii_alphanumeric())
        && code.starts_with(|c: char| c.is_ascii_alphabetic())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messages(config: &HaulchatConfig) -> Vec<String> {
        validate_config(config)
            .unwrap_err()
            .into_iter()
            .map(|e| e.to_string())
            .collect()
    }

    #[test]
    fn default_config_validates() {
        assert!(validate_config(&HaulchatConfig::default()).is_ok());
    }

    #[test]
    fn parsed_toml_with_bad_origin_fails() {
        let toml_str = r#"
            [server]
            allowed_origins = ["https://haulchat.co.uk/"]
        "#;
        let config: HaulchatConfig = toml::from_str(toml_str).unwrap();
        let errors = messages(&config);
        assert!(errors.iter().any(|m| m.contains("allowed_origins")));
    }

    #[test]
    fn empty_paths_fail_validation() {
        let mut config = HaulchatConfig::default();
        config.storage.database_path = "".to_string();
        config.storage.upload_dir = "  ".to_string();
        let errors = messages(&config);
        assert!(errors.iter().any(|m| m.contains("database_path")));
        assert!(errors.iter().any(|m| m.contains("upload_dir")));
    }

    #[test]
    fn origin_with_trailing_slash_fails() {
        let mut config = HaulchatConfig::default();
        config.server.allowed_origins = vec!["https://example.com/".to_string()];
        let errors = messages(&config);
        assert!(errors.iter().any(|m| m.contains("slash")));
    }

    #[test]
    fn origin_without_scheme_fails() {
        let mut config = HaulchatConfig::default();
        config.server.allowed_origins = vec!["example.com".to_string()];
        assert!(messages(&config).iter().any(|m| m.contains("http")));
    }

    #[test]
    fn origin_with_port_passes() {
        assert!(check_origin("http://localhost:5173").is_ok());
    }

    #[test]
    fn zero_ttl_fails() {
        let mut config = HaulchatConfig::default();
        config.storage.signed_url_ttl_secs = 0;
        assert!(messages(&config).iter().any(|m| m.contains("ttl")));
    }

    #[test]
    fn bad_outward_codes_fail() {
        let mut config = HaulchatConfig::default();
        config.intake.inner_city_outward_codes =
            vec!["W".into(), "WF1 1".into(), "12AB".into(), "WF10".into()];
        let errors = messages(&config);
        assert_eq!(errors.len(), 3, "{errors:?}");
    }

    #[test]
    fn empty_secrets_fail() {
        let mut config = HaulchatConfig::default();
        config.auth.backend_token = Some(String::new());
        config.storage.signing_secret = Some(" ".into());
        let errors = messages(&config);
        assert!(errors.iter().any(|m| m.contains("backend_token")));
        assert!(errors.iter().any(|m| m.contains("signing_secret")));
    }

    #[test]
    fn all_errors_are_collected() {
        let mut config = HaulchatConfig::default();
        config.server.host = "".into();
        config.storage.database_path = "".into();
        config.storage.signed_url_ttl_secs = 0;
        assert_eq!(messages(&config).len(), 3);
    }
}

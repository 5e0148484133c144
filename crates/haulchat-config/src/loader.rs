// SPDX-FileCopyrightText: 2026 Haulchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./haulchat.toml` > `~/.config/haulchat/haulchat.toml`
//! > `/etc/haulchat/haulchat.toml`, with environment variable overrides via the
//! `HAULCHAT_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::HaulchatConfig;

/// System-wide config file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/haulchat/haulchat.toml";

/// Config file in the working directory.
pub const LOCAL_CONFIG_PATH: &str = "haulchat.toml";

/// Config sections addressable from environment variables.
const ENV_SECTIONS: &[&str] = &["server", "auth", "storage", "intake"];

/// Per-user config file under the XDG config dir, if one can be determined.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("haulchat/haulchat.toml"))
}

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/haulchat/haulchat.toml` (system-wide)
/// 3. `~/.config/haulchat/haulchat.toml` (user XDG config)
/// 4. `./haulchat.toml` (local directory)
/// 5. `HAULCHAT_*` environment variables
pub fn load_config() -> Result<HaulchatConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no files, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<HaulchatConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(HaulchatConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<HaulchatConfig, figment::Error> {
    tracing::debug!(path = %path.display(), "loading config file");
    Figment::new()
        .merge(Serialized::defaults(HaulchatConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used for config loading, before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(HaulchatConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_PATH))
        .merge(env_provider())
}

/// Environment provider with explicit section mapping.
///
/// Only the leading section name is turned into a dot, so keys that contain
/// underscores stay intact: `HAULCHAT_STORAGE_SIGNING_SECRET` maps to
/// `storage.signing_secret`, not `storage.signing.secret`.
fn env_provider() -> Env {
    Env::prefixed("HAULCHAT_").map(|key| env_key_to_path(key.as_str()).into())
}

/// Map a lowercased, prefix-stripped env var name to a config path.
pub fn env_key_to_path(key: &str) -> String {
    ENV_SECTIONS
        .iter()
        .find_map(|section| {
            key.strip_prefix(section)
                .and_then(|rest| rest.strip_prefix('_'))
                .map(|field| format!("{section}.{field}"))
        })
        .unwrap_or_else(|| key.to_string())
}

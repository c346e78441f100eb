// SPDX-FileCopyrightText: 2026 Solace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./solace.toml` > `~/.config/solace/solace.toml` >
//! `/etc/solace/solace.toml` with environment variable overrides via the
//! `SOLACE_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use tracing::debug;

use crate::model::SolaceConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/solace/solace.toml` (system-wide)
/// 3. `~/.config/solace/solace.toml` (user XDG config)
/// 4. `./solace.toml` (local directory)
/// 5. `SOLACE_*` environment variables
pub fn load_config() -> Result<SolaceConfig, figment::Error> {
    let user_config = dirs::config_dir()
        .map(|d| d.join("solace/solace.toml"))
        .unwrap_or_default();
    debug!(
        user_config = %user_config.display(),
        "merging config from XDG hierarchy and SOLACE_ env vars"
    );
    Figment::new()
        .merge(Serialized::defaults(SolaceConfig::default()))
        .merge(Toml::file("/etc/solace/solace.toml"))
        .merge(Toml::file(user_config))
        .merge(Toml::file("solace.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env vars).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<SolaceConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SolaceConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<SolaceConfig, figment::Error> {
    debug!(path = %path.display(), "loading config from explicit path");
    Figment::new()
        .merge(Serialized::defaults(SolaceConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")`: key names themselves
/// contain underscores, so `SOLACE_GEMINI_API_KEY` must map to
/// `gemini.api_key`, not `gemini.api.key`.
fn env_provider() -> Env {
    Env::prefixed("SOLACE_").map(|key| {
        // `key` is the lowercased env var name with the prefix stripped.
        // Example: SOLACE_GEMINI_API_KEY -> "gemini_api_key"
        let mapped = key
            .as_str()
            .replacen("agent_", "agent.", 1)
            .replacen("gemini_", "gemini.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("knowledge_", "knowledge.", 1);
        mapped.into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn env_var_overrides_toml_value() {
        Jail::expect_with(|jail| {
            jail.set_env("SOLACE_GEMINI_API_KEY", "env-key");
            jail.create_file(
                "solace.toml",
                r#"
[gemini]
api_key = "file-key"
"#,
            )?;
            let config: SolaceConfig = Figment::new()
                .merge(Serialized::defaults(SolaceConfig::default()))
                .merge(Toml::file("solace.toml"))
                .merge(env_provider())
                .extract()?;
            assert_eq!(config.gemini.api_key.as_deref(), Some("env-key"));
            Ok(())
        });
    }

    #[test]
    fn underscore_keys_map_to_sections_not_nested_paths() {
        Jail::expect_with(|jail| {
            jail.set_env("SOLACE_STORAGE_DATABASE_PATH", "/tmp/env.db");
            jail.set_env("SOLACE_KNOWLEDGE_DOCUMENTS_DIR", "/srv/docs");
            let config: SolaceConfig = Figment::new()
                .merge(Serialized::defaults(SolaceConfig::default()))
                .merge(env_provider())
                .extract()?;
            assert_eq!(config.storage.database_path, "/tmp/env.db");
            assert_eq!(config.knowledge.documents_dir, "/srv/docs");
            Ok(())
        });
    }
}

//! # cf-config
//!
//! Layered configuration loading for CodeFlow using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`CODEFLOW_*` prefix, `__` as separator)
//! 2. Project-level `.codeflow/config.toml`
//! 3. User-level `~/.config/codeflow/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `CODEFLOW_BACKEND__URL` -> `backend.url`,
//! `CODEFLOW_BACKEND__ANON_KEY` -> `backend.anon_key`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use cf_config::CodeflowConfig;
//!
//! let config = CodeflowConfig::load_with_dotenv().expect("config");
//!
//! if config.backend.is_configured() {
//!     println!("Backend URL: {}", config.backend.url);
//! }
//! ```

mod backend;
mod error;
mod general;

pub use backend::{BackendConfig, PLACEHOLDER_ANON_KEY, PLACEHOLDER_URL};
pub use error::ConfigError;
pub use general::GeneralConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Directory holding project-local state and config.
pub const PROJECT_DIR: &str = ".codeflow";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CodeflowConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl CodeflowConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`load_with_dotenv`](Self::load_with_dotenv)
    /// if you need `.env` file loading.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    ///
    /// Calls `dotenvy` to load the nearest `.env` before building the figment.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv();
        Self::load()
    }

    /// Load configuration rooted at an explicit project directory.
    ///
    /// Reads `<root>/.env` (if present) and `<root>/.codeflow/config.toml`
    /// instead of the current directory.
    pub fn load_from_project(root: &Path) -> Result<Self, ConfigError> {
        let env_path = root.join(".env");
        if env_path.exists() {
            let _ = dotenvy::from_path(&env_path);
        }
        Self::figment_for(&root.join(PROJECT_DIR).join("config.toml"))
            .extract()
            .map_err(ConfigError::from)
    }

    /// Build the figment provider chain for the current directory.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    pub fn figment() -> Figment {
        Self::figment_for(&PathBuf::from(PROJECT_DIR).join("config.toml"))
    }

    fn figment_for(local_path: &Path) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("CODEFLOW_").split("__"))
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("codeflow").join("config.toml"))
    }

    /// Load `.env` from the current directory or the closest ancestor.
    ///
    /// Silently does nothing if no `.env` is found.
    fn load_dotenv() {
        let _ = dotenvy::dotenv();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_loads() {
        let config = CodeflowConfig::default();
        assert!(!config.backend.is_configured());
        assert_eq!(config.general.home_route, "/");
    }

    #[test]
    fn figment_builds_without_files() {
        figment::Jail::expect_with(|_jail| {
            let config: CodeflowConfig = CodeflowConfig::figment().extract()?;
            assert!(!config.backend.is_configured());
            assert_eq!(config.backend.profiles_table, "profiles");
            assert_eq!(config.general.default_limit, 20);
            Ok(())
        });
    }
}

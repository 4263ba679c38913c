//! General application configuration.

use serde::{Deserialize, Serialize};

fn default_home_route() -> String {
    "/".to_string()
}

/// Default result limit.
const fn default_limit() -> u32 {
    20
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Route the app navigates to after sign-out.
    #[serde(default = "default_home_route")]
    pub home_route: String,

    /// Default result limit for listing output.
    #[serde(default = "default_limit")]
    pub default_limit: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            home_route: default_home_route(),
            default_limit: default_limit(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = GeneralConfig::default();
        assert_eq!(config.home_route, "/");
        assert_eq!(config.default_limit, 20);
    }
}

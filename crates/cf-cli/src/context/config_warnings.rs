use cf_config::{BackendConfig, CodeflowConfig, PLACEHOLDER_ANON_KEY, PLACEHOLDER_URL};

/// Log hints for backend settings that look mistyped.
pub fn warn_unconfigured(config: &CodeflowConfig) {
    for warning in collect_unconfigured_warnings(&config.backend, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(backend: &BackendConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    if backend.is_configured() {
        return Vec::new();
    }

    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();
    let mut warnings = Vec::new();

    if backend.url == PLACEHOLDER_URL || backend.anon_key == PLACEHOLDER_ANON_KEY {
        warnings.push(
            "Backend config still holds the template placeholders. Replace them with your project URL and anon key."
                .to_string(),
        );
    }

    let has_single_underscore = env_keys
        .iter()
        .any(|key| key.starts_with("CODEFLOW_BACKEND_") && !key.starts_with("CODEFLOW_BACKEND__"));
    if has_single_underscore {
        warnings.push(
            "Backend config appears default while CODEFLOW_BACKEND_* env vars exist. Use double underscores (example: CODEFLOW_BACKEND__URL)."
                .to_string(),
        );
    }

    warnings
}

#[cfg(test)]
mod tests {
    use cf_config::BackendConfig;

    use super::*;

    fn env(keys: &[&str]) -> Vec<(String, String)> {
        keys.iter().map(|k| ((*k).to_string(), "x".to_string())).collect()
    }

    #[test]
    fn warns_for_single_underscore_env_names() {
        let warnings =
            collect_unconfigured_warnings(&BackendConfig::default(), env(&["CODEFLOW_BACKEND_URL"]));
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("CODEFLOW_BACKEND__URL"));
    }

    #[test]
    fn warns_for_placeholders() {
        let backend = BackendConfig {
            url: PLACEHOLDER_URL.to_string(),
            anon_key: PLACEHOLDER_ANON_KEY.to_string(),
            ..BackendConfig::default()
        };
        let warnings = collect_unconfigured_warnings(&backend, env(&[]));
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("placeholders"));
    }

    #[test]
    fn silent_when_configured() {
        let backend = BackendConfig {
            url: "https://abc.example.co".to_string(),
            anon_key: "anon".to_string(),
            ..BackendConfig::default()
        };
        assert!(collect_unconfigured_warnings(&backend, env(&["CODEFLOW_BACKEND_URL"])).is_empty());
    }
}

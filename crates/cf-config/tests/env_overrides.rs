use cf_config::CodeflowConfig;
use figment::Jail;
use pretty_assertions::assert_eq;

#[test]
fn env_vars_fill_backend_section() {
    Jail::expect_with(|jail| {
        jail.set_env("CODEFLOW_BACKEND__URL", "https://abcdefgh.supabase.co");
        jail.set_env("CODEFLOW_BACKEND__ANON_KEY", "anon-from-env");

        let config = CodeflowConfig::load().expect("config loads");
        assert_eq!(config.backend.url, "https://abcdefgh.supabase.co");
        assert_eq!(config.backend.anon_key, "anon-from-env");
        assert!(config.backend.is_configured());
        Ok(())
    });
}

#[test]
fn numeric_env_values_are_parsed() {
    Jail::expect_with(|jail| {
        jail.set_env("CODEFLOW_BACKEND__REQUEST_TIMEOUT_SECS", "3");
        jail.set_env("CODEFLOW_GENERAL__DEFAULT_LIMIT", "50");

        let config = CodeflowConfig::load().expect("config loads");
        assert_eq!(config.backend.request_timeout_secs, 3);
        assert_eq!(config.general.default_limit, 50);
        Ok(())
    });
}

#[test]
fn load_from_project_reads_dotenv_and_local_toml() {
    Jail::expect_with(|jail| {
        let root = jail.directory().join("shop");
        std::fs::create_dir_all(root.join(".codeflow")).expect("mkdir");
        std::fs::write(
            root.join(".codeflow/config.toml"),
            "[general]\nhome_route = \"/market\"\n",
        )
        .expect("write config");
        std::fs::write(
            root.join(".env"),
            "CODEFLOW_BACKEND__ANON_KEY=anon-from-dotenv\n",
        )
        .expect("write dotenv");

        let config = CodeflowConfig::load_from_project(&root).expect("config loads");
        assert_eq!(config.general.home_route, "/market");
        assert_eq!(config.backend.anon_key, "anon-from-dotenv");
        Ok(())
    });
}

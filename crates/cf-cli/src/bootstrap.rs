use std::path::PathBuf;

use anyhow::Context;
use cf_config::CodeflowConfig;

use crate::cli::GlobalFlags;

/// Load configuration, honouring `--project` when given.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<CodeflowConfig> {
    match flags.project.as_deref() {
        Some(project) => {
            let root = PathBuf::from(project);
            if !root.is_dir() {
                anyhow::bail!("project path is not a directory: {}", root.display());
            }
            CodeflowConfig::load_from_project(&root)
                .with_context(|| format!("failed to load config for {}", root.display()))
        }
        None => CodeflowConfig::load_with_dotenv().context("failed to load config"),
    }
}

#[cfg(test)]
mod tests {
    use super::load_config;
    use crate::cli::{GlobalFlags, OutputFormat};

    fn flags(project: Option<String>) -> GlobalFlags {
        GlobalFlags {
            format: OutputFormat::Json,
            limit: None,
            quiet: false,
            project,
        }
    }

    #[test]
    fn rejects_missing_project_dir() {
        let error = load_config(&flags(Some("/definitely/not/here".into())))
            .expect_err("missing dir should fail");
        assert!(error.to_string().contains("not a directory"));
    }

    #[test]
    fn reads_project_local_config() {
        let dir = tempfile::tempdir().expect("tempdir");
        let project_dir = dir.path().join(cf_config::PROJECT_DIR);
        std::fs::create_dir_all(&project_dir).expect("mkdir");
        std::fs::write(
            project_dir.join("config.toml"),
            "[general]\nhome_route = \"/browse\"\n",
        )
        .expect("write config");

        let config = load_config(&flags(Some(dir.path().display().to_string())))
            .expect("config should load");
        assert_eq!(config.general.home_route, "/browse");
    }
}

use std::path::{Path, PathBuf};

use anyhow::Context;
use paboard::{Config, Credentials};
use tracing::instrument;

/// Command arguments for `pab init`.
#[derive(Debug, clap::Parser)]
pub struct Command {}

impl Command {
    #[instrument(skip_all, fields(path = %config_path.display()))]
    pub fn run(self, config_path: &Path) -> anyhow::Result<()> {
        if config_path.exists() {
            anyhow::bail!(
                "Refusing to overwrite existing configuration {}",
                config_path.display()
            );
        }

        let config = Config::default();
        config.save(config_path).map_err(anyhow::Error::msg)?;
        println!("Wrote {}", config_path.display());

        let credentials_path = beside(config_path, config.credentials_path());
        if credentials_path.exists() {
            println!(
                "Credential file {} already exists; leaving it alone.",
                credentials_path.display()
            );
        } else {
            std::fs::write(&credentials_path, Credentials::template())
                .with_context(|| format!("Failed to write {}", credentials_path.display()))?;
            println!(
                "Wrote credential template {}; fill in the connection details.",
                credentials_path.display()
            );
        }
        Ok(())
    }
}

/// Resolves a relative companion path next to the configuration file.
fn beside(config_path: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        config_path
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .join(path)
    }
}

#[cfg(test)]
mod tests {
    use paboard::Config;

    use super::Command;

    #[test]
    fn init_writes_a_loadable_default_configuration() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("pab.toml");

        Command {}.run(&path).unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config, Config::default());
        assert!(tmp.path().join("credentials.json").exists());
    }

    #[test]
    fn init_refuses_to_overwrite() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("pab.toml");
        std::fs::write(&path, "_version = \"1\"\n").unwrap();

        assert!(Command {}.run(&path).is_err());
    }

    #[test]
    fn init_leaves_an_existing_credential_file_alone() {
        let tmp = tempfile::tempdir().unwrap();
        let credentials = tmp.path().join("credentials.json");
        std::fs::write(&credentials, "{}").unwrap();

        Command {}.run(&tmp.path().join("pab.toml")).unwrap();

        assert_eq!(std::fs::read_to_string(&credentials).unwrap(), "{}");
    }
}

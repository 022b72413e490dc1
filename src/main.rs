mod demo;

use anyhow::{Context, Result};
use clap::Parser;
use overlaystack::config::Config;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "overlaystack", version, about = "Terminal demo of a stack of transient overlays")]
struct Cli {
    /// Config file to use instead of the default location.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Override the toast auto-dismiss delay (0 keeps toasts open).
    #[arg(long, value_name = "MS")]
    toast_ms: Option<u64>,
}

impl Cli {
    fn load_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load_from(path)
                .with_context(|| format!("failed to load config from {}", path.display()))?,
            None => Config::load().context("failed to load config")?,
        };
        if let Some(millis) = self.toast_ms {
            config.toast.duration_ms = millis;
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    overlaystack::logging::init_tracing();
    let cli = Cli::parse();
    let config = cli.load_config()?;
    demo::run(config).await
}

#[cfg(test)]
mod tests {
    use super::Cli;
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn parse_defaults() {
        let cli = Cli::try_parse_from(["overlaystack"]).unwrap();
        assert!(cli.config.is_none());
        assert!(cli.toast_ms.is_none());
    }

    #[test]
    fn parse_config_and_toast_override() {
        let cli = Cli::try_parse_from([
            "overlaystack",
            "--config",
            "/tmp/overlays.toml",
            "--toast-ms",
            "500",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/overlays.toml")));
        assert_eq!(cli.toast_ms, Some(500));
    }

    #[test]
    fn toast_override_applies_to_loaded_config() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[toast]\nduration_ms = 1000\n").unwrap();

        let cli = Cli::try_parse_from([
            "overlaystack",
            "--config",
            path.to_str().unwrap(),
            "--toast-ms",
            "0",
        ])
        .unwrap();
        let config = cli.load_config().unwrap();
        assert_eq!(config.toast.duration_ms, 0);
        assert_eq!(config.toast.options().auto_dismiss_after(), None);
    }
}

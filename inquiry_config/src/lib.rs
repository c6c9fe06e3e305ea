use std::{
    net::IpAddr,
    path::{Path, PathBuf},
};

use anyhow::Context;
use config::{File, FileFormat};
pub use duration::Duration;
use inquiry_models::email_address::{EmailAddress, EmailAddressWithName};
use serde::Deserialize;
use url::Url;

mod duration;

pub const DEFAULT_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config.toml");

pub const CONFIG_PATH_ENV: &str = "INQUIRY_CONFIG";

/// Load the default config followed by every file listed in the
/// colon-separated `INQUIRY_CONFIG` environment variable.
pub fn load() -> anyhow::Result<Config> {
    let mut paths = vec![PathBuf::from(DEFAULT_CONFIG_PATH)];
    if let Ok(extra) = std::env::var(CONFIG_PATH_ENV) {
        paths.extend(
            extra
                .split(':')
                .filter(|path| !path.is_empty())
                .map(PathBuf::from),
        );
    }
    load_paths(&paths)
}

pub fn load_paths(paths: &[impl AsRef<Path>]) -> anyhow::Result<Config> {
    paths
        .iter()
        .try_fold(config::Config::builder(), |builder, path| {
            let path = path.as_ref();
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file at {}", path.display()))?;
            let source = File::from_str(&content, FileFormat::Toml);
            anyhow::Ok(builder.add_source(source))
        })?
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub http: HttpConfig,
    pub email: EmailConfig,
    pub contact: ContactConfig,
    pub relay: RelayConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub host: IpAddr,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct EmailConfig {
    pub smtp_url: String,
    pub from: EmailAddressWithName,
}

#[derive(Debug, Deserialize)]
pub struct ContactConfig {
    pub recipients: Vec<EmailAddress>,
}

#[derive(Debug, Deserialize)]
pub struct RelayConfig {
    pub endpoint: Url,
    pub encoding: RelayEncoding,
    pub timeout: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelayEncoding {
    Json,
    Form,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_default_config() {
        let config = load_paths(&[Path::new(DEFAULT_CONFIG_PATH)]).unwrap();
        assert!(!config.contact.recipients.is_empty());
        assert_eq!(config.relay.encoding, RelayEncoding::Json);
    }

    #[test]
    fn later_files_override_earlier_ones() {
        let dir = std::env::temp_dir().join(format!("inquiry-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let overlay = dir.join("overlay.toml");
        std::fs::write(&overlay, "[relay]\nencoding = \"form\"\ntimeout = \"5s\"\n").unwrap();

        let config = load_paths(&[Path::new(DEFAULT_CONFIG_PATH), overlay.as_path()]).unwrap();

        assert_eq!(config.relay.encoding, RelayEncoding::Form);
        assert_eq!(*config.relay.timeout, std::time::Duration::from_secs(5));
        std::fs::remove_dir_all(dir).unwrap();
    }
}

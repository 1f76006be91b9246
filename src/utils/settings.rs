use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_CONFIG_NAME: &str = "iss-overhead";
pub const ENV_PREFIX: &str = "ISS";

const DEFAULT_PROFILE_PATH: &str = "data/user_account.json";
const DEFAULT_SUN_PROVIDER_URL: &str = "https://api.sunrise-sunset.org/json";
const DEFAULT_ISS_PROVIDER_URL: &str = "http://api.open-notify.org/iss-now.json";
const DEFAULT_MAIL_HOST: &str = "smtp.gmail.com";
const DEFAULT_MAIL_PORT: i64 = 587;
const DEFAULT_REQUEST_TIMEOUT_SECS: i64 = 30;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("config file {} does not exist", .0.display())]
    MissingFile(PathBuf),
}

/// Paths, endpoints and mail server for one run, handed to each component.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub profile_path: PathBuf,
    pub sun_provider_url: String,
    pub iss_provider_url: String,
    pub mail_host: String,
    pub mail_port: u16,
    pub request_timeout_secs: u64,
}

impl Settings {
    /// Defaults, then the config file, then `.env`, then `ISS_*` variables.
    pub fn load(file: Option<&Path>) -> Result<Self, SettingsError> {
        Self::load_with_dotenv(file, None)
    }

    /// `.env` values never replace variables already set in the process.
    fn load_with_dotenv(file: Option<&Path>, dotenv: Option<&Path>) -> Result<Self, SettingsError> {
        let loaded = match dotenv {
            Some(path) => dotenvy::from_path(path).map(|_| path.to_path_buf()),
            None => dotenvy::dotenv(),
        };
        match loaded {
            Ok(path) => debug!(path = %path.display(), "Loaded .env"),
            Err(e) => debug!(error = %e, "No .env loaded"),
        }
        Self::build(file, Some(ENV_PREFIX))
    }

    fn build(file: Option<&Path>, env_prefix: Option<&str>) -> Result<Self, SettingsError> {
        let mut builder = config::Config::builder()
            .set_default("profile_path", DEFAULT_PROFILE_PATH)?
            .set_default("sun_provider_url", DEFAULT_SUN_PROVIDER_URL)?
            .set_default("iss_provider_url", DEFAULT_ISS_PROVIDER_URL)?
            .set_default("mail_host", DEFAULT_MAIL_HOST)?
            .set_default("mail_port", DEFAULT_MAIL_PORT)?
            .set_default("request_timeout_secs", DEFAULT_REQUEST_TIMEOUT_SECS)?;

        builder = match file {
            Some(path) => {
                if !path.exists() {
                    return Err(SettingsError::MissingFile(path.to_path_buf()));
                }
                builder.add_source(config::File::from(path))
            }
            None => builder.add_source(config::File::with_name(DEFAULT_CONFIG_NAME).required(false)),
        };

        if let Some(prefix) = env_prefix {
            builder = builder.add_source(config::Environment::with_prefix(prefix).try_parsing(true));
        }

        Ok(builder.build()?.try_deserialize()?)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn defaults_apply_without_sources() {
        let settings = Settings::build(None, None).unwrap();
        assert_eq!(settings.profile_path, PathBuf::from("data/user_account.json"));
        assert_eq!(settings.sun_provider_url, "https://api.sunrise-sunset.org/json");
        assert_eq!(settings.mail_port, 587);
        assert_eq!(settings.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn file_overrides_selected_keys() {
        let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "mail_host = \"mail.example.org\"").unwrap();
        writeln!(file, "mail_port = 2525").unwrap();
        writeln!(file, "profile_path = \"/tmp/profile.json\"").unwrap();

        let settings = Settings::build(Some(file.path()), None).unwrap();
        assert_eq!(settings.mail_host, "mail.example.org");
        assert_eq!(settings.mail_port, 2525);
        assert_eq!(settings.profile_path, PathBuf::from("/tmp/profile.json"));
        assert_eq!(settings.iss_provider_url, "http://api.open-notify.org/iss-now.json");
    }

    // Only test that touches ISS_* variables in the process environment.
    #[test]
    fn env_and_dotenv_layer_over_file_and_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let toml = dir.path().join("settings.toml");
        std::fs::write(
            &toml,
            "mail_port = 2525\nsun_provider_url = \"http://file.invalid/json\"\nmail_host = \"mail.example.org\"\n",
        )
        .unwrap();
        let dotenv = dir.path().join(".env");
        std::fs::write(&dotenv, "ISS_REQUEST_TIMEOUT_SECS=7\nISS_MAIL_PORT=9999\n").unwrap();

        std::env::set_var("ISS_MAIL_PORT", "2526");
        std::env::set_var("ISS_SUN_PROVIDER_URL", "http://env.invalid/json");
        let settings = Settings::load_with_dotenv(Some(&toml), Some(&dotenv));
        std::env::remove_var("ISS_MAIL_PORT");
        std::env::remove_var("ISS_SUN_PROVIDER_URL");
        std::env::remove_var("ISS_REQUEST_TIMEOUT_SECS");
        let settings = settings.unwrap();

        // process env beats .env, the file and the defaults
        assert_eq!(settings.mail_port, 2526);
        assert_eq!(settings.sun_provider_url, "http://env.invalid/json");
        // .env fills what the process env leaves unset
        assert_eq!(settings.request_timeout(), Duration::from_secs(7));
        // file beats defaults
        assert_eq!(settings.mail_host, "mail.example.org");
        assert_eq!(settings.iss_provider_url, "http://api.open-notify.org/iss-now.json");
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(
            Settings::build(Some(&missing), None),
            Err(SettingsError::MissingFile(_))
        ));
    }
}

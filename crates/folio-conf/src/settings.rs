//! Typed settings.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use std::time::Duration;

use crate::builder::SettingsBuilder;
use crate::profile::Profile;
use crate::sources::{DefaultSource, DotEnvSource, EnvSource, SourceError, TomlFileSource};

/// Secret used when none is configured. Only accepted in development.
pub const DEV_JWT_SECRET: &str = "folio-development-secret-change-me";

const ENV_PREFIX: &str = "FOLIO_";

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
	#[error(transparent)]
	Source(#[from] SourceError),

	#[error("invalid settings: {0}")]
	Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
	/// Expose server error details in responses
	pub debug: bool,
	pub server: ServerSettings,
	pub database: DatabaseSettings,
	pub auth: AuthSettings,
	pub site: SiteSettings,
	pub logging: LoggingSettings,
	#[serde(skip)]
	pub profile: Profile,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
	#[serde(deserialize_with = "lenient_string")]
	pub host: String,
	pub port: u16,
	pub request_timeout_secs: u64,
	pub shutdown_timeout_secs: u64,
	/// Largest accepted request body; bigger ones get 413
	pub max_body_bytes: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
	#[serde(deserialize_with = "lenient_string")]
	pub url: String,
	pub max_connections: u32,
	pub acquire_timeout_secs: u64,
}

#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthSettings {
	#[serde(deserialize_with = "lenient_string")]
	pub jwt_secret: String,
	pub token_ttl_hours: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSettings {
	/// Base URL used for links in downloaded portfolios
	#[serde(deserialize_with = "lenient_string")]
	pub public_base_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
	/// `EnvFilter` directive; `RUST_LOG` takes precedence
	#[serde(deserialize_with = "lenient_string")]
	pub filter: String,
	pub json: bool,
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			debug: true,
			server: ServerSettings::default(),
			database: DatabaseSettings::default(),
			auth: AuthSettings::default(),
			site: SiteSettings::default(),
			logging: LoggingSettings::default(),
			profile: Profile::Development,
		}
	}
}

impl Default for ServerSettings {
	fn default() -> Self {
		Self {
			host: "127.0.0.1".to_string(),
			port: 5000,
			request_timeout_secs: 30,
			shutdown_timeout_secs: 30,
			max_body_bytes: 100 * 1024,
		}
	}
}

impl Default for DatabaseSettings {
	fn default() -> Self {
		Self {
			url: "sqlite://folio.db?mode=rwc".to_string(),
			max_connections: 5,
			acquire_timeout_secs: 5,
		}
	}
}

impl Default for AuthSettings {
	fn default() -> Self {
		Self {
			jwt_secret: DEV_JWT_SECRET.to_string(),
			token_ttl_hours: 24,
		}
	}
}

impl Default for SiteSettings {
	fn default() -> Self {
		Self {
			public_base_url: "http://localhost:5000".to_string(),
		}
	}
}

impl Default for LoggingSettings {
	fn default() -> Self {
		Self {
			filter: "info".to_string(),
			json: false,
		}
	}
}

impl std::fmt::Debug for AuthSettings {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("AuthSettings")
			.field("jwt_secret", &"<redacted>")
			.field("token_ttl_hours", &self.token_ttl_hours)
			.finish()
	}
}

impl ServerSettings {
	/// `host:port`
	pub fn address(&self) -> String {
		format!("{}:{}", self.host, self.port)
	}

	pub fn request_timeout(&self) -> Duration {
		Duration::from_secs(self.request_timeout_secs)
	}

	pub fn shutdown_timeout(&self) -> Duration {
		Duration::from_secs(self.shutdown_timeout_secs)
	}
}

impl DatabaseSettings {
	pub fn acquire_timeout(&self) -> Duration {
		Duration::from_secs(self.acquire_timeout_secs)
	}
}

impl Settings {
	/// Load settings for the profile named by `FOLIO_ENV`.
	///
	/// `settings_dir` holds `base.toml` and `{profile}.toml`; `.env` is read
	/// from the current directory. The result is validated.
	pub fn load(settings_dir: impl AsRef<Path>) -> Result<Self, SettingsError> {
		Self::load_for(settings_dir, Profile::from_env(), ".env")
	}

	/// Load settings for an explicit profile and `.env` path
	pub fn load_for(
		settings_dir: impl AsRef<Path>,
		profile: Profile,
		dotenv_path: impl AsRef<Path>,
	) -> Result<Self, SettingsError> {
		let dir = settings_dir.as_ref();
		let merged = SettingsBuilder::new()
			.profile(profile)
			.add_source(DefaultSource::from_serializable(&Settings::default())?)
			.add_source(TomlFileSource::new(dir.join("base.toml")).with_priority(40))
			.add_source(TomlFileSource::new(dir.join(format!("{profile}.toml"))).with_priority(50))
			.add_source(DotEnvSource::new(dotenv_path.as_ref(), ENV_PREFIX))
			.add_source(EnvSource::new(ENV_PREFIX))
			.build()?;

		let mut settings: Settings = merged.into_typed()?;
		settings.profile = profile;
		settings.validate()?;

		tracing::debug!(profile = %profile, debug = settings.debug, "settings loaded");
		Ok(settings)
	}

	/// Reject configurations that must not run.
	///
	/// # Examples
	///
	/// ```
	/// use folio_conf::{Profile, Settings};
	///
	/// let mut settings = Settings::default();
	/// assert!(settings.validate().is_ok());
	///
	/// settings.profile = Profile::Production;
	/// assert!(settings.validate().is_err());
	///
	/// settings.auth.jwt_secret = "a-real-secret".to_string();
	/// assert!(settings.validate().is_ok());
	/// ```
	pub fn validate(&self) -> Result<(), SettingsError> {
		if self.auth.jwt_secret.trim().is_empty() {
			return Err(SettingsError::Invalid("auth.jwt_secret must not be empty".to_string()));
		}
		if !self.profile.is_development() && self.auth.jwt_secret == DEV_JWT_SECRET {
			return Err(SettingsError::Invalid(format!(
				"auth.jwt_secret must be set for the {} profile",
				self.profile
			)));
		}
		if self.auth.token_ttl_hours <= 0 {
			return Err(SettingsError::Invalid("auth.token_ttl_hours must be positive".to_string()));
		}
		if self.database.max_connections == 0 {
			return Err(SettingsError::Invalid(
				"database.max_connections must be at least 1".to_string(),
			));
		}
		if self.server.request_timeout_secs == 0 {
			return Err(SettingsError::Invalid(
				"server.request_timeout_secs must be at least 1".to_string(),
			));
		}
		if self.server.max_body_bytes == 0 {
			return Err(SettingsError::Invalid(
				"server.max_body_bytes must be at least 1".to_string(),
			));
		}
		Ok(())
	}
}

/// Accept numbers and booleans where a string is expected; environment
/// values are typed before the target field is known.
fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
	match Value::deserialize(deserializer)? {
		Value::String(s) => Ok(s),
		Value::Number(n) => Ok(n.to_string()),
		Value::Bool(b) => Ok(b.to_string()),
		other => Err(de::Error::custom(format!("expected a string, found {}", other))),
	}
}

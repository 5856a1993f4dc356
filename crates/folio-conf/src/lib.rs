//! Settings for folio.
//!
//! Values are merged from several sources, lowest priority first:
//!
//! 1. built-in defaults
//! 2. `settings/base.toml`
//! 3. `settings/{profile}.toml`
//! 4. a `.env` file
//! 5. environment variables prefixed `FOLIO_`
//!
//! Nested keys use `__` in environment names, so `FOLIO_DATABASE__URL`
//! sets `database.url`.
//!
//! ```rust,no_run
//! use folio_conf::Settings;
//!
//! let settings = Settings::load("settings").unwrap();
//! println!("listening on {}:{}", settings.server.host, settings.server.port);
//! ```

pub mod builder;
pub mod profile;
pub mod settings;
pub mod sources;

pub use builder::{MergedSettings, SettingsBuilder};
pub use profile::Profile;
pub use settings::{
	AuthSettings, DEV_JWT_SECRET, DatabaseSettings, LoggingSettings, ServerSettings, Settings,
	SettingsError, SiteSettings,
};
pub use sources::{
	ConfigSource, DefaultSource, DotEnvSource, EnvSource, SourceError, TomlFileSource,
};

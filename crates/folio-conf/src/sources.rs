//! Configuration sources for the layered settings system.

use serde_json::{Map, Value};
use std::fs;
use std::path::PathBuf;

/// Trait for configuration sources
pub trait ConfigSource: Send + Sync {
	/// Load configuration from this source as a (possibly nested) object
	fn load(&self) -> Result<Map<String, Value>, SourceError>;

	/// Higher priorities override lower ones
	fn priority(&self) -> u8;

	fn description(&self) -> String;
}

/// Error type for configuration sources
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("Parse error: {0}")]
	Parse(String),

	#[error("TOML error: {0}")]
	Toml(#[from] toml::de::Error),

	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),

	#[error(".env error: {0}")]
	DotEnv(String),
}

/// Built-in default values
#[derive(Default)]
pub struct DefaultSource {
	values: Map<String, Value>,
}

impl DefaultSource {
	pub fn new() -> Self {
		Self::default()
	}

	/// Set a default at a dotted path
	///
	/// # Examples
	///
	/// ```
	/// use folio_conf::{ConfigSource, DefaultSource};
	/// use serde_json::json;
	///
	/// let source = DefaultSource::new().with_value("server.port", json!(5000));
	/// assert_eq!(source.load().unwrap()["server"]["port"], 5000);
	/// ```
	pub fn with_value(mut self, key: &str, value: Value) -> Self {
		insert_path(&mut self.values, key.split('.'), value);
		self
	}

	/// Defaults taken from a serializable value, such as `Settings::default()`
	pub fn from_serializable<T: serde::Serialize>(value: &T) -> Result<Self, SourceError> {
		match serde_json::to_value(value)? {
			Value::Object(values) => Ok(Self { values }),
			_ => Err(SourceError::Parse("defaults must be an object".to_string())),
		}
	}
}

impl ConfigSource for DefaultSource {
	fn load(&self) -> Result<Map<String, Value>, SourceError> {
		Ok(self.values.clone())
	}

	fn priority(&self) -> u8 {
		0
	}

	fn description(&self) -> String {
		"Default values".to_string()
	}
}

/// TOML file source; a missing file contributes nothing
pub struct TomlFileSource {
	path: PathBuf,
	priority: u8,
}

impl TomlFileSource {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self {
			path: path.into(),
			priority: 50,
		}
	}

	pub fn with_priority(mut self, priority: u8) -> Self {
		self.priority = priority;
		self
	}
}

impl ConfigSource for TomlFileSource {
	fn load(&self) -> Result<Map<String, Value>, SourceError> {
		if !self.path.exists() {
			return Ok(Map::new());
		}

		let content = fs::read_to_string(&self.path)?;
		let toml_value: toml::Value = toml::from_str(&content)?;
		match serde_json::to_value(toml_value)? {
			Value::Object(map) => Ok(map),
			_ => Err(SourceError::Parse("Expected table at root".to_string())),
		}
	}

	fn priority(&self) -> u8 {
		self.priority
	}

	fn description(&self) -> String {
		format!("TOML file: {}", self.path.display())
	}
}

/// Environment variable source.
///
/// Only variables starting with the prefix are read. The remainder is
/// lowercased and split on `__` into a nested key.
pub struct EnvSource {
	prefix: String,
	vars: Option<Vec<(String, String)>>,
}

impl EnvSource {
	pub fn new(prefix: impl Into<String>) -> Self {
		Self {
			prefix: prefix.into(),
			vars: None,
		}
	}

	/// Read from the given pairs instead of the process environment
	///
	/// # Examples
	///
	/// ```
	/// use folio_conf::{ConfigSource, EnvSource};
	///
	/// let source = EnvSource::new("FOLIO_").with_vars([
	///     ("FOLIO_DATABASE__URL", "sqlite::memory:"),
	///     ("FOLIO_DEBUG", "false"),
	///     ("HOME", "/root"),
	/// ]);
	/// let map = source.load().unwrap();
	///
	/// assert_eq!(map["database"]["url"], "sqlite::memory:");
	/// assert_eq!(map["debug"], false);
	/// assert!(!map.contains_key("home"));
	/// ```
	pub fn with_vars<I, K, V>(mut self, vars: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		self.vars = Some(
			vars.into_iter()
				.map(|(key, value)| (key.into(), value.into()))
				.collect(),
		);
		self
	}
}

impl ConfigSource for EnvSource {
	fn load(&self) -> Result<Map<String, Value>, SourceError> {
		let vars = match &self.vars {
			Some(vars) => vars.clone(),
			None => std::env::vars().collect(),
		};
		let mut config = Map::new();
		for (key, value) in vars {
			insert_env_pair(&mut config, &self.prefix, &key, &value);
		}
		Ok(config)
	}

	fn priority(&self) -> u8 {
		100
	}

	fn description(&self) -> String {
		format!("Environment variables (prefix: {})", self.prefix)
	}
}

/// `.env` file source, read without touching the process environment
pub struct DotEnvSource {
	path: PathBuf,
	prefix: String,
}

impl DotEnvSource {
	pub fn new(path: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
		Self {
			path: path.into(),
			prefix: prefix.into(),
		}
	}
}

impl ConfigSource for DotEnvSource {
	fn load(&self) -> Result<Map<String, Value>, SourceError> {
		let mut config = Map::new();
		if !self.path.exists() {
			return Ok(config);
		}

		let iter =
			dotenv::from_path_iter(&self.path).map_err(|e| SourceError::DotEnv(e.to_string()))?;
		for item in iter {
			let (key, value) = item.map_err(|e| SourceError::DotEnv(e.to_string()))?;
			insert_env_pair(&mut config, &self.prefix, &key, &value);
		}
		Ok(config)
	}

	fn priority(&self) -> u8 {
		90
	}

	fn description(&self) -> String {
		format!(".env file: {}", self.path.display())
	}
}

fn insert_env_pair(config: &mut Map<String, Value>, prefix: &str, key: &str, value: &str) {
	let Some(rest) = key.strip_prefix(prefix) else {
		return;
	};
	if rest.is_empty() {
		return;
	}
	let lower = rest.to_ascii_lowercase();
	insert_path(config, lower.split("__"), parse_env_value(value));
}

/// Interpret an environment string as bool, integer or string
fn parse_env_value(value: &str) -> Value {
	let trimmed = value.trim();
	match trimmed.to_ascii_lowercase().as_str() {
		"true" | "yes" | "on" => return Value::Bool(true),
		"false" | "no" | "off" => return Value::Bool(false),
		_ => {}
	}
	if let Ok(num) = trimmed.parse::<i64>() {
		return Value::Number(num.into());
	}
	Value::String(value.to_string())
}

pub(crate) fn insert_path<'a>(
	map: &mut Map<String, Value>,
	mut path: impl Iterator<Item = &'a str>,
	value: Value,
) {
	let Some(head) = path.next() else {
		return;
	};
	let rest: Vec<&str> = path.collect();
	if rest.is_empty() {
		map.insert(head.to_string(), value);
		return;
	}
	let entry = map
		.entry(head.to_string())
		.or_insert_with(|| Value::Object(Map::new()));
	if !entry.is_object() {
		*entry = Value::Object(Map::new());
	}
	if let Value::Object(child) = entry {
		insert_path(child, rest.into_iter(), value);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::io::Write;

	#[rstest]
	#[case("true", Value::Bool(true))]
	#[case("OFF", Value::Bool(false))]
	#[case("8080", Value::from(8080))]
	#[case("sqlite://folio.db", Value::from("sqlite://folio.db"))]
	fn test_parse_env_value(#[case] raw: &str, #[case] expected: Value) {
		assert_eq!(parse_env_value(raw), expected);
	}

	#[rstest]
	fn test_missing_toml_file_is_empty() {
		let source = TomlFileSource::new("/definitely/not/here.toml");
		assert!(source.load().unwrap().is_empty());
	}

	#[rstest]
	fn test_toml_file_is_nested() {
		let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
		writeln!(file, "debug = false\n[server]\nport = 9000").unwrap();

		let map = TomlFileSource::new(file.path()).load().unwrap();

		assert_eq!(map["debug"], false);
		assert_eq!(map["server"]["port"], 9000);
	}

	#[rstest]
	fn test_dotenv_file_uses_prefix() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "FOLIO_AUTH__JWT_SECRET=from-dotenv\nOTHER=ignored").unwrap();

		let map = DotEnvSource::new(file.path(), "FOLIO_").load().unwrap();

		assert_eq!(map["auth"]["jwt_secret"], "from-dotenv");
		assert_eq!(map.len(), 1);
	}
}

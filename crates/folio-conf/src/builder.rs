use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::Profile;
use crate::sources::{ConfigSource, SourceError};

/// Collects sources and merges them by priority
#[derive(Default)]
pub struct SettingsBuilder {
	profile: Profile,
	sources: Vec<Box<dyn ConfigSource>>,
}

impl SettingsBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn profile(mut self, profile: Profile) -> Self {
		self.profile = profile;
		self
	}

	pub fn add_source<S: ConfigSource + 'static>(mut self, source: S) -> Self {
		self.sources.push(Box::new(source));
		self
	}

	/// Load every source and deep-merge them.
	///
	/// Sources with equal priority merge in the order they were added.
	///
	/// # Examples
	///
	/// ```
	/// use folio_conf::{DefaultSource, EnvSource, SettingsBuilder};
	/// use serde_json::json;
	///
	/// let merged = SettingsBuilder::new()
	///     .add_source(EnvSource::new("FOLIO_").with_vars([("FOLIO_SERVER__PORT", "9000")]))
	///     .add_source(
	///         DefaultSource::new()
	///             .with_value("server.port", json!(5000))
	///             .with_value("server.host", json!("127.0.0.1")),
	///     )
	///     .build()
	///     .unwrap();
	///
	/// assert_eq!(merged.get("server.port"), Some(&json!(9000)));
	/// assert_eq!(merged.get("server.host"), Some(&json!("127.0.0.1")));
	/// ```
	pub fn build(mut self) -> Result<MergedSettings, SourceError> {
		self.sources.sort_by_key(|source| source.priority());

		let mut values = Map::new();
		for source in &self.sources {
			let layer = source.load()?;
			tracing::trace!(source = %source.description(), keys = layer.len(), "loaded settings source");
			merge(&mut values, layer);
		}

		Ok(MergedSettings {
			profile: self.profile,
			values,
		})
	}
}

/// Result of merging every source
#[derive(Debug, Clone)]
pub struct MergedSettings {
	pub profile: Profile,
	values: Map<String, Value>,
}

impl MergedSettings {
	/// Look up a dotted key
	pub fn get(&self, key: &str) -> Option<&Value> {
		let mut parts = key.split('.');
		let mut current = self.values.get(parts.next()?)?;
		for part in parts {
			current = current.as_object()?.get(part)?;
		}
		Some(current)
	}

	/// Deserialize the merged values into a typed settings struct
	pub fn into_typed<T: DeserializeOwned>(self) -> Result<T, SourceError> {
		Ok(serde_json::from_value(Value::Object(self.values))?)
	}
}

fn merge(base: &mut Map<String, Value>, layer: Map<String, Value>) {
	for (key, value) in layer {
		let incoming = match value {
			Value::Object(incoming) => incoming,
			other => {
				base.insert(key, other);
				continue;
			}
		};
		if let Some(Value::Object(existing)) = base.get_mut(&key) {
			merge(existing, incoming);
			continue;
		}
		base.insert(key, Value::Object(incoming));
	}
}

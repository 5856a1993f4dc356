use std::fmt;

/// Deployment profile, selected with `FOLIO_ENV`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Profile {
	#[default]
	Development,
	Staging,
	Production,
}

impl Profile {
	pub const ENV_VAR: &'static str = "FOLIO_ENV";

	/// Parse a profile name; unknown names mean development.
	///
	/// # Examples
	///
	/// ```
	/// use folio_conf::Profile;
	///
	/// assert_eq!(Profile::parse("prod"), Profile::Production);
	/// assert_eq!(Profile::parse("Staging"), Profile::Staging);
	/// assert_eq!(Profile::parse("whatever"), Profile::Development);
	/// ```
	pub fn parse(name: &str) -> Self {
		match name.trim().to_ascii_lowercase().as_str() {
			"production" | "prod" => Profile::Production,
			"staging" | "stage" => Profile::Staging,
			_ => Profile::Development,
		}
	}

	/// Profile named by `FOLIO_ENV`, development when unset
	pub fn from_env() -> Self {
		std::env::var(Self::ENV_VAR)
			.map(|value| Self::parse(&value))
			.unwrap_or_default()
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			Profile::Development => "development",
			Profile::Staging => "staging",
			Profile::Production => "production",
		}
	}

	pub fn is_development(&self) -> bool {
		matches!(self, Profile::Development)
	}
}

impl fmt::Display for Profile {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

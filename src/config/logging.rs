//! Tracing subscriber setup for the `manage` binary.

use folio_conf::LoggingSettings;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
///
/// `RUST_LOG` takes precedence over `logging.filter`. Calling this twice
/// keeps the first subscriber.
pub fn init_logging(settings: &LoggingSettings) {
	let filter = EnvFilter::try_from_default_env()
		.or_else(|_| EnvFilter::try_new(&settings.filter))
		.unwrap_or_else(|_| EnvFilter::new("info"));

	let builder = tracing_subscriber::fmt().with_env_filter(filter);
	let result = if settings.json {
		builder.json().try_init()
	} else {
		builder.try_init()
	};
	if result.is_err() {
		tracing::debug!("tracing subscriber already installed");
	}
}

use std::sync::Once;

static INIT: Once = Once::new();

/// Routes `tracing` output through the test harness, once per process.
///
/// Honors `RUST_LOG`; silent otherwise.
pub fn init_test_logging() {
	INIT.call_once(|| {
		let filter = tracing_subscriber::EnvFilter::try_from_default_env()
			.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("off"));
		let _ = tracing_subscriber::fmt()
			.with_env_filter(filter)
			.with_test_writer()
			.try_init();
	});
}

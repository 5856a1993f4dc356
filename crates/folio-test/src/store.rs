//! Profile store fixtures.

use folio_profiles::SqlProfileStore;
use rstest::fixture;

/// A fresh in-memory store with the schema applied.
///
/// Each call gets its own database, so tests never see each other's rows.
#[fixture]
pub async fn memory_store() -> SqlProfileStore {
	SqlProfileStore::in_memory()
		.await
		.expect("failed to open in-memory profile store")
}

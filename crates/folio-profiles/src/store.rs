//! Profile persistence.

use crate::error::ProfileError;
use crate::model::{Profile, ProfileFields, Theme};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;
use std::time::Duration;
use uuid::Uuid;

/// Storage for profiles, one per user.
#[async_trait]
pub trait ProfileStore: Send + Sync {
	/// Inserts a new profile. Fails with [`ProfileError::Conflict`] if the
	/// user already has one.
	async fn create(&self, user: Uuid, fields: ProfileFields) -> Result<Profile, ProfileError>;

	/// Replaces the user's profile fields, creating the profile if needed.
	async fn upsert(&self, user: Uuid, fields: ProfileFields) -> Result<Profile, ProfileError>;

	async fn get_by_user(&self, user: Uuid) -> Result<Profile, ProfileError>;

	/// Every profile, oldest first.
	async fn get_all(&self) -> Result<Vec<Profile>, ProfileError>;

	/// Removes the user's profile. Succeeds when there is none.
	async fn delete_by_user(&self, user: Uuid) -> Result<(), ProfileError>;

	/// Whether the backing database answers.
	async fn ping(&self) -> bool;
}

const CREATE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS profiles (
	id TEXT PRIMARY KEY NOT NULL,
	user_id TEXT NOT NULL UNIQUE,
	name TEXT NOT NULL,
	title TEXT,
	bio TEXT NOT NULL,
	profile_photo TEXT,
	location TEXT,
	phone TEXT,
	email TEXT,
	skills TEXT NOT NULL,
	projects TEXT NOT NULL,
	experience TEXT NOT NULL,
	education TEXT NOT NULL,
	social_links TEXT NOT NULL,
	hobbies TEXT NOT NULL,
	theme TEXT NOT NULL,
	is_public INTEGER NOT NULL,
	created_at TEXT NOT NULL,
	updated_at TEXT NOT NULL
)
"#;

const COLUMNS: &str = "id, user_id, name, title, bio, profile_photo, location, phone, email, \
	skills, projects, experience, education, social_links, hobbies, theme, is_public, \
	created_at, updated_at";

/// [`ProfileStore`] backed by SQLite through `sqlx`.
///
/// Collections are stored as JSON text columns. The UNIQUE constraint on
/// `user_id` is what keeps one profile per user under concurrent writes.
#[derive(Debug, Clone)]
pub struct SqlProfileStore {
	pool: SqlitePool,
}

impl SqlProfileStore {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	/// Opens a pool for `url`.
	pub async fn connect(
		url: &str,
		max_connections: u32,
		acquire_timeout: Duration,
	) -> Result<Self, ProfileError> {
		let pool = SqlitePoolOptions::new()
			.max_connections(max_connections)
			.acquire_timeout(acquire_timeout)
			.connect(url)
			.await
			.map_err(ProfileError::from_sqlx)?;
		tracing::debug!(url, max_connections, "profile store connected");
		Ok(Self::new(pool))
	}

	/// A private in-memory database with the schema applied.
	///
	/// The pool holds a single connection that never expires, since the
	/// database disappears with its last connection.
	pub async fn in_memory() -> Result<Self, ProfileError> {
		let pool = SqlitePoolOptions::new()
			.max_connections(1)
			.idle_timeout(None)
			.max_lifetime(None)
			.connect("sqlite::memory:")
			.await
			.map_err(ProfileError::from_sqlx)?;
		let store = Self::new(pool);
		store.migrate().await?;
		Ok(store)
	}

	pub fn pool(&self) -> &SqlitePool {
		&self.pool
	}

	/// Creates the schema if it is missing.
	pub async fn migrate(&self) -> Result<(), ProfileError> {
		sqlx::query(CREATE_TABLE)
			.execute(&self.pool)
			.await
			.map_err(ProfileError::from_sqlx)?;
		tracing::info!("profile schema ready");
		Ok(())
	}

	/// Replaces the fields of an existing row and reads it back in the same
	/// statement. `None` when the user has no profile.
	async fn update(
		&self,
		user: Uuid,
		fields: &ProfileFields,
	) -> Result<Option<Profile>, ProfileError> {
		let sql = format!(
			"UPDATE profiles SET name = ?, title = ?, bio = ?, profile_photo = ?, location = ?, \
			 phone = ?, email = ?, skills = ?, projects = ?, experience = ?, education = ?, \
			 social_links = ?, hobbies = ?, theme = ?, is_public = ?, updated_at = ? \
			 WHERE user_id = ? RETURNING {COLUMNS}"
		);
		let row = sqlx::query(&sql)
			.bind(&fields.name)
			.bind(&fields.title)
			.bind(&fields.bio)
			.bind(&fields.profile_photo)
			.bind(&fields.location)
			.bind(&fields.phone)
			.bind(&fields.email)
			.bind(to_json(&fields.skills)?)
			.bind(to_json(&fields.projects)?)
			.bind(to_json(&fields.experience)?)
			.bind(to_json(&fields.education)?)
			.bind(to_json(&fields.social_links)?)
			.bind(to_json(&fields.hobbies)?)
			.bind(fields.theme.as_str())
			.bind(fields.is_public)
			.bind(timestamp(Utc::now()))
			.bind(user.to_string())
			.fetch_optional(&self.pool)
			.await
			.map_err(ProfileError::from_sqlx)?;
		row.as_ref().map(profile_from_row).transpose()
	}
}

#[async_trait]
impl ProfileStore for SqlProfileStore {
	async fn create(&self, user: Uuid, fields: ProfileFields) -> Result<Profile, ProfileError> {
		// Stored timestamps keep microseconds; match them in the returned record.
		let now = Utc::now().trunc_subsecs(6);
		let id = Uuid::new_v4();
		let result = sqlx::query(
			"INSERT INTO profiles (id, user_id, name, title, bio, profile_photo, location, phone, \
			 email, skills, projects, experience, education, social_links, hobbies, theme, \
			 is_public, created_at, updated_at) \
			 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
		)
		.bind(id.to_string())
		.bind(user.to_string())
		.bind(&fields.name)
		.bind(&fields.title)
		.bind(&fields.bio)
		.bind(&fields.profile_photo)
		.bind(&fields.location)
		.bind(&fields.phone)
		.bind(&fields.email)
		.bind(to_json(&fields.skills)?)
		.bind(to_json(&fields.projects)?)
		.bind(to_json(&fields.experience)?)
		.bind(to_json(&fields.education)?)
		.bind(to_json(&fields.social_links)?)
		.bind(to_json(&fields.hobbies)?)
		.bind(fields.theme.as_str())
		.bind(fields.is_public)
		.bind(timestamp(now))
		.bind(timestamp(now))
		.execute(&self.pool)
		.await;

		match result {
			Ok(_) => {
				tracing::debug!(%user, profile = %id, "profile created");
				Ok(Profile {
					id,
					user,
					fields,
					created_at: now,
					updated_at: now,
				})
			}
			Err(e) => {
				let error = ProfileError::from_sqlx(e);
				if matches!(error, ProfileError::Conflict) {
					tracing::warn!(%user, "profile already exists");
				}
				Err(error)
			}
		}
	}

	async fn upsert(&self, user: Uuid, fields: ProfileFields) -> Result<Profile, ProfileError> {
		if let Some(profile) = self.update(user, &fields).await? {
			tracing::debug!(%user, "profile replaced");
			return Ok(profile);
		}
		self.create(user, fields).await
	}

	async fn get_by_user(&self, user: Uuid) -> Result<Profile, ProfileError> {
		let row = sqlx::query(&format!("SELECT {COLUMNS} FROM profiles WHERE user_id = ?"))
			.bind(user.to_string())
			.fetch_optional(&self.pool)
			.await
			.map_err(ProfileError::from_sqlx)?;
		match row {
			Some(row) => profile_from_row(&row),
			None => Err(ProfileError::NotFound),
		}
	}

	async fn get_all(&self) -> Result<Vec<Profile>, ProfileError> {
		let sql = format!("SELECT {COLUMNS} FROM profiles ORDER BY created_at, rowid");
		let rows = sqlx::query(&sql)
			.fetch_all(&self.pool)
			.await
			.map_err(ProfileError::from_sqlx)?;
		rows.iter().map(profile_from_row).collect()
	}

	async fn delete_by_user(&self, user: Uuid) -> Result<(), ProfileError> {
		let result = sqlx::query("DELETE FROM profiles WHERE user_id = ?")
			.bind(user.to_string())
			.execute(&self.pool)
			.await
			.map_err(ProfileError::from_sqlx)?;
		tracing::debug!(%user, deleted = result.rows_affected(), "profile delete");
		Ok(())
	}

	async fn ping(&self) -> bool {
		match sqlx::query("SELECT 1").execute(&self.pool).await {
			Ok(_) => true,
			Err(e) => {
				tracing::warn!(error = %e, "database ping failed");
				false
			}
		}
	}
}

/// Fixed-width UTC timestamps so that text order is chronological order.
fn timestamp(at: DateTime<Utc>) -> String {
	at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn to_json<T: Serialize>(value: &T) -> Result<String, ProfileError> {
	Ok(serde_json::to_string(value)?)
}

fn column<T>(row: &SqliteRow, name: &str) -> Result<T, ProfileError>
where
	T: for<'r> sqlx::Decode<'r, sqlx::Sqlite> + sqlx::Type<sqlx::Sqlite>,
{
	row.try_get(name).map_err(ProfileError::from_sqlx)
}

fn json_column<T: DeserializeOwned>(row: &SqliteRow, name: &str) -> Result<T, ProfileError> {
	let text: String = column(row, name)?;
	Ok(serde_json::from_str(&text)?)
}

fn uuid_column(row: &SqliteRow, name: &str) -> Result<Uuid, ProfileError> {
	let text: String = column(row, name)?;
	Uuid::parse_str(&text).map_err(|e| ProfileError::Corrupt(format!("{name}: {e}")))
}

fn time_column(row: &SqliteRow, name: &str) -> Result<DateTime<Utc>, ProfileError> {
	let text: String = column(row, name)?;
	DateTime::parse_from_rfc3339(&text)
		.map(|t| t.with_timezone(&Utc))
		.map_err(|e| ProfileError::Corrupt(format!("{name}: {e}")))
}

fn profile_from_row(row: &SqliteRow) -> Result<Profile, ProfileError> {
	let theme: String = column(row, "theme")?;
	Ok(Profile {
		id: uuid_column(row, "id")?,
		user: uuid_column(row, "user_id")?,
		fields: ProfileFields {
			name: column(row, "name")?,
			title: column(row, "title")?,
			bio: column(row, "bio")?,
			profile_photo: column(row, "profile_photo")?,
			location: column(row, "location")?,
			phone: column(row, "phone")?,
			email: column(row, "email")?,
			skills: json_column(row, "skills")?,
			projects: json_column(row, "projects")?,
			experience: json_column(row, "experience")?,
			education: json_column(row, "education")?,
			social_links: json_column(row, "social_links")?,
			hobbies: json_column(row, "hobbies")?,
			theme: Theme::from_name(&theme),
			is_public: column(row, "is_public")?,
		},
		created_at: time_column(row, "created_at")?,
		updated_at: time_column(row, "updated_at")?,
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::{Skill, SkillLevel};
	use rstest::{fixture, rstest};
	use std::sync::Arc;

	#[fixture]
	async fn store() -> SqlProfileStore {
		SqlProfileStore::in_memory().await.unwrap()
	}

	fn fields(name: &str) -> ProfileFields {
		ProfileFields::new(name, "Builds things")
	}

	#[rstest]
	#[tokio::test]
	async fn test_upsert_then_get(#[future] store: SqlProfileStore) {
		let store = store.await;
		let user = Uuid::new_v4();

		let created = store.upsert(user, fields("Ada")).await.unwrap();
		let fetched = store.get_by_user(user).await.unwrap();

		assert_eq!(fetched.fields.name, "Ada");
		assert_eq!(fetched.fields.bio, "Builds things");
		assert_eq!(fetched.id, created.id);
		assert_eq!(fetched.user, user);
	}

	#[rstest]
	#[tokio::test]
	async fn test_upsert_replaces_collections(#[future] store: SqlProfileStore) {
		let store = store.await;
		let user = Uuid::new_v4();
		let mut first = fields("Ada");
		first.skills = vec![Skill::named("Go"), Skill::named("Rust")];
		first.hobbies = vec!["Chess".into()];
		let created = store.upsert(user, first).await.unwrap();

		let mut second = fields("Ada L.");
		second.skills = vec![Skill {
			level: SkillLevel::Expert,
			..Skill::named("SQL")
		}];
		let updated = store.upsert(user, second).await.unwrap();

		assert_eq!(updated.fields.name, "Ada L.");
		assert_eq!(updated.fields.skills.len(), 1);
		assert_eq!(updated.fields.skills[0].name, "SQL");
		assert!(updated.fields.hobbies.is_empty());
		assert_eq!(updated.id, created.id);
		assert_eq!(updated.created_at, created.created_at);
		assert!(updated.updated_at >= created.updated_at);
	}

	#[rstest]
	#[tokio::test]
	async fn test_replace_returns_the_row_it_wrote(#[future] store: SqlProfileStore) {
		let store = store.await;
		let user = Uuid::new_v4();
		store.upsert(user, fields("Ada")).await.unwrap();

		let replaced = store.upsert(user, fields("Ada L.")).await.unwrap();
		let fetched = store.get_by_user(user).await.unwrap();

		assert_eq!(replaced, fetched);
	}

	#[rstest]
	#[tokio::test]
	async fn test_upsert_after_delete_creates_a_new_profile(#[future] store: SqlProfileStore) {
		let store = store.await;
		let user = Uuid::new_v4();
		let first = store.upsert(user, fields("Ada")).await.unwrap();
		store.delete_by_user(user).await.unwrap();

		let second = store.upsert(user, fields("Ada")).await.unwrap();

		assert_ne!(second.id, first.id);
		assert_eq!(store.get_all().await.unwrap().len(), 1);
	}

	#[rstest]
	#[tokio::test]
	async fn test_create_twice_conflicts(#[future] store: SqlProfileStore) {
		let store = store.await;
		let user = Uuid::new_v4();

		store.create(user, fields("Ada")).await.unwrap();
		let second = store.create(user, fields("Ada")).await;

		assert!(matches!(second, Err(ProfileError::Conflict)));
	}

	#[rstest]
	#[tokio::test]
	async fn test_missing_profile_is_not_found(#[future] store: SqlProfileStore) {
		let store = store.await;
		let result = store.get_by_user(Uuid::new_v4()).await;
		assert!(matches!(result, Err(ProfileError::NotFound)));
	}

	#[rstest]
	#[tokio::test]
	async fn test_get_all_oldest_first(#[future] store: SqlProfileStore) {
		let store = store.await;
		for name in ["First", "Second", "Third"] {
			store.create(Uuid::new_v4(), fields(name)).await.unwrap();
		}

		let names: Vec<String> = store
			.get_all()
			.await
			.unwrap()
			.into_iter()
			.map(|p| p.fields.name)
			.collect();

		assert_eq!(names, vec!["First", "Second", "Third"]);
	}

	#[rstest]
	#[tokio::test]
	async fn test_delete_is_idempotent(#[future] store: SqlProfileStore) {
		let store = store.await;
		let user = Uuid::new_v4();
		store.create(user, fields("Ada")).await.unwrap();

		store.delete_by_user(user).await.unwrap();
		store.delete_by_user(user).await.unwrap();

		assert!(matches!(
			store.get_by_user(user).await,
			Err(ProfileError::NotFound)
		));
	}

	#[rstest]
	#[tokio::test]
	async fn test_concurrent_first_upserts_leave_one_row(#[future] store: SqlProfileStore) {
		let store = Arc::new(store.await);
		let user = Uuid::new_v4();

		let handles: Vec<_> = (0..4)
			.map(|i| {
				let store = Arc::clone(&store);
				tokio::spawn(async move { store.upsert(user, fields(&format!("Ada {i}"))).await })
			})
			.collect();

		for handle in handles {
			match handle.await.unwrap() {
				Ok(profile) => assert_eq!(profile.user, user),
				Err(error) => assert!(matches!(error, ProfileError::Conflict)),
			}
		}
		assert_eq!(store.get_all().await.unwrap().len(), 1);
	}

	#[rstest]
	#[tokio::test]
	async fn test_ping(#[future] store: SqlProfileStore) {
		let store = store.await;
		assert!(store.ping().await);
		store.pool().close().await;
		assert!(!store.ping().await);
	}

	#[rstest]
	#[tokio::test]
	async fn test_optional_fields_round_trip_as_unset(#[future] store: SqlProfileStore) {
		let store = store.await;
		let user = Uuid::new_v4();
		let mut input = fields("Ada");
		input.location = Some("London".into());
		input.is_public = false;

		store.create(user, input.clone()).await.unwrap();
		let fetched = store.get_by_user(user).await.unwrap();

		assert_eq!(fetched.fields, input);
		assert_eq!(fetched.fields.title, None);
	}
}

//! Folio project management CLI.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use console::style;
use folio::AppState;
use folio::config::logging::init_logging;
use folio::config::settings::get_settings;
use folio::config::urls::server_from_settings;
use folio_conf::Settings;
use folio_profiles::{ProfileStore, SqlProfileStore};
use folio_server::{ShutdownCoordinator, shutdown_signal};
use std::net::SocketAddr;
use std::sync::Arc;
use uuid::Uuid;

/// Folio management interface
#[derive(Debug, Parser)]
#[command(name = "manage")]
#[command(about = "Folio management interface", long_about = None)]
#[command(version)]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Debug, Clone, Subcommand)]
enum Commands {
	/// Start the HTTP server
	Runserver {
		/// Address to bind (default: server.host:server.port from settings)
		#[arg(value_name = "ADDRESS")]
		address: Option<String>,
	},

	/// Create the database schema if it is missing
	Migrate,

	/// Validate settings and database connectivity
	Check,

	/// Mint a development access token for a user
	Issuetoken {
		#[arg(value_name = "USER_ID")]
		user_id: Uuid,
	},
}

#[tokio::main]
async fn main() -> Result<()> {
	let cli = Cli::parse();
	let settings = get_settings().context("failed to load settings")?;
	init_logging(&settings.logging);

	match cli.command {
		Commands::Runserver { address } => runserver(&settings, address).await,
		Commands::Migrate => migrate(&settings).await,
		Commands::Check => check(&settings).await,
		Commands::Issuetoken { user_id } => issuetoken(&settings, user_id),
	}
}

async fn open_store(settings: &Settings) -> Result<SqlProfileStore> {
	let db = &settings.database;
	SqlProfileStore::connect(&db.url, db.max_connections, db.acquire_timeout())
		.await
		.with_context(|| format!("failed to connect to {}", db.url))
}

async fn runserver(settings: &Settings, address: Option<String>) -> Result<()> {
	let address = address.unwrap_or_else(|| settings.server.address());
	let addr: SocketAddr = address
		.parse()
		.with_context(|| format!("invalid address: {address}"))?;

	let store = open_store(settings).await?;
	store.migrate().await?;

	let state = Arc::new(AppState::from_settings(settings, Arc::new(store)));
	let server = server_from_settings(state, settings);
	let coordinator = ShutdownCoordinator::new(settings.server.shutdown_timeout());

	println!(
		"{} {} ({} profile)",
		style("Starting server at").cyan().bold(),
		style(format!("http://{addr}")).green(),
		settings.profile
	);

	let signal_coordinator = coordinator.clone();
	tokio::spawn(async move {
		shutdown_signal().await;
		signal_coordinator.shutdown();
	});

	server
		.listen_with_shutdown(addr, coordinator)
		.await
		.context("server failed")?;
	println!("{}", style("Server stopped").dim());
	Ok(())
}

async fn migrate(settings: &Settings) -> Result<()> {
	println!("{}", style("Applying schema...").cyan().bold());
	let store = open_store(settings).await?;
	store.migrate().await?;
	println!("{}", style("Schema is up to date").green());
	Ok(())
}

async fn check(settings: &Settings) -> Result<()> {
	println!("{}", style("Checking configuration...").cyan().bold());
	println!("  profile: {}", settings.profile);
	println!("  database: {}", settings.database.url);
	println!("  public url: {}", settings.site.public_base_url);

	let store = open_store(settings).await?;
	if !store.ping().await {
		bail!("database did not answer");
	}
	println!("{}", style("System check identified no issues").green());
	Ok(())
}

fn issuetoken(settings: &Settings, user_id: Uuid) -> Result<()> {
	let jwt = folio_auth::JwtAuth::new(settings.auth.jwt_secret.as_bytes())
		.with_ttl(chrono::Duration::hours(settings.auth.token_ttl_hours));
	let token = jwt.generate_token(user_id)?;
	println!("{token}");
	eprintln!(
		"{}",
		style(format!(
			"valid for {} hours; send as 'Authorization: Bearer <token>'",
			settings.auth.token_ttl_hours
		))
		.dim()
	);
	Ok(())
}

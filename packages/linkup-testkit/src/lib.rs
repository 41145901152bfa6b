//! Throwaway Postgres databases for integration tests.
//!
//! Each [`TestDatabase`] is created on the server named by `LINKUP_PG_DSN` and dropped on
//! [`TestDatabase::cleanup`], or from `Drop` when a test panics first.

mod error;

pub use error::{Error, Result};

use std::{env, str::FromStr, thread};

use sqlx::{
	ConnectOptions, Connection, Executor,
	postgres::{PgConnectOptions, PgConnection},
};
use tokio::runtime::Builder;
use uuid::Uuid;

pub const DSN_ENV: &str = "LINKUP_PG_DSN";

const MAINTENANCE_DATABASE: &str = "postgres";

pub struct TestDatabase {
	name: String,
	dsn: String,
	maintenance: PgConnectOptions,
	dropped: bool,
}
impl TestDatabase {
	/// `Ok(None)` when no server is configured, so callers can skip.
	pub async fn from_env() -> Result<Option<Self>> {
		match env::var(DSN_ENV) {
			Ok(base_dsn) => Self::create(&base_dsn).await.map(Some),
			Err(_) => Ok(None),
		}
	}

	pub async fn create(base_dsn: &str) -> Result<Self> {
		let base = PgConnectOptions::from_str(base_dsn).map_err(Error::InvalidDsn)?;
		let maintenance = base.clone().database(MAINTENANCE_DATABASE);
		let name = format!("linkup_test_{}", Uuid::new_v4().simple());
		let mut conn = PgConnection::connect_with(&maintenance).await?;

		conn.execute(format!(r#"CREATE DATABASE "{name}""#).as_str()).await?;
		conn.close().await?;

		let dsn = base.database(&name).to_url_lossy().to_string();

		Ok(Self { name, dsn, maintenance, dropped: false })
	}

	pub fn dsn(&self) -> &str {
		&self.dsn
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub async fn cleanup(mut self) -> Result<()> {
		drop_database(&self.maintenance, &self.name).await?;

		self.dropped = true;

		Ok(())
	}
}
impl Drop for TestDatabase {
	fn drop(&mut self) {
		if self.dropped {
			return;
		}

		let name = self.name.clone();
		let maintenance = self.maintenance.clone();
		// Drop may run inside a test runtime, so the cleanup gets its own thread and runtime.
		let worker = thread::spawn(move || {
			let outcome = Builder::new_current_thread()
				.enable_all()
				.build()
				.map_err(|err| err.to_string())
				.and_then(|runtime| {
					runtime
						.block_on(drop_database(&maintenance, &name))
						.map_err(|err| err.to_string())
				});

			if let Err(err) = outcome {
				eprintln!("Failed to drop test database {name}: {err}");
			}
		});

		let _ = worker.join();
	}
}

async fn drop_database(maintenance: &PgConnectOptions, name: &str) -> Result<()> {
	let mut conn = PgConnection::connect_with(maintenance).await?;

	conn.execute(format!(r#"DROP DATABASE IF EXISTS "{name}" WITH (FORCE)"#).as_str()).await?;
	conn.close().await?;

	Ok(())
}

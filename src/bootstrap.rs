use std::thread;
use std::time::Duration;

use diesel::pg::PgConnection;
use diesel::{Connection, ConnectionError};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::seed;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

const MAX_CONNECT_ATTEMPTS: u32 = 30;
const CONNECT_RETRY_DELAY: Duration = Duration::from_secs(2);

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("database unreachable after {attempts} attempts: {message}")]
    ConnectExhausted { attempts: u32, message: String },
    #[error("database connection rejected: {0}")]
    Connect(#[from] ConnectionError),
    #[error("schema setup failed: {0}")]
    Setup(anyhow::Error),
}

/// Brings the database to a servable state: waits for connectivity, applies
/// the embedded migrations (create-if-not-exists, safe across restarts), and
/// seeds fixture data into an empty database.
///
/// Only connection-level failures are retried; a broken migration or seed
/// propagates immediately.
pub fn ensure_schema(config: &AppConfig) -> Result<(), BootstrapError> {
    let mut conn = connect_with_retry(&config.database_url)?;

    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|err| BootstrapError::Setup(anyhow::anyhow!("migrations failed: {err}")))?;

    let seeded = seed::seed_if_empty(&mut conn).map_err(BootstrapError::Setup)?;
    info!(seeded, "database schema ready");
    Ok(())
}

fn connect_with_retry(database_url: &str) -> Result<PgConnection, BootstrapError> {
    let mut attempt = 1;
    loop {
        match PgConnection::establish(database_url) {
            Ok(conn) => return Ok(conn),
            Err(ConnectionError::BadConnection(message)) => {
                if attempt >= MAX_CONNECT_ATTEMPTS {
                    return Err(BootstrapError::ConnectExhausted {
                        attempts: attempt,
                        message,
                    });
                }
                warn!(attempt, error = %message, "database connection failed, retrying");
                thread::sleep(CONNECT_RETRY_DELAY);
                attempt += 1;
            }
            Err(err) => return Err(BootstrapError::Connect(err)),
        }
    }
}

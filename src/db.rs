use std::ops::{Deref, DerefMut};
use std::time::Duration;

use anyhow::Context;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PooledConnection};
use diesel::Connection;
use tracing::{info, warn};

pub type PgPool = Pool<ConnectionManager<PgConnection>>;
pub type PgPooledConnection = PooledConnection<ConnectionManager<PgConnection>>;

pub const DEFAULT_MAX_POOL_SIZE: u32 = 10;

pub fn init_pool(database_url: &str, max_size: u32) -> anyhow::Result<PgPool> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    let pool = Pool::builder()
        .min_idle(Some(1))
        .max_size(max_size.max(1))
        .connection_timeout(Duration::from_secs(10))
        .build(manager)?;
    Ok(pool)
}

/// Hands out database connections to handlers. Normally backed by the r2d2
/// pool; if pool construction failed at startup every checkout opens a fresh
/// direct connection instead, so callers see the same contract in both modes.
pub enum DbHandle {
    Pooled(PgPool),
    Direct { database_url: String },
}

impl DbHandle {
    pub fn connect(database_url: &str, max_pool_size: u32) -> Self {
        match init_pool(database_url, max_pool_size) {
            Ok(pool) => {
                info!(pool_size = max_pool_size, "database pool created");
                DbHandle::Pooled(pool)
            }
            Err(err) => {
                warn!(
                    error = %err,
                    "database pool creation failed, falling back to direct connections"
                );
                DbHandle::Direct {
                    database_url: database_url.to_string(),
                }
            }
        }
    }

    pub fn conn(&self) -> anyhow::Result<DbConn> {
        match self {
            DbHandle::Pooled(pool) => {
                let conn = pool.get().context("database pool checkout failed")?;
                Ok(DbConn::Pooled(conn))
            }
            DbHandle::Direct { database_url } => {
                let conn = PgConnection::establish(database_url)
                    .context("direct database connection failed")?;
                Ok(DbConn::Direct(conn))
            }
        }
    }

    pub fn is_pooled(&self) -> bool {
        matches!(self, DbHandle::Pooled(_))
    }
}

/// A checked-out connection. Dropping it returns it to the pool, or closes it
/// when running in direct mode.
pub enum DbConn {
    Pooled(PgPooledConnection),
    Direct(PgConnection),
}

impl Deref for DbConn {
    type Target = PgConnection;

    fn deref(&self) -> &Self::Target {
        match self {
            DbConn::Pooled(conn) => conn,
            DbConn::Direct(conn) => conn,
        }
    }
}

impl DerefMut for DbConn {
    fn deref_mut(&mut self) -> &mut Self::Target {
        match self {
            DbConn::Pooled(conn) => conn,
            DbConn::Direct(conn) => conn,
        }
    }
}

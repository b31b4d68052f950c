use std::sync::Arc;

use crate::{
    config::AppConfig,
    db::{DbConn, DbHandle},
    error::{AppError, AppResult},
};

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DbHandle>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(db: DbHandle, config: AppConfig) -> Self {
        Self {
            db: Arc::new(db),
            config: Arc::new(config),
        }
    }

    pub fn db(&self) -> AppResult<DbConn> {
        self.db.conn().map_err(AppError::internal)
    }
}

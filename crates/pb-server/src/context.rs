//! Application context shared by all request handlers (via Axum state).

use pb_db::pool::{self, DbPool, PooledConnection};

/// Cheaply cloneable handle on the connection pool.
#[derive(Clone)]
pub struct AppContext {
    /// Database connection pool.
    pub db: DbPool,
}

impl AppContext {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    /// Borrow a pooled connection for the duration of one handler.
    pub fn conn(&self) -> pb_core::Result<PooledConnection> {
        pool::get_conn(&self.db)
    }
}

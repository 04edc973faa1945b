//! Shared test harness for integration tests.
//!
//! Provides [`TestHarness`] which creates an in-memory DB and a full
//! [`AppContext`]. The [`TestHarness::with_server`] constructor starts Axum
//! on a random port for HTTP-level testing.

#![allow(dead_code)]

use std::net::SocketAddr;

use chrono::NaiveDate;
use pb_core::{ClimbId, ClimbTime, ClimberId, PeakId};
use pb_db::pool::{init_memory_pool, DbPool};
use pb_db::queries::{climbers, climbs, peaks};
use pb_server::context::AppContext;
use pb_server::router::build_router;

/// Test harness wrapping an [`AppContext`] backed by an in-memory database.
pub struct TestHarness {
    pub ctx: AppContext,
    pub db: DbPool,
}

impl TestHarness {
    pub fn new() -> Self {
        let db = init_memory_pool().expect("failed to create in-memory pool");
        let ctx = AppContext::new(db.clone());
        Self { ctx, db }
    }

    /// Start an Axum server on a random port and return the harness together
    /// with the bound socket address.
    pub async fn with_server() -> (Self, SocketAddr) {
        let harness = Self::new();
        let app = build_router(harness.ctx.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind random port");
        let addr = listener.local_addr().expect("failed to get local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        (harness, addr)
    }

    pub fn conn(&self) -> pb_db::pool::PooledConnection {
        pb_db::pool::get_conn(&self.db).expect("failed to get db connection")
    }

    pub fn create_peak(&self, name: &str) -> PeakId {
        peaks::create_peak(&self.conn(), name, "white")
            .expect("create peak")
            .id
    }

    pub fn create_climber(&self, name: &str) -> ClimberId {
        climbers::create_climber(&self.conn(), name, "alpinist", "Enjoys ridges", 30)
            .expect("create climber")
            .id
    }

    pub fn create_climb(&self, climber: ClimberId, date: &str, time: Option<ClimbTime>) -> ClimbId {
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").expect("valid date");
        climbs::create_climb(&self.conn(), climber, date, time)
            .expect("create climb")
            .id
    }
}

//! Database access
//!
//! `MovieStore` is the seam between the handler and the database. The
//! production implementation opens a fresh session per call against the
//! configured RDS instance, binds the page window, and decodes whatever
//! columns the movies table happens to have.

pub mod queries;
pub mod rows;

use crate::config::RdsConfig;
use crate::connection;
use crate::error::ApiResult;
use crate::models::MovieRow;
use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

/// Read access to the movies table
#[async_trait]
pub trait MovieStore: Send + Sync {
    /// Fetch one page of movies. `limit` and `offset` arrive verbatim from
    /// the event; conversion to the bind type happens inside.
    async fn list_movies(&self, limit: &Value, offset: &Value) -> ApiResult<Vec<MovieRow>>;
}

/// Store backed by the configured PostgreSQL instance
pub struct PgMovieStore {
    rds: RdsConfig,
}

impl PgMovieStore {
    pub fn new(rds: RdsConfig) -> Self {
        Self { rds }
    }
}

#[async_trait]
impl MovieStore for PgMovieStore {
    async fn list_movies(&self, limit: &Value, offset: &Value) -> ApiResult<Vec<MovieRow>> {
        let limit = rows::page_bind("limit", limit)?;
        let offset = rows::page_bind("offset", offset)?;

        // One session per call; dropping it at the end of this scope
        // releases the connection on every path
        let db = connection::open(&self.rds).await?;
        debug!(limit, offset, "executing movie page query");

        let fetched = db
            .client()
            .query(queries::LIST_MOVIES, &[&limit, &offset])
            .await?;

        fetched.iter().map(rows::row_to_movie).collect()
    }
}

//! Movie listing handler
//!
//! The single operation of this service: resolve the page window, fetch the
//! page, serialize it, and wrap the outcome in the status/body envelope.
//! Every failure on the way collapses into a 500 envelope; failure kinds
//! stay visible in the logs only.

use crate::db::MovieStore;
use crate::error::ApiResult;
use crate::models::{Envelope, MoviesEvent, PageWindow};
use serde_json::Value;
use tracing::{debug, error, info};

/// First page served when the caller sends no pagination
pub const DEFAULT_LIMIT: i64 = 100;
pub const DEFAULT_OFFSET: i64 = 0;

/// Handle one movie listing event against the given store
pub async fn handle(store: &dyn MovieStore, event: &MoviesEvent) -> Envelope {
    info!("movie listing requested");

    match list_movies(store, event).await {
        Ok(body) => Envelope::ok(body),
        Err(err) => {
            error!(kind = err.kind(), "movie listing failed: {}", err);
            Envelope::fault(&err.to_string())
        }
    }
}

/// Core sequence: window, query, diagnostics, JSON body
async fn list_movies(store: &dyn MovieStore, event: &MoviesEvent) -> ApiResult<String> {
    let window = page_window(event);
    info!(limit = %window.limit, offset = %window.offset, "resolved page window");

    let movies = store.list_movies(&window.limit, &window.offset).await?;
    info!(count = movies.len(), "retrieved movies");

    match (movies.first(), movies.last()) {
        (Some(first), Some(last)) => debug!(?first, ?last, "page boundary rows"),
        _ => debug!("page is empty"),
    }

    Ok(serde_json::to_string(&movies)?)
}

/// Use the event's window verbatim when present, the defaults otherwise
fn page_window(event: &MoviesEvent) -> PageWindow {
    event.path_parameters.clone().unwrap_or_else(|| PageWindow {
        limit: Value::from(DEFAULT_LIMIT),
        offset: Value::from(DEFAULT_OFFSET),
    })
}

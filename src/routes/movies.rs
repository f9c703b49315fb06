//! Movie listing route handlers
//!
//! Thin adapters: each handler builds the event a gateway would deliver and
//! returns the envelope as the HTTP response. Path parameters stay strings,
//! exactly as a gateway hands them over.

use crate::handler;
use crate::models::{Envelope, MoviesEvent};
use crate::state::SharedState;
use axum::extract::{Path, State};
use serde_json::Value;

/// First page with the default window
pub async fn list_movies(State(state): State<SharedState>) -> Envelope {
    handler::handle(state.store.as_ref(), &MoviesEvent::default()).await
}

/// Page selected by path segments
pub async fn list_movies_page(
    State(state): State<SharedState>,
    Path((limit, offset)): Path<(String, String)>,
) -> Envelope {
    let event = MoviesEvent::with_page(Value::String(limit), Value::String(offset));
    handler::handle(state.store.as_ref(), &event).await
}

//! SQL query constants
//!
//! Contains all SQL used by the application.

/// One page of movies in storage order.
///
/// No ORDER BY: the window is only as stable as the engine's scan order for
/// a given LIMIT/OFFSET. Callers must not rely on row order across calls.
pub const LIST_MOVIES: &str = "SELECT * FROM movies LIMIT $1 OFFSET $2";

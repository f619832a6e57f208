//! ```text
//! GET    /                              list_entrepreneurs
//! POST   /                              create_entrepreneur
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::entrepreneurs;
use crate::state::AppState;

/// Entrepreneur routes, mounted at `/entrepreneurs`.
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(entrepreneurs::list_entrepreneurs).post(entrepreneurs::create_entrepreneur),
    )
}

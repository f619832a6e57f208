//! ```text
//! POST   /reset                         reset_all
//! ```

use axum::routing::post;
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Admin routes, mounted at `/admin`.
pub fn router() -> Router<AppState> {
    Router::new().route("/reset", post(admin::reset_all))
}

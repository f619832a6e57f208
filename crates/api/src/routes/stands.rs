//! ```text
//! GET    /                              list_stands
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::stands;
use crate::state::AppState;

/// Stand routes, mounted at `/stands`.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(stands::list_stands))
}

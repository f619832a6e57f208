//! Route definitions for assignments.
//!
//! ```text
//! GET    /?week=                        list_assignments
//! POST   /                              set_manual_assignment
//! PATCH  /{id}                          update_assignment
//! DELETE /{id}                          delete_assignment
//! ```

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::assignments;
use crate::state::AppState;

/// Assignment routes, mounted at `/assignments`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(assignments::list_assignments).post(assignments::set_manual_assignment),
        )
        .route(
            "/{id}",
            patch(assignments::update_assignment).delete(assignments::delete_assignment),
        )
}

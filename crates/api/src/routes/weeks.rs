//! Route definitions for week-scoped scheduling.
//!
//! ```text
//! POST   /{week}/generate                                       generate
//! POST   /{week}/preview                                        preview
//! DELETE /{week}/assignments                                    clear_week
//! DELETE /{week}/blocks/{block}/assignments                     clear_block
//! DELETE /{week}/blocks/{block}/stands/{stand_id}/shifts/{shift} remove_slot
//! ```

use axum::routing::{delete, post};
use axum::Router;

use crate::handlers::weeks;
use crate::state::AppState;

/// Week routes, mounted at `/weeks`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{week}/generate", post(weeks::generate))
        .route("/{week}/preview", post(weeks::preview))
        .route("/{week}/assignments", delete(weeks::clear_week))
        .route("/{week}/blocks/{block}/assignments", delete(weeks::clear_block))
        .route(
            "/{week}/blocks/{block}/stands/{stand_id}/shifts/{shift}",
            delete(weeks::remove_slot),
        )
}

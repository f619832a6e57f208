pub mod admin;
pub mod assignments;
pub mod entrepreneurs;
pub mod health;
pub mod stands;
pub mod weeks;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /stands                                          list stand grid
///
/// /entrepreneurs                                   list, register
///
/// /assignments                                     list (?week=), manual set
/// /assignments/{id}                                update, delete
///
/// /weeks/{week}/generate                           generate + commit (POST)
/// /weeks/{week}/preview                            dry-run generation (POST)
/// /weeks/{week}/assignments                        clear week (DELETE)
/// /weeks/{week}/blocks/{block}/assignments         clear block (DELETE)
/// /weeks/{week}/blocks/{block}/stands/{stand_id}/shifts/{shift}
///                                                  remove one slot (DELETE)
///
/// /admin/reset                                     delete everything (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/stands", stands::router())
        .nest("/entrepreneurs", entrepreneurs::router())
        .nest("/assignments", assignments::router())
        .nest("/weeks", weeks::router())
        .nest("/admin", admin::router())
}

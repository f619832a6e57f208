use standboard_core::store::AssignmentStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: the store holds its repository behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Caller-facing scheduling and override operations.
    pub store: AssignmentStore,
}

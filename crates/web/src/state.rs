use std::sync::Arc;

use workout_storage::GymStore;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn GymStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn GymStore>) -> Self {
        Self { store }
    }
}

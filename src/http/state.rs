//! Application state for the HTTP server.

use std::sync::Arc;

use crate::db::repository::FullRepository;
use crate::scheduler::TimetableService;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Mutation orchestrator; the only path for timetable writes
    pub service: Arc<TimetableService>,
    /// Repository instance for directory and health operations
    pub repository: Arc<dyn FullRepository>,
}

impl AppState {
    /// Create a new application state around the given repository.
    pub fn new(repository: Arc<dyn FullRepository>) -> Self {
        let service = Arc::new(TimetableService::new(repository.clone()));
        Self {
            service,
            repository,
        }
    }
}

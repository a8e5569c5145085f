use std::sync::Arc;

use crate::db::{AccountDirectory, HistoryStore, MemoryLibrary, PgLibrary, TrackCatalog};
use crate::services::ListeningAnalytics;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub analytics: Arc<ListeningAnalytics>,
}

impl AppState {
    /// State over arbitrary collaborator implementations
    pub fn new(
        accounts: Arc<dyn AccountDirectory>,
        history: Arc<dyn HistoryStore>,
        catalog: Arc<dyn TrackCatalog>,
    ) -> Self {
        Self {
            analytics: Arc::new(ListeningAnalytics::new(accounts, history, catalog)),
        }
    }

    /// State backed by PostgreSQL
    pub fn postgres(library: PgLibrary) -> Self {
        let library = Arc::new(library);
        Self::new(library.clone(), library.clone(), library)
    }

    /// State backed by an in-process library
    pub fn in_memory(library: MemoryLibrary) -> Self {
        let library = Arc::new(library);
        Self::new(library.clone(), library.clone(), library)
    }
}

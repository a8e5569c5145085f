pub mod memory;
pub mod postgres;
pub mod store;

pub use memory::{MemoryLibrary, NewTrack};
pub use postgres::{create_pool, run_migrations, PgLibrary};
pub use store::{AccountDirectory, HistoryStore, TrackCatalog};

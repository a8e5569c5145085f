pub mod extract;
pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::{create_router, create_router_with_cors};
pub use state::AppState;

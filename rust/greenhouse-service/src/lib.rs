pub mod config;
pub mod errors;
pub mod routes;
pub mod state;

pub use routes::build_router;
pub use state::AppState;

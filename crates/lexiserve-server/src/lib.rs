//! Lexiserve server library
//!
//! Configuration, shared state, and HTTP routes for the Lexiserve
//! inference service. The binary in `main.rs` wires these together;
//! integration tests drive [`routes::create_router`] directly.

pub mod cli;
pub mod config;
pub mod routes;
pub mod state;

pub use cli::Cli;
pub use config::ServerConfig;
pub use routes::create_router;
pub use state::AppState;

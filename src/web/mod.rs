//! Web layer for the breeding engine.
//!
//! Thin glue around the genetics core, using Axum:
//! - **POST /breed**: breed a submitted pool of fish into offspring
//! - **GET / and /simulation**: default simulation parameters as JSON
//! - **/static**: static asset serving
//!
//! The engine itself performs no logging or I/O; this boundary catches its
//! errors, logs diagnostics, and maps them to status codes.

mod routes;
mod server;
mod state;

pub use server::run_server;
pub use state::AppState;

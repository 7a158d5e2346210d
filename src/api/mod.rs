//! HTTP API over the expense store
//!
//! Exposes list, create and delete at `/api/expenses` as JSON.

pub mod routes;
pub mod server;

pub use routes::{route, ApiResponse, EXPENSES_PATH};
pub use server::{run, serve, ApiState};

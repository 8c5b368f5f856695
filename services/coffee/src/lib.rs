//! Coffee catalog service
//!
//! CRUD over coffee items stored in a key-value store. Payloads are checked
//! by [`validation`], partial updates are compiled into ordered assignments
//! by [`update`], and [`repositories`] hold the storage adapters.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod service;
pub mod state;
pub mod update;
pub mod validation;

pub use routes::create_router;
pub use service::CoffeeService;
pub use state::AppState;

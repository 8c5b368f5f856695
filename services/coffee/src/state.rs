//! Application state shared across handlers

use crate::service::CoffeeService;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub coffee_service: CoffeeService,
}

//! Shared application state for all routes.

use crate::store::PizzaStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PizzaStore>,
}

impl AppState {
    pub fn new(store: impl PizzaStore + 'static) -> Self {
        AppState {
            store: Arc::new(store),
        }
    }
}

//! Shared application state for all routes.

use crate::store::GateStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn GateStore>,
}

impl AppState {
    pub fn new(store: impl GateStore + 'static) -> Self {
        AppState {
            store: Arc::new(store),
        }
    }
}

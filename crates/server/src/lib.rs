//! HTTP surface for the Jarvis command engine

use std::sync::Arc;

use jarvis::{Dispatcher, KeyValueStore};

pub mod error;
pub mod middleware;
pub mod routes;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
    pub store: Arc<dyn KeyValueStore>,
}

impl AppState {
    pub fn new(dispatcher: Dispatcher, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
            store,
        }
    }
}

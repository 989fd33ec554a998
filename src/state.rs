use std::sync::Arc;

use crate::store::{ItemStore, OrderStore};
use crate::upload::UploadGateway;

/// Shared handler context, built once at startup and handed to every
/// worker. Holding trait objects here is what lets tests run the full
/// route table against in-memory fakes.
pub struct AppState {
    pub items: Arc<dyn ItemStore>,
    pub orders: Arc<dyn OrderStore>,
    pub uploads: Arc<dyn UploadGateway>,
}

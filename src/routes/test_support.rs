use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::models::{CatalogItem, Order};
use crate::state::AppState;
use crate::store::{ItemStore, OrderStore, StoreError};
use crate::upload::{UploadError, UploadGateway};

// ============================================================================
// In-memory fakes, injected through AppState's trait objects
// ============================================================================

#[derive(Default)]
pub struct FakeItemStore {
    pub items: Mutex<Vec<CatalogItem>>,
}

impl FakeItemStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn seeded(items: Vec<CatalogItem>) -> Arc<Self> {
        Arc::new(Self {
            items: Mutex::new(items),
        })
    }

    /// Build a saved item the way the store would hand it back.
    pub fn saved_item(name: &str, price: f64) -> CatalogItem {
        CatalogItem {
            id: Some(ObjectId::new()),
            category: "Drinks".to_string(),
            item: name.to_string(),
            price,
            picture: "https://cdn.example/items/pic.jpg".to_string(),
            sold_out: false,
        }
    }
}

#[async_trait]
impl ItemStore for FakeItemStore {
    async fn create(&self, mut item: CatalogItem) -> Result<CatalogItem, StoreError> {
        item.id = Some(ObjectId::new());
        self.items.lock().unwrap().push(item.clone());
        Ok(item)
    }

    async fn list_all(&self) -> Result<Vec<CatalogItem>, StoreError> {
        Ok(self.items.lock().unwrap().clone())
    }

    async fn find_by_key(&self, key: &str) -> Result<CatalogItem, StoreError> {
        let id = ObjectId::parse_str(key).map_err(|_| StoreError::InvalidKey(key.to_string()))?;
        self.items
            .lock()
            .unwrap()
            .iter()
            .find(|i| i.id == Some(id))
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn update(&self, item: &CatalogItem) -> Result<(), StoreError> {
        let mut items = self.items.lock().unwrap();
        match items.iter_mut().find(|i| i.id == item.id) {
            Some(slot) => {
                *slot = item.clone();
                Ok(())
            }
            None => Err(StoreError::NotFound),
        }
    }

    async fn delete_by_key(&self, key: &str) -> Result<(), StoreError> {
        let id = ObjectId::parse_str(key).map_err(|_| StoreError::InvalidKey(key.to_string()))?;
        let mut items = self.items.lock().unwrap();
        let before = items.len();
        items.retain(|i| i.id != Some(id));
        if items.len() == before {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeOrderStore {
    pub orders: Mutex<Vec<Order>>,
}

impl FakeOrderStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

#[async_trait]
impl OrderStore for FakeOrderStore {
    async fn create(&self, mut order: Order) -> Result<Order, StoreError> {
        order.id = Some(ObjectId::new());
        self.orders.lock().unwrap().push(order.clone());
        Ok(order)
    }

    async fn list_all(&self) -> Result<Vec<Order>, StoreError> {
        Ok(self.orders.lock().unwrap().clone())
    }
}

/// Records every call; optionally fails instead of returning a URL.
pub struct FakeUploadGateway {
    pub calls: AtomicUsize,
    pub last_path: Mutex<Option<PathBuf>>,
    fail: bool,
}

impl FakeUploadGateway {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            last_path: Mutex::new(None),
            fail: false,
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            last_path: Mutex::new(None),
            fail: true,
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UploadGateway for FakeUploadGateway {
    async fn upload(&self, path: &Path) -> Result<String, UploadError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_path.lock().unwrap() = Some(path.to_path_buf());

        if self.fail {
            return Err(UploadError::Rejected {
                status: 401,
                body: "invalid signature".to_string(),
            });
        }
        Ok("https://cdn.example/items/uploaded.jpg".to_string())
    }
}

pub fn state(
    items: Arc<FakeItemStore>,
    orders: Arc<FakeOrderStore>,
    uploads: Arc<FakeUploadGateway>,
) -> AppState {
    AppState {
        items,
        orders,
        uploads,
    }
}

// ============================================================================
// Multipart request bodies for /add-item tests
// ============================================================================

pub const BOUNDARY: &str = "test-boundary-7MA4YWxkTrZu0gW";

pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={BOUNDARY}")
}

/// Hand-built multipart body: text fields plus an optional file part.
pub fn multipart_body(fields: &[(&str, &str)], file: Option<(&str, &str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();

    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }

    if let Some((name, filename, bytes)) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; \
                 filename=\"{filename}\"\r\nContent-Type: image/jpeg\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// Full app with the production route table over fake collaborators.
macro_rules! test_app {
    ($state:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($state))
                .app_data(crate::routes::json_config())
                .app_data(crate::routes::multipart_config())
                .configure(crate::routes::configure)
                .default_service(actix_web::web::route().to(crate::routes::not_found)),
        )
        .await
    };
}

pub(crate) use test_app;

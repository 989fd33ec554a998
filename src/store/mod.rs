// ============================================================================
// Persistence Layer - Document store access behind trait seams
// ============================================================================
//
// Handlers only see the `ItemStore` / `OrderStore` traits; the MongoDB
// implementations live in the private `mongo` module. Tests swap in
// in-memory fakes through the same traits.
//
// Each operation is atomic at single-record granularity only; nothing here
// spans both collections.
//
// ============================================================================

mod mongo;

pub use mongo::{MongoItemStore, MongoOrderStore};

use async_trait::async_trait;

use crate::models::{CatalogItem, Order};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,

    #[error("invalid record key: {0}")]
    InvalidKey(String),

    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),
}

/// Catalog item collection operations. Keys are opaque id strings assigned
/// by the store on creation.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Insert a new item and return it with its assigned key.
    async fn create(&self, item: CatalogItem) -> Result<CatalogItem, StoreError>;

    async fn list_all(&self) -> Result<Vec<CatalogItem>, StoreError>;

    /// Fails with `StoreError::NotFound` when no item has the given key.
    async fn find_by_key(&self, key: &str) -> Result<CatalogItem, StoreError>;

    /// Replace the stored record for `item.id` with `item`.
    async fn update(&self, item: &CatalogItem) -> Result<(), StoreError>;

    /// Fails with `StoreError::NotFound` when no item has the given key.
    async fn delete_by_key(&self, key: &str) -> Result<(), StoreError>;
}

/// Order collection operations. Orders are immutable once created, so there
/// is no update or delete.
#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn create(&self, order: Order) -> Result<Order, StoreError>;

    async fn list_all(&self) -> Result<Vec<Order>, StoreError>;
}

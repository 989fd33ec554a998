use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::doc;
use mongodb::bson::oid::ObjectId;
use mongodb::{Collection, Database};

use super::{ItemStore, OrderStore, StoreError};
use crate::models::{CatalogItem, Order};

// ============================================================================
// MongoDB-backed stores
// ============================================================================

const ITEMS_COLLECTION: &str = "items";
const ORDERS_COLLECTION: &str = "orders";

fn parse_key(key: &str) -> Result<ObjectId, StoreError> {
    ObjectId::parse_str(key).map_err(|_| StoreError::InvalidKey(key.to_string()))
}

pub struct MongoItemStore {
    collection: Collection<CatalogItem>,
}

impl MongoItemStore {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(ITEMS_COLLECTION),
        }
    }
}

#[async_trait]
impl ItemStore for MongoItemStore {
    async fn create(&self, mut item: CatalogItem) -> Result<CatalogItem, StoreError> {
        let result = self.collection.insert_one(&item).await?;
        item.id = result.inserted_id.as_object_id();

        tracing::debug!(item = %item.item, "Catalog item stored");
        Ok(item)
    }

    async fn list_all(&self) -> Result<Vec<CatalogItem>, StoreError> {
        let cursor = self.collection.find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_by_key(&self, key: &str) -> Result<CatalogItem, StoreError> {
        let id = parse_key(key)?;

        self.collection
            .find_one(doc! { "_id": id })
            .await?
            .ok_or(StoreError::NotFound)
    }

    async fn update(&self, item: &CatalogItem) -> Result<(), StoreError> {
        let id = item
            .id
            .ok_or_else(|| StoreError::InvalidKey("record has no key".to_string()))?;

        let result = self
            .collection
            .replace_one(doc! { "_id": id }, item)
            .await?;

        if result.matched_count == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn delete_by_key(&self, key: &str) -> Result<(), StoreError> {
        let id = parse_key(key)?;
        let result = self.collection.delete_one(doc! { "_id": id }).await?;

        if result.deleted_count == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

pub struct MongoOrderStore {
    collection: Collection<Order>,
}

impl MongoOrderStore {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(ORDERS_COLLECTION),
        }
    }
}

#[async_trait]
impl OrderStore for MongoOrderStore {
    async fn create(&self, mut order: Order) -> Result<Order, StoreError> {
        let result = self.collection.insert_one(&order).await?;
        order.id = result.inserted_id.as_object_id();

        tracing::debug!(total = order.total, "Order stored");
        Ok(order)
    }

    async fn list_all(&self) -> Result<Vec<Order>, StoreError> {
        let cursor = self.collection.find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

use actix_multipart::form::tempfile::TempFile;
use actix_multipart::form::text::Text;
use actix_multipart::form::MultipartForm;
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use super::Envelope;
use crate::error::ApiError;
use crate::models::CatalogItem;
use crate::state::AppState;
use crate::store::StoreError;

// ============================================================================
// Catalog item handlers: add, list, remove, toggle sold-out
// ============================================================================

/// Multipart form for `POST /add-item`. A missing part fails extraction
/// before the handler runs.
#[derive(Debug, MultipartForm)]
pub struct AddItemForm {
    pub category: Text<String>,
    pub item: Text<String>,
    /// Price arrives as a form string, e.g. "2.50".
    pub price: Text<String>,
    pub picture: TempFile,
}

/// `POST /remove-item` and `POST /toggle-sold-out` both address an item by
/// its opaque store-assigned id.
#[derive(Deserialize, Debug)]
pub struct ItemKeyRequest {
    pub id: String,
}

#[derive(Serialize, Debug)]
pub struct ItemsResponse {
    pub items: Vec<ItemDto>,
}

/// API shape of a catalog item: the id travels as its hex string.
#[derive(Serialize, Debug)]
pub struct ItemDto {
    pub id: String,
    pub category: String,
    pub item: String,
    pub price: f64,
    pub picture: String,
    #[serde(rename = "soldOut")]
    pub sold_out: bool,
}

impl From<CatalogItem> for ItemDto {
    fn from(item: CatalogItem) -> Self {
        Self {
            id: item.id.map(|id| id.to_hex()).unwrap_or_default(),
            category: item.category,
            item: item.item,
            price: item.price,
            picture: item.picture,
            sold_out: item.sold_out,
        }
    }
}

pub async fn add_item(
    state: web::Data<AppState>,
    MultipartForm(form): MultipartForm<AddItemForm>,
) -> Result<HttpResponse, ApiError> {
    if form.category.is_empty() || form.item.is_empty() || form.price.is_empty() {
        return Err(ApiError::Validation("All fields are required".to_string()));
    }

    let price: f64 = form
        .price
        .parse()
        .map_err(|_| ApiError::Validation("price must be a number".to_string()))?;
    if !price.is_finite() || price < 0.0 {
        return Err(ApiError::Validation("price must be non-negative".to_string()));
    }

    // The temp file is unlinked when `form` drops, whether or not the
    // upload succeeded.
    let picture = state.uploads.upload(form.picture.file.path()).await?;

    let item = CatalogItem {
        id: None,
        category: form.category.into_inner(),
        item: form.item.into_inner(),
        price,
        picture,
        sold_out: false,
    };
    state.items.create(item).await?;

    Ok(HttpResponse::Ok().json(Envelope::ok()))
}

pub async fn list_items(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let items = state.items.list_all().await?;

    Ok(HttpResponse::Ok().json(ItemsResponse {
        items: items.into_iter().map(ItemDto::from).collect(),
    }))
}

pub async fn remove_item(
    state: web::Data<AppState>,
    web::Json(req): web::Json<ItemKeyRequest>,
) -> Result<HttpResponse, ApiError> {
    state.items.delete_by_key(&req.id).await.map_err(|err| match err {
        // Removing a missing item surfaces as a store failure, not a 404.
        StoreError::NotFound => ApiError::Store(StoreError::NotFound),
        other => ApiError::from(other),
    })?;

    Ok(HttpResponse::Ok().json(Envelope::ok()))
}

pub async fn toggle_sold_out(
    state: web::Data<AppState>,
    web::Json(req): web::Json<ItemKeyRequest>,
) -> Result<HttpResponse, ApiError> {
    let mut item = state.items.find_by_key(&req.id).await?;

    item.sold_out = !item.sold_out;
    state.items.update(&item).await?;

    Ok(HttpResponse::Ok().json(Envelope::ok()))
}

// ============================================================================
// Unit Tests
// ============================================================================

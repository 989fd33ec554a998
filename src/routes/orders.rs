use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Envelope;
use crate::error::ApiError;
use crate::models::{CartLine, Order};
use crate::state::AppState;

// ============================================================================
// Order handlers: checkout and listing
// ============================================================================

/// `POST /checkout` body. A missing `cart` or a non-sequence value fails
/// deserialization before the handler runs.
#[derive(Deserialize, Debug)]
pub struct CheckoutRequest {
    pub cart: Vec<CartLine>,
}

#[derive(Serialize, Debug)]
pub struct OrdersResponse {
    pub orders: Vec<OrderDto>,
}

#[derive(Serialize, Debug)]
pub struct OrderDto {
    pub id: String,
    pub items: Vec<CartLine>,
    pub total: f64,
    pub date: DateTime<Utc>,
}

impl From<Order> for OrderDto {
    fn from(order: Order) -> Self {
        Self {
            id: order.id.map(|id| id.to_hex()).unwrap_or_default(),
            items: order.items,
            total: order.total,
            date: order.date,
        }
    }
}

pub async fn checkout(
    state: web::Data<AppState>,
    web::Json(req): web::Json<CheckoutRequest>,
) -> Result<HttpResponse, ApiError> {
    if req.cart.is_empty() {
        return Err(ApiError::Validation("Cart is empty or invalid".to_string()));
    }

    // Line prices are taken at face value from the client; there is no
    // re-pricing against the catalog.
    let total = req.cart.iter().map(|line| line.price).sum();

    let order = Order {
        id: None,
        items: req.cart,
        total,
        date: Utc::now(),
    };
    state.orders.create(order).await?;

    Ok(HttpResponse::Ok().json(Envelope::message("Order placed successfully")))
}

pub async fn list_orders(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let orders = state.orders.list_all().await?;

    Ok(HttpResponse::Ok().json(OrdersResponse {
        orders: orders.into_iter().map(OrderDto::from).collect(),
    }))
}

// ============================================================================
// Unit Tests
// ============================================================================

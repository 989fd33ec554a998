// ============================================================================
// Request Handlers - the six operations plus the catch-all 404
// ============================================================================
//
// Each handler is a stateless single pass: validate the request shape,
// call the upload gateway / stores, wrap the result in the envelope. No
// retries, no cross-request state.
//
// ============================================================================

pub mod items;
pub mod orders;

#[cfg(test)]
pub(crate) mod test_support;

use actix_multipart::form::MultipartFormConfig;
use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::error::ApiError;

/// Uniform response envelope. Every route answers with this shape (list
/// routes answer with their own `{items}` / `{orders}` bodies instead).
#[derive(Serialize, Debug)]
pub struct Envelope {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Envelope {
    pub fn ok() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    pub fn message(text: &str) -> Self {
        Self {
            success: true,
            message: Some(text.to_string()),
        }
    }

    pub fn failure(text: &str) -> Self {
        Self {
            success: false,
            message: Some(text.to_string()),
        }
    }
}

/// Register the six operation routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/add-item", web::post().to(items::add_item))
        .route("/items", web::get().to(items::list_items))
        .route("/remove-item", web::post().to(items::remove_item))
        .route("/toggle-sold-out", web::post().to(items::toggle_sold_out))
        .route("/checkout", web::post().to(orders::checkout))
        .route("/orders", web::get().to(orders::list_orders));
}

/// Any unmatched path or method.
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(Envelope::failure("Not Found"))
}

/// Malformed JSON bodies are rejected at the boundary with the envelope
/// rather than actix's default error page.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| ApiError::Validation(err.to_string()).into())
}

/// Same policy for multipart extraction on `/add-item`.
pub fn multipart_config() -> MultipartFormConfig {
    MultipartFormConfig::default()
        .error_handler(|err, _req| ApiError::Validation(err.to_string()).into())
}

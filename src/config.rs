use std::env;

use anyhow::{bail, Result};
use tracing::warn;

// ============================================================================
// Environment Configuration
// ============================================================================

pub struct Config {
    pub port: u16,
    pub mongo_uri: String,
    pub cloudinary: CloudinaryConfig,
}

/// Credentials for the Cloudinary upload gateway.
#[derive(Debug, Clone)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
}

impl Config {
    /// Read configuration from the environment. The store connection string
    /// is required; everything else falls back to a default.
    pub fn load() -> Result<Self> {
        let Ok(mongo_uri) = env::var("MONGO_URI") else {
            bail!("MONGO_URI is not set");
        };

        Ok(Self {
            port: load_or("PORT", 3000),
            mongo_uri,
            cloudinary: CloudinaryConfig {
                cloud_name: load_or_empty("CLOUDINARY_CLOUD_NAME"),
                api_key: load_or_empty("CLOUDINARY_API_KEY"),
                api_secret: load_or_empty("CLOUDINARY_API_SECRET"),
            },
        })
    }
}

fn load_or(key: &str, default: u16) -> u16 {
    match env::var(key) {
        Ok(value) => value.parse().unwrap_or_else(|e| {
            warn!("Invalid {key} value ({e}), using default {default}");
            default
        }),
        Err(_) => default,
    }
}

fn load_or_empty(key: &str) -> String {
    env::var(key).unwrap_or_else(|_| {
        warn!("Environment variable {key} not found, uploads will fail until it is set");
        String::new()
    })
}

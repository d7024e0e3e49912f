use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub imagekit_private_key: String,
    pub imagekit_public_key: String,
    pub imagekit_url_endpoint: String,
    pub resend_api_key: String,
    pub email_from_address: String,
    pub marketplace_email: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .context("DATABASE_URL must be set")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            imagekit_private_key: env::var("IMAGEKIT_PRIVATE_KEY")
                .context("IMAGEKIT_PRIVATE_KEY must be set")?,
            imagekit_public_key: env::var("IMAGEKIT_PUBLIC_KEY")
                .context("IMAGEKIT_PUBLIC_KEY must be set")?,
            imagekit_url_endpoint: env::var("IMAGEKIT_URL_ENDPOINT")
                .context("IMAGEKIT_URL_ENDPOINT must be set")?,
            resend_api_key: env::var("RESEND_API_KEY")
                .context("RESEND_API_KEY must be set")?,
            email_from_address: env::var("EMAIL_FROM_ADDRESS")
                .unwrap_or_else(|_| "crm@localhost".to_string()),
            marketplace_email: env::var("MARKETPLACE_EMAIL")
                .unwrap_or_else(|_| "listings@marketplace.example".to_string()),
        })
    }
}

use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    // Content API
    pub api_url: String,

    // Public site
    pub public_url: String,
    pub port: u16,

    // Language negotiation
    pub language_cookie: String,

    // Rendering
    pub navigation_depth: u32,
    pub listing_page_size: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            // Content API - base URL every gateway call is built from
            api_url: std::env::var("API_URL")
                .context("API_URL not set")?
                .trim_end_matches('/')
                .to_string(),

            // Public site
            public_url: std::env::var("PUBLIC_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string())
                .trim_end_matches('/')
                .to_string(),
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),

            // Language negotiation
            language_cookie: std::env::var("LANGUAGE_COOKIE")
                .unwrap_or_else(|_| "I18N_LANGUAGE".to_string()),

            // Rendering
            navigation_depth: std::env::var("NAVIGATION_DEPTH")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(2),
            listing_page_size: std::env::var("LISTING_PAGE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|size: &u32| *size > 0)
                .unwrap_or(10),
        })
    }

    /// Whether the site is served over HTTPS (cookies get the `Secure` flag)
    pub fn is_https(&self) -> bool {
        self.public_url.starts_with("https://")
    }
}

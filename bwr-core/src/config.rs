//! Service endpoints and keys.
//!
//! The CLI reads them from the process environment; the web apps have no
//! environment at runtime and bake them in at compile time.

use log::info;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_TILE_BASE_URL: &str = "http://localhost:8001";
pub const DEFAULT_TILE_DATASET: &str = "dam1";
pub const DEFAULT_PAGE_LIMIT: u32 = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL of the data API (`/dams`, `/complaints`, `/path`)
    pub api_base_url: String,
    /// Base URL of the tile server (`/tiles/...`)
    pub tile_base_url: String,
    /// Tile dataset name used in tile and GeoJSON paths
    pub tile_dataset: String,
    /// Key for the places autocomplete script
    pub maps_api_key: Option<String>,
    /// Page size for `GET /dams`
    pub page_limit: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            tile_base_url: DEFAULT_TILE_BASE_URL.to_string(),
            tile_dataset: DEFAULT_TILE_DATASET.to_string(),
            maps_api_key: None,
            page_limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

fn trim_base(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

impl ApiConfig {
    /// Build a config from optional overrides, falling back to defaults.
    pub fn from_parts(
        api_base_url: Option<&str>,
        tile_base_url: Option<&str>,
        tile_dataset: Option<&str>,
        maps_api_key: Option<&str>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            api_base_url: api_base_url
                .filter(|s| !s.trim().is_empty())
                .map(trim_base)
                .unwrap_or(defaults.api_base_url),
            tile_base_url: tile_base_url
                .filter(|s| !s.trim().is_empty())
                .map(trim_base)
                .unwrap_or(defaults.tile_base_url),
            tile_dataset: tile_dataset
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .unwrap_or(defaults.tile_dataset),
            maps_api_key: maps_api_key
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            page_limit: defaults.page_limit,
        }
    }

    /// Read `API_BASE_URL`, `TILE_BASE_URL`, `TILE_DATASET` and `MAPS_API_KEY`
    /// from the process environment.
    pub fn from_env() -> Self {
        let var = |key: &str| std::env::var(key).ok();
        let config = Self::from_parts(
            var("API_BASE_URL").as_deref(),
            var("TILE_BASE_URL").as_deref(),
            var("TILE_DATASET").as_deref(),
            var("MAPS_API_KEY").as_deref(),
        );
        info!("Using data API at {}", config.api_base_url);
        config
    }

    /// Same keys as [`ApiConfig::from_env`], captured when the crate is compiled.
    pub fn from_build_env() -> Self {
        Self::from_parts(
            option_env!("API_BASE_URL"),
            option_env!("TILE_BASE_URL"),
            option_env!("TILE_DATASET"),
            option_env!("MAPS_API_KEY"),
        )
    }

    pub fn with_api_base_url(mut self, url: &str) -> Self {
        self.api_base_url = trim_base(url);
        self
    }

    /// Absolute URL for a data API path such as `/dams`.
    pub fn api_url(&self, path: &str) -> String {
        format!("{}/{}", self.api_base_url, path.trim_start_matches('/'))
    }
}

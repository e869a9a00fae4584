use std::env;

/// Proj string for geographic WGS84 (EPSG:4326), the CRS web maps expect.
pub const WGS84_PROJ: &str = "+proj=longlat +datum=WGS84 +no_defs";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Input files
    pub boundary_path: String,
    pub loans_path: String,

    /// Proj string describing the CRS the boundary file is stored in.
    pub boundary_crs: String,

    // Web server
    pub web_host: String,
    pub web_port: u16,

    // Dashboard credentials (single static pair)
    pub dashboard_username: String,
    pub dashboard_password: String,

    /// Year selected on first render.
    pub default_year: i32,
}

impl Config {
    /// Load configuration from environment variables.
    /// Panics with a clear message if required vars are missing.
    pub fn from_env() -> Self {
        Self {
            boundary_path: env::var("BOUNDARY_PATH")
                .unwrap_or_else(|_| "data/districts.geojson".to_string()),
            loans_path: env::var("LOANS_PATH")
                .unwrap_or_else(|_| "data/loans_amount.csv".to_string()),
            boundary_crs: env::var("BOUNDARY_CRS").unwrap_or_else(|_| WGS84_PROJ.to_string()),
            web_host: env::var("WEB_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            web_port: env::var("WEB_PORT")
                .unwrap_or_else(|_| "8050".to_string())
                .parse()
                .expect("WEB_PORT must be a number"),
            dashboard_username: env::var("DASHBOARD_USERNAME")
                .unwrap_or_else(|_| "admin".to_string()),
            dashboard_password: required_env("DASHBOARD_PASSWORD"),
            default_year: env::var("DEFAULT_YEAR")
                .unwrap_or_else(|_| "2019".to_string())
                .parse()
                .expect("DEFAULT_YEAR must be a number"),
        }
    }
}

fn required_env(key: &str) -> String {
    env::var(key).unwrap_or_else(|_| panic!("{key} environment variable is required"))
}

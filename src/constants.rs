//! Application constants and configuration

pub const API_BASE_URL: &str = "https://api.artic.edu/api/v1";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Rows-per-page choices offered by the paginator dropdown
pub const PAGE_SIZE_OPTIONS: [u32; 3] = [12, 25, 50];
pub const DEFAULT_PAGE_SIZE: u32 = 12;

/// Artist display strings longer than this are truncated with an ellipsis
pub const ARTIST_DISPLAY_MAX: usize = 40;

/// Per-request HTTP timeout in seconds
pub const FETCH_TIMEOUT_SECS: u64 = 15;

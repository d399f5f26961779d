//! Application-wide constants
//!
//! This module contains all magic numbers and string literals used throughout
//! the application, providing a single source of truth for constant values.

/// Remote catalog API constants
pub mod api {
    /// Default base URL of the catalog API (no trailing slash)
    pub const DEFAULT_BASE_URL: &str = "https://api.artic.edu/api/v1";

    /// Listing endpoint, relative to the base URL
    pub const ARTWORKS_PATH: &str = "artworks";

    /// Search endpoint, relative to the base URL
    pub const SEARCH_PATH: &str = "artworks/search";

    /// Field projection requested for every artwork
    pub const FIELDS: [&str; 5] = ["id", "title", "artist_display", "date_display", "image_id"];

    /// Fixed page size for listing and search
    pub const PAGE_SIZE: u32 = 20;

    /// Connect timeout for catalog requests
    pub const CONNECT_TIMEOUT_SECS: u64 = 15;

    /// User agent sent with catalog requests
    pub const USER_AGENT: &str = concat!("virtual-art-gallery/", env!("CARGO_PKG_VERSION"));
}

/// IIIF image-serving constants
pub mod images {
    /// Default base URL of the image server (no trailing slash)
    pub const DEFAULT_BASE_URL: &str = "https://www.artic.edu/iiif/2";

    /// Default requested image width in pixels
    pub const DEFAULT_WIDTH: u32 = 843;
}

/// User-facing text
pub mod text {
    /// Generic alert shown for any catalog failure
    pub const LOAD_FAILED: &str = "Failed to load artworks";

    /// Artist fallback in list entries and share text
    pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

    /// Date fallback in list entries
    pub const DATE_UNKNOWN: &str = "Date Unknown";

    /// Artist/date fallback in the detail overlay
    pub const UNKNOWN: &str = "Unknown";
}

/// On-device storage constants
pub mod storage {
    /// Key holding the serialized favorites mapping
    pub const FAVORITES_KEY: &str = "@favorites";

    /// Extension of per-key files written by the file store
    pub const FILE_EXTENSION: &str = "json";
}

/// Config and data file locations
pub mod config {
    /// Directory name under the platform config/data dirs
    pub const APP_DIR: &str = "virtual-art-gallery";

    /// Settings file name
    pub const FILENAME: &str = "settings.toml";
}

/// Validation bounds for settings
pub mod validation {
    pub const MIN_TIMEOUT_SECS: u64 = 1;
    pub const MAX_TIMEOUT_SECS: u64 = 300;

    pub const MIN_IMAGE_WIDTH: u32 = 64;
    pub const MAX_IMAGE_WIDTH: u32 = 3000;

    pub const MIN_WINDOW_DIMENSION: u16 = 320;
    pub const MAX_WINDOW_DIMENSION: u16 = 4096;
}

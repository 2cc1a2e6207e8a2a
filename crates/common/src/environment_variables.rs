//! The list of environment variables used throughout the application.

// Instance registry, e.g. RADARR_001_URL and RADARR_001_API_KEY.
pub const INSTANCE_URL_SUFFIX: &str = "URL";
pub const INSTANCE_API_KEY_SUFFIX: &str = "API_KEY";

// Local storage environment variables
pub const CUSTOM_FORMATS_DIR: &str = "CFSYNC_CUSTOM_FORMATS_DIR";
pub const VERSION_FILE: &str = "CFSYNC_VERSION_FILE";

// HTTP client environment variables
pub const HTTP_TIMEOUT_SECS: &str = "CFSYNC_HTTP_TIMEOUT_SECS";

// Miscellaneous
pub const LOG_FILTER: &str = "CFSYNC_LOG_FILTER";
pub const LOG_DIR: &str = "CFSYNC_LOG_DIR";

/// Maximum email length accepted at registration (matches the account column width)
pub const MAX_EMAIL_LEN: usize = 150;

/// Maximum password length accepted at registration
pub const MAX_PASSWORD_LEN: usize = 150;

/// Name of the cookie carrying the signed session token
pub const SESSION_COOKIE: &str = "session";

/// Name of the cookie carrying a one-shot flash message
pub const FLASH_COOKIE: &str = "flash";

// =============================================================================
// Flash Messages
// =============================================================================

pub const MSG_INVALID_CREDENTIALS: &str = "Invalid credentials";

pub const MSG_EMAIL_EXISTS: &str = "Email already exists";

pub const MSG_ACCOUNT_CREATED: &str = "Account created! Please log in.";

pub const MSG_LOGIN_REQUIRED: &str = "Please log in to access this page.";

pub const MSG_MISSING_FIELDS: &str = "Email and password are required.";

pub const MSG_FIELD_TOO_LONG: &str = "Email and password must be at most 150 characters.";

// =============================================================================
// YouTube Data API
// =============================================================================

/// Default base URL of the YouTube Data API v3
pub const YOUTUBE_API_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Page size for search requests and batch size for video lookups (API maximum)
pub const YOUTUBE_MAX_RESULTS: usize = 50;

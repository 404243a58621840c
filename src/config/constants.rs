//! Application-wide constants
//!
//! Centralized location for magic values to improve maintainability.

// =============================================================================
// Authentication & Security
// =============================================================================

/// Default access token lifetime in minutes
pub const DEFAULT_JWT_EXPIRATION_MINUTES: i64 = 15;

/// Longest accepted access token lifetime in minutes (30 days)
pub const MAX_JWT_EXPIRATION_MINUTES: i64 = 30 * 24 * 60;

/// Minimum JWT secret length (security requirement)
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Token type, also the Authorization scheme name
pub const TOKEN_TYPE_BEARER: &str = "Bearer";

// =============================================================================
// User Roles
// =============================================================================

/// Default role assigned to new users
pub const ROLE_USER: &str = "user";

/// Administrator role with elevated privileges
pub const ROLE_ADMIN: &str = "admin";

// =============================================================================
// Server Configuration
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 5000;

// =============================================================================
// Database
// =============================================================================

/// Default database connection URL (local SQLite file, created on first run)
pub const DEFAULT_DATABASE_URL: &str = "sqlite://notes.db?mode=rwc";

// =============================================================================
// Cache (Redis)
// =============================================================================

/// Cache key prefix for rate limiting
pub const CACHE_PREFIX_RATE_LIMIT: &str = "rate_limit:";

// =============================================================================
// Rate Limiting
// =============================================================================

/// Auth endpoints: requests per window
pub const RATE_LIMIT_AUTH_REQUESTS: u64 = 10;

/// Auth rate limit window in seconds (1 minute)
pub const RATE_LIMIT_AUTH_WINDOW_SECONDS: u64 = 60;

// =============================================================================
// Validation
// =============================================================================

/// Maximum username length (matches the users.username column)
pub const MAX_USERNAME_LENGTH: u64 = 80;

/// Maximum accepted password length, bounds hashing cost per request
pub const MAX_PASSWORD_LENGTH: u64 = 1024;

/// Maximum note title length (matches the notes.title column)
pub const MAX_NOTE_TITLE_LENGTH: u64 = 120;

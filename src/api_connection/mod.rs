pub mod connection;
pub mod endpoints;
pub mod rate_limit;

pub use connection::{validate_api_key, ApiConnectionError, GeminiClient};
pub use rate_limit::{RateLimitStats, RateLimiter};

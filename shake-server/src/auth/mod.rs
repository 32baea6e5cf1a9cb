//! Authentication: JWT, auth/manager middleware, rate limiting

pub mod jwt;
pub mod middleware;
pub mod rate_limit;

pub use jwt::{Claims, CurrentUser};
pub use middleware::{require_auth, require_manager};
pub use rate_limit::RateLimiter;

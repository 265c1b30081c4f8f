//! Authentication: JWT issuing and verification middleware.

pub mod jwt;

pub use jwt::{Claims, Identity, auth_middleware, create_token, require_admin};

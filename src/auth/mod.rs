pub mod claims;
pub mod jwt;
pub mod middleware;
pub mod password;
pub mod utils;

pub use claims::Claims;
pub use jwt::{IssuedToken, JwtService};
pub use middleware::{AuthMiddleware, AuthenticatedUser, OptionalUser};
pub use password::{hash_password, verify_password};
pub use utils::require_owner;

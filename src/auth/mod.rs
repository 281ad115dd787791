pub mod context;
pub mod middleware;

pub use context::{AuthContext, UserRole};
pub use middleware::{auth_middleware, ROLE_HEADER, USER_HEADER};

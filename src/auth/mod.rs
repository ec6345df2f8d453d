//! Authentication Module
//! Stateless signed sessions, role gates and the account store boundary

pub mod account_store;
pub mod api;
pub mod denylist;
pub mod errors;
pub mod gate;
pub mod jwt;
pub mod middleware;
pub mod models;

pub use account_store::{AccountStore, SqliteAccountStore};
pub use denylist::TokenDenylist;
pub use errors::AuthError;
pub use gate::{authorize, require_owner, require_role, Requirement, SessionGate};
pub use jwt::JwtHandler;
pub use middleware::auth_middleware;
pub use models::{Account, Identity, Role};

//! `storekeep-auth`: authorization policy and anti-replay tokens.
//!
//! Identity is established by the fronting host; this crate only decides what
//! an already-identified operator may do. Decoupled from HTTP and storage.

pub mod authorize;
pub mod permissions;
pub mod roles;
pub mod tokens;

pub use authorize::{authorize, AuthzError, Principal};
pub use permissions::Permission;
pub use roles::{permissions_for_role, Role};
pub use tokens::{ActionToken, ActionTokens, IssuedToken, MaintenanceAction, TokenError};

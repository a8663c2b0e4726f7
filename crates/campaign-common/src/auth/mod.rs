//! Authentication utilities

mod jwt;
mod session;

pub use jwt::{Claims, SessionTokenService};
pub use session::TokenSession;

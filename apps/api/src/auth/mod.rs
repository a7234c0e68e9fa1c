//! Bearer-token authentication: Argon2id password storage, JWT issuance on
//! login, and request extractors that resolve the token back to a live user.

pub mod extract;
pub mod handlers;
pub mod jwt;
pub mod password;

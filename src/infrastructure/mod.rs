//! Infrastructure layer - External service implementations

pub mod http_client;
pub mod logging;
pub mod user;

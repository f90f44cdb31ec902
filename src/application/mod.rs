//! Application layer services implementing business logic.
//!
//! Services consume repository and cache traits and expose a small API to
//! the HTTP handlers and the admin CLI.
//!
//! - [`services::link_service::LinkService`] - Short link creation, resolution and listing

pub mod services;

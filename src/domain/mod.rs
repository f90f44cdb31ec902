//! Domain layer containing business entities and storage contracts.
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//!
//! The domain layer does not depend on the infrastructure or presentation
//! modules of this crate; [`repositories::StoreError`] does carry the
//! underlying `sqlx::Error` as its source. Business rules live in
//! [`crate::application::services`].

pub mod entities;
pub mod repositories;

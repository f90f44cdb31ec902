//! Short code and URL helpers used by the resolution engine.
//!
//! - [`code_generator`] - Random short code generation
//! - [`code_validator`] - Format and reserved-word checks for custom codes
//! - [`url_policy`] - Destination URL acceptance policy

pub mod code_generator;
pub mod code_validator;
pub mod url_policy;

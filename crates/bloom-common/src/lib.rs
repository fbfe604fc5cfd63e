//! # Bloom Common
//!
//! Shared types, constants, and errors used across SkillBloom components.
//!
//! ## Modules
//! - `types` - Navigation state, screens, and catalog records
//! - `error` - Common error types
//! - `constants` - Routes, protocol limits, and defaults

pub mod constants;
pub mod error;
pub mod types;

pub use error::BloomError;
pub use types::*;

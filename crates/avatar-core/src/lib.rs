//! Avatar Core - Fundamental types and primitives
//!
//! This crate defines the core types shared by every other crate:
//! - Emotion state and its normalization (EmotionVector)
//! - Selection catalogs (avatars, voices, camera angles, backgrounds)
//! - Upload references handed over by the host application
//! - Identifiers for generation ramps and captures
//! - The error type

pub mod catalog;
pub mod emotion;
pub mod error;
pub mod id;
pub mod upload;

pub use catalog::*;
pub use emotion::*;
pub use error::*;
pub use id::*;
pub use upload::*;
